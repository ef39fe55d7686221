//! The quiz service collaborator.
//!
//! The attempt flow only ever talks to a [`QuizService`]; whether the
//! quizzes live on a remote host or in a local bank file is invisible to
//! the controller and the UI.

mod local;
mod remote;

use std::fmt;

pub use local::LocalService;
pub use remote::RemoteService;

use crate::models::{AnswerMap, Quiz, QuizSummary, Score};

/// Operations the attempt flow needs from a quiz service.
///
/// `submit_attempt` borrows the answer map; a failed submission leaves
/// the caller's answers untouched.
#[allow(async_fn_in_trait)]
pub trait QuizService {
    /// List the quizzes available to take.
    async fn list_quizzes(&mut self) -> Result<Vec<QuizSummary>, ServiceError>;

    /// Fetch the ordered question list for a quiz. Fails distinguishably
    /// rather than returning a partially-formed quiz.
    async fn fetch_quiz(&mut self, quiz_id: &str) -> Result<Quiz, ServiceError>;

    /// Submit a completed answer map for grading.
    async fn submit_attempt(
        &mut self,
        quiz_id: &str,
        answers: &AnswerMap,
    ) -> Result<Score, ServiceError>;
}

/// Failure talking to the quiz service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Could not reach the service at all.
    Connect(String),
    /// The connection dropped or errored mid-request.
    Transport(String),
    /// The service answered with something the protocol does not allow.
    Protocol(String),
    /// No quiz with the requested id.
    NotFound(String),
    /// The service refused the submission (with its reason).
    Rejected(String),
    /// No response within the request deadline.
    Timeout,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Connect(msg) => write!(f, "Failed to connect: {}", msg),
            ServiceError::Transport(msg) => write!(f, "Connection error: {}", msg),
            ServiceError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            ServiceError::NotFound(quiz_id) => write!(f, "No quiz with id {}", quiz_id),
            ServiceError::Rejected(reason) => write!(f, "Submission rejected: {}", reason),
            ServiceError::Timeout => write!(f, "The service did not respond in time"),
        }
    }
}

impl std::error::Error for ServiceError {}
