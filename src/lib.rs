//! # quiz-attempt
//!
//! A terminal client and service for taking multiple-choice quizzes.
//!
//! The attempt flow is a small state machine ([`Attempt`]) driven by the
//! TUI client against a [`QuizService`]: either a remote host reached
//! over WebSocket, or a local quiz bank file for offline practice. The
//! service side grades submissions; the client never sees answer keys.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_attempt::{client, AppError, LocalService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     // Practice against a local quiz bank
//!     let service = LocalService::from_json("quizzes.json")?;
//!     client::run(service, Some("chem-101".to_string())).await
//! }
//! ```

pub mod attempt;
pub mod client;
pub mod data;
pub mod models;
pub mod protocol;
pub mod server;
pub mod service;
pub mod terminal;

use std::io;

pub use attempt::{Attempt, AttemptError, AttemptPhase, Submission};
pub use data::{LoadError, QuizBank};
pub use models::{AnswerMap, Question, Quiz, QuizSummary, Score};
pub use service::{LocalService, QuizService, RemoteService, ServiceError};

/// Error type for top-level client and server operations.
#[derive(Debug)]
pub enum AppError {
    /// Error loading the quiz bank.
    Load(LoadError),
    /// Error talking to the quiz service.
    Service(ServiceError),
    /// IO error from the terminal or the network listener.
    Io(io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Load(e) => write!(f, "Failed to load quiz bank: {}", e),
            AppError::Service(e) => write!(f, "Quiz service error: {}", e),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Load(e) => Some(e),
            AppError::Service(e) => Some(e),
            AppError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Load(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}
