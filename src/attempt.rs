//! Attempt state machine.
//!
//! Owns everything about one in-progress quiz attempt: the loaded quiz,
//! the current question index, the answer map, and the submission phase.
//! The controller performs no IO itself; the event loop fetches and
//! submits, then feeds the outcomes back through `quiz_loaded`,
//! `load_failed`, `submit_succeeded` and `submit_failed`.

use std::fmt;

use crate::models::{AnswerMap, Question, Quiz, Score};

/// Where the attempt currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    /// Waiting for the quiz to arrive from the service.
    Loading,
    /// Quiz loaded, the student is answering.
    Ready,
    /// A submission is in flight; input is rejected until it resolves.
    Submitting,
    /// Graded result received. Terminal.
    Submitted,
    /// The quiz could not be loaded. Terminal.
    Failed,
}

/// Why an attempt operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// No quiz is loaded yet (or loading failed).
    NotReady,
    /// A submission is already in flight.
    SubmissionInFlight,
    /// The attempt has already been submitted and graded.
    AlreadySubmitted,
    /// The question id does not belong to the loaded quiz.
    UnknownQuestion(String),
    /// The option key is not one of the question's options.
    UnknownOption { question: String, option: String },
    /// Not every question has an answer yet.
    Incomplete { answered: usize, total: usize },
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::NotReady => write!(f, "No quiz is loaded"),
            AttemptError::SubmissionInFlight => write!(f, "Submission already in progress"),
            AttemptError::AlreadySubmitted => write!(f, "Attempt was already submitted"),
            AttemptError::UnknownQuestion(id) => {
                write!(f, "Question {} is not part of this quiz", id)
            }
            AttemptError::UnknownOption { question, option } => {
                write!(f, "Question {} has no option {}", question, option)
            }
            AttemptError::Incomplete { answered, total } => {
                write!(f, "Only {} of {} questions answered", answered, total)
            }
        }
    }
}

impl std::error::Error for AttemptError {}

/// Snapshot handed to the driver when a submission begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub quiz_id: String,
    pub answers: AnswerMap,
}

/// One student's pass through a quiz.
pub struct Attempt {
    phase: AttemptPhase,
    quiz: Option<Quiz>,
    current: usize,
    answers: AnswerMap,
    result: Option<Score>,
    load_error: Option<String>,
    submit_error: Option<String>,
}

impl Attempt {
    /// Create a fresh attempt, waiting for its quiz.
    pub fn new() -> Self {
        Self {
            phase: AttemptPhase::Loading,
            quiz: None,
            current: 0,
            answers: AnswerMap::new(),
            result: None,
            load_error: None,
            submit_error: None,
        }
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    /// Current question index. Always within bounds while a quiz is held.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref().and_then(|q| q.questions.get(self.current))
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.as_ref().map_or(0, |q| q.questions.len())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.quiz
            .as_ref()
            .is_some_and(|q| self.answers.len() == q.questions.len())
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn result(&self) -> Option<Score> {
        self.result
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Last submit failure, kept until the student acts again.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Accept the fetched quiz. Only meaningful while `Loading`; a stale
    /// or repeated delivery is ignored. An empty quiz counts as a load
    /// failure rather than becoming `Ready`.
    pub fn quiz_loaded(&mut self, quiz: Quiz) {
        if self.phase != AttemptPhase::Loading {
            return;
        }

        if quiz.questions.is_empty() {
            self.load_failed(format!("Quiz {} has no questions", quiz.id));
            return;
        }

        self.quiz = Some(quiz);
        self.current = 0;
        self.answers.clear();
        self.phase = AttemptPhase::Ready;
    }

    /// Record that the quiz fetch failed. Terminal for this attempt; the
    /// student re-enters the flow with a fresh `Attempt`.
    pub fn load_failed(&mut self, reason: impl Into<String>) {
        if self.phase != AttemptPhase::Loading {
            return;
        }

        self.load_error = Some(reason.into());
        self.phase = AttemptPhase::Failed;
    }

    /// Record the chosen option for a question. Re-selecting overwrites.
    /// Never advances the index.
    pub fn select_answer(
        &mut self,
        question_id: &str,
        option_key: &str,
    ) -> Result<(), AttemptError> {
        let quiz = self.require_ready()?;

        let Some(question) = quiz.question(question_id) else {
            return Err(AttemptError::UnknownQuestion(question_id.to_string()));
        };
        if !question.has_option(option_key) {
            return Err(AttemptError::UnknownOption {
                question: question_id.to_string(),
                option: option_key.to_string(),
            });
        }

        self.answers
            .insert(question_id.to_string(), option_key.to_string());
        self.submit_error = None;
        Ok(())
    }

    /// Move to the next question. No-op at the last question or outside
    /// `Ready`.
    pub fn go_next(&mut self) {
        if self.phase != AttemptPhase::Ready {
            return;
        }
        if self.current + 1 < self.total_questions() {
            self.current += 1;
        }
    }

    /// Move to the previous question. No-op at the first question or
    /// outside `Ready`.
    pub fn go_previous(&mut self) {
        if self.phase != AttemptPhase::Ready {
            return;
        }
        self.current = self.current.saturating_sub(1);
    }

    /// Start submitting. Requires `Ready` and a complete answer map; on
    /// success the attempt moves to `Submitting` and the returned snapshot
    /// is what the driver sends. While `Submitting`, further calls are
    /// rejected, so rapid repeat submits produce a single service call.
    pub fn begin_submit(&mut self) -> Result<Submission, AttemptError> {
        let quiz = self.require_ready()?;

        let total = quiz.questions.len();
        if self.answers.len() < total {
            return Err(AttemptError::Incomplete {
                answered: self.answers.len(),
                total,
            });
        }

        let submission = Submission {
            quiz_id: quiz.id.clone(),
            answers: self.answers.clone(),
        };
        self.submit_error = None;
        self.phase = AttemptPhase::Submitting;
        Ok(submission)
    }

    /// Accept the graded result. Ignored unless a submission is in flight.
    pub fn submit_succeeded(&mut self, score: Score) {
        if self.phase != AttemptPhase::Submitting {
            return;
        }

        self.result = Some(score);
        self.phase = AttemptPhase::Submitted;
    }

    /// Record a failed submission and return to `Ready`. Answers and the
    /// current index are preserved so the student can retry.
    pub fn submit_failed(&mut self, reason: impl Into<String>) {
        if self.phase != AttemptPhase::Submitting {
            return;
        }

        self.submit_error = Some(reason.into());
        self.phase = AttemptPhase::Ready;
    }

    fn require_ready(&self) -> Result<&Quiz, AttemptError> {
        match (self.phase, self.quiz.as_ref()) {
            (AttemptPhase::Ready, Some(quiz)) => Ok(quiz),
            (AttemptPhase::Submitting, _) => Err(AttemptError::SubmissionInFlight),
            (AttemptPhase::Submitted, _) => Err(AttemptError::AlreadySubmitted),
            _ => Err(AttemptError::NotReady),
        }
    }
}

impl Default for Attempt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{Question, Quiz};

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: BTreeMap::from([
                ("a".to_string(), "first".to_string()),
                ("b".to_string(), "second".to_string()),
                ("c".to_string(), "third".to_string()),
                ("d".to_string(), "fourth".to_string()),
            ]),
        }
    }

    fn three_question_quiz() -> Quiz {
        Quiz {
            id: "quiz-1".to_string(),
            title: "Sample".to_string(),
            questions: vec![question("q1"), question("q2"), question("q3")],
        }
    }

    fn ready_attempt() -> Attempt {
        let mut attempt = Attempt::new();
        attempt.quiz_loaded(three_question_quiz());
        assert_eq!(attempt.phase(), AttemptPhase::Ready);
        attempt
    }

    #[test]
    fn starts_loading_and_becomes_ready() {
        let mut attempt = Attempt::new();
        assert_eq!(attempt.phase(), AttemptPhase::Loading);
        assert!(attempt.current_question().is_none());

        attempt.quiz_loaded(three_question_quiz());
        assert_eq!(attempt.phase(), AttemptPhase::Ready);
        assert_eq!(attempt.current_index(), 0);
        assert_eq!(attempt.answered_count(), 0);
        assert_eq!(attempt.total_questions(), 3);
    }

    #[test]
    fn load_failure_is_terminal_and_exposes_no_quiz() {
        let mut attempt = Attempt::new();
        attempt.load_failed("connection refused");

        assert_eq!(attempt.phase(), AttemptPhase::Failed);
        assert!(attempt.quiz().is_none());
        assert_eq!(attempt.load_error(), Some("connection refused"));

        // A quiz arriving after the failure is stale and ignored.
        attempt.quiz_loaded(three_question_quiz());
        assert_eq!(attempt.phase(), AttemptPhase::Failed);
        assert!(attempt.quiz().is_none());
    }

    #[test]
    fn empty_quiz_is_a_load_failure() {
        let mut attempt = Attempt::new();
        attempt.quiz_loaded(Quiz {
            id: "empty".to_string(),
            title: "Empty".to_string(),
            questions: Vec::new(),
        });

        assert_eq!(attempt.phase(), AttemptPhase::Failed);
        assert!(attempt.quiz().is_none());
    }

    #[test]
    fn index_stays_within_bounds() {
        let mut attempt = ready_attempt();

        attempt.go_previous();
        assert_eq!(attempt.current_index(), 0);

        attempt.go_next();
        attempt.go_next();
        assert_eq!(attempt.current_index(), 2);

        attempt.go_next();
        attempt.go_next();
        assert_eq!(attempt.current_index(), 2);

        attempt.go_previous();
        assert_eq!(attempt.current_index(), 1);
    }

    #[test]
    fn reselecting_overwrites_single_entry() {
        let mut attempt = ready_attempt();

        attempt.select_answer("q1", "a").unwrap();
        attempt.select_answer("q1", "b").unwrap();

        assert_eq!(attempt.answered_count(), 1);
        assert_eq!(attempt.answer_for("q1"), Some("b"));
    }

    #[test]
    fn selecting_does_not_advance_index() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "a").unwrap();
        assert_eq!(attempt.current_index(), 0);
    }

    #[test]
    fn rejects_unknown_question_and_option() {
        let mut attempt = ready_attempt();

        assert_eq!(
            attempt.select_answer("q9", "a"),
            Err(AttemptError::UnknownQuestion("q9".to_string()))
        );
        assert_eq!(
            attempt.select_answer("q1", "z"),
            Err(AttemptError::UnknownOption {
                question: "q1".to_string(),
                option: "z".to_string(),
            })
        );
        assert_eq!(attempt.answered_count(), 0);
    }

    #[test]
    fn incomplete_submit_is_rejected_without_side_effects() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "a").unwrap();
        attempt.select_answer("q2", "b").unwrap();

        let err = attempt.begin_submit().unwrap_err();
        assert_eq!(
            err,
            AttemptError::Incomplete {
                answered: 2,
                total: 3,
            }
        );
        assert_eq!(attempt.phase(), AttemptPhase::Ready);
        assert_eq!(attempt.answered_count(), 2);
    }

    #[test]
    fn happy_path_submits_and_stores_result() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "b").unwrap();
        attempt.select_answer("q2", "a").unwrap();
        attempt.select_answer("q3", "d").unwrap();

        let submission = attempt.begin_submit().unwrap();
        assert_eq!(submission.quiz_id, "quiz-1");
        assert_eq!(submission.answers.len(), 3);
        assert_eq!(submission.answers.get("q3").map(String::as_str), Some("d"));
        assert_eq!(attempt.phase(), AttemptPhase::Submitting);

        attempt.submit_succeeded(Score { score: 2, total: 3 });
        assert_eq!(attempt.phase(), AttemptPhase::Submitted);
        assert_eq!(attempt.result(), Some(Score { score: 2, total: 3 }));
    }

    #[test]
    fn at_most_one_submission_in_flight() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "a").unwrap();
        attempt.select_answer("q2", "a").unwrap();
        attempt.select_answer("q3", "a").unwrap();

        assert!(attempt.begin_submit().is_ok());
        // Second press before the response arrives.
        assert_eq!(
            attempt.begin_submit().unwrap_err(),
            AttemptError::SubmissionInFlight
        );
    }

    #[test]
    fn input_rejected_while_submitting() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "a").unwrap();
        attempt.select_answer("q2", "a").unwrap();
        attempt.select_answer("q3", "a").unwrap();
        attempt.begin_submit().unwrap();

        assert_eq!(
            attempt.select_answer("q1", "b"),
            Err(AttemptError::SubmissionInFlight)
        );

        attempt.go_next();
        attempt.go_previous();
        assert_eq!(attempt.current_index(), 0);
    }

    #[test]
    fn failed_submit_preserves_answers_and_allows_retry() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "a").unwrap();
        attempt.select_answer("q2", "b").unwrap();
        attempt.select_answer("q3", "c").unwrap();
        let before = attempt.answers().clone();

        attempt.begin_submit().unwrap();
        attempt.submit_failed("service unavailable");

        assert_eq!(attempt.phase(), AttemptPhase::Ready);
        assert_eq!(attempt.answers(), &before);
        assert_eq!(attempt.submit_error(), Some("service unavailable"));

        // Retry goes through with the same answers.
        let submission = attempt.begin_submit().unwrap();
        assert_eq!(submission.answers, before);
        assert!(attempt.submit_error().is_none());

        attempt.submit_succeeded(Score { score: 3, total: 3 });
        assert_eq!(attempt.phase(), AttemptPhase::Submitted);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut attempt = ready_attempt();
        attempt.select_answer("q1", "a").unwrap();
        attempt.select_answer("q2", "a").unwrap();
        attempt.select_answer("q3", "a").unwrap();
        attempt.begin_submit().unwrap();
        attempt.submit_succeeded(Score { score: 1, total: 3 });

        assert_eq!(
            attempt.begin_submit().unwrap_err(),
            AttemptError::AlreadySubmitted
        );
        assert_eq!(
            attempt.select_answer("q1", "b"),
            Err(AttemptError::AlreadySubmitted)
        );

        // A late duplicate response must not overwrite the stored result.
        attempt.submit_succeeded(Score { score: 0, total: 3 });
        assert_eq!(attempt.result(), Some(Score { score: 1, total: 3 }));
    }

    #[test]
    fn operations_before_load_are_rejected() {
        let mut attempt = Attempt::new();

        assert_eq!(
            attempt.select_answer("q1", "a"),
            Err(AttemptError::NotReady)
        );
        assert_eq!(attempt.begin_submit().unwrap_err(), AttemptError::NotReady);

        attempt.go_next();
        assert_eq!(attempt.current_index(), 0);
    }

    #[test]
    fn stale_submit_outcomes_are_ignored_in_ready() {
        let mut attempt = ready_attempt();

        attempt.submit_succeeded(Score { score: 3, total: 3 });
        assert_eq!(attempt.phase(), AttemptPhase::Ready);
        assert!(attempt.result().is_none());

        attempt.submit_failed("late error");
        assert_eq!(attempt.phase(), AttemptPhase::Ready);
        assert!(attempt.submit_error().is_none());
    }
}
