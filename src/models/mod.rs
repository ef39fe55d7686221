//! Core data types shared by the attempt controller, the wire protocol,
//! and the quiz bank.

mod quiz;

pub use quiz::{AnswerMap, Question, Quiz, QuizSummary, Score};
