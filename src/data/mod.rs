//! Quiz bank storage: loading, validation, and grading.
//!
//! The bank is the only place that knows correct answers; everything
//! handed to a client goes through [`StoredQuiz::to_quiz`], which strips
//! the keys.

mod loader;

pub use loader::{GradeError, LoadError, QuizBank, StoredQuestion, StoredQuiz};
