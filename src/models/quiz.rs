use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Map from question id to the selected option key.
///
/// At most one entry per question; re-selecting overwrites.
pub type AnswerMap = BTreeMap<String, String>;

/// A quiz as presented to a student: ordered questions, no answer keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// A single question with its keyed options (e.g. "a" to "d").
///
/// Options are keyed rather than positional so an answer survives any
/// re-ordering of the option list on the grading side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: BTreeMap<String, String>,
}

impl Question {
    pub fn has_option(&self, option_key: &str) -> bool {
        self.options.contains_key(option_key)
    }
}

/// Listing entry for the quiz-select screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

/// Graded outcome of a submitted attempt.
///
/// Produced only by the grading side; the client never computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub score: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.score as f64 / self.total as f64) * 100.0
        }
    }
}
