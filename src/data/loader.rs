use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::models::{AnswerMap, Question, Quiz, QuizSummary, Score};

/// Error loading or validating a quiz bank file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not valid JSON for a quiz bank.
    Parse(serde_json::Error),
    /// The bank parsed but violates a structural rule.
    Invalid(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "Failed to read quiz bank: {}", e),
            LoadError::Parse(e) => write!(f, "Failed to parse quiz bank: {}", e),
            LoadError::Invalid(msg) => write!(f, "Invalid quiz bank: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Why a submitted answer map could not be graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    /// A question in the quiz has no entry in the answer map.
    Unanswered(String),
    /// An answer references a question not in the quiz.
    UnknownQuestion(String),
    /// An answer references an option the question does not have.
    UnknownOption { question: String, option: String },
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::Unanswered(id) => write!(f, "Question {} was not answered", id),
            GradeError::UnknownQuestion(id) => {
                write!(f, "Question {} is not part of this quiz", id)
            }
            GradeError::UnknownOption { question, option } => {
                write!(f, "Question {} has no option {}", question, option)
            }
        }
    }
}

impl std::error::Error for GradeError {}

/// A question as stored in the bank, with its answer key.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredQuestion {
    pub id: String,
    pub text: String,
    pub options: BTreeMap<String, String>,
    pub correct_option: String,
}

/// A quiz as stored in the bank.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredQuiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<StoredQuestion>,
}

impl StoredQuiz {
    /// The student-facing view of this quiz, answer keys stripped.
    pub fn to_quiz(&self) -> Quiz {
        Quiz {
            id: self.id.clone(),
            title: self.title.clone(),
            questions: self
                .questions
                .iter()
                .map(|q| Question {
                    id: q.id.clone(),
                    text: q.text.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            question_count: self.questions.len(),
        }
    }

    /// Grade a complete answer map against this quiz's answer keys.
    ///
    /// Every question must be answered and every answer must reference a
    /// real question and option; otherwise the submission is rejected
    /// as a whole and nothing is recorded.
    pub fn grade(&self, answers: &AnswerMap) -> Result<Score, GradeError> {
        for question_id in answers.keys() {
            if !self.questions.iter().any(|q| &q.id == question_id) {
                return Err(GradeError::UnknownQuestion(question_id.clone()));
            }
        }

        let mut score = 0;
        for question in &self.questions {
            let Some(selected) = answers.get(&question.id) else {
                return Err(GradeError::Unanswered(question.id.clone()));
            };
            if !question.options.contains_key(selected) {
                return Err(GradeError::UnknownOption {
                    question: question.id.clone(),
                    option: selected.clone(),
                });
            }
            if *selected == question.correct_option {
                score += 1;
            }
        }

        Ok(Score {
            score,
            total: self.questions.len(),
        })
    }
}

/// The full set of quizzes served by one host, in file order.
#[derive(Debug, Clone)]
pub struct QuizBank {
    quizzes: Vec<StoredQuiz>,
}

impl QuizBank {
    /// Load and validate a bank from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse and validate a bank from a JSON string.
    pub fn from_str(content: &str) -> Result<Self, LoadError> {
        let quizzes: Vec<StoredQuiz> = serde_json::from_str(content)?;
        validate(&quizzes)?;
        Ok(Self { quizzes })
    }

    pub fn get(&self, quiz_id: &str) -> Option<&StoredQuiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn summaries(&self) -> Vec<QuizSummary> {
        self.quizzes.iter().map(StoredQuiz::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

fn validate(quizzes: &[StoredQuiz]) -> Result<(), LoadError> {
    if quizzes.is_empty() {
        return Err(LoadError::Invalid("bank contains no quizzes".to_string()));
    }

    let mut quiz_ids = HashSet::new();
    for quiz in quizzes {
        if !quiz_ids.insert(&quiz.id) {
            return Err(LoadError::Invalid(format!("duplicate quiz id {}", quiz.id)));
        }
        if quiz.questions.is_empty() {
            return Err(LoadError::Invalid(format!(
                "quiz {} has no questions",
                quiz.id
            )));
        }

        let mut question_ids = HashSet::new();
        for question in &quiz.questions {
            if !question_ids.insert(&question.id) {
                return Err(LoadError::Invalid(format!(
                    "quiz {} has duplicate question id {}",
                    quiz.id, question.id
                )));
            }
            if question.options.is_empty() {
                return Err(LoadError::Invalid(format!(
                    "question {} in quiz {} has no options",
                    question.id, quiz.id
                )));
            }
            if !question.options.contains_key(&question.correct_option) {
                return Err(LoadError::Invalid(format!(
                    "question {} in quiz {} marks {} correct but has no such option",
                    question.id, quiz.id, question.correct_option
                )));
            }
        }
    }

    Ok(())
}
