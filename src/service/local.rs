//! Quiz service backed by a local bank file, for offline practice.

use std::path::Path;

use crate::data::{LoadError, QuizBank, StoredQuiz};
use crate::models::{AnswerMap, Quiz, QuizSummary, Score};

use super::{QuizService, ServiceError};

/// Serves and grades quizzes from an in-process [`QuizBank`].
pub struct LocalService {
    bank: QuizBank,
}

impl LocalService {
    pub fn new(bank: QuizBank) -> Self {
        Self { bank }
    }

    /// Load the bank from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self::new(QuizBank::from_json(path)?))
    }
}

impl QuizService for LocalService {
    async fn list_quizzes(&mut self) -> Result<Vec<QuizSummary>, ServiceError> {
        Ok(self.bank.summaries())
    }

    async fn fetch_quiz(&mut self, quiz_id: &str) -> Result<Quiz, ServiceError> {
        self.bank
            .get(quiz_id)
            .map(StoredQuiz::to_quiz)
            .ok_or_else(|| ServiceError::NotFound(quiz_id.to_string()))
    }

    async fn submit_attempt(
        &mut self,
        quiz_id: &str,
        answers: &AnswerMap,
    ) -> Result<Score, ServiceError> {
        let quiz = self
            .bank
            .get(quiz_id)
            .ok_or_else(|| ServiceError::NotFound(quiz_id.to_string()))?;

        quiz.grade(answers)
            .map_err(|e| ServiceError::Rejected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"[
        {
            "id": "chem-101",
            "title": "Periodic Table Basics",
            "questions": [
                {
                    "id": "q1",
                    "text": "Which of these is not a chemical element?",
                    "options": {"a": "Gold", "b": "Iron", "c": "Sulphur", "d": "Fiber"},
                    "correct_option": "d"
                }
            ]
        }
    ]"#;

    fn service() -> LocalService {
        LocalService::new(QuizBank::from_str(BANK).unwrap())
    }

    #[tokio::test]
    async fn fetch_known_and_unknown_quiz() {
        let mut svc = service();

        let quiz = svc.fetch_quiz("chem-101").await.unwrap();
        assert_eq!(quiz.questions.len(), 1);

        match svc.fetch_quiz("bad-id").await {
            Err(ServiceError::NotFound(quiz_id)) => assert_eq!(quiz_id, "bad-id"),
            other => panic!("expected NotFound, got {:?}", other.map(|q| q.id)),
        }
    }

    #[tokio::test]
    async fn grades_submission_and_leaves_answers_untouched() {
        let mut svc = service();

        let answers: AnswerMap = [("q1".to_string(), "d".to_string())].into();
        let before = answers.clone();

        let score = svc.submit_attempt("chem-101", &answers).await.unwrap();
        assert_eq!(score, Score { score: 1, total: 1 });
        assert_eq!(answers, before);
    }

    #[tokio::test]
    async fn rejects_invalid_submission_with_reason() {
        let mut svc = service();

        let answers: AnswerMap = [("q1".to_string(), "z".to_string())].into();
        match svc.submit_attempt("chem-101", &answers).await {
            Err(ServiceError::Rejected(reason)) => {
                assert!(reason.contains("q1"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
