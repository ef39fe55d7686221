//! Protocol messages for client-service communication.
//!
//! All messages are serialized as JSON over WebSocket. Every client
//! request gets exactly one response message.

use serde::{Deserialize, Serialize};

use crate::models::{AnswerMap, Quiz, QuizSummary};

/// Messages sent from the attempt client to the quiz service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// List the quizzes available to take.
    ListQuizzes,

    /// Fetch a quiz by id to start an attempt.
    FetchQuiz { quiz_id: String },

    /// Submit a completed answer map for grading.
    SubmitAttempt { quiz_id: String, answers: AnswerMap },
}

/// Messages sent from the quiz service to the attempt client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Available quizzes.
    QuizList { quizzes: Vec<QuizSummary> },

    /// The requested quiz, with answer keys stripped.
    Quiz { quiz: Quiz },

    /// No quiz with the requested id exists.
    QuizNotFound { quiz_id: String },

    /// Submission graded; score is the count of correct answers.
    SubmitAccepted { score: usize, total: usize },

    /// Submission rejected (incomplete, unknown question or option).
    /// The client keeps its answers and may retry.
    SubmitRejected { reason: String },
}

/// Default service port.
pub const DEFAULT_PORT: u16 = 8914;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization() {
        let msg = ClientMessage::FetchQuiz {
            quiz_id: "chem-101".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"FetchQuiz\""));
        assert!(json.contains("chem-101"));

        let msg = ServerMessage::SubmitAccepted { score: 2, total: 3 };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"SubmitAccepted\""));
    }

    #[test]
    fn test_submit_round_trips_answer_keys() {
        let mut answers = AnswerMap::new();
        answers.insert("q1".to_string(), "b".to_string());
        answers.insert("q2".to_string(), "d".to_string());

        let msg = ClientMessage::SubmitAttempt {
            quiz_id: "chem-101".to_string(),
            answers,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ClientMessage = serde_json::from_str(&json).unwrap();

        match parsed {
            ClientMessage::SubmitAttempt { quiz_id, answers } => {
                assert_eq!(quiz_id, "chem-101");
                assert_eq!(answers.get("q1").map(String::as_str), Some("b"));
                assert_eq!(answers.len(), 2);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
