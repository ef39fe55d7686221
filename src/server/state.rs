//! Service-side state: the quiz bank plus the record of graded attempts.

use std::net::SocketAddr;
use std::time::Instant;

use uuid::Uuid;

use crate::data::QuizBank;
use crate::models::Score;

/// One graded submission.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// Unique record id.
    pub id: Uuid,
    /// Peer the submission came from.
    pub peer: SocketAddr,
    pub quiz_id: String,
    pub score: Score,
    /// When the submission was graded.
    pub received_at: Instant,
}

/// State shared by all connections of one service host.
pub struct ServerState {
    pub bank: QuizBank,
    attempts: Vec<AttemptRecord>,
}

impl ServerState {
    pub fn new(bank: QuizBank) -> Self {
        Self {
            bank,
            attempts: Vec::new(),
        }
    }

    /// Record a graded attempt and return its 1-based ordinal among the
    /// attempts for that quiz.
    pub fn record_attempt(&mut self, peer: SocketAddr, quiz_id: &str, score: Score) -> usize {
        self.attempts.push(AttemptRecord {
            id: Uuid::new_v4(),
            peer,
            quiz_id: quiz_id.to_string(),
            score,
            received_at: Instant::now(),
        });
        self.attempts_for(quiz_id)
    }

    /// Number of graded attempts for a quiz.
    pub fn attempts_for(&self, quiz_id: &str) -> usize {
        self.attempts.iter().filter(|a| a.quiz_id == quiz_id).count()
    }

    pub fn total_attempts(&self) -> usize {
        self.attempts.len()
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
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
                    "text": "?",
                    "options": {"a": "yes", "b": "no"},
                    "correct_option": "a"
                }
            ]
        }
    ]"#;

    #[test]
    fn records_attempts_per_quiz() {
        let mut state = ServerState::new(QuizBank::from_str(BANK).unwrap());
        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let score = Score { score: 1, total: 1 };

        assert_eq!(state.record_attempt(peer, "chem-101", score), 1);
        assert_eq!(state.record_attempt(peer, "chem-101", score), 2);
        assert_eq!(state.record_attempt(peer, "other", score), 1);

        assert_eq!(state.total_attempts(), 3);
        assert_eq!(state.attempts_for("chem-101"), 2);
        assert_eq!(state.attempts().len(), 3);
    }
}
