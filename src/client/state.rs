//! View state for the student client.

use crate::attempt::Attempt;
use crate::models::QuizSummary;

/// Which screen the client is on.
pub enum Screen {
    /// Picking a quiz from the service's list.
    Browsing {
        quizzes: Vec<QuizSummary>,
        cursor: usize,
    },

    /// Inside an attempt; the attempt's phase decides what is drawn.
    Taking,
}

/// State of the student client: the current screen, the attempt, and the
/// cursor/status bookkeeping the attempt controller does not care about.
pub struct StudentApp {
    pub screen: Screen,
    pub attempt: Attempt,
    /// Id of the quiz being taken, kept for re-entry after a failure.
    pub quiz_id: Option<String>,
    /// Highlighted option on the current question.
    pub option_cursor: usize,
    /// Transient one-line message (rejected submit, service errors).
    pub status: Option<String>,
    pub should_quit: bool,
}

impl StudentApp {
    /// Start at the quiz-select screen.
    pub fn browsing(quizzes: Vec<QuizSummary>) -> Self {
        Self {
            screen: Screen::Browsing { quizzes, cursor: 0 },
            attempt: Attempt::new(),
            quiz_id: None,
            option_cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Start directly inside an attempt for the given quiz.
    pub fn taking(quiz_id: String) -> Self {
        Self {
            screen: Screen::Taking,
            attempt: Attempt::new(),
            quiz_id: Some(quiz_id),
            option_cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Begin (or re-enter) an attempt for a quiz. Replaces any previous
    /// attempt state wholesale.
    pub fn begin_taking(&mut self, quiz_id: &str) {
        self.screen = Screen::Taking;
        self.attempt = Attempt::new();
        self.quiz_id = Some(quiz_id.to_string());
        self.option_cursor = 0;
        self.status = None;
    }

    /// Quiz id under the cursor on the select screen.
    pub fn highlighted_quiz(&self) -> Option<&str> {
        match &self.screen {
            Screen::Browsing { quizzes, cursor } => {
                quizzes.get(*cursor).map(|s| s.id.as_str())
            }
            Screen::Taking => None,
        }
    }

    pub fn list_cursor_down(&mut self) {
        if let Screen::Browsing { quizzes, cursor } = &mut self.screen {
            let max = quizzes.len().saturating_sub(1);
            *cursor = (*cursor + 1).min(max);
        }
    }

    pub fn list_cursor_up(&mut self) {
        if let Screen::Browsing { cursor, .. } = &mut self.screen {
            *cursor = cursor.saturating_sub(1);
        }
    }

    fn option_count(&self) -> usize {
        self.attempt
            .current_question()
            .map_or(0, |q| q.options.len())
    }

    pub fn option_cursor_down(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    pub fn option_cursor_up(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    /// Option key under the cursor for the current question.
    pub fn highlighted_option(&self) -> Option<String> {
        self.attempt
            .current_question()
            .and_then(|q| q.options.keys().nth(self.option_cursor).cloned())
    }

    /// Put the cursor on the recorded answer for the current question,
    /// or the first option if it is unanswered. Called after moving
    /// between questions.
    pub fn sync_option_cursor(&mut self) {
        let position = self.attempt.current_question().and_then(|q| {
            let chosen = self.attempt.answer_for(&q.id)?;
            q.options.keys().position(|k| k == chosen)
        });
        self.option_cursor = position.unwrap_or(0);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{Question, Quiz};

    fn loaded_app() -> StudentApp {
        let mut app = StudentApp::taking("quiz-1".to_string());
        app.attempt.quiz_loaded(Quiz {
            id: "quiz-1".to_string(),
            title: "Sample".to_string(),
            questions: vec![Question {
                id: "q1".to_string(),
                text: "?".to_string(),
                options: BTreeMap::from([
                    ("a".to_string(), "one".to_string()),
                    ("b".to_string(), "two".to_string()),
                    ("c".to_string(), "three".to_string()),
                ]),
            }],
        });
        app
    }

    #[test]
    fn option_cursor_wraps_both_ways() {
        let mut app = loaded_app();

        app.option_cursor_up();
        assert_eq!(app.option_cursor, 2);
        app.option_cursor_down();
        assert_eq!(app.option_cursor, 0);
    }

    #[test]
    fn highlighted_option_follows_cursor() {
        let mut app = loaded_app();
        assert_eq!(app.highlighted_option().as_deref(), Some("a"));

        app.option_cursor_down();
        assert_eq!(app.highlighted_option().as_deref(), Some("b"));
    }

    #[test]
    fn sync_positions_cursor_on_recorded_answer() {
        let mut app = loaded_app();
        app.attempt.select_answer("q1", "c").unwrap();

        app.sync_option_cursor();
        assert_eq!(app.option_cursor, 2);
    }

    #[test]
    fn list_cursor_clamps_at_both_ends() {
        let summaries = vec![
            QuizSummary {
                id: "a".to_string(),
                title: "A".to_string(),
                question_count: 1,
            },
            QuizSummary {
                id: "b".to_string(),
                title: "B".to_string(),
                question_count: 2,
            },
        ];
        let mut app = StudentApp::browsing(summaries);

        app.list_cursor_up();
        assert_eq!(app.highlighted_quiz(), Some("a"));

        app.list_cursor_down();
        app.list_cursor_down();
        assert_eq!(app.highlighted_quiz(), Some("b"));
    }
}
