//! Quiz service client over JSON-WebSocket.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::models::{AnswerMap, Quiz, QuizSummary, Score};
use crate::protocol::{ClientMessage, ServerMessage};

use super::{QuizService, ServiceError};

/// Bound on each request round-trip, so a dead service surfaces as an
/// error instead of a hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection to a remote quiz service host.
///
/// Requests are strictly sequential: one message out, one response in.
pub struct RemoteService {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RemoteService {
    /// Connect to the service at `host:port`.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ServiceError> {
        let url = format!("ws://{}:{}", host, port);
        let (stream, _) = tokio_tungstenite::connect_async(&url)
            .await
            .map_err(|e| ServiceError::Connect(e.to_string()))?;
        Ok(Self { stream })
    }

    async fn request(&mut self, msg: &ClientMessage) -> Result<ServerMessage, ServiceError> {
        let json = serde_json::to_string(msg).map_err(|e| ServiceError::Protocol(e.to_string()))?;
        self.stream
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        timeout(REQUEST_TIMEOUT, self.read_response())
            .await
            .map_err(|_| ServiceError::Timeout)?
    }

    async fn read_response(&mut self) -> Result<ServerMessage, ServiceError> {
        while let Some(frame) = self.stream.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => return Err(ServiceError::Transport(e.to_string())),
            };

            return serde_json::from_str(&text)
                .map_err(|e| ServiceError::Protocol(e.to_string()));
        }

        Err(ServiceError::Transport(
            "connection closed by service".to_string(),
        ))
    }
}

impl QuizService for RemoteService {
    async fn list_quizzes(&mut self) -> Result<Vec<QuizSummary>, ServiceError> {
        match self.request(&ClientMessage::ListQuizzes).await? {
            ServerMessage::QuizList { quizzes } => Ok(quizzes),
            other => Err(unexpected(&other)),
        }
    }

    async fn fetch_quiz(&mut self, quiz_id: &str) -> Result<Quiz, ServiceError> {
        let msg = ClientMessage::FetchQuiz {
            quiz_id: quiz_id.to_string(),
        };

        match self.request(&msg).await? {
            ServerMessage::Quiz { quiz } => {
                // A quiz with no questions, or a question with no options,
                // must not reach the attempt as if it were well-formed.
                if quiz.questions.is_empty()
                    || quiz.questions.iter().any(|q| q.options.is_empty())
                {
                    return Err(ServiceError::Protocol(format!(
                        "service returned a malformed quiz {}",
                        quiz.id
                    )));
                }
                Ok(quiz)
            }
            ServerMessage::QuizNotFound { quiz_id } => Err(ServiceError::NotFound(quiz_id)),
            other => Err(unexpected(&other)),
        }
    }

    async fn submit_attempt(
        &mut self,
        quiz_id: &str,
        answers: &AnswerMap,
    ) -> Result<Score, ServiceError> {
        let msg = ClientMessage::SubmitAttempt {
            quiz_id: quiz_id.to_string(),
            answers: answers.clone(),
        };

        match self.request(&msg).await? {
            ServerMessage::SubmitAccepted { score, total } => Ok(Score { score, total }),
            ServerMessage::SubmitRejected { reason } => Err(ServiceError::Rejected(reason)),
            other => Err(unexpected(&other)),
        }
    }
}

fn unexpected(msg: &ServerMessage) -> ServiceError {
    ServiceError::Protocol(format!("unexpected response: {:?}", msg))
}
