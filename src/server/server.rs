//! WebSocket host for the quiz service.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

use crate::data::QuizBank;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::AppError;

use super::state::ServerState;

/// Shared server state wrapped in Arc<Mutex> for async access.
type SharedState = Arc<Mutex<ServerState>>;

/// Run the quiz service until interrupted.
pub async fn run<P: AsRef<Path>>(port: u16, bank_path: P) -> Result<(), AppError> {
    let bank = QuizBank::from_json(bank_path)?;
    info!("Loaded {} quizzes", bank.len());

    let state = Arc::new(Mutex::new(ServerState::new(bank)));

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Quiz service listening on {}", addr);

    let accept_state = Arc::clone(&state);
    let acceptor = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    let state = Arc::clone(&accept_state);
                    tokio::spawn(handle_connection(stream, addr, state));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    acceptor.abort();

    let state = state.lock().await;
    info!(
        "Shutting down after grading {} attempts",
        state.total_attempts()
    );

    Ok(())
}

/// Handle a single client connection: one response per request message.
async fn handle_connection(stream: TcpStream, addr: SocketAddr, state: SharedState) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed for {}: {}", addr, e);
            return;
        }
    };
    debug!("Client connected from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    while let Some(msg) = ws_receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => continue,
        };

        let client_msg: ClientMessage = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                warn!("Ignoring malformed message from {}: {}", addr, e);
                continue;
            }
        };

        let reply = handle_client_message(addr, client_msg, &state).await;
        let json = match serde_json::to_string(&reply) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode reply for {}: {}", addr, e);
                continue;
            }
        };

        if ws_sender.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }

    debug!("Client {} disconnected", addr);
}

/// Handle a single client message and produce its response.
async fn handle_client_message(
    peer: SocketAddr,
    msg: ClientMessage,
    state: &SharedState,
) -> ServerMessage {
    let mut state = state.lock().await;

    match msg {
        ClientMessage::ListQuizzes => ServerMessage::QuizList {
            quizzes: state.bank.summaries(),
        },

        ClientMessage::FetchQuiz { quiz_id } => match state.bank.get(&quiz_id) {
            Some(quiz) => {
                debug!("Serving quiz {} to {}", quiz_id, peer);
                ServerMessage::Quiz {
                    quiz: quiz.to_quiz(),
                }
            }
            None => {
                warn!("{} requested unknown quiz {}", peer, quiz_id);
                ServerMessage::QuizNotFound { quiz_id }
            }
        },

        ClientMessage::SubmitAttempt { quiz_id, answers } => {
            let graded = match state.bank.get(&quiz_id) {
                Some(quiz) => quiz.grade(&answers),
                None => {
                    warn!("{} submitted for unknown quiz {}", peer, quiz_id);
                    return ServerMessage::QuizNotFound { quiz_id };
                }
            };

            match graded {
                Ok(score) => {
                    let nth = state.record_attempt(peer, &quiz_id, score);
                    info!(
                        "Graded attempt #{} for quiz {} from {}: {}/{}",
                        nth, quiz_id, peer, score.score, score.total
                    );
                    ServerMessage::SubmitAccepted {
                        score: score.score,
                        total: score.total,
                    }
                }
                Err(e) => {
                    warn!("Rejected submission for quiz {} from {}: {}", quiz_id, peer, e);
                    ServerMessage::SubmitRejected {
                        reason: e.to_string(),
                    }
                }
            }
        }
    }
}
