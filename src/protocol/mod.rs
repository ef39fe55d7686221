//! Wire protocol between the attempt client and the quiz service.

mod messages;

pub use messages::{ClientMessage, ServerMessage, DEFAULT_PORT};
