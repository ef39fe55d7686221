//! Quiz service host.
//!
//! Serves quiz content (answer keys stripped) and grades submissions.

mod server;
mod state;

pub use server::run;
pub use state::{AttemptRecord, ServerState};
