//! Student attempt client.
//!
//! Terminal front-end that drives a quiz attempt against any
//! [`QuizService`](crate::service::QuizService) implementation.

mod client;
mod state;
mod ui;

pub use client::run;
pub use state::{Screen, StudentApp};
