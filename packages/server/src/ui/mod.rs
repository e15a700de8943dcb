//! Server core: event/console dispatch and the run loop.

pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{Server, ServerConfig, run};
