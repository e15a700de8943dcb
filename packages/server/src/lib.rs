//! Parlor chat server.
//!
//! Accepts TCP clients, admits each one through a one-time login handshake and
//! broadcasts chat lines among all connections. An operator console on stdin
//! drives the listener and can chat as the server.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod error;

// Re-export entry points
pub use error::ServerError;
pub use ui::{Server, ServerConfig, run as run_server};
