//! Handlers for transport events and operator console lines.

pub mod connection;
pub mod console;

pub use connection::handle_event;
pub use console::{ConsoleOutcome, close_server, handle_console_line};
