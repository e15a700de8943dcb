//! Parlor chat client.
//!
//! Connects to a Parlor server, announces a login and relays console lines.
//! Lines starting with `#` are local commands.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;

pub mod error;

// Re-export entry points
pub use error::ClientError;
pub use ui::{ChatClient, ClientConfig, run as run_client, run_session};
