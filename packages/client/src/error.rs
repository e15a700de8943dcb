//! Client-level errors.

use parlor_shared::TransportError;
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection could not be opened
    #[error("could not connect: {0}")]
    Connect(#[source] TransportError),

    /// Connected, but the `#login` announcement could not be sent
    #[error("could not announce login: {0}")]
    Announce(#[source] TransportError),

    /// The server went away while connected
    #[error("connection to the server was lost: {0}")]
    ConnectionLost(String),

    #[error("console error: {0}")]
    Console(#[from] ReadlineError),
}
