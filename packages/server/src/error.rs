//! Server-level errors.

use parlor_shared::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Listening failed at startup or on `#start`
    #[error("could not listen for clients: {0}")]
    Listen(#[source] TransportError),
}
