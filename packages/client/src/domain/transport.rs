//! Client transport abstraction and the events it reports.

use async_trait::async_trait;
use parlor_shared::TransportError;

use super::session::ConnectionState;

/// Events reported by the client transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A payload arrived from the server
    Message(String),
    /// The connection was closed locally
    Closed,
    /// The server went away or the connection failed
    Exception(String),
}

/// One outgoing connection at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientTransport: Send + Sync {
    /// Connect to `host:port`.
    async fn open(&self, host: &str, port: u16) -> Result<(), TransportError>;

    /// Send one payload on the open connection.
    async fn send(&self, payload: String) -> Result<(), TransportError>;

    /// Close the open connection. Reports [`ClientEvent::Closed`] when there was one.
    async fn close(&self) -> Result<(), TransportError>;

    fn state(&self) -> ConnectionState;
}
