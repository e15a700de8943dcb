//! The server's view of the connection framework.
//!
//! The transport owns sockets; the domain only sees [`ConnectionHandle`]s (send
//! and close), the [`ServerEvent`]s the transport emits, and the
//! [`ConnectionListener`] that accepts new connections.

use std::net::SocketAddr;

use async_trait::async_trait;
use parlor_shared::TransportError;
use tokio::sync::mpsc::UnboundedSender;

use super::value_object::ConnectionId;

/// Instructions for a connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Deliver one payload
    Payload(String),
    /// Flush what was queued before, then shut the connection down
    Close,
}

/// Send/close capability for one live connection.
///
/// Cheap to clone; all clones feed the same writer task, so payloads queued from
/// different places keep their relative order.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    peer: SocketAddr,
    outbound: UnboundedSender<Outbound>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, peer: SocketAddr, outbound: UnboundedSender<Outbound>) -> Self {
        Self { id, peer, outbound }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Queue a payload for delivery.
    ///
    /// # Errors
    ///
    /// `TransportError::ConnectionClosed` once the writer task is gone.
    pub fn send(&self, payload: impl Into<String>) -> Result<(), TransportError> {
        self.outbound
            .send(Outbound::Payload(payload.into()))
            .map_err(|_| TransportError::ConnectionClosed)
    }

    /// Ask the writer task to shut the connection down after queued payloads.
    ///
    /// The result is informational only; callers are free to discard it.
    pub fn close(&self) -> Result<(), TransportError> {
        self.outbound
            .send(Outbound::Close)
            .map_err(|_| TransportError::ConnectionClosed)
    }
}

/// Events delivered by the transport to the server core
#[derive(Debug)]
pub enum ServerEvent {
    /// A connection was accepted
    Connected(ConnectionHandle),
    /// A payload arrived on a connection
    Message { id: ConnectionId, payload: String },
    /// A connection is gone (peer closed, local close, or after an exception)
    Disconnected(ConnectionId),
    /// Reading from a connection failed; a `Disconnected` follows
    Exception {
        id: ConnectionId,
        error: TransportError,
    },
    /// The listener is accepting connections on `port`
    ListenStarted { port: u16 },
    /// The listener stopped accepting; existing connections stay open
    ListenStopped,
    /// The listener was closed for good
    ListenClosed,
}

/// Accepts connections and reports them as [`ServerEvent`]s.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionListener: Send + Sync {
    /// Start accepting connections on the configured port. No-op when already listening.
    async fn listen(&self) -> Result<(), TransportError>;

    /// Stop accepting new connections.
    async fn stop_listening(&self);

    /// Stop accepting for good. Connections are closed by the caller.
    async fn close(&self) -> Result<(), TransportError>;

    fn is_listening(&self) -> bool;

    /// Configured port
    fn port(&self) -> u16;

    fn set_port(&self, port: u16);

    /// Actual bound address while listening (differs from `port` when it is 0)
    fn local_addr(&self) -> Option<SocketAddr>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factory::ConnectionIdFactory;
    use tokio::sync::mpsc;

    #[test]
    fn test_connection_handle_send_then_close_keeps_order() {
        // テスト項目: send と close はキューに積まれた順序で書き込みタスクに届く
        // given (前提条件):
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(
            ConnectionIdFactory::generate(),
            "127.0.0.1:40000".parse().unwrap(),
            tx,
        );

        // when (操作):
        handle.send("Already connected and logged in").unwrap();
        handle.close().unwrap();

        // then (期待する結果):
        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Payload("Already connected and logged in".to_string())
        );
        assert_eq!(rx.try_recv().unwrap(), Outbound::Close);
    }

    #[test]
    fn test_connection_handle_send_after_writer_gone_fails() {
        // テスト項目: 書き込みタスク終了後の送信は ConnectionClosed になる
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(
            ConnectionIdFactory::generate(),
            "127.0.0.1:40000".parse().unwrap(),
            tx,
        );
        drop(rx);

        // when (操作):
        let result = handle.send("hello");

        // then (期待する結果):
        assert!(matches!(result, Err(TransportError::ConnectionClosed)));
    }
}
