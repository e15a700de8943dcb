//! TCP listener implementing [`ConnectionListener`].

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU16, Ordering},
    },
};

use async_trait::async_trait;
use parlor_shared::TransportError;
use tokio::{net::TcpListener, sync::mpsc, task::JoinHandle};

use super::connection::serve_connection;
use crate::domain::{ConnectionListener, ServerEvent};

/// Accept loop currently running
struct AcceptTask {
    handle: JoinHandle<()>,
    local_addr: SocketAddr,
}

/// Listens on all interfaces; every accepted socket gets its own tasks.
///
/// Stopping the listener only ends the accept loop, connections already
/// accepted keep running until they are closed individually.
pub struct TcpConnectionListener {
    port: AtomicU16,
    accept_task: Mutex<Option<AcceptTask>>,
    events: mpsc::UnboundedSender<ServerEvent>,
}

impl TcpConnectionListener {
    pub fn new(port: u16, events: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self {
            port: AtomicU16::new(port),
            accept_task: Mutex::new(None),
            events,
        }
    }

    fn take_accept_task(&self) -> Option<AcceptTask> {
        self.accept_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[async_trait]
impl ConnectionListener for TcpConnectionListener {
    async fn listen(&self) -> Result<(), TransportError> {
        if self.is_listening() {
            return Ok(());
        }

        let port = self.port();
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .await
            .map_err(|source| TransportError::Listen { port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| TransportError::Listen { port, source })?;

        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, peer)) => {
                        tokio::spawn(serve_connection(socket, peer, events.clone()));
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                }
            }
        });

        let previous = self
            .accept_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(AcceptTask { handle, local_addr });
        // Lost a race with a concurrent listen(); keep the newest loop only.
        if let Some(previous) = previous {
            previous.handle.abort();
        }

        tracing::info!("Listening on {}", local_addr);
        let _ = self.events.send(ServerEvent::ListenStarted {
            port: local_addr.port(),
        });
        Ok(())
    }

    async fn stop_listening(&self) {
        if let Some(task) = self.take_accept_task() {
            task.handle.abort();
            tracing::info!("Stopped listening on {}", task.local_addr);
            let _ = self.events.send(ServerEvent::ListenStopped);
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.stop_listening().await;
        let _ = self.events.send(ServerEvent::ListenClosed);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.accept_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn port(&self) -> u16 {
        self.port.load(Ordering::SeqCst)
    }

    fn set_port(&self, port: u16) {
        self.port.store(port, Ordering::SeqCst);
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.accept_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|task| task.local_addr)
    }
}
