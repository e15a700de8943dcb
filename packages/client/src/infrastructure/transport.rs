//! TCP implementation of [`ClientTransport`].

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use parlor_shared::{Frame, FrameCodec, TransportError};
use tokio::{
    net::{TcpStream, tcp::OwnedWriteHalf},
    sync::{Mutex as AsyncMutex, mpsc},
    task::JoinHandle,
};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::domain::{ClientEvent, ClientTransport, ConnectionState};

type FrameWriter = FramedWrite<OwnedWriteHalf, FrameCodec>;

struct Connection {
    writer: Arc<AsyncMutex<FrameWriter>>,
    reader: JoinHandle<()>,
    /// Set before a local close so the reader does not report it as a failure
    closing: Arc<AtomicBool>,
    /// Cleared by the reader when the server side goes away
    alive: Arc<AtomicBool>,
}

/// Frames are read on a background task and reported as [`ClientEvent`]s.
pub struct TcpClientTransport {
    connection: Mutex<Option<Connection>>,
    events: mpsc::UnboundedSender<ClientEvent>,
}

impl TcpClientTransport {
    pub fn new(events: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self {
            connection: Mutex::new(None),
            events,
        }
    }

    fn writer(&self) -> Option<Arc<AsyncMutex<FrameWriter>>> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|connection| connection.alive.load(Ordering::SeqCst))
            .map(|connection| connection.writer.clone())
    }
}

#[async_trait]
impl ClientTransport for TcpClientTransport {
    async fn open(&self, host: &str, port: u16) -> Result<(), TransportError> {
        let socket = TcpStream::connect((host, port))
            .await
            .map_err(|source| TransportError::Connect {
                host: host.to_string(),
                port,
                source,
            })?;
        let (read_half, write_half) = socket.into_split();

        let closing = Arc::new(AtomicBool::new(false));
        let alive = Arc::new(AtomicBool::new(true));

        let reader = {
            let mut frames = FramedRead::new(read_half, FrameCodec::new());
            let events = self.events.clone();
            let closing = closing.clone();
            let alive = alive.clone();
            tokio::spawn(async move {
                let failure = loop {
                    match frames.next().await {
                        Some(Ok(frame)) => {
                            if events.send(ClientEvent::Message(frame.payload)).is_err() {
                                break None;
                            }
                        }
                        Some(Err(e)) => break Some(e.to_string()),
                        None => break Some("connection closed by server".to_string()),
                    }
                };
                alive.store(false, Ordering::SeqCst);
                if let Some(reason) = failure
                    && !closing.load(Ordering::SeqCst)
                {
                    tracing::debug!("Connection lost: {}", reason);
                    let _ = events.send(ClientEvent::Exception(reason));
                }
            })
        };

        let previous = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Connection {
                writer: Arc::new(AsyncMutex::new(FramedWrite::new(
                    write_half,
                    FrameCodec::new(),
                ))),
                reader,
                closing,
                alive,
            });
        if let Some(previous) = previous {
            previous.closing.store(true, Ordering::SeqCst);
            previous.reader.abort();
        }

        tracing::info!("Connected to {}:{}", host, port);
        Ok(())
    }

    async fn send(&self, payload: String) -> Result<(), TransportError> {
        let writer = self.writer().ok_or(TransportError::NotConnected)?;
        let mut writer = writer.lock().await;
        writer.send(Frame::new(payload)).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        let Some(connection) = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return Ok(());
        };

        connection.closing.store(true, Ordering::SeqCst);
        connection.reader.abort();
        let result = connection.writer.lock().await.close().await;
        let _ = self.events.send(ClientEvent::Closed);
        tracing::info!("Connection closed");

        result.map_err(TransportError::from)
    }

    fn state(&self) -> ConnectionState {
        if self.writer().is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }
}
