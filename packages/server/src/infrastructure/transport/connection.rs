//! Per-connection reader/writer tasks.

use std::net::SocketAddr;

use futures_util::{sink::SinkExt, stream::StreamExt};
use parlor_shared::{Frame, FrameCodec};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_util::codec::Framed;

use crate::domain::{ConnectionHandle, ConnectionIdFactory, Outbound, ServerEvent};

/// Drive one accepted socket until either side ends it.
///
/// Emits `Connected` first and `Disconnected` last; every `Message` of this
/// connection is emitted in between, in arrival order.
pub(super) async fn serve_connection(
    socket: TcpStream,
    peer: SocketAddr,
    events: mpsc::UnboundedSender<ServerEvent>,
) {
    let id = ConnectionIdFactory::generate();
    let (mut sender, mut receiver) = Framed::new(socket, FrameCodec::new()).split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();

    if events
        .send(ServerEvent::Connected(ConnectionHandle::new(id, peer, tx)))
        .is_err()
    {
        tracing::warn!("Event loop is gone, dropping connection from {}", peer);
        return;
    }
    tracing::info!("Connection '{}' accepted from {}", id, peer);

    let recv_events = events.clone();
    // Spawn a task to read frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(frame) => {
                    tracing::debug!("Received from '{}': {}", id, frame.payload);
                    let event = ServerEvent::Message {
                        id,
                        payload: frame.payload,
                    };
                    if recv_events.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Read error on connection '{}': {}", id, e);
                    let _ = recv_events.send(ServerEvent::Exception {
                        id,
                        error: e.into(),
                    });
                    break;
                }
            }
        }
    });

    // Spawn a task to write queued payloads to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            match outbound {
                Outbound::Payload(payload) => {
                    if let Err(e) = sender.send(Frame::new(payload)).await {
                        tracing::warn!("Write error on connection '{}': {}", id, e);
                        break;
                    }
                }
                Outbound::Close => {
                    if let Err(e) = sender.close().await {
                        tracing::debug!("Closing connection '{}' failed: {}", id, e);
                    }
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::info!("Connection '{}' from {} ended", id, peer);
    let _ = events.send(ServerEvent::Disconnected(id));
}
