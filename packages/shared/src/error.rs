//! Transport-level error definitions.

use std::io;

use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Errors raised while framing payloads on the wire
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Line exceeded the maximum frame length
    #[error("frame error: {0}")]
    Line(#[from] LinesCodecError),

    /// Line was not a valid JSON frame
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by send/close/listen/connect operations
#[derive(Debug, Error)]
pub enum TransportError {
    /// No connection is currently open
    #[error("not connected")]
    NotConnected,

    /// The connection's writer has already shut down
    #[error("connection is closed")]
    ConnectionClosed,

    #[error("could not listen on port {port}: {source}")]
    Listen {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("could not connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}
