//! Wire format shared by server and client.
//!
//! Every payload travels as one line of JSON (`{"payload":"..."}`) terminated by
//! `\n`. The payload itself is opaque to the transport; the session protocol
//! (login directive, chat text, server notices) lives inside it.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use tokio_util::codec::{Decoder, Encoder, LinesCodec};

use crate::{command::COMMAND_MARKER, error::CodecError};

/// Port used when none is supplied at startup
pub const DEFAULT_PORT: u16 = 5555;

/// Host the client connects to when none is supplied at startup
pub const DEFAULT_HOST: &str = "localhost";

/// Command name of the login directive
pub const LOGIN_COMMAND: &str = "login";

/// Upper bound for a single encoded frame (bytes, newline excluded)
pub const MAX_FRAME_LENGTH: usize = 64 * 1024;

/// Build the login announcement a client sends right after connecting.
pub fn login_directive(login: &str) -> String {
    format!("{COMMAND_MARKER}{LOGIN_COMMAND} {login}")
}

/// One unit of application traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub payload: String,
}

impl Frame {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Newline-delimited JSON codec for [`Frame`]s.
#[derive(Debug)]
pub struct FrameCodec {
    lines: LinesCodec,
}

impl FrameCodec {
    pub fn new() -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(MAX_FRAME_LENGTH),
        }
    }

    fn parse(line: Option<String>) -> Result<Option<Frame>, CodecError> {
        match line {
            Some(line) => match serde_json::from_str(&line) {
                Ok(frame) => Ok(Some(frame)),
                Err(e) => {
                    tracing::debug!("Malformed frame '{}': {}", line, e);
                    Err(e.into())
                }
            },
            None => Ok(None),
        }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, CodecError> {
        let line = self.lines.decode(src)?;
        Self::parse(line)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, CodecError> {
        let line = self.lines.decode_eof(src)?;
        Self::parse(line)
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), CodecError> {
        let line = serde_json::to_string(&frame)?;
        self.lines.encode(line, dst)?;
        Ok(())
    }
}
