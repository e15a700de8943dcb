//! Shared building blocks for the Parlor chat server and client.
//!
//! Both sides speak the same wire format and the same `#`-prefixed command
//! syntax, so everything that must stay bit-for-bit identical lives here.

pub mod command;
pub mod display;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod time;

pub use command::{COMMAND_MARKER, CommandLine, InputLine, PortArgError, parse_input, parse_port};
pub use display::{ConsoleDisplay, DisplaySink, MemoryDisplay};
pub use error::{CodecError, TransportError};
pub use protocol::{DEFAULT_HOST, DEFAULT_PORT, Frame, FrameCodec, LOGIN_COMMAND, login_directive};
