//! Domain layer for the chat client.

pub mod command;
pub mod notice;
pub mod session;
pub mod transport;

pub use command::ClientCommand;
pub use session::{ClientSession, ConnectionState};
pub use transport::{ClientEvent, ClientTransport};
