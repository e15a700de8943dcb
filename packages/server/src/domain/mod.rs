//! Domain layer for the chat server.
//!
//! Session attributes, the login rule, command and payload parsing, and the
//! abstractions the transport and registry implement.

pub mod command;
pub mod entity;
pub mod error;
pub mod factory;
pub mod notice;
pub mod repository;
pub mod transport;
pub mod value_object;

pub use command::{ConsoleInput, InboundPayload, ServerCommand};
pub use entity::Session;
pub use error::{RepositoryError, SessionError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use repository::SessionRepository;
pub use transport::{ConnectionHandle, ConnectionListener, Outbound, ServerEvent};
pub use value_object::{ConnectionId, LoginId, MessageContent, Timestamp};
