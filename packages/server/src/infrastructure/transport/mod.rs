//! TCP transport: accepts sockets, runs a reader and a writer task per
//! connection and reports everything as [`ServerEvent`](crate::domain::ServerEvent)s.

mod connection;
mod listener;

pub use listener::TcpConnectionListener;
