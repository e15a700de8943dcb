//! Client-side session attributes.

use std::fmt;

/// What the user declared and where the client connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSession {
    /// Announced with `#login` on every successful connect
    pub login: String,
    pub host: String,
    pub port: u16,
}

impl ClientSession {
    pub fn new(login: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            login: login.into(),
            host: host.into(),
            port,
        }
    }
}

/// Connection state reported by the client transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connected => write!(f, "connected"),
        }
    }
}
