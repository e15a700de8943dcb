//! Core domain models for the chat server.

use std::net::SocketAddr;

use super::{
    error::SessionError,
    value_object::{ConnectionId, LoginId, Timestamp},
};

/// Session attributes of one live connection.
///
/// `login` doubles as the logged-in flag: it is `Some` exactly when the
/// connection has completed the login handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Connection identifier
    pub id: ConnectionId,
    /// Remote address of the client
    pub peer: SocketAddr,
    /// Login identifier recorded by the handshake
    pub login: Option<LoginId>,
    /// Timestamp when the connection was accepted
    pub connected_at: Timestamp,
    /// Set when the server refused this connection and is closing it
    pub rejected: bool,
}

impl Session {
    /// Create a session for a freshly accepted, not yet logged-in connection
    pub fn new(id: ConnectionId, peer: SocketAddr, connected_at: Timestamp) -> Self {
        Self {
            id,
            peer,
            login: None,
            connected_at,
            rejected: false,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_some()
    }

    /// Complete the login handshake.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` once the connection was refused, and
    /// `SessionError::AlreadyLoggedIn` if a login was already recorded; the
    /// recorded login is left untouched.
    pub fn log_in(&mut self, login: LoginId) -> Result<(), SessionError> {
        if self.rejected {
            return Err(SessionError::Rejected);
        }
        if let Some(current) = &self.login {
            return Err(SessionError::AlreadyLoggedIn(current.clone()));
        }
        self.login = Some(login);
        Ok(())
    }

    /// Mark the connection as refused. It carries no more traffic.
    pub fn reject(&mut self) {
        self.rejected = true;
    }

    /// Name shown in operator notices: the login, or the peer address before login
    pub fn display_name(&self) -> String {
        match &self.login {
            Some(login) => login.to_string(),
            None => format!("Client {}", self.peer),
        }
    }
}
