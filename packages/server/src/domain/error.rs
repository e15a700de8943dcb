//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, LoginId};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// LoginId validation error
    #[error("LoginId cannot be empty")]
    LoginIdEmpty,

    #[error("LoginId cannot contain whitespace (got: {0:?})")]
    LoginIdContainsWhitespace(String),

    /// LoginId too long error
    #[error("LoginId cannot exceed {max} characters (got {actual})")]
    LoginIdTooLong { max: usize, actual: usize },

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors related to Session domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The connection has already completed the login handshake
    #[error("connection is already logged in as '{0}'")]
    AlreadyLoggedIn(LoginId),

    /// The connection was refused and is being closed
    #[error("connection was rejected")]
    Rejected,
}

/// Errors raised by the session repository
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("session not found: {0}")]
    SessionNotFound(ConnectionId),

    #[error("connection already registered: {0}")]
    AlreadyRegistered(ConnectionId),

    #[error(transparent)]
    Session(#[from] SessionError),
}
