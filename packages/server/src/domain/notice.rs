//! Text the server sends to clients or shows the operator.
//!
//! These strings are what users see on their consoles, so they are kept in one
//! place and must not change casually.

use std::net::SocketAddr;

use super::value_object::{LoginId, MessageContent};

pub const ALREADY_LOGGED_IN: &str = "Already connected and logged in";
pub const LOGIN_FAILED: &str = "Error logging in";
pub const LOGIN_REQUIRED: &str = "You must log in before sending messages";
pub const MESSAGE_TOO_LONG: &str = "Message too long";

pub const PORT_MISSING: &str = "Port missing";
pub const INVALID_PORT: &str = "Invalid port";
pub const MUST_BE_CLOSED_TO_SET_PORT: &str = "Server must be closed to change the port";
pub const ALREADY_LISTENING: &str = "Server is already listening for connections";
pub const COULD_NOT_LISTEN: &str = "ERROR - Could not listen for clients!";

pub const LISTEN_STOPPED: &str = "Server has stopped listening for connections.";
pub const LISTEN_CLOSED: &str = "Server has closed.";

/// Prefix of operator-originated chat lines
pub const SERVER_PREFIX: &str = "SERVER MSG> ";

pub fn logged_on(login: &LoginId) -> String {
    format!("{login} has logged on")
}

pub fn chat_line(login: &LoginId, content: &MessageContent) -> String {
    format!("{login}: {content}")
}

pub fn server_chat_line(text: &str) -> String {
    format!("{SERVER_PREFIX}{text}")
}

pub fn client_connected(peer: SocketAddr) -> String {
    format!("Client {peer} has connected.")
}

pub fn client_disconnected(display_name: &str) -> String {
    format!("{display_name} has disconnected")
}

pub fn listen_started(port: u16) -> String {
    format!("Server listening for connections on port {port}")
}

pub fn connection_error(peer: SocketAddr, error: &impl std::fmt::Display) -> String {
    format!("Connection error from {peer}: {error}")
}
