//! Text the client shows the user.

pub const CANNOT_CHANGE_HOST: &str = "Cannot change host while connected";
pub const HOST_MISSING: &str = "Must specify a host";
pub const CANNOT_CHANGE_PORT: &str = "Cannot change port while connected";
pub const PORT_MISSING: &str = "Must specify a port";
pub const INVALID_PORT: &str = "Invalid port";
pub const LOGIN_MISSING: &str = "Must specify login id";
pub const CONNECT_FAILED: &str = "Error connecting to the server";
pub const SEND_FAILED: &str = "Could not send message to server.  Terminating client.";
pub const CONNECTION_CLOSED: &str = "Connection Closed";
pub const SERVER_SHUT_DOWN: &str = "The server is shut down";
pub const SETUP_FAILED: &str = "Error: Can't setup connection! Terminating client.";
