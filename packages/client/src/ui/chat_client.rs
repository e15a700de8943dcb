//! Client core: user input dispatch and transport event handling.

use std::sync::Arc;

use parlor_shared::{DisplaySink, InputLine, PortArgError, login_directive, parse_input};

use crate::{
    domain::{ClientCommand, ClientEvent, ClientSession, ClientTransport, notice},
    error::ClientError,
};

/// What the run loop does after an input line or event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOutcome {
    Continue,
    /// Graceful shutdown, exit status 0
    Quit,
    /// The server went away, exit status 1
    Terminate(String),
}

pub struct ChatClient {
    session: ClientSession,
    transport: Arc<dyn ClientTransport>,
    display: Arc<dyn DisplaySink>,
}

impl ChatClient {
    pub fn new(
        session: ClientSession,
        transport: Arc<dyn ClientTransport>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            session,
            transport,
            display,
        }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Connect to the configured host and port, then announce the login.
    ///
    /// When the announcement cannot be sent the half-open connection is
    /// closed and the connect counts as failed.
    pub async fn open_connection(&self) -> Result<(), ClientError> {
        self.transport
            .open(&self.session.host, self.session.port)
            .await
            .map_err(ClientError::Connect)?;

        if let Err(e) = self
            .transport
            .send(login_directive(&self.session.login))
            .await
        {
            self.close_quietly().await;
            return Err(ClientError::Announce(e));
        }
        tracing::info!(
            "Logged in as '{}' on {}:{}",
            self.session.login,
            self.session.host,
            self.session.port
        );
        Ok(())
    }

    /// Handle one line typed by the user.
    pub async fn handle_message_from_ui(&mut self, line: &str) -> ClientOutcome {
        match parse_input(line) {
            InputLine::Command(command) => match ClientCommand::parse(&command) {
                Some(command) => self.handle_command(command).await,
                None => {
                    tracing::debug!("Ignoring unknown command: {}", line);
                    ClientOutcome::Continue
                }
            },
            InputLine::Text(text) => self.send_chat(text).await,
        }
    }

    /// Handle one event reported by the transport.
    pub async fn handle_event(&mut self, event: ClientEvent) -> ClientOutcome {
        match event {
            ClientEvent::Message(payload) => {
                self.display.display(&payload);
                ClientOutcome::Continue
            }
            ClientEvent::Closed => {
                self.display.display(notice::CONNECTION_CLOSED);
                ClientOutcome::Continue
            }
            ClientEvent::Exception(reason) => {
                // Left over from a connection that was already replaced
                if self.transport.state().is_connected() {
                    tracing::debug!("Ignoring stale connection error: {}", reason);
                    return ClientOutcome::Continue;
                }
                tracing::error!("Connection lost: {}", reason);
                self.display.display(notice::SERVER_SHUT_DOWN);
                self.quit().await;
                ClientOutcome::Terminate(reason)
            }
        }
    }

    /// Best-effort close before the process exits.
    pub async fn quit(&self) {
        self.close_quietly().await;
    }

    async fn send_chat(&self, text: &str) -> ClientOutcome {
        if !self.transport.state().is_connected() {
            tracing::debug!("Not connected, dropping '{}'", text);
            return ClientOutcome::Continue;
        }

        match self.transport.send(text.to_string()).await {
            Ok(()) => ClientOutcome::Continue,
            Err(e) => {
                tracing::error!("Failed to send message: {}", e);
                self.display.display(notice::SEND_FAILED);
                self.quit().await;
                ClientOutcome::Quit
            }
        }
    }

    async fn handle_command(&mut self, command: ClientCommand) -> ClientOutcome {
        match command {
            ClientCommand::Quit => {
                self.quit().await;
                return ClientOutcome::Quit;
            }
            ClientCommand::Logoff => self.close_quietly().await,
            ClientCommand::SetHost(host) => self.set_host(host),
            ClientCommand::SetPort(port) => self.set_port(port),
            ClientCommand::Login(login) => self.login(login).await,
            ClientCommand::GetHost => self.display.display(&self.session.host),
            ClientCommand::GetPort => self.display.display(&self.session.port.to_string()),
        }
        ClientOutcome::Continue
    }

    fn set_host(&mut self, host: Option<String>) {
        if self.transport.state().is_connected() {
            self.display.display(notice::CANNOT_CHANGE_HOST);
            return;
        }
        match host {
            Some(host) => {
                tracing::info!("Host set to {}", host);
                self.session.host = host;
            }
            None => self.display.display(notice::HOST_MISSING),
        }
    }

    fn set_port(&mut self, port: Result<u16, PortArgError>) {
        if self.transport.state().is_connected() {
            self.display.display(notice::CANNOT_CHANGE_PORT);
            return;
        }
        match port {
            Ok(port) => {
                tracing::info!("Port set to {}", port);
                self.session.port = port;
            }
            Err(PortArgError::Missing) => self.display.display(notice::PORT_MISSING),
            Err(e @ PortArgError::Invalid(_)) => {
                tracing::debug!("{}", e);
                self.display.display(notice::INVALID_PORT);
            }
        }
    }

    async fn login(&mut self, login: Option<String>) {
        let Some(login) = login else {
            self.display.display(notice::LOGIN_MISSING);
            return;
        };

        self.session.login = login;
        if self.transport.state().is_connected() {
            self.close_quietly().await;
        }
        if let Err(e) = self.open_connection().await {
            tracing::warn!("{}", e);
            self.display.display(notice::CONNECT_FAILED);
        }
    }

    async fn close_quietly(&self) {
        if let Err(e) = self.transport.close().await {
            tracing::debug!("Error while closing connection: {}", e);
        }
    }
}
