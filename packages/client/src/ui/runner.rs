//! Client run loop.

use std::sync::Arc;

use parlor_shared::{ConsoleDisplay, DEFAULT_HOST, DEFAULT_PORT, DisplaySink};
use tokio::sync::mpsc;

use super::{
    chat_client::{ChatClient, ClientOutcome},
    console::spawn_console,
};
use crate::{
    domain::{ClientEvent, ClientSession, notice},
    error::ClientError,
    infrastructure::TcpClientTransport,
};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub login: String,
    pub host: String,
    pub port: u16,
}

impl ClientConfig {
    /// Configuration for `login` against the default host and port
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl From<ClientConfig> for ClientSession {
    fn from(config: ClientConfig) -> Self {
        ClientSession::new(config.login, config.host, config.port)
    }
}

/// Connect, then chat on stdin/stdout until `#quit` or the server goes away.
pub async fn run(config: ClientConfig) -> Result<(), ClientError> {
    let display: Arc<dyn DisplaySink> = Arc::new(ConsoleDisplay);
    let (tx, events) = mpsc::unbounded_channel();
    let transport = Arc::new(TcpClientTransport::new(tx));
    let client = ChatClient::new(config.into(), transport, display.clone());

    if let Err(e) = client.open_connection().await {
        display.display(notice::SETUP_FAILED);
        return Err(e);
    }

    let input = spawn_console(display)?;
    run_session(client, events, input).await
}

/// Drive `client` with transport events and user input lines.
///
/// Pending events are handled before the next input line. The session ends
/// gracefully when `input` closes.
pub async fn run_session(
    mut client: ChatClient,
    mut events: mpsc::UnboundedReceiver<ClientEvent>,
    mut input: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    loop {
        let outcome = tokio::select! {
            biased;

            Some(event) = events.recv() => client.handle_event(event).await,
            line = input.recv() => match line {
                Some(line) => client.handle_message_from_ui(&line).await,
                None => {
                    client.quit().await;
                    ClientOutcome::Quit
                }
            },
        };

        match outcome {
            ClientOutcome::Continue => {}
            ClientOutcome::Quit => return Ok(()),
            ClientOutcome::Terminate(reason) => return Err(ClientError::ConnectionLost(reason)),
        }
    }
}
