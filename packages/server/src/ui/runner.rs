//! Server run loop.
//!
//! Transport events and operator console lines are handled by one task.
//! Pending events always go first, so a listener state change is applied
//! before the next console command looks at it.

use std::{net::SocketAddr, sync::Arc};

use parlor_shared::{ConsoleDisplay, DEFAULT_PORT, DisplaySink};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use super::{
    handler::{ConsoleOutcome, close_server, handle_console_line, handle_event},
    signal::shutdown_signal,
    state::AppState,
};
use crate::{
    domain::{ServerEvent, notice},
    error::ServerError,
    infrastructure::{repository::InMemorySessionRepository, transport::TcpConnectionListener},
};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on; 0 picks a free port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

pub struct Server {
    state: Arc<AppState>,
    events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Server {
    pub fn new(config: ServerConfig, display: Arc<dyn DisplaySink>) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let listener = Arc::new(TcpConnectionListener::new(config.port, tx));
        let repository = Arc::new(InMemorySessionRepository::new());

        Self {
            state: Arc::new(AppState::new(repository, listener, display)),
            events,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Address the listener is bound to, if it is listening
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.state.listener.local_addr()
    }

    /// Start listening on the configured port.
    pub async fn start(&self) -> Result<(), ServerError> {
        self.state.listener.listen().await.map_err(|e| {
            self.state.display.display(notice::COULD_NOT_LISTEN);
            ServerError::Listen(e)
        })
    }

    /// Serve until `#quit` is entered on `console`.
    ///
    /// When the console reaches end of input the server keeps serving
    /// network events.
    pub async fn run<R>(self, console: R) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.run_until(console, std::future::pending()).await
    }

    /// Like [`Server::run`], but also closes everything and returns once
    /// `shutdown` completes.
    pub async fn run_until<R, F>(self, console: R, shutdown: F) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        let Server { state, mut events } = self;
        let mut lines = console.lines();
        let mut console_open = true;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                Some(event) = events.recv() => handle_event(&state, event).await,
                line = lines.next_line(), if console_open => match line {
                    Ok(Some(line)) => match handle_console_line(&state, &line).await {
                        ConsoleOutcome::Continue => {}
                        ConsoleOutcome::Quit => return Ok(()),
                        ConsoleOutcome::Abort(e) => return Err(ServerError::Listen(e)),
                    },
                    Ok(None) => {
                        tracing::info!("Console closed, still serving connections");
                        console_open = false;
                    }
                    Err(e) => {
                        tracing::error!("Failed to read from console: {}", e);
                        state
                            .display
                            .display("Unexpected error while reading from console!");
                        console_open = false;
                    }
                },
                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    close_server(&state).await;
                    return Ok(());
                }
                else => return Ok(()),
            }
        }
    }
}

/// Run the server on stdin/stdout until `#quit` or a shutdown signal.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let server = Server::new(config, Arc::new(ConsoleDisplay));
    server.start().await?;
    server
        .run_until(BufReader::new(tokio::io::stdin()), shutdown_signal())
        .await
}
