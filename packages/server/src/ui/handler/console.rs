//! Operator console handlers.
//!
//! Lines starting with `#` are server commands; anything else is chat sent
//! to every connection as the server.

use parlor_shared::{PortArgError, TransportError};

use crate::{
    domain::{ConsoleInput, ServerCommand, notice},
    ui::state::AppState,
    usecase::SendMessageUseCase,
};

/// What the run loop does after a console line
#[derive(Debug)]
pub enum ConsoleOutcome {
    Continue,
    /// `#quit`: connections are closed, the process should exit normally
    Quit,
    /// `#start` could not listen; the process should exit with a failure
    Abort(TransportError),
}

pub async fn handle_console_line(state: &AppState, line: &str) -> ConsoleOutcome {
    match ConsoleInput::parse(line) {
        ConsoleInput::Command(command) => handle_command(state, command).await,
        ConsoleInput::Unknown(line) => {
            tracing::debug!("Ignoring unknown command: {}", line);
            ConsoleOutcome::Continue
        }
        ConsoleInput::Chat(text) => {
            let send_usecase = SendMessageUseCase::new(state.repository.clone());
            let (line, delivered) = send_usecase.announce(text).await;
            tracing::debug!("Announced to {} connection(s)", delivered);
            state.display.display(&line);
            ConsoleOutcome::Continue
        }
    }
}

async fn handle_command(state: &AppState, command: ServerCommand) -> ConsoleOutcome {
    match command {
        ServerCommand::Quit => {
            close_server(state).await;
            ConsoleOutcome::Quit
        }
        ServerCommand::Stop => {
            state.listener.stop_listening().await;
            ConsoleOutcome::Continue
        }
        ServerCommand::Close => {
            close_server(state).await;
            ConsoleOutcome::Continue
        }
        ServerCommand::SetPort(argument) => {
            set_port(state, argument);
            ConsoleOutcome::Continue
        }
        ServerCommand::Start => start(state).await,
        ServerCommand::GetPort => {
            state.display.display(&state.listener.port().to_string());
            ConsoleOutcome::Continue
        }
    }
}

fn set_port(state: &AppState, argument: Result<u16, PortArgError>) {
    if !state.is_closed() {
        state.display.display(notice::MUST_BE_CLOSED_TO_SET_PORT);
        return;
    }

    match argument {
        Ok(port) => {
            state.listener.set_port(port);
            tracing::info!("Port set to {}", port);
        }
        Err(PortArgError::Missing) => state.display.display(notice::PORT_MISSING),
        Err(e @ PortArgError::Invalid(_)) => {
            tracing::debug!("{}", e);
            state.display.display(notice::INVALID_PORT);
        }
    }
}

async fn start(state: &AppState) -> ConsoleOutcome {
    if state.listener.is_listening() {
        state.display.display(notice::ALREADY_LISTENING);
        return ConsoleOutcome::Continue;
    }

    match state.listener.listen().await {
        Ok(()) => ConsoleOutcome::Continue,
        Err(e) => {
            tracing::error!("{}", e);
            state.display.display(notice::COULD_NOT_LISTEN);
            ConsoleOutcome::Abort(e)
        }
    }
}

/// Stop listening for good and close every connection.
pub async fn close_server(state: &AppState) {
    if let Err(e) = state.listener.close().await {
        tracing::warn!("Failed to close listener: {}", e);
    }
    let closed = state.repository.close_all().await;
    tracing::info!("Closed {} connection(s)", closed);
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use super::*;
    use crate::{
        domain::{
            ConnectionHandle, ConnectionIdFactory, Outbound, SessionRepository, Timestamp,
            transport::MockConnectionListener,
        },
        infrastructure::repository::InMemorySessionRepository,
    };
    use parlor_shared::MemoryDisplay;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Fixture {
        state: AppState,
        repository: Arc<InMemorySessionRepository>,
        display: Arc<MemoryDisplay>,
    }

    fn create_test_state(listener: MockConnectionListener) -> Fixture {
        let repository = Arc::new(InMemorySessionRepository::new());
        let display = Arc::new(MemoryDisplay::new());
        let state = AppState::new(repository.clone(), Arc::new(listener), display.clone());
        Fixture {
            state,
            repository,
            display,
        }
    }

    async fn connect(repository: &InMemorySessionRepository) -> UnboundedReceiver<Outbound> {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(
            ConnectionIdFactory::generate(),
            "127.0.0.1:40000".parse().unwrap(),
            tx,
        );
        repository
            .register(handle, Timestamp::new(0))
            .await
            .unwrap();
        rx
    }

    fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<Outbound> {
        let mut out = Vec::new();
        while let Ok(message) = rx.try_recv() {
            out.push(message);
        }
        out
    }

    #[tokio::test]
    async fn test_chat_line_is_announced_and_displayed() {
        // テスト項目: コマンドでない行は SERVER MSG> 付きで全接続に送られ、コンソールにも表示される
        // given (前提条件):
        let fixture = create_test_state(MockConnectionListener::new());
        let mut rx = connect(&fixture.repository).await;

        // when (操作):
        let outcome = handle_console_line(&fixture.state, "maintenance at noon").await;

        // then (期待する結果):
        assert!(matches!(outcome, ConsoleOutcome::Continue));
        assert_eq!(
            drain(&mut rx),
            vec![Outbound::Payload("SERVER MSG> maintenance at noon".to_string())]
        );
        assert_eq!(
            fixture.display.last().as_deref(),
            Some("SERVER MSG> maintenance at noon")
        );
    }

    #[tokio::test]
    async fn test_quit_closes_everything() {
        // テスト項目: #quit はリスナーと全接続を閉じて Quit を返す
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_close().times(1).returning(|| Ok(()));
        let fixture = create_test_state(listener);
        let mut rx = connect(&fixture.repository).await;

        // when (操作):
        let outcome = handle_console_line(&fixture.state, "#quit").await;

        // then (期待する結果):
        assert!(matches!(outcome, ConsoleOutcome::Quit));
        assert_eq!(drain(&mut rx), vec![Outbound::Close]);
    }

    #[tokio::test]
    async fn test_stop_keeps_connections_open() {
        // テスト項目: #stop は受付だけを止め、既存の接続は閉じない
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_stop_listening().times(1).returning(|| ());
        let fixture = create_test_state(listener);
        let mut rx = connect(&fixture.repository).await;

        // when (操作):
        let outcome = handle_console_line(&fixture.state, "#stop").await;

        // then (期待する結果):
        assert!(matches!(outcome, ConsoleOutcome::Continue));
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_close_closes_connections_and_continues() {
        // テスト項目: #close は全接続を閉じるがプロセスは継続する
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_close().times(1).returning(|| Ok(()));
        let fixture = create_test_state(listener);
        let mut rx = connect(&fixture.repository).await;

        // when (操作):
        let outcome = handle_console_line(&fixture.state, "#close").await;

        // then (期待する結果):
        assert!(matches!(outcome, ConsoleOutcome::Continue));
        assert_eq!(drain(&mut rx), vec![Outbound::Close]);
    }

    #[tokio::test]
    async fn test_setport_while_open_is_refused() {
        // テスト項目: 受付中（closed でない）に #setport すると拒否され、ポートは変わらない
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_set_port().never();
        let fixture = create_test_state(listener);
        fixture.state.set_closed(false);

        // when (操作):
        handle_console_line(&fixture.state, "#setport 6000").await;

        // then (期待する結果):
        assert_eq!(
            fixture.display.last().as_deref(),
            Some("Server must be closed to change the port")
        );
    }

    #[tokio::test]
    async fn test_setport_when_closed() {
        // テスト項目: closed のときの #setport はポートを変更し、引数の不備は表示される
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener
            .expect_set_port()
            .with(mockall::predicate::eq(6000))
            .times(1)
            .returning(|_| ());
        let fixture = create_test_state(listener);

        // when (操作):
        handle_console_line(&fixture.state, "#setport 6000").await;
        handle_console_line(&fixture.state, "#setport").await;
        handle_console_line(&fixture.state, "#setport abc").await;

        // then (期待する結果):
        assert_eq!(
            fixture.display.lines(),
            vec!["Port missing".to_string(), "Invalid port".to_string()]
        );
    }

    #[tokio::test]
    async fn test_start_when_already_listening() {
        // テスト項目: 受付中の #start は何もせずにその旨を表示する
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_is_listening().returning(|| true);
        listener.expect_listen().never();
        let fixture = create_test_state(listener);

        // when (操作):
        let outcome = handle_console_line(&fixture.state, "#start").await;

        // then (期待する結果):
        assert!(matches!(outcome, ConsoleOutcome::Continue));
        assert_eq!(
            fixture.display.last().as_deref(),
            Some("Server is already listening for connections")
        );
    }

    #[tokio::test]
    async fn test_start_failure_aborts() {
        // テスト項目: #start で listen に失敗するとエラーを表示して Abort を返す
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_is_listening().returning(|| false);
        listener.expect_listen().times(1).returning(|| {
            Err(TransportError::Listen {
                port: 5555,
                source: io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
            })
        });
        let fixture = create_test_state(listener);

        // when (操作):
        let outcome = handle_console_line(&fixture.state, "#start").await;

        // then (期待する結果):
        assert!(matches!(
            outcome,
            ConsoleOutcome::Abort(TransportError::Listen { port: 5555, .. })
        ));
        assert_eq!(
            fixture.display.last().as_deref(),
            Some("ERROR - Could not listen for clients!")
        );
    }

    #[tokio::test]
    async fn test_getport_and_unknown_command() {
        // テスト項目: #getport は設定中のポートを表示し、未知のコマンドは何も表示しない
        // given (前提条件):
        let mut listener = MockConnectionListener::new();
        listener.expect_port().returning(|| 5555);
        let fixture = create_test_state(listener);
        let mut rx = connect(&fixture.repository).await;

        // when (操作):
        handle_console_line(&fixture.state, "#getport").await;
        handle_console_line(&fixture.state, "#frobnicate").await;

        // then (期待する結果):
        assert_eq!(fixture.display.lines(), vec!["5555".to_string()]);
        assert!(drain(&mut rx).is_empty());
    }
}
