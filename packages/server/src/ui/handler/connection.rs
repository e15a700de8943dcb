//! Transport event handlers.
//!
//! Every [`ServerEvent`] is dispatched here one at a time, so the login
//! handshake and the registry updates of a connection never interleave.

use crate::{
    domain::{
        ConnectionHandle, ConnectionId, InboundPayload, LoginId, MessageContent, ServerEvent,
        notice,
    },
    ui::state::AppState,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, LoginError, LoginUseCase,
        SendMessageError, SendMessageUseCase,
    },
};
use parlor_shared::TransportError;

pub async fn handle_event(state: &AppState, event: ServerEvent) {
    match event {
        ServerEvent::Connected(connection) => on_connected(state, connection).await,
        ServerEvent::Message { id, payload } => on_message(state, id, &payload).await,
        ServerEvent::Disconnected(id) => on_disconnected(state, id).await,
        ServerEvent::Exception { id, error } => on_exception(state, id, error).await,
        ServerEvent::ListenStarted { port } => {
            state.set_closed(false);
            state.display.display(&notice::listen_started(port));
        }
        ServerEvent::ListenStopped => {
            state.set_closed(true);
            state.display.display(notice::LISTEN_STOPPED);
        }
        ServerEvent::ListenClosed => {
            state.set_closed(true);
            state.display.display(notice::LISTEN_CLOSED);
        }
    }
}

async fn on_connected(state: &AppState, connection: ConnectionHandle) {
    let peer = connection.peer();
    let connect_usecase = ConnectParticipantUseCase::new(state.repository.clone());

    match connect_usecase.execute(connection).await {
        Ok(_) => state.display.display(&notice::client_connected(peer)),
        Err(e) => tracing::error!("Failed to register connection from {}: {}", peer, e),
    }
}

async fn on_message(state: &AppState, id: ConnectionId, payload: &str) {
    tracing::debug!("Message received: '{}' from {}", payload, id);

    // Frames already read from a refused connection are dropped
    match state.repository.get_session(&id).await {
        Ok(session) if session.rejected => {
            tracing::debug!("Dropping payload from rejected connection {}", id);
            return;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!("Message ignored: {}", e);
            return;
        }
    }

    match InboundPayload::parse(payload) {
        InboundPayload::Login(argument) => on_login(state, id, argument).await,
        InboundPayload::Chat(text) => on_chat(state, id, text).await,
    }
}

async fn on_login(state: &AppState, id: ConnectionId, argument: Option<&str>) {
    let login_usecase = LoginUseCase::new(state.repository.clone());

    // Convert &str -> LoginId (Domain Model)
    let login = match argument.map(LoginId::try_from) {
        Some(Ok(login)) => login,
        Some(Err(e)) => {
            tracing::warn!("Invalid login id from {}: {}", id, e);
            login_usecase.reject(&id, notice::LOGIN_FAILED).await;
            return;
        }
        None => {
            tracing::warn!("Login directive without an id from {}", id);
            login_usecase.reject(&id, notice::LOGIN_FAILED).await;
            return;
        }
    };

    match login_usecase.execute(&id, login).await {
        Ok(_) => {}
        Err(LoginError::AlreadyLoggedIn(current)) => {
            tracing::warn!(
                "Connection {} already logged in as '{}'. Closing it.",
                id,
                current
            );
            login_usecase.reject(&id, notice::ALREADY_LOGGED_IN).await;
        }
        Err(e @ (LoginError::UnknownConnection(_) | LoginError::Rejected(_))) => {
            tracing::debug!("Login ignored: {}", e);
        }
    }
}

async fn on_chat(state: &AppState, id: ConnectionId, text: &str) {
    let send_usecase = SendMessageUseCase::new(state.repository.clone());

    let content = match MessageContent::new(text.to_string()) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Rejected message from {}: {}", id, e);
            send_usecase.reply(&id, notice::MESSAGE_TOO_LONG).await;
            return;
        }
    };

    match send_usecase.execute(&id, content).await {
        Ok(_) => {}
        Err(SendMessageError::NotLoggedIn) => {
            tracing::warn!("Chat from {} before login", id);
            send_usecase.reply(&id, notice::LOGIN_REQUIRED).await;
        }
        Err(e @ (SendMessageError::UnknownConnection(_) | SendMessageError::Rejected(_))) => {
            tracing::debug!("Message ignored: {}", e);
        }
    }
}

async fn on_disconnected(state: &AppState, id: ConnectionId) {
    let disconnect_usecase = DisconnectParticipantUseCase::new(state.repository.clone());

    match disconnect_usecase.execute(&id).await {
        Ok(session) => {
            state
                .display
                .display(&notice::client_disconnected(&session.display_name()));
            tracing::info!(
                "{} from {} disconnected (connected since {}), {} connection(s) remaining",
                session.display_name(),
                session.peer,
                session.connected_at,
                disconnect_usecase.count_remaining().await
            );
        }
        Err(e) => tracing::debug!("Disconnect ignored: {}", e),
    }
}

async fn on_exception(state: &AppState, id: ConnectionId, error: TransportError) {
    match state.repository.get_session(&id).await {
        Ok(session) => state
            .display
            .display(&notice::connection_error(session.peer, &error)),
        Err(_) => tracing::warn!("Connection error from {}: {}", id, error),
    }
}
