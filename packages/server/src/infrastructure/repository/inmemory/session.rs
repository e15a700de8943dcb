//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! セッション属性（ログイン ID）と送信用の ConnectionHandle を同じエントリに保持し、
//! 単一の Mutex で保護します。これにより、切断による削除とブロードキャストの列挙が
//! 同時に走ることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionHandle, ConnectionId, LoginId, RepositoryError, Session, SessionRepository,
    Timestamp,
};

/// 1 接続分のエントリ
struct SessionEntry {
    session: Session,
    connection: ConnectionHandle,
}

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    /// 接続中のセッション（ConnectionId → エントリ）
    sessions: Mutex<HashMap<ConnectionId, SessionEntry>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(
        &self,
        connection: ConnectionHandle,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let id = connection.id();
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&id) {
            return Err(RepositoryError::AlreadyRegistered(id));
        }

        let session = Session::new(id, connection.peer(), connected_at);
        sessions.insert(
            id,
            SessionEntry {
                session,
                connection,
            },
        );
        Ok(())
    }

    async fn remove(&self, id: &ConnectionId) -> Result<Session, RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(id)
            .map(|entry| entry.session)
            .ok_or(RepositoryError::SessionNotFound(*id))
    }

    async fn get_session(&self, id: &ConnectionId) -> Result<Session, RepositoryError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(id)
            .map(|entry| entry.session.clone())
            .ok_or(RepositoryError::SessionNotFound(*id))
    }

    async fn record_login(
        &self,
        id: &ConnectionId,
        login: LoginId,
    ) -> Result<Session, RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(id)
            .ok_or(RepositoryError::SessionNotFound(*id))?;
        entry.session.log_in(login)?;
        Ok(entry.session.clone())
    }

    async fn send_to(&self, id: &ConnectionId, payload: &str) -> Result<(), RepositoryError> {
        let sessions = self.sessions.lock().await;
        let entry = sessions
            .get(id)
            .ok_or(RepositoryError::SessionNotFound(*id))?;
        if let Err(e) = entry.connection.send(payload) {
            tracing::warn!("Failed to send to connection '{}': {}", id, e);
        }
        Ok(())
    }

    async fn reject(&self, id: &ConnectionId, payload: &str) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(id)
            .ok_or(RepositoryError::SessionNotFound(*id))?;
        entry.session.reject();
        if let Err(e) = entry.connection.send(payload) {
            tracing::debug!("Rejection for '{}' not delivered: {}", id, e);
        }
        if let Err(e) = entry.connection.close() {
            tracing::debug!("Connection '{}' already closed: {}", id, e);
        }
        Ok(())
    }

    async fn broadcast(&self, payload: &str) -> usize {
        let sessions = self.sessions.lock().await;
        let mut delivered = 0;
        // Rejected connections are closing and receive nothing more
        let live = sessions.iter().filter(|(_, entry)| !entry.session.rejected);
        for (id, entry) in live {
            match entry.connection.send(payload) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to broadcast to connection '{}': {}", id, e),
            }
        }
        delivered
    }

    async fn close_all(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions
            .values()
            .filter(|entry| entry.connection.close().is_ok())
            .count()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
