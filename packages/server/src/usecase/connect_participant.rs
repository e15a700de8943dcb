//! UseCase: 接続受付処理
//!
//! 受け付けた接続を未ログインのセッションとしてレジストリに登録します。

use std::sync::Arc;

use crate::domain::{ConnectionHandle, SessionRepository, Timestamp};

use super::error::ConnectError;

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 接続受付を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 登録した接続時刻
    /// * `Err(ConnectError)` - 同じ接続が既に登録済み
    pub async fn execute(&self, connection: ConnectionHandle) -> Result<Timestamp, ConnectError> {
        let id = connection.id();
        let connected_at = Timestamp::now();
        self.repository
            .register(connection, connected_at)
            .await
            .map_err(|_| ConnectError::AlreadyRegistered(id))?;
        Ok(connected_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ConnectionIdFactory, infrastructure::repository::InMemorySessionRepository,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_logged_out_session() {
        // テスト項目: 受け付けた接続が未ログインのセッションとして登録される
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionIdFactory::generate();
        let handle = ConnectionHandle::new(id, "127.0.0.1:40000".parse().unwrap(), tx);

        // when (操作):
        let result = usecase.execute(handle).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let session = repository.get_session(&id).await.unwrap();
        assert!(!session.is_logged_in());
        assert_eq!(session.connected_at, result.unwrap());
    }

    #[tokio::test]
    async fn test_connect_same_connection_twice_fails() {
        // テスト項目: 同じ接続の二重登録はエラーになる
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionIdFactory::generate();
        let handle = ConnectionHandle::new(id, "127.0.0.1:40000".parse().unwrap(), tx);
        usecase.execute(handle.clone()).await.unwrap();

        // when (操作):
        let result = usecase.execute(handle).await;

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::AlreadyRegistered(id)));
        assert_eq!(repository.count().await, 1);
    }
}
