//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断した接続のレジストリからの削除
//!
//! ### なぜこのテストが必要か
//! - 閉じた接続のエントリが残ると、ブロードキャストが死んだ接続を列挙し続ける
//! - 削除後の ConnectionId が再利用されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済み / 未ログインの接続の切断
//! - 異常系：既に削除された接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Session, SessionRepository};

use super::error::DisconnectError;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 削除した接続の最終的なセッション属性
    /// * `Err(DisconnectError)` - 未登録の接続
    pub async fn execute(&self, id: &ConnectionId) -> Result<Session, DisconnectError> {
        self.repository
            .remove(id)
            .await
            .map_err(|_| DisconnectError::UnknownConnection(*id))
    }

    /// 残りの接続数を取得
    pub async fn count_remaining(&self) -> usize {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionHandle, ConnectionIdFactory, LoginId, Timestamp},
        infrastructure::repository::InMemorySessionRepository,
    };
    use tokio::sync::mpsc;

    fn create_test_repository() -> Arc<InMemorySessionRepository> {
        Arc::new(InMemorySessionRepository::new())
    }

    async fn connect(repository: &InMemorySessionRepository) -> ConnectionId {
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionIdFactory::generate();
        let handle = ConnectionHandle::new(id, "127.0.0.1:40000".parse().unwrap(), tx);
        repository
            .register(handle, Timestamp::new(0))
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_disconnect_logged_in_connection() {
        // テスト項目: ログイン済みの接続を切断すると、ログイン ID 付きのセッションが返される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let alice = connect(&repository).await;
        let _bob = connect(&repository).await;
        repository
            .record_login(&alice, LoginId::try_from("alice").unwrap())
            .await
            .unwrap();

        // when (操作):
        let result = usecase.execute(&alice).await;

        // then (期待する結果):
        let session = result.unwrap();
        assert_eq!(session.login, Some(LoginId::try_from("alice").unwrap()));
        assert_eq!(usecase.count_remaining().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_connection() {
        // テスト項目: 最後の接続を切断するとレジストリが空になる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let only = connect(&repository).await;

        // when (操作):
        let result = usecase.execute(&only).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(!result.unwrap().is_logged_in());
        assert_eq!(usecase.count_remaining().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_twice_fails() {
        // テスト項目: 既に削除された接続の切断はエラーになる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let id = connect(&repository).await;
        usecase.execute(&id).await.unwrap();

        // when (操作):
        let result = usecase.execute(&id).await;

        // then (期待する結果):
        assert_eq!(result, Err(DisconnectError::UnknownConnection(id)));
    }
}
