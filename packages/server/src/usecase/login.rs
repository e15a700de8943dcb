//! UseCase: ログインハンドシェイク
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() / reject() メソッド
//! - ログイン ID の記録と参加通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 1 つの接続はハンドシェイクを 1 回だけ完了できる
//! - 2 回目のログイン試行が他の接続の状態を壊さないことを保証
//! - 参加通知は新しい接続自身を含む全ての接続に届く必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：未ログインの接続のログイン
//! - 異常系：ログイン済みの接続での再ログイン
//! - 異常系：切断済み（未登録）の接続

use std::sync::Arc;

use crate::domain::{
    ConnectionId, LoginId, RepositoryError, SessionError, SessionRepository, notice,
};

use super::error::LoginError;

/// ログインハンドシェイクのユースケース
pub struct LoginUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl LoginUseCase {
    /// 新しい LoginUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// ログインを実行
    ///
    /// ログイン ID を記録し、`<login> has logged on` を全ての接続にブロードキャストする。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加通知を受け取った接続数
    /// * `Err(LoginError)` - 既にログイン済み、または未登録の接続
    pub async fn execute(&self, id: &ConnectionId, login: LoginId) -> Result<usize, LoginError> {
        let session = self
            .repository
            .record_login(id, login)
            .await
            .map_err(|e| match e {
                RepositoryError::Session(SessionError::AlreadyLoggedIn(current)) => {
                    LoginError::AlreadyLoggedIn(current)
                }
                RepositoryError::Session(SessionError::Rejected) => LoginError::Rejected(*id),
                _ => LoginError::UnknownConnection(*id),
            })?;

        let Some(login) = session.login else {
            return Err(LoginError::UnknownConnection(*id));
        };

        let delivered = self.repository.broadcast(&notice::logged_on(&login)).await;
        tracing::info!(
            "'{}' logged on from {}, announced to {} connection(s)",
            login,
            session.peer,
            delivered
        );
        Ok(delivered)
    }

    /// ハンドシェイクを拒否する
    ///
    /// 理由を送信してから接続を閉じる。送信に失敗しても接続は閉じられる。
    pub async fn reject(&self, id: &ConnectionId, reason: &str) {
        if let Err(e) = self.repository.reject(id, reason).await {
            tracing::debug!("Nothing to reject: {}", e);
        }
    }
}
