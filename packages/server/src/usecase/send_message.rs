//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() / announce() / reply() メソッド
//! - チャットメッセージのブロードキャスト（送信者自身を含む）
//!
//! ### なぜこのテストが必要か
//! - 送信者には自分のメッセージがエコーされる必要がある
//! - ログイン前の接続の名前でメッセージが配信されてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済みの接続からのメッセージ
//! - 異常系：ログイン前の接続からのメッセージ
//! - 異常系：拒否済み（切断処理中）の接続からのメッセージ
//! - 正常系：サーバーオペレータからのメッセージ

use std::sync::Arc;

use crate::domain::{ConnectionId, MessageContent, SessionRepository, notice};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// クライアントからのメッセージ送信を実行
    ///
    /// 送信者のログイン ID を前置した `<login>: <text>` を、送信者を含む全ての接続に
    /// ブロードキャストする。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - メッセージを受け取った接続数
    /// * `Err(SendMessageError)` - 未ログイン、または未登録の接続
    pub async fn execute(
        &self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<usize, SendMessageError> {
        let session = self
            .repository
            .get_session(from)
            .await
            .map_err(|_| SendMessageError::UnknownConnection(*from))?;

        if session.rejected {
            return Err(SendMessageError::Rejected(*from));
        }

        let Some(login) = session.login else {
            return Err(SendMessageError::NotLoggedIn);
        };

        let line = notice::chat_line(&login, &content);
        let delivered = self.repository.broadcast(&line).await;
        tracing::debug!("Broadcasted '{}' to {} connection(s)", line, delivered);
        Ok(delivered)
    }

    /// サーバーオペレータのメッセージを `SERVER MSG> ` 付きでブロードキャスト
    ///
    /// # Returns
    ///
    /// 送信した行と、受け取った接続数
    pub async fn announce(&self, text: &str) -> (String, usize) {
        let line = notice::server_chat_line(text);
        let delivered = self.repository.broadcast(&line).await;
        (line, delivered)
    }

    /// 1 つの接続だけに返信する（エラー通知など）
    pub async fn reply(&self, to: &ConnectionId, text: &str) {
        if let Err(e) = self.repository.send_to(to, text).await {
            tracing::debug!("Reply not sent: {}", e);
        }
    }
}
