//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, LoginId};

/// 接続受付処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("connection already registered: {0}")]
    AlreadyRegistered(ConnectionId),
}

/// ログイン処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// この接続は既にログイン済み
    #[error("connection is already logged in as '{0}'")]
    AlreadyLoggedIn(LoginId),

    /// 拒否済みで切断処理中の接続
    #[error("connection was rejected: {0}")]
    Rejected(ConnectionId),

    /// 登録されていない接続（既に切断済み）
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// ログインハンドシェイク前のチャット
    #[error("connection has not logged in")]
    NotLoggedIn,

    /// 拒否済みで切断処理中の接続
    #[error("connection was rejected: {0}")]
    Rejected(ConnectionId),

    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
}
