//! Repository trait for the session registry.
//!
//! ドメイン層は trait のみを定義し、具体的な実装はインフラ層が提供します（依存性の逆転）。
//! 実装は内部で同期を取る必要があります。登録・削除・ログイン記録・ブロードキャストは
//! 互いに排他的に実行され、切断処理がブロードキャストの列挙と競合しないことを保証します。

use async_trait::async_trait;

use super::{
    entity::Session,
    error::RepositoryError,
    transport::ConnectionHandle,
    value_object::{ConnectionId, LoginId, Timestamp},
};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a freshly accepted connection (not logged in).
    async fn register(
        &self,
        connection: ConnectionHandle,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// Remove a connection and return its final session attributes.
    async fn remove(&self, id: &ConnectionId) -> Result<Session, RepositoryError>;

    async fn get_session(&self, id: &ConnectionId) -> Result<Session, RepositoryError>;

    /// Record the login of a connection, at most once.
    ///
    /// Returns the updated session. Fails with `SessionError::AlreadyLoggedIn`
    /// (wrapped) without touching any state when a login is already recorded.
    async fn record_login(
        &self,
        id: &ConnectionId,
        login: LoginId,
    ) -> Result<Session, RepositoryError>;

    /// Send a payload to one connection.
    ///
    /// A transport failure is logged and swallowed; only an unknown id is an error.
    async fn send_to(&self, id: &ConnectionId, payload: &str) -> Result<(), RepositoryError>;

    /// Send `payload` to a connection, then close it.
    ///
    /// The close happens whether or not the payload could be queued.
    async fn reject(&self, id: &ConnectionId, payload: &str) -> Result<(), RepositoryError>;

    /// Deliver a payload to every registered connection.
    ///
    /// Returns the number of connections the payload was handed to.
    async fn broadcast(&self, payload: &str) -> usize;

    /// Close every registered connection. Entries leave the registry when
    /// their `Disconnected` events are handled.
    async fn close_all(&self) -> usize;

    async fn count(&self) -> usize;
}
