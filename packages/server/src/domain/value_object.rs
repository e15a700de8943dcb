//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a login identifier
pub const MAX_LOGIN_ID_LENGTH: usize = 100;

/// Maximum length of a chat message
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Connection identifier value object.
///
/// Opaque handle for one accepted connection. Generated once per socket and
/// never reused, so a handle that outlives its connection resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login identifier value object.
///
/// Self-declared by the client in its login directive. Since command lines are
/// split on whitespace, an identifier can never contain any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginId(String);

impl LoginId {
    /// Create a new LoginId.
    ///
    /// # Arguments
    ///
    /// * `id` - The login identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the LoginId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::LoginIdEmpty);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValueObjectError::LoginIdContainsWhitespace(id));
        }
        let len = id.chars().count();
        if len > MAX_LOGIN_ID_LENGTH {
            return Err(ValueObjectError::LoginIdTooLong {
                max: MAX_LOGIN_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for LoginId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LoginId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Chat text exactly as the client sent it. Empty text is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::MessageContentTooLong` above
    /// [`MAX_MESSAGE_LENGTH`] characters.
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        let len = content.chars().count();
        if len > MAX_MESSAGE_LENGTH {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_MESSAGE_LENGTH,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current time.
    pub fn now() -> Self {
        Self(parlor_shared::time::get_jst_timestamp())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            parlor_shared::time::timestamp_to_jst_rfc3339(self.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_id_new_success() {
        // テスト項目: 有効なログイン ID を作成できる
        // given (前提条件):
        let id = "alice".to_string();

        // when (操作):
        let result = LoginId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_login_id_new_empty_fails() {
        // テスト項目: 空のログイン ID は作成できない
        // when (操作):
        let result = LoginId::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::LoginIdEmpty);
    }

    #[test]
    fn test_login_id_new_whitespace_fails() {
        // テスト項目: 空白を含むログイン ID は作成できない
        // when (操作):
        let result = LoginId::try_from("al ice");

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::LoginIdContainsWhitespace("al ice".to_string())
        );
    }

    #[test]
    fn test_login_id_new_too_long_fails() {
        // テスト項目: 101 文字以上のログイン ID は作成できない
        // given (前提条件):
        let id = "a".repeat(101);

        // when (操作):
        let result = LoginId::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::LoginIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_message_content_allows_empty() {
        // テスト項目: 空のメッセージ内容も許可される
        // when (操作):
        let result = MessageContent::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "");
    }

    #[test]
    fn test_message_content_new_too_long_fails() {
        // テスト項目: 10001 文字以上のメッセージ内容は作成できない
        // given (前提条件):
        let content = "a".repeat(10_001);

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageContentTooLong {
                max: 10_000,
                actual: 10_001
            }
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert_eq!(ts1.value(), 1000);
    }

    #[test]
    fn test_timestamp_display_is_jst_rfc3339() {
        // テスト項目: タイムスタンプは JST の RFC 3339 で表示される（切断ログで使用）
        // given (前提条件):
        let ts = Timestamp::new(1_500);

        // when (操作):
        let rendered = ts.to_string();

        // then (期待する結果):
        assert_eq!(rendered, "1970-01-01T09:00:01.500+09:00");
    }
}
