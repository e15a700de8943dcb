use chrono::{DateTime, FixedOffset, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Get current Unix timestamp in JST (milliseconds)
///
/// Unix time does not depend on the offset, the name only documents which
/// clock the value is rendered against.
pub fn get_jst_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in JST.
///
/// Out-of-range values fall back to the epoch.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let utc = DateTime::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(jst) => utc.with_timezone(&jst).to_rfc3339(),
        None => utc.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_jst_rfc3339_epoch() {
        // テスト項目: Unix エポックが JST の RFC 3339 文字列に変換される
        // given (前提条件):
        let timestamp = 0;

        // when (操作):
        let result = timestamp_to_jst_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result, "1970-01-01T09:00:00+09:00");
    }

    #[test]
    fn test_get_jst_timestamp_is_monotonic_enough() {
        // テスト項目: 連続して取得したタイムスタンプが減少しない
        // when (操作):
        let first = get_jst_timestamp();
        let second = get_jst_timestamp();

        // then (期待する結果):
        assert!(second >= first);
    }
}
