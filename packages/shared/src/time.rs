//! Timestamps shown next to replies.

use chrono::{SecondsFormat, TimeZone, Utc};

/// Source of the current time in Unix milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock stopped at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Render Unix milliseconds as UTC RFC 3339 (`2023-01-01T00:00:00.000Z`).
///
/// Out-of-range values fall back to the raw number.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp_millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_rfc3339_format() {
        // テスト項目: タイムスタンプがミリ秒付きの UTC 表記に変換される
        // given (前提条件): 2023-01-01 00:00:00.250 UTC
        let timestamp = 1672531200250;

        // when (操作):
        let result = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01T00:00:00.250Z");
    }

    #[test]
    fn test_timestamp_to_rfc3339_out_of_range() {
        // テスト項目: 範囲外のタイムスタンプは数値のまま返される
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result, i64::MAX.to_string());
    }

    #[test]
    fn test_clocks() {
        // テスト項目: FixedClock は固定値を返し SystemClock は現在時刻を返す
        // given (前提条件):
        let fixed = FixedClock(42);

        // when (操作):
        let system_now = SystemClock.now_millis();

        // then (期待する結果):
        assert_eq!(fixed.now_millis(), 42);
        assert!(system_now > 1672531200000);
    }
}
