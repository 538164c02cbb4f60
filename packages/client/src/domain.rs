//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, kept apart from the I/O loop.

/// Requests after which the server stops serving this port
pub const SESSION_ENDING_COMMANDS: [&str; 2] = ["EXIT", "LOGOFF"];

/// Check if the client should exit once the reply to `line` arrives.
///
/// Only the bare desk commands count; `EXIT CHAT` leaves the chat room
/// and keeps the session.
pub fn ends_session(line: &str) -> bool {
    SESSION_ENDING_COMMANDS.contains(&line.trim())
}

/// Check if `line` should be sent at all
pub fn is_sendable(line: &str) -> bool {
    !line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_session_with_exit_and_logoff() {
        // テスト項目: EXIT と LOGOFF はクライアントを終了させると判定される
        // given (前提条件):
        let lines = ["EXIT", "LOGOFF", "  LOGOFF\r"];

        // when (操作):
        let result: Vec<bool> = lines.iter().map(|line| ends_session(line)).collect();

        // then (期待する結果):
        assert_eq!(result, vec![true, true, true]);
    }

    #[test]
    fn test_ends_session_with_other_commands() {
        // テスト項目: EXIT CHAT やその他のコマンドではクライアントは終了しない
        // given (前提条件):
        let lines = ["EXIT CHAT", "QUERY AA100", "exit", "TEXT EXIT"];

        // when (操作):
        let result = lines.iter().any(|line| ends_session(line));

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_is_sendable() {
        // テスト項目: 空白だけの行は送信しない
        // given (前提条件):
        // when (操作):
        // then (期待する結果):
        assert!(is_sendable("LIST"));
        assert!(!is_sendable("   "));
        assert!(!is_sendable(""));
    }
}
