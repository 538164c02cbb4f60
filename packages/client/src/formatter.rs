//! Reply formatting for terminal display.

use skydesk_shared::time::timestamp_to_rfc3339;

const BORDER: &str = "------------------------------------------------------------";

/// Reply formatter for client display
pub struct ReplyFormatter;

impl ReplyFormatter {
    /// Format the banner shown once connected
    pub fn format_welcome(addr: &str) -> String {
        format!(
            "\n============================================================\n\
             Skydesk desk at {}\n\
             LOGON <name> to start, EXIT or LOGOFF to leave\n\
             ============================================================\n",
            addr
        )
    }

    /// Format the frames received for one request.
    ///
    /// Every frame but the last is a chat line that arrived while the
    /// connection was open; the last one is the reply itself.
    ///
    /// # Arguments
    ///
    /// * `frames` - Frames in the order they were received
    /// * `received_at` - Unix timestamp when the reply arrived (milliseconds)
    pub fn format_reply(frames: &[String], received_at: i64) -> String {
        let timestamp_str = timestamp_to_rfc3339(received_at);
        let Some((reply, chat)) = frames.split_last() else {
            return format!("(no reply) at {}\n", timestamp_str);
        };

        let mut output = String::new();
        for line in chat {
            output.push_str(&format!("{}\n", line));
        }
        output.push_str(&format!(
            "{}\n{}\nreceived at {}\n{}\n",
            BORDER, reply, timestamp_str, BORDER
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reply_with_chat_lines() {
        // テスト項目: チャット行が応答より先に表示される
        // given (前提条件):
        let frames = vec!["[bob] hi".to_string(), "[alice] hello".to_string()];

        // when (操作):
        let output = ReplyFormatter::format_reply(&frames, 0);

        // then (期待する結果):
        let chat_at = output.find("[bob] hi").unwrap();
        let reply_at = output.find("[alice] hello").unwrap();
        assert!(chat_at < reply_at);
        assert!(output.contains("received at 1970-01-01T00:00:00"));
    }

    #[test]
    fn test_format_reply_without_frames() {
        // テスト項目: 応答がない場合はその旨が表示される
        // given (前提条件):
        let frames: Vec<String> = Vec::new();

        // when (操作):
        let output = ReplyFormatter::format_reply(&frames, 0);

        // then (期待する結果):
        assert!(output.starts_with("(no reply)"));
    }

    #[test]
    fn test_format_welcome() {
        // テスト項目: 接続先アドレスがバナーに含まれる
        // given (前提条件):
        // when (操作):
        let output = ReplyFormatter::format_welcome("127.0.0.1:9000");

        // then (期待する結果):
        assert!(output.contains("Skydesk desk at 127.0.0.1:9000"));
    }
}
