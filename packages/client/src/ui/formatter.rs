//! Message formatting utilities for client display.

use mim_shared::time::timestamp_to_clock;

use crate::domain::{Backdrop, TranscriptLine};

const ANSI_RESET: &str = "\x1b[0m";
const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the title banner in the given backdrop colour
    ///
    /// # Arguments
    ///
    /// * `backdrop` - Colour derived from the current state
    /// * `ansi` - Whether to emit ANSI colour sequences
    pub fn format_banner(backdrop: Backdrop, ansi: bool) -> String {
        let title = format!(" Minimum Instant Messenger [{}] ", backdrop.as_str());
        let title = if ansi {
            format!("{}{}{}", backdrop.ansi_background(), title, ANSI_RESET)
        } else {
            title
        };
        format!("\n{}\n{}\n{}\n", RULE, title, RULE)
    }

    /// Format the join screen
    pub fn format_join_screen() -> String {
        "Enter a username to join. Press Ctrl+D to exit.\n".to_string()
    }

    /// Format the waiting-for-partner screen
    pub fn format_waiting(username: &str) -> String {
        format!(
            "Hi '{}'! Waiting for someone to chat with...\nType /quit to leave.\n",
            username
        )
    }

    /// Format the header shown when a session starts
    ///
    /// # Arguments
    ///
    /// * `partner` - Username of the other participant
    /// * `started_at` - Unix timestamp when the session was shown (milliseconds)
    pub fn format_session_started(partner: &str, started_at: i64) -> String {
        let clock = timestamp_to_clock(started_at).unwrap_or_default();
        format!(
            "You are now chatting with '{}' (since {}).\n\
             Type a message and press Enter. /rematch finds a new partner, /quit leaves.\n",
            partner, clock
        )
    }

    /// Format one transcript line, marking our own lines
    pub fn format_transcript_line(line: &TranscriptLine, me: &str) -> String {
        let me_suffix = if line.username == me { " (me)" } else { "" };
        format!("@{}{}: {}\n", line.username, me_suffix, line.msg)
    }

    /// Format the end-of-session summary
    ///
    /// # Arguments
    ///
    /// * `result` - Outcome sent by the server, if any
    pub fn format_session_ended(result: Option<&str>) -> String {
        let outcome = result.unwrap_or("The conversation has ended.");
        format!(
            "\n{}\n{}\nType /rematch to find a new partner or /quit to leave.\n{}\n",
            RULE, outcome, RULE
        )
    }

    /// Format a notice to the user
    pub fn format_notice(text: &str) -> String {
        format!("\n! {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_banner_without_ansi() {
        // テスト項目: ANSI 無効時はプレーンなタイトルと色名が表示される
        // given (前提条件):
        let backdrop = Backdrop::LightBlue;

        // when (操作):
        let result = MessageFormatter::format_banner(backdrop, false);

        // then (期待する結果):
        assert!(result.contains("Minimum Instant Messenger [lightblue]"));
        assert!(!result.contains('\x1b'));
    }

    #[test]
    fn test_format_banner_with_ansi() {
        // テスト項目: ANSI 有効時は背景色シーケンスとリセットが含まれる
        // given (前提条件):
        let backdrop = Backdrop::LightGreen;

        // when (操作):
        let result = MessageFormatter::format_banner(backdrop, true);

        // then (期待する結果):
        assert!(result.contains(backdrop.ansi_background()));
        assert!(result.contains(ANSI_RESET));
    }

    #[test]
    fn test_format_waiting() {
        // テスト項目: 待機画面にユーザー名が表示される
        // given (前提条件):
        let username = "alice";

        // when (操作):
        let result = MessageFormatter::format_waiting(username);

        // then (期待する結果):
        assert!(result.contains("'alice'"));
        assert!(result.contains("/quit"));
    }

    #[test]
    fn test_format_session_started() {
        // テスト項目: セッション開始時に相手の名前と時刻が表示される
        // given (前提条件):
        let partner = "bob";
        let started_at = 1672498800000;

        // when (操作):
        let result = MessageFormatter::format_session_started(partner, started_at);

        // then (期待する結果):
        assert!(result.contains("chatting with 'bob'"));
        assert!(result.contains("/rematch"));
        assert!(result.contains(&timestamp_to_clock(started_at).unwrap()));
    }

    #[test]
    fn test_format_transcript_line_marks_me() {
        // テスト項目: 自分の発言には (me) が付き、相手の発言には付かない
        // given (前提条件):
        let mine = TranscriptLine {
            username: "alice".to_string(),
            msg: "hi".to_string(),
        };
        let theirs = TranscriptLine {
            username: "bob".to_string(),
            msg: "hello".to_string(),
        };

        // when (操作):
        let mine_result = MessageFormatter::format_transcript_line(&mine, "alice");
        let theirs_result = MessageFormatter::format_transcript_line(&theirs, "alice");

        // then (期待する結果):
        assert_eq!(mine_result, "@alice (me): hi\n");
        assert_eq!(theirs_result, "@bob: hello\n");
    }

    #[test]
    fn test_format_session_ended_with_result() {
        // テスト項目: 終了理由がある場合はそれが表示される
        // given (前提条件):
        let result = Some("bob left");

        // when (操作):
        let output = MessageFormatter::format_session_ended(result);

        // then (期待する結果):
        assert!(output.contains("bob left"));
        assert!(output.contains("/rematch"));
    }

    #[test]
    fn test_format_session_ended_without_result() {
        // テスト項目: 終了理由が無い場合は既定の文言が表示される
        // given (前提条件):
        let result = None;

        // when (操作):
        let output = MessageFormatter::format_session_ended(result);

        // then (期待する結果):
        assert!(output.contains("The conversation has ended."));
    }

    #[test]
    fn test_format_notice() {
        // テスト項目: 通知が目印付きで表示される
        // given (前提条件):
        let text = "Connection closed";

        // when (操作):
        let output = MessageFormatter::format_notice(text);

        // then (期待する結果):
        assert_eq!(output, "\n! Connection closed\n");
    }
}
