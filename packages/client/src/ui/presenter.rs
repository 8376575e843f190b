//! Rendering of the client state to the terminal.

use std::io::Write;

use mim_shared::time::now_millis;

use crate::domain::{Backdrop, ClientState, SessionPhase};

use super::{formatter::MessageFormatter, screen::Screen};

/// Presentation layer driven by the runtime after every state change
#[cfg_attr(test, mockall::automock)]
pub trait Presenter: Send {
    /// Show the given state
    fn render(&mut self, state: &ClientState);

    /// Show a one-off message that is not part of the state
    fn notice(&mut self, message: &str);
}

/// Presenter printing to stdout.
///
/// Screens are printed once when entered; while in a session only the
/// transcript lines that have not been printed yet are added.
pub struct TerminalPresenter {
    ansi: bool,
    screen: Option<Screen>,
    shown_lines: usize,
}

impl TerminalPresenter {
    pub fn new(ansi: bool) -> Self {
        Self {
            ansi,
            screen: None,
            shown_lines: 0,
        }
    }

    fn render_to_string(&mut self, state: &ClientState) -> String {
        let screen = Screen::from(state);
        let changed = self.screen.as_ref() != Some(&screen);
        let mut output = String::new();

        match state {
            ClientState::LoggedOut => {
                if changed {
                    output.push_str(&self.banner(state));
                    output.push_str(&MessageFormatter::format_join_screen());
                }
                self.shown_lines = 0;
            }
            ClientState::AwaitingSession { username } => {
                if changed {
                    output.push_str(&self.banner(state));
                    output.push_str(&MessageFormatter::format_waiting(username.as_str()));
                }
                self.shown_lines = 0;
            }
            ClientState::InSession {
                username,
                session,
                phase,
            } => {
                // a new session can start straight from the summary screen
                let entering = match (&self.screen, phase) {
                    (Some(Screen::Chat { .. }), _) => false,
                    (Some(Screen::Summary { .. }), SessionPhase::Ended) => false,
                    _ => true,
                };
                if entering {
                    let partner = session
                        .partner_of(username)
                        .map(|person| person.username.as_str())
                        .unwrap_or("someone");
                    output.push_str(&self.banner(state));
                    output.push_str(&MessageFormatter::format_session_started(
                        partner,
                        now_millis(),
                    ));
                    self.shown_lines = 0;
                }

                let transcript = session.transcript();
                // a shorter list means the server started over
                if transcript.len() < self.shown_lines {
                    self.shown_lines = 0;
                }
                for line in &transcript[self.shown_lines..] {
                    output.push_str(&MessageFormatter::format_transcript_line(
                        line,
                        username.as_str(),
                    ));
                }
                self.shown_lines = transcript.len();

                if *phase == SessionPhase::Ended && changed {
                    output.push_str(&MessageFormatter::format_session_ended(session.result()));
                }
            }
        }

        self.screen = Some(screen);
        output
    }

    fn banner(&self, state: &ClientState) -> String {
        MessageFormatter::format_banner(Backdrop::for_state(state), self.ansi)
    }

    fn prompt(&self) -> String {
        self.screen.clone().unwrap_or_default().prompt()
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, state: &ClientState) {
        let output = self.render_to_string(state);
        if !output.is_empty() {
            print!("\n{}", output);
            redisplay_prompt(&self.prompt());
        }
    }

    fn notice(&mut self, message: &str) {
        print!("{}", MessageFormatter::format_notice(message));
        redisplay_prompt(&self.prompt());
    }
}

/// Redisplay the prompt after printing asynchronously
fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageSession, Username};
    use serde_json::{Value, json};

    fn username(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    fn in_session(messages: Value, phase: SessionPhase, result: Option<&str>) -> ClientState {
        let mut payload = json!({
            "person1": {"username": "alice"},
            "person2": {"username": "bob"},
            "messages": messages
        });
        if let Some(result) = result {
            payload["result"] = json!(result);
        }
        let session: MessageSession = serde_json::from_value(payload).unwrap();
        ClientState::InSession {
            username: username("alice"),
            session,
            phase,
        }
    }

    #[test]
    fn test_join_screen_rendered_once() {
        // テスト項目: 参加画面は最初の一回だけ描画される
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);

        // when (操作):
        let first = presenter.render_to_string(&ClientState::LoggedOut);
        let second = presenter.render_to_string(&ClientState::LoggedOut);

        // then (期待する結果):
        assert!(first.contains("[lightgray]"));
        assert!(first.contains("Enter a username"));
        assert!(second.is_empty());
    }

    #[test]
    fn test_session_start_shows_partner_and_colour() {
        // テスト項目: セッション開始時に相手の名前と自分の座席の色が表示される
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);
        presenter.render_to_string(&ClientState::AwaitingSession {
            username: username("alice"),
        });

        // when (操作):
        let output =
            presenter.render_to_string(&in_session(json!([]), SessionPhase::Active, None));

        // then (期待する結果):
        assert!(output.contains("[lightblue]"));
        assert!(output.contains("chatting with 'bob'"));
    }

    #[test]
    fn test_updates_print_only_new_lines() {
        // テスト項目: セッション更新時は新しい発言のみが追加表示される
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);
        presenter.render_to_string(&in_session(
            json!([{"username": "alice", "msg": "hi"}]),
            SessionPhase::Active,
            None,
        ));

        // when (操作):
        let output = presenter.render_to_string(&in_session(
            json!([
                {"username": "alice", "msg": "hi"},
                {"username": "bob", "msg": "hello"}
            ]),
            SessionPhase::Active,
            None,
        ));

        // then (期待する結果):
        assert_eq!(output, "@bob: hello\n");
    }

    #[test]
    fn test_ended_session_shows_summary() {
        // テスト項目: セッション終了時に終了理由と次の操作が表示される
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);
        presenter.render_to_string(&in_session(json!([]), SessionPhase::Active, None));

        // when (操作):
        let output = presenter.render_to_string(&in_session(
            json!([]),
            SessionPhase::Ended,
            Some("bob left"),
        ));

        // then (期待する結果):
        assert!(output.contains("bob left"));
        assert!(output.contains("/rematch"));
        assert!(!output.contains("chatting with"));
    }

    #[test]
    fn test_rematch_returns_to_waiting_screen() {
        // テスト項目: 再戦要求後は待機画面が再表示され、次のセッションは最初から描画される
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);
        presenter.render_to_string(&in_session(
            json!([{"username": "alice", "msg": "hi"}]),
            SessionPhase::Ended,
            None,
        ));

        // when (操作):
        let waiting = presenter.render_to_string(&ClientState::AwaitingSession {
            username: username("alice"),
        });
        let restarted = presenter.render_to_string(&in_session(
            json!([{"username": "alice", "msg": "hi"}]),
            SessionPhase::Active,
            None,
        ));

        // then (期待する結果):
        assert!(waiting.contains("Waiting for someone"));
        assert!(restarted.contains("chatting with 'bob'"));
        assert!(restarted.contains("@alice (me): hi"));
    }

    #[test]
    fn test_new_session_from_summary_screen_is_rendered_from_scratch() {
        // テスト項目: 終了画面のまま新しいセッションが始まった場合、色と相手の表示からやり直す
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);
        presenter.render_to_string(&in_session(
            json!([{"username": "alice", "msg": "hi"}]),
            SessionPhase::Ended,
            Some("bob left"),
        ));

        // when (操作):
        let restarted = presenter.render_to_string(&in_session(
            json!([{"username": "alice", "msg": "hi"}]),
            SessionPhase::Active,
            None,
        ));

        // then (期待する結果):
        assert!(restarted.contains("[lightblue]"));
        assert!(restarted.contains("chatting with 'bob'"));
        assert!(restarted.contains("@alice (me): hi"));
    }

    #[test]
    fn test_repeated_summary_is_not_reprinted() {
        // テスト項目: 終了画面で同じ終了メッセージを再度受け取っても何も表示しない
        // given (前提条件):
        let mut presenter = TerminalPresenter::new(false);
        let ended = in_session(json!([]), SessionPhase::Ended, Some("bob left"));
        presenter.render_to_string(&ended);

        // when (操作):
        let output = presenter.render_to_string(&ended);

        // then (期待する結果):
        assert!(output.is_empty());
    }
}
