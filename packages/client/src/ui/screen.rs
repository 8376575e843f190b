//! Which screen the client is showing.

use crate::domain::{ClientState, SessionPhase};

/// Screen derived from [`ClientState`], shared with the input thread
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Join form: the next line is a username
    #[default]
    Join,
    /// Waiting for the server to pair us
    Waiting { username: String },
    /// Active conversation
    Chat { username: String },
    /// Ended conversation, waiting for rematch or quit
    Summary { username: String },
}

impl Screen {
    pub fn prompt(&self) -> String {
        match self {
            Self::Join => "username> ".to_string(),
            Self::Waiting { username } | Self::Chat { username } | Self::Summary { username } => {
                format!("{}> ", username)
            }
        }
    }
}

impl From<&ClientState> for Screen {
    fn from(state: &ClientState) -> Self {
        match state {
            ClientState::LoggedOut => Self::Join,
            ClientState::AwaitingSession { username } => Self::Waiting {
                username: username.to_string(),
            },
            ClientState::InSession {
                username, phase, ..
            } => match phase {
                SessionPhase::Active => Self::Chat {
                    username: username.to_string(),
                },
                SessionPhase::Ended => Self::Summary {
                    username: username.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageSession, Username};
    use serde_json::json;

    #[test]
    fn test_screen_follows_state() {
        // テスト項目: 状態に応じた画面が選択される
        // given (前提条件):
        let username = Username::new("alice".to_string()).unwrap();
        let session: MessageSession = serde_json::from_value(json!({
            "person1": {"username": "alice"},
            "person2": {"username": "bob"}
        }))
        .unwrap();
        let ended = ClientState::InSession {
            username: username.clone(),
            session,
            phase: SessionPhase::Ended,
        };

        // when (操作):
        let join = Screen::from(&ClientState::LoggedOut);
        let waiting = Screen::from(&ClientState::AwaitingSession { username });
        let summary = Screen::from(&ended);

        // then (期待する結果):
        assert_eq!(join, Screen::Join);
        assert_eq!(
            waiting,
            Screen::Waiting {
                username: "alice".to_string()
            }
        );
        assert_eq!(
            summary,
            Screen::Summary {
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_prompt_shows_username() {
        // テスト項目: プロンプトにユーザー名が表示される
        // given (前提条件):
        let screen = Screen::Chat {
            username: "alice".to_string(),
        };

        // when (操作):
        let prompt = screen.prompt();

        // then (期待する結果):
        assert_eq!(prompt, "alice> ");
        assert_eq!(Screen::Join.prompt(), "username> ");
    }
}
