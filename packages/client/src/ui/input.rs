//! Line input from the terminal.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, watch};

use crate::domain::{UserIntent, Username, UsernameError};

use super::{formatter::MessageFormatter, screen::Screen};

const QUIT_COMMAND: &str = "/quit";
const REMATCH_COMMAND: &str = "/rematch";

/// Turn one input line into a user intent for the current screen.
///
/// On the join screen the whole line, untrimmed, is the username and only an
/// empty line is skipped. Elsewhere the line is trimmed, blank lines yield
/// `Ok(None)`, `/quit` and `/rematch` are commands and anything else is chat.
pub fn parse_input(line: &str, screen: &Screen) -> Result<Option<UserIntent>, UsernameError> {
    if let Screen::Join = screen {
        if line.is_empty() {
            return Ok(None);
        }
        return Ok(Some(UserIntent::Join(Username::new(line.to_string())?)));
    }

    let line = line.trim();
    let intent = match line {
        "" => return Ok(None),
        QUIT_COMMAND => UserIntent::Quit,
        REMATCH_COMMAND => UserIntent::Rematch,
        _ => UserIntent::SendChat(line.to_string()),
    };
    Ok(Some(intent))
}

/// Spawn a blocking thread for rustyline (synchronous readline).
///
/// The thread ends on Ctrl+C, Ctrl+D or when the intent channel is closed;
/// dropping `intents` is what tells the runtime to stop.
pub fn spawn_input_thread(
    screen: watch::Receiver<Screen>,
    intents: mpsc::UnboundedSender<UserIntent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let current = screen.borrow().clone();

            match rl.readline(&current.prompt()) {
                Ok(line) => {
                    // read again: the screen may have changed while typing
                    let current = screen.borrow().clone();
                    match parse_input(&line, &current) {
                        Ok(Some(intent)) => {
                            if !matches!(current, Screen::Join) {
                                rl.add_history_entry(line.trim()).ok();
                            }
                            if intents.send(intent).is_err() {
                                // Channel closed, exit thread
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => print!("{}", MessageFormatter::format_notice(&e.to_string())),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    })
}
