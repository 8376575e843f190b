//! Minimum Instant Messenger terminal client.
//!
//! Asks for a username, connects to the matchmaking server and shows the
//! conversation it pairs you into. Type `/rematch` for a new partner and
//! `/quit` to go back to the join screen.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mim-client
//! cargo run --bin mim-client -- --url ws://127.0.0.1:8080/ws --username alice
//! MIM_WS_URL=ws://chat.example.com/ws cargo run --bin mim-client
//! ```

use std::io::IsTerminal;

use clap::Parser;
use tokio::sync::mpsc;

use mim_client::{
    Client,
    config::{ClientConfig, DEFAULT_WS_URL, WS_URL_ENV},
    domain::{UserIntent, Username},
    ui::{TerminalPresenter, spawn_input_thread},
};
use mim_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "mim-client")]
#[command(about = "Minimum Instant Messenger: two-person chat over WebSocket", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, env = WS_URL_ENV, default_value = DEFAULT_WS_URL)]
    url: String,

    /// Join immediately with this username instead of asking for it
    #[arg(short = 'n', long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ClientConfig::new(args.url);

    let presenter = TerminalPresenter::new(std::io::stdout().is_terminal());
    let client = Client::new(config, presenter);
    let (intents_tx, intents_rx) = mpsc::unbounded_channel();

    if let Some(username) = args.username {
        match Username::new(username) {
            Ok(username) => {
                let _ = intents_tx.send(UserIntent::Join(username));
            }
            Err(e) => {
                tracing::error!("Invalid username: {}", e);
                std::process::exit(1);
            }
        }
    }

    let _input_handle = spawn_input_thread(client.screen(), intents_tx);

    // Run the client
    if let Err(e) = client.run(intents_rx).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
