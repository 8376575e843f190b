//! Client execution logic.
//!
//! [`Client::run`] is the one place where events are consumed: user intents
//! and connection events are taken from their channels one at a time, fed to
//! [`ClientState::apply`], and the resulting commands are executed before the
//! next event is looked at.

use tokio::sync::{mpsc, watch};

use crate::{
    config::ClientConfig,
    connection::{
        ConnectionEvent, ConnectionHandle, ConnectionId, ConnectionManager, EventReceiver,
    },
    domain::{ClientEvent, ClientState, Command, UserIntent},
    error::ClientError,
    infrastructure::dto::decode_server_message,
    ui::{Presenter, Screen},
};

/// Root client: owns the state, the single connection and the presenter
pub struct Client<P: Presenter> {
    config: ClientConfig,
    state: ClientState,
    connection: Option<ConnectionHandle>,
    manager: ConnectionManager,
    events_rx: EventReceiver,
    presenter: P,
    screen_tx: watch::Sender<Screen>,
}

impl<P: Presenter> Client<P> {
    pub fn new(config: ClientConfig, presenter: P) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (screen_tx, _) = watch::channel(Screen::default());
        Self {
            config,
            state: ClientState::default(),
            connection: None,
            manager: ConnectionManager::new(events_tx),
            events_rx,
            presenter,
            screen_tx,
        }
    }

    /// Subscribe to screen changes (used by the input thread to pick a prompt)
    pub fn screen(&self) -> watch::Receiver<Screen> {
        self.screen_tx.subscribe()
    }

    /// Run until the intent channel closes or a fatal error occurs
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<UserIntent>,
    ) -> Result<(), ClientError> {
        self.publish();

        let result = loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => {
                        if let Err(e) = self.dispatch(intent.into()) {
                            break Err(e);
                        }
                    }
                    None => {
                        tracing::info!("Input closed");
                        break Ok(());
                    }
                },
                Some((id, event)) = self.events_rx.recv() => {
                    if let Err(e) = self.on_connection_event(id, event) {
                        break Err(e);
                    }
                }
            }
        };

        if let Some(connection) = self.connection.take() {
            connection.disconnect();
        }

        result
    }

    fn on_connection_event(
        &mut self,
        id: ConnectionId,
        event: ConnectionEvent,
    ) -> Result<(), ClientError> {
        if self.connection.as_ref().map(ConnectionHandle::id) != Some(id) {
            tracing::debug!("Discarding {:?} from stale connection {}", event, id);
            return Ok(());
        }

        let event = match event {
            ConnectionEvent::Opened => ClientEvent::Opened,
            ConnectionEvent::Message(text) => {
                tracing::info!("Processing incoming message {}...", text);
                ClientEvent::Inbound(decode_server_message(&text)?)
            }
            ConnectionEvent::Malformed(reason) => {
                return Err(ClientError::MalformedMessage(reason));
            }
            ConnectionEvent::Error(error) => ClientEvent::SocketError(error),
            ConnectionEvent::Closed => {
                self.connection = None;
                self.presenter.notice("Connection closed");
                ClientEvent::Closed
            }
        };

        self.dispatch(event)
    }

    /// Apply `event`, execute the resulting commands, then render once
    fn dispatch(&mut self, event: ClientEvent) -> Result<(), ClientError> {
        for command in self.state.apply(event)? {
            self.execute(command)?;
        }

        self.publish();
        Ok(())
    }

    /// Carry out one command without waiting on the network
    fn execute(&mut self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::Connect(username) => {
                if self.connection.as_ref().is_some_and(ConnectionHandle::is_open) {
                    tracing::warn!("Connection already open for '{}'", username);
                    return Ok(());
                }
                // the handshake runs in the connection task and reports `Opened`
                let handle = self.manager.connect(&self.config.ws_url);
                tracing::info!("Connecting as '{}' on connection {}", username, handle.id());
                self.connection = Some(handle);
                Ok(())
            }
            Command::Send(message) => {
                let connection = self.connection.as_ref().ok_or(ClientError::NotConnected)?;
                // the socket may already be gone; its Closed event resets the state
                if let Err(e) = connection.send(&message) {
                    tracing::warn!(
                        "Dropping {:?} on connection {}: {}",
                        message,
                        connection.id(),
                        e
                    );
                }
                Ok(())
            }
            Command::Disconnect => {
                if let Some(connection) = self.connection.take() {
                    connection.disconnect();
                }
                Ok(())
            }
        }
    }

    fn publish(&mut self) {
        self.presenter.render(&self.state);
        self.screen_tx.send_replace(Screen::from(&self.state));
    }
}
