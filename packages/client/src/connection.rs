//! Connection management.
//!
//! One [`ConnectionHandle`] per open socket. The socket itself is owned by a
//! background task that forwards everything it sees as `(ConnectionId,
//! ConnectionEvent)` pairs on a single event channel, so the runtime consumes
//! socket callbacks and user input from one place.

use std::fmt;

use tokio::sync::mpsc;

use crate::{
    domain::OutboundMessage,
    error::ClientError,
    infrastructure::{
        dto::encode_client_message,
        transport::{Transport, WebSocketTransport},
    },
};

/// Identifier of one connection attempt, unique per [`ConnectionManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a connection task reports back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The handshake completed and frames can be sent
    Opened,
    /// A frame from the server, not yet decoded
    Message(String),
    /// A frame that cannot even be read as text
    Malformed(String),
    /// A transport error; a `Closed` follows
    Error(String),
    /// The socket is gone. Always the last event of a connection.
    Closed,
}

/// Sending half of the event channel shared by all connections
pub type EventSender = mpsc::UnboundedSender<(ConnectionId, ConnectionEvent)>;

/// Receiving half of the event channel
pub type EventReceiver = mpsc::UnboundedReceiver<(ConnectionId, ConnectionEvent)>;

#[derive(Debug)]
enum Outgoing {
    Text(String),
    Close,
}

/// Handle to an open connection.
///
/// Dropping the handle closes the socket.
#[derive(Debug)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outgoing: mpsc::UnboundedSender<Outgoing>,
}

impl ConnectionHandle {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Serialize `message` and queue it for writing.
    ///
    /// Fails with [`ClientError::NotConnected`] once the socket is gone.
    pub fn send(&self, message: &OutboundMessage) -> Result<(), ClientError> {
        let json = encode_client_message(message)?;
        tracing::debug!("Sending message {} on connection {}", json, self.id);
        self.outgoing
            .send(Outgoing::Text(json))
            .map_err(|_| ClientError::NotConnected)
    }

    /// Ask the connection task to close the socket. Idempotent.
    pub fn disconnect(&self) {
        if self.outgoing.send(Outgoing::Close).is_ok() {
            tracing::debug!("Disconnect requested on connection {}", self.id);
        }
    }

    pub fn is_open(&self) -> bool {
        !self.outgoing.is_closed()
    }
}

/// Opens connections and wires them to the shared event channel
pub struct ConnectionManager {
    next_id: u64,
    events: EventSender,
}

impl ConnectionManager {
    pub fn new(events: EventSender) -> Self {
        Self { next_id: 0, events }
    }

    /// Start a connection task that opens a WebSocket to `url`.
    ///
    /// Returns at once; the handshake runs inside the task and is reported as
    /// [`ConnectionEvent::Opened`]. Disconnecting or dropping the handle
    /// before that cancels the handshake.
    pub fn connect(&mut self, url: &str) -> ConnectionHandle {
        tracing::info!("Connecting to {}", url);
        let url = url.to_string();
        self.spawn_connection(async move { WebSocketTransport::connect(&url).await })
    }

    /// Start a connection task on an already established transport
    pub fn attach(&mut self, transport: impl Transport) -> ConnectionHandle {
        self.spawn_connection(async move { Ok(transport) })
    }

    fn spawn_connection<T, F>(&mut self, handshake: F) -> ConnectionHandle
    where
        T: Transport,
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        self.next_id += 1;
        let id = ConnectionId(self.next_id);
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();

        tokio::spawn(connection_task(
            id,
            handshake,
            outgoing_rx,
            self.events.clone(),
        ));

        ConnectionHandle {
            id,
            outgoing: outgoing_tx,
        }
    }
}

/// Complete the handshake, then serve the connection until it closes
async fn connection_task<T, F>(
    id: ConnectionId,
    handshake: F,
    mut outgoing_rx: mpsc::UnboundedReceiver<Outgoing>,
    events: EventSender,
) where
    T: Transport,
    F: Future<Output = Result<T, ClientError>>,
{
    if let Some(transport) = await_handshake(id, handshake, &mut outgoing_rx, &events).await {
        tracing::info!("Connection {} established", id);
        let _ = events.send((id, ConnectionEvent::Opened));
        connection_loop(id, transport, &mut outgoing_rx, &events).await;
    }

    // Handles must observe the closed channel before anyone sees `Closed`.
    drop(outgoing_rx);
    let _ = events.send((id, ConnectionEvent::Closed));
}

/// Wait for the handshake while honouring a disconnect request.
///
/// Frames queued before the socket is open are dropped, like a browser
/// refusing `send` on a connecting socket.
async fn await_handshake<T, F>(
    id: ConnectionId,
    handshake: F,
    outgoing_rx: &mut mpsc::UnboundedReceiver<Outgoing>,
    events: &EventSender,
) -> Option<T>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::pin!(handshake);

    loop {
        tokio::select! {
            result = &mut handshake => match result {
                Ok(transport) => return Some(transport),
                Err(e) => {
                    tracing::warn!("Handshake failed on connection {}: {}", id, e);
                    let _ = events.send((id, ConnectionEvent::Error(e.to_string())));
                    return None;
                }
            },
            outgoing = outgoing_rx.recv() => match outgoing {
                Some(Outgoing::Text(json)) => {
                    tracing::warn!("Dropping {} queued before connection {} opened", json, id);
                }
                Some(Outgoing::Close) | None => {
                    tracing::info!("Connection {} cancelled during handshake", id);
                    return None;
                }
            },
        }
    }
}

/// Multiplex outgoing frames and incoming frames over one transport
async fn connection_loop<T: Transport>(
    id: ConnectionId,
    mut transport: T,
    outgoing_rx: &mut mpsc::UnboundedReceiver<Outgoing>,
    events: &EventSender,
) {
    loop {
        tokio::select! {
            outgoing = outgoing_rx.recv() => match outgoing {
                Some(Outgoing::Text(json)) => {
                    if let Err(e) = transport.send(json).await {
                        tracing::warn!("Failed to send message on connection {}: {}", id, e);
                        let _ = events.send((id, ConnectionEvent::Error(e.to_string())));
                        break;
                    }
                }
                // explicit disconnect or handle dropped
                Some(Outgoing::Close) | None => {
                    if let Err(e) = transport.close().await {
                        tracing::debug!("Error while closing connection {}: {}", id, e);
                    }
                    break;
                }
            },
            incoming = transport.recv() => match incoming {
                Some(Ok(text)) => {
                    tracing::debug!("Received message {} on connection {}", text, id);
                    let _ = events.send((id, ConnectionEvent::Message(text)));
                }
                Some(Err(ClientError::MalformedMessage(reason))) => {
                    tracing::warn!("Malformed frame on connection {}: {}", id, reason);
                    let _ = events.send((id, ConnectionEvent::Malformed(reason)));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error on connection {}: {}", id, e);
                    let _ = events.send((id, ConnectionEvent::Error(e.to_string())));
                    break;
                }
                None => {
                    tracing::info!("Connection {} closed by peer", id);
                    break;
                }
            },
        }
    }
}
