//! WebSocket connection handler.
//!
//! The per-connection lifecycle lives here: handshake, welcome push, the
//! inbound message loop, and the disconnect path. Relay decisions (who gets
//! what) are delegated to the usecases; this module only parses the wire
//! format and serializes responses.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use idobata_shared::time::epoch_millis;

use crate::{
    domain::{DisplayName, SessionId},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    usecase::SetDisplayNameError,
};

use super::super::state::AppState;

/// Welcome notice pushed to every freshly connected session.
pub const WELCOME_TEXT: &str = "Welcome to the chat ! please set your username";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Spawns a task that drains the session's channel into the WebSocket sink.
///
/// Messages from other sessions arrive on `rx` already serialized; this loop
/// only forwards them. It ends when the channel closes or the sink errors.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create the channel through which this session receives relayed messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the session (id generation + registry + pusher)
    let session = match state.connect_session_usecase.execute(tx).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            return;
        }
    };
    let session_id = session.id.clone();
    tracing::info!("Session '{}' connected and registered", session_id);

    // Send the welcome to this session only (point-to-point, never broadcast)
    let welcome = ServerMessage::system(WELCOME_TEXT, epoch_millis());
    let welcome_json = serde_json::to_string(&welcome).unwrap();
    if let Err(e) = state
        .connect_session_usecase
        .push_welcome(&session_id, &welcome_json)
        .await
    {
        tracing::error!("Failed to send welcome to '{}': {}", session_id, e);
    }

    let recv_state = state.clone();
    let recv_session_id = session_id.clone();

    // Task draining inbound frames from this session
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    // A transport error takes the same path as a clean close;
                    // it is only distinguished here, in the log.
                    tracing::error!("WebSocket error on session '{}': {}", recv_session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&recv_state, &recv_session_id, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", recv_session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Task draining relayed messages into this session
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Disconnect path: idempotent removal, departure notice only if named
    if let Some(departure) = state.disconnect_session_usecase.execute(&session_id).await {
        tracing::info!(
            "Session '{}' disconnected and removed from registry",
            session_id
        );

        if let Some(name) = departure.display_name {
            let left = ServerMessage::system(
                format!("{} has left the chat", name.as_str()),
                epoch_millis(),
            );
            let left_json = serde_json::to_string(&left).unwrap();
            if let Err(e) = state
                .disconnect_session_usecase
                .broadcast_left(departure.notify_targets, &left_json)
                .await
            {
                tracing::warn!("Failed to broadcast departure notice: {}", e);
            } else {
                tracing::info!("Broadcasted departure notice for '{}'", session_id);
            }
        }
    }
}

/// Handle one inbound text frame from a session.
async fn handle_text(state: &Arc<AppState>, session_id: &SessionId, text: &str) {
    // Ignore-unknown-input policy: a malformed or unrecognized payload is
    // logged and dropped; the connection stays open and gets no error reply.
    let parsed = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(
                "Discarding malformed payload from session '{}': {}",
                session_id,
                e
            );
            return;
        }
    };

    match parsed {
        ClientMessage::SetUsername { username } => {
            let name = match DisplayName::new(username) {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!(
                        "Discarding invalid username from session '{}': {}",
                        session_id,
                        e
                    );
                    return;
                }
            };

            match state
                .set_display_name_usecase
                .execute(session_id, name.clone())
                .await
            {
                Ok(targets) => {
                    tracing::info!("Session '{}' is now '{}'", session_id, name);
                    let joined = ServerMessage::system(
                        format!("{} has joined the chat", name.as_str()),
                        epoch_millis(),
                    );
                    let joined_json = serde_json::to_string(&joined).unwrap();
                    if let Err(e) = state
                        .set_display_name_usecase
                        .broadcast_joined(targets, &joined_json)
                        .await
                    {
                        tracing::warn!("Failed to broadcast join notice: {}", e);
                    } else {
                        tracing::info!("Broadcasted join notice for '{}'", session_id);
                    }
                }
                // Write-once policy: redundant assignment is silently ignored
                Err(e @ SetDisplayNameError::AlreadyNamed(_)) => {
                    tracing::debug!("Ignoring redundant setUsername: {}", e);
                }
                Err(e @ SetDisplayNameError::UnknownSession(_)) => {
                    tracing::debug!("Ignoring setUsername for dead session: {}", e);
                }
            }
        }
        ClientMessage::Chat { message } => {
            match state.send_chat_usecase.execute(session_id).await {
                Ok(dispatch) => {
                    let chat = ServerMessage::chat(
                        message,
                        dispatch.sender.as_str(),
                        dispatch.time_stamp.value(),
                    );
                    let chat_json = serde_json::to_string(&chat).unwrap();
                    tracing::info!(
                        "Relaying chat from '{}' to {} session(s)",
                        dispatch.sender,
                        dispatch.targets.len()
                    );
                    if let Err(e) = state
                        .send_chat_usecase
                        .broadcast_chat(dispatch.targets, &chat_json)
                        .await
                    {
                        tracing::warn!("Failed to broadcast chat: {}", e);
                    }
                }
                // Anonymous chat is disallowed by policy: drop silently
                Err(e) => {
                    tracing::debug!("Dropping chat from session '{}': {}", session_id, e);
                }
            }
        }
    }
}
