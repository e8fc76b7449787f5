//! Shared helpers for in-process integration tests.
//!
//! Each test spawns the relay on an ephemeral port inside the test's own
//! tokio runtime and talks to it with real WebSocket clients.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use idobata_shared::time::SystemClock;

use idobata_server::{
    infrastructure::{InMemorySessionRegistry, WebSocketMessagePusher},
    ui::{app, state::AppState},
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, GetSessionsUseCase, SendChatUseCase,
        SetDisplayNameUseCase,
    },
};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long to wait for a message that is expected to arrive
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before concluding that no message is coming
const SILENCE_TIMEOUT: Duration = Duration::from_millis(250);

/// Spawn the relay on an ephemeral port and return its address
pub async fn spawn_relay() -> SocketAddr {
    let registry = Arc::new(InMemorySessionRegistry::new());
    let pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);

    let state = Arc::new(AppState {
        connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
            registry.clone(),
            pusher.clone(),
            clock.clone(),
        )),
        set_display_name_usecase: Arc::new(SetDisplayNameUseCase::new(
            registry.clone(),
            pusher.clone(),
        )),
        send_chat_usecase: Arc::new(SendChatUseCase::new(
            registry.clone(),
            pusher.clone(),
            clock.clone(),
        )),
        disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
            registry.clone(),
            pusher.clone(),
        )),
        get_sessions_usecase: Arc::new(GetSessionsUseCase::new(registry.clone())),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app(state))
            .await
            .expect("Test server error");
    });

    addr
}

/// Connect a WebSocket client to the relay
pub async fn connect(addr: SocketAddr) -> WsClient {
    let url = format!("ws://{}/ws", addr);
    let (ws, _response) = connect_async(&url).await.expect("Failed to connect");
    ws
}

/// Send a raw text frame
pub async fn send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send");
}

/// Send a `setUsername` message
pub async fn set_username(ws: &mut WsClient, name: &str) {
    let json = format!(r#"{{"type":"setUsername","username":"{}"}}"#, name);
    send_text(ws, &json).await;
}

/// Send a `chat` message
pub async fn send_chat(ws: &mut WsClient, message: &str) {
    let json = format!(r#"{{"type":"chat","message":"{}"}}"#, message);
    send_text(ws, &json).await;
}

/// Receive the next text frame and parse it as JSON
pub async fn recv_json(ws: &mut WsClient) -> serde_json::Value {
    let deadline = tokio::time::timeout(RECV_TIMEOUT, async {
        while let Some(message) = ws.next().await {
            match message.expect("WebSocket read error") {
                Message::Text(text) => {
                    return serde_json::from_str(&text).expect("Received non-JSON frame");
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("Unexpected frame: {:?}", other),
            }
        }
        panic!("Connection closed while waiting for a message");
    });
    deadline.await.expect("Timed out waiting for a message")
}

/// Assert that no text frame arrives within the silence window
pub async fn assert_silent(ws: &mut WsClient) {
    let result = tokio::time::timeout(SILENCE_TIMEOUT, ws.next()).await;
    if let Ok(Some(Ok(Message::Text(text)))) = result {
        panic!("Expected silence but received: {}", text);
    }
}
