//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetSessionsUseCase, SendChatUseCase,
    SetDisplayNameUseCase,
};

use super::{
    handler::{
        http::{debug_sessions, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the relay's router.
///
/// Cross-origin access is allowed from any origin; the relay has no origin
/// allowlist.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/debug/sessions", get(debug_sessions))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// WebSocket chat relay server
///
/// This struct encapsulates the wired-up usecases and runs the axum server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     set_display_name_usecase,
///     send_chat_usecase,
///     disconnect_session_usecase,
///     get_sessions_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 3001).await?;
/// ```
pub struct Server {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// SetDisplayNameUseCase（表示名設定のユースケース）
    set_display_name_usecase: Arc<SetDisplayNameUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    send_chat_usecase: Arc<SendChatUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// GetSessionsUseCase（セッション一覧取得のユースケース）
    get_sessions_usecase: Arc<GetSessionsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        set_display_name_usecase: Arc<SetDisplayNameUseCase>,
        send_chat_usecase: Arc<SendChatUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        get_sessions_usecase: Arc<GetSessionsUseCase>,
    ) -> Self {
        Self {
            connect_session_usecase,
            set_display_name_usecase,
            send_chat_usecase,
            disconnect_session_usecase,
            get_sessions_usecase,
        }
    }

    /// Run the WebSocket chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            set_display_name_usecase: self.set_display_name_usecase,
            send_chat_usecase: self.send_chat_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
            get_sessions_usecase: self.get_sessions_usecase,
        });

        let app = app(state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
