//! WebSocket chat relay server.
//!
//! Accepts WebSocket sessions, assigns each a write-once display name and
//! relays chat messages to every other connected session.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3001
//! PORT=4000 cargo run --bin server
//! ```

use std::sync::Arc;

use clap::Parser;

use idobata_server::{
    infrastructure::{InMemorySessionRegistry, WebSocketMessagePusher},
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, GetSessionsUseCase, SendChatUseCase,
        SetDisplayNameUseCase,
    },
};
use idobata_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "WebSocket chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create SessionRegistry (in-memory database)
    let registry = Arc::new(InMemorySessionRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    let set_display_name_usecase = Arc::new(SetDisplayNameUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let send_chat_usecase = Arc::new(SendChatUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let get_sessions_usecase = Arc::new(GetSessionsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_session_usecase,
        set_display_name_usecase,
        send_chat_usecase,
        disconnect_session_usecase,
        get_sessions_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
