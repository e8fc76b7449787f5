//! WebSocket chat relay server implementation.

mod handler;
mod server;
mod signal;
pub mod state; // UseCase 層のハンドルをテストから組み立てるため public

pub use server::{Server, app};
