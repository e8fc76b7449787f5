//! Infrastructure layer: concrete implementations of the domain interfaces
//! and the wire-format DTOs.

pub mod dto;
pub mod pusher;
pub mod registry;

pub use pusher::WebSocketMessagePusher;
pub use registry::InMemorySessionRegistry;
