//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket wire-format DTOs
//! - `http`: HTTP API response DTOs

pub mod http;
pub mod websocket;
