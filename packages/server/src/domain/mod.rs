//! Domain layer for the chat relay.
//!
//! This module contains the session model and the interfaces the relay
//! needs (registry, pusher), independent of transport and DTO concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::Session;
pub use error::{MessagePushError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use registry::{NameAssignment, SessionRegistry};
pub use value_object::{DisplayName, SessionId, Timestamp};
