//! WebSocket chat relay server library.
//!
//! A single-process, in-memory relay: each connection gets a session
//! identity, declares a display name once, and chat messages are fanned out
//! to every other connected session.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
