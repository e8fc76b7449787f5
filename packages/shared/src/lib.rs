//! Shared utilities for the Idobata chat relay.
//!
//! Holds the concerns that both the server and the client binaries need:
//! logging setup and time handling.

pub mod logger;
pub mod time;
