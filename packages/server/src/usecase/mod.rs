//! UseCase layer.
//!
//! Business logic of the relay, called from the UI layer. Each usecase
//! operates on the domain interfaces (registry, pusher); serialization of
//! wire messages stays in the UI/infrastructure layers.

pub mod connect_session;
pub mod disconnect_session;
pub mod error;
pub mod get_sessions;
pub mod send_chat;
pub mod set_display_name;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::{Departure, DisconnectSessionUseCase};
pub use error::{SendChatError, SetDisplayNameError};
pub use get_sessions::GetSessionsUseCase;
pub use send_chat::{ChatDispatch, SendChatUseCase};
pub use set_display_name::SetDisplayNameUseCase;
