//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetSessionsUseCase, SendChatUseCase,
    SetDisplayNameUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// SetDisplayNameUseCase（表示名設定のユースケース）
    pub set_display_name_usecase: Arc<SetDisplayNameUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    pub send_chat_usecase: Arc<SendChatUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// GetSessionsUseCase（セッション一覧取得のユースケース）
    pub get_sessions_usecase: Arc<GetSessionsUseCase>,
}
