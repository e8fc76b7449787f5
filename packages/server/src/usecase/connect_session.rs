//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - セッション生成（ID 採番、registry 登録、pusher 登録）
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに一意なセッション ID が割り当てられることを保証
//! - welcome メッセージが接続したセッションのみに届くことを保証
//!   （point-to-point であり、ブロードキャストではない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - プロパティ：同時接続中のセッション ID の一意性

use std::sync::Arc;

use idobata_shared::time::Clock;

use crate::domain::{
    MessagePushError, MessagePusher, PusherChannel, Session, SessionId, SessionIdFactory,
    SessionRegistry, Timestamp, ValueObjectError,
};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Registry（セッション集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
    /// Clock（接続時刻の時刻源）
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            pusher,
            clock,
        }
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - このセッションへのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 採番済みのセッション（Domain Model）
    pub async fn execute(&self, sender: PusherChannel) -> Result<Session, ValueObjectError> {
        // 1. セッション ID を採番
        let session_id = SessionIdFactory::generate()?;
        let session = Session::new(session_id.clone(), Timestamp::new(self.clock.now_millis()));

        // 2. Registry に登録（ID 衝突は registry 側で致命的エラーとして扱う）
        self.registry.insert(session.clone()).await;

        // 3. MessagePusher にチャンネルを登録
        self.pusher.register_session(session_id, sender).await;

        Ok(session)
    }

    /// welcome メッセージを接続したセッションのみに送信（point-to-point）
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信先のセッション ID
    /// * `json` - 送信する JSON メッセージ（UI 層で生成されたもの）
    pub async fn push_welcome(
        &self,
        session_id: &SessionId,
        json: &str,
    ) -> Result<(), MessagePushError> {
        self.pusher.push_to(session_id, json).await
    }
}
