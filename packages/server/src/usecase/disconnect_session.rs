//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - セッション削除（冪等性）と leave 通知対象の選定
//!
//! ### なぜこのテストが必要か
//! - 切断処理が冪等であること（2 回目は no-op）を保証
//! - 表示名を持つセッションの切断時のみ leave 通知が発生することを保証
//! - 匿名セッションの切断は通知なしで registry から削除されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：表示名設定済みセッションの切断
//! - エッジケース：匿名セッションの切断（通知なし）
//! - エッジケース：二重切断（冪等）
//! - エッジケース：最後のセッションの切断（通知対象なし）

use std::sync::Arc;

use crate::domain::{DisplayName, MessagePusher, SessionId, SessionRegistry};

/// 切断 1 件の結果。
///
/// `display_name` が `Some` の場合のみ、UI 層は leave 通知を生成して
/// `notify_targets` にブロードキャストする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// 切断したセッションの表示名（匿名なら None）
    pub display_name: Option<DisplayName>,
    /// leave 通知の対象（切断したセッションは既に削除済み）
    pub notify_targets: Vec<SessionId>,
}

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Registry（セッション集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// セッション切断を実行（冪等）
    ///
    /// # Arguments
    ///
    /// * `session_id` - 切断するセッションの ID
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - 削除されたセッションの情報と通知対象
    /// * `None` - 既に削除済み（no-op）
    pub async fn execute(&self, session_id: &SessionId) -> Option<Departure> {
        // 1. Registry から削除（既に削除済みなら None で終わり）
        let removed = self.registry.remove(session_id).await?;

        // 2. MessagePusher からチャンネルを登録解除
        self.pusher.unregister_session(session_id).await;

        // 3. 通知対象は残った全セッション（送信者は既に registry にいない）
        let notify_targets = self.registry.session_ids().await;

        Some(Departure {
            display_name: removed.display_name,
            notify_targets,
        })
    }

    /// leave 通知を対象セッションにブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `targets` - ブロードキャスト対象のセッション ID リスト
    /// * `json` - 送信する JSON メッセージ（UI 層で生成されたもの）
    pub async fn broadcast_left(&self, targets: Vec<SessionId>, json: &str) -> Result<(), String> {
        self.pusher
            .broadcast(targets, json)
            .await
            .map_err(|e| e.to_string())
    }
}
