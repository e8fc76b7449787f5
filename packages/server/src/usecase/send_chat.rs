//! UseCase: チャット送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - 送信者の表示名解決、タイムスタンプ付与、ブロードキャスト対象の選定
//!
//! ### なぜこのテストが必要か
//! - 表示名未設定のセッションからのチャットは静かに破棄される
//!   （匿名チャット禁止ポリシー）ことを保証
//! - チャットが送信者以外にのみブロードキャストされることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：表示名設定済みセッションからの送信
//! - 異常系：匿名セッションからの送信（破棄）
//! - 異常系：存在しないセッションからの送信
//! - エッジケース：送信者のみが接続している場合（対象なし）

use std::sync::Arc;

use idobata_shared::time::Clock;

use crate::domain::{DisplayName, MessagePusher, SessionId, SessionRegistry, Timestamp};

use super::error::SendChatError;

/// チャット 1 件の配送計画。
///
/// UI 層はこれをもとに wire メッセージを生成し、`broadcast_chat` で配送する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDispatch {
    /// 送信者の表示名（サーバー側で解決）
    pub sender: DisplayName,
    /// サーバーが付与する送信時刻
    pub time_stamp: Timestamp,
    /// ブロードキャスト対象（送信者を除く）
    pub targets: Vec<SessionId>,
}

/// チャット送信のユースケース
pub struct SendChatUseCase {
    /// Registry（セッション集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
    /// Clock（送信時刻の時刻源）
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    /// 新しい SendChatUseCase を作成
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

    /// チャット送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信者のセッション ID
    ///
    /// # Returns
    ///
    /// * `Ok(ChatDispatch)` - 表示名・タイムスタンプ・対象が確定した配送計画
    /// * `Err(SendChatError)` - 匿名、またはセッションが存在しない（破棄対象）
    pub async fn execute(&self, sender_id: &SessionId) -> Result<ChatDispatch, SendChatError> {
        // 1. 送信者のセッションを解決
        let session = self
            .registry
            .get(sender_id)
            .await
            .ok_or_else(|| SendChatError::UnknownSession(sender_id.as_str().to_string()))?;

        // 2. 匿名チャットは禁止（表示名必須）
        let sender = session
            .display_name
            .ok_or_else(|| SendChatError::Anonymous(sender_id.as_str().to_string()))?;

        // 3. ブロードキャスト対象を取得（送信者以外の全てのセッション）
        let targets = self.broadcast_targets(sender_id).await;

        Ok(ChatDispatch {
            sender,
            time_stamp: Timestamp::new(self.clock.now_millis()),
            targets,
        })
    }

    /// チャットメッセージを対象セッションにブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `targets` - ブロードキャスト対象のセッション ID リスト
    /// * `json` - 送信する JSON メッセージ（UI 層で生成されたもの）
    pub async fn broadcast_chat(&self, targets: Vec<SessionId>, json: &str) -> Result<(), String> {
        self.pusher
            .broadcast(targets, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// ブロードキャスト対象のセッション ID リストを取得（送信者を除く）
    async fn broadcast_targets(&self, exclude_session_id: &SessionId) -> Vec<SessionId> {
        let all_session_ids = self.registry.session_ids().await;
        all_session_ids
            .into_iter()
            .filter(|id| id != exclude_session_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NameAssignment, Session, SessionIdFactory};
    use crate::infrastructure::{
        pusher::WebSocketMessagePusher, registry::InMemorySessionRegistry,
    };
    use idobata_shared::time::{FixedClock, SystemClock};
    use tokio::sync::mpsc;

    struct Harness {
        usecase: SendChatUseCase,
        registry: Arc<InMemorySessionRegistry>,
        pusher: Arc<WebSocketMessagePusher>,
    }

    fn create_harness() -> Harness {
        create_harness_with_clock(Arc::new(SystemClock))
    }

    fn create_harness_with_clock(clock: Arc<dyn Clock>) -> Harness {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        Harness {
            usecase: SendChatUseCase::new(registry.clone(), pusher.clone(), clock),
            registry,
            pusher,
        }
    }

    impl Harness {
        async fn connect(&self) -> (SessionId, mpsc::UnboundedReceiver<String>) {
            let session =
                Session::new(SessionIdFactory::generate().unwrap(), Timestamp::new(1000));
            let id = session.id.clone();
            self.registry.insert(session).await;
            let (tx, rx) = mpsc::unbounded_channel();
            self.pusher.register_session(id.clone(), tx).await;
            (id, rx)
        }

        async fn name(&self, id: &SessionId, name: &str) {
            let outcome = self
                .registry
                .assign_display_name(id, DisplayName::new(name.to_string()).unwrap())
                .await;
            assert_eq!(outcome, NameAssignment::Assigned);
        }
    }

    #[tokio::test]
    async fn test_send_chat_success_excludes_sender() {
        // テスト項目: 表示名設定済みセッションからの送信が成功し、送信者が対象から除かれる
        // given (前提条件):
        let harness = create_harness();
        let (alice, _rx_a) = harness.connect().await;
        let (bob, _rx_b) = harness.connect().await;
        let (charlie, _rx_c) = harness.connect().await;
        harness.name(&alice, "alice").await;

        // when (操作):
        let dispatch = harness.usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(dispatch.sender.as_str(), "alice");
        assert_eq!(dispatch.targets.len(), 2);
        assert!(!dispatch.targets.contains(&alice));
        assert!(dispatch.targets.contains(&bob));
        assert!(dispatch.targets.contains(&charlie));
    }

    #[tokio::test]
    async fn test_time_stamp_comes_from_the_clock() {
        // テスト項目: 送信時刻は注入された Clock から取得される
        // given (前提条件):
        let harness = create_harness_with_clock(Arc::new(FixedClock::new(1672531200000)));
        let (alice, _rx_a) = harness.connect().await;
        harness.name(&alice, "alice").await;

        // when (操作):
        let dispatch = harness.usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(dispatch.time_stamp, Timestamp::new(1672531200000));
    }

    #[tokio::test]
    async fn test_anonymous_chat_is_dropped() {
        // テスト項目: 表示名未設定のセッションからの送信は Anonymous で破棄される
        // given (前提条件):
        let harness = create_harness();
        let (alice, _rx_a) = harness.connect().await;
        let (_bob, mut rx_b) = harness.connect().await;

        // when (操作): 表示名なしで送信を試みる
        let result = harness.usecase.execute(&alice).await;

        // then (期待する結果): 破棄され、誰にも何も届かない
        assert!(matches!(result.unwrap_err(), SendChatError::Anonymous(_)));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_chat_unknown_session() {
        // テスト項目: 存在しないセッションからの送信は UnknownSession になる
        // given (前提条件):
        let harness = create_harness();
        let ghost = SessionIdFactory::generate().unwrap();

        // when (操作):
        let result = harness.usecase.execute(&ghost).await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            SendChatError::UnknownSession(_)
        ));
    }

    #[tokio::test]
    async fn test_send_chat_no_targets_when_alone() {
        // テスト項目: 送信者のみが接続している場合、対象は空
        // given (前提条件):
        let harness = create_harness();
        let (alice, _rx_a) = harness.connect().await;
        harness.name(&alice, "alice").await;

        // when (操作):
        let dispatch = harness.usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(dispatch.targets.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_chat_reaches_targets_only() {
        // テスト項目: broadcast_chat が対象にのみ配送する
        // given (前提条件):
        let harness = create_harness();
        let (alice, mut rx_a) = harness.connect().await;
        let (_bob, mut rx_b) = harness.connect().await;
        harness.name(&alice, "alice").await;
        let dispatch = harness.usecase.execute(&alice).await.unwrap();
        let json = r#"{"type":"chat","message":"hi","sender":"alice","timeStamp":1}"#;

        // when (操作):
        harness
            .usecase
            .broadcast_chat(dispatch.targets, json)
            .await
            .unwrap();

        // then (期待する結果): bob は受信し、alice には何も届かない
        assert_eq!(rx_b.recv().await.unwrap(), json);
        assert!(rx_a.try_recv().is_err());
    }
}
