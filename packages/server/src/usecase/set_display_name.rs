//! UseCase: 表示名設定処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SetDisplayNameUseCase::execute() メソッド
//! - 表示名の write-once 設定とブロードキャスト対象の選定
//!
//! ### なぜこのテストが必要か
//! - 表示名は一度だけ設定できる（書き換え不可）ことを保証
//! - join 通知が送信者以外にのみブロードキャストされることを保証
//! - 表示名の重複を許容する（一意性を強制しない）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回の表示名設定
//! - 異常系：設定済みセッションへの再設定（無視される）
//! - 異常系：存在しないセッションへの設定
//! - エッジケース：重複した表示名

use std::sync::Arc;

use crate::domain::{DisplayName, MessagePusher, NameAssignment, SessionId, SessionRegistry};

use super::error::SetDisplayNameError;

/// 表示名設定のユースケース
pub struct SetDisplayNameUseCase {
    /// Registry（セッション集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl SetDisplayNameUseCase {
    /// 新しい SetDisplayNameUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// 表示名設定を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 対象のセッション ID
    /// * `name` - 設定する表示名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - join 通知のブロードキャスト対象（送信者を除く）
    /// * `Err(SetDisplayNameError)` - 設定済み、またはセッションが存在しない
    pub async fn execute(
        &self,
        session_id: &SessionId,
        name: DisplayName,
    ) -> Result<Vec<SessionId>, SetDisplayNameError> {
        match self.registry.assign_display_name(session_id, name).await {
            NameAssignment::Assigned => Ok(self.broadcast_targets(session_id).await),
            NameAssignment::AlreadyNamed => Err(SetDisplayNameError::AlreadyNamed(
                session_id.as_str().to_string(),
            )),
            NameAssignment::UnknownSession => Err(SetDisplayNameError::UnknownSession(
                session_id.as_str().to_string(),
            )),
        }
    }

    /// join 通知を対象セッションにブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `targets` - ブロードキャスト対象のセッション ID リスト
    /// * `json` - 送信する JSON メッセージ（UI 層で生成されたもの）
    pub async fn broadcast_joined(
        &self,
        targets: Vec<SessionId>,
        json: &str,
    ) -> Result<(), String> {
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
    use crate::domain::{MockMessagePusher, Session, SessionIdFactory, Timestamp};
    use crate::infrastructure::registry::InMemorySessionRegistry;

    async fn registry_with_sessions(count: usize) -> (Arc<InMemorySessionRegistry>, Vec<SessionId>)
    {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let mut ids = Vec::new();
        for _ in 0..count {
            let session =
                Session::new(SessionIdFactory::generate().unwrap(), Timestamp::new(1000));
            ids.push(session.id.clone());
            registry.insert(session).await;
        }
        (registry, ids)
    }

    fn mock_pusher() -> Arc<MockMessagePusher> {
        // ブロードキャストは UI 層から明示的に呼ばれるため、execute 単体では
        // pusher は使われない
        Arc::new(MockMessagePusher::new())
    }

    #[tokio::test]
    async fn test_set_display_name_success_excludes_sender() {
        // テスト項目: 表示名設定が成功し、送信者以外がブロードキャスト対象になる
        // given (前提条件):
        let (registry, ids) = registry_with_sessions(3).await;
        let usecase = SetDisplayNameUseCase::new(registry.clone(), mock_pusher());

        // when (操作):
        let result = usecase
            .execute(&ids[0], DisplayName::new("alice".to_string()).unwrap())
            .await;

        // then (期待する結果):
        let targets = result.unwrap();
        assert_eq!(targets.len(), 2);
        assert!(!targets.contains(&ids[0]));
        assert!(targets.contains(&ids[1]));
        assert!(targets.contains(&ids[2]));
        assert_eq!(
            registry.get(&ids[0]).await.unwrap().display_name.unwrap().as_str(),
            "alice"
        );
    }

    #[tokio::test]
    async fn test_set_display_name_twice_keeps_first_name() {
        // テスト項目: 2 回目の設定は AlreadyNamed になり、最初の名前が残る
        // given (前提条件):
        let (registry, ids) = registry_with_sessions(2).await;
        let usecase = SetDisplayNameUseCase::new(registry.clone(), mock_pusher());
        usecase
            .execute(&ids[0], DisplayName::new("alice".to_string()).unwrap())
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(&ids[0], DisplayName::new("mallory".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            SetDisplayNameError::AlreadyNamed(_)
        ));
        assert_eq!(
            registry.get(&ids[0]).await.unwrap().display_name.unwrap().as_str(),
            "alice"
        );
    }

    #[tokio::test]
    async fn test_set_display_name_unknown_session() {
        // テスト項目: 存在しないセッションへの設定は UnknownSession になる
        // given (前提条件):
        let (registry, _ids) = registry_with_sessions(1).await;
        let usecase = SetDisplayNameUseCase::new(registry, mock_pusher());
        let ghost = SessionIdFactory::generate().unwrap();

        // when (操作):
        let result = usecase
            .execute(&ghost, DisplayName::new("ghost".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            SetDisplayNameError::UnknownSession(_)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_display_names_across_sessions_are_allowed() {
        // テスト項目: 異なるセッションが同じ表示名を持つことを許容する
        // given (前提条件):
        let (registry, ids) = registry_with_sessions(2).await;
        let usecase = SetDisplayNameUseCase::new(registry.clone(), mock_pusher());

        // when (操作): 両方のセッションに "alice" を設定
        let first = usecase
            .execute(&ids[0], DisplayName::new("alice".to_string()).unwrap())
            .await;
        let second = usecase
            .execute(&ids[1], DisplayName::new("alice".to_string()).unwrap())
            .await;

        // then (期待する結果): どちらも成功する
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_broadcast_joined_delegates_to_pusher() {
        // テスト項目: broadcast_joined が pusher の broadcast を呼ぶ
        // given (前提条件):
        let (registry, ids) = registry_with_sessions(2).await;
        let mut mock = MockMessagePusher::new();
        let expected_targets = vec![ids[1].clone()];
        let targets_for_mock = expected_targets.clone();
        mock.expect_broadcast()
            .withf(move |targets, json| {
                targets == &targets_for_mock && json.contains("has joined the chat")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = SetDisplayNameUseCase::new(registry, Arc::new(mock));

        // when (操作):
        let result = usecase
            .broadcast_joined(
                expected_targets,
                r#"{"type":"system","message":"alice has joined the chat","timeStamp":1}"#,
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
