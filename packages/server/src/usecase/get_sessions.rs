//! UseCase: セッション一覧取得（診断用）

use std::sync::Arc;

use crate::domain::{Session, SessionRegistry};

/// セッション一覧取得のユースケース
///
/// `/debug/sessions` エンドポイントから呼ばれる診断用の読み取り。
pub struct GetSessionsUseCase {
    /// Registry（セッション集合の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl GetSessionsUseCase {
    /// 新しい GetSessionsUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 生存中の全セッションのスナップショットを取得
    pub async fn execute(&self) -> Vec<Session> {
        self.registry.sessions().await
    }
}
