//! Integration tests for the HTTP endpoints: health check and the
//! session-inspection debug endpoint.

mod common;

use common::{connect, recv_json, set_username, spawn_relay};

#[tokio::test]
async fn test_health_check_returns_ok() {
    // テスト項目: ヘルスチェックエンドポイントが ok を返す
    // given (前提条件):
    let addr = spawn_relay().await;

    // when (操作):
    let response = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .expect("Failed to request health check");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_debug_sessions_is_empty_without_connections() {
    // テスト項目: 接続が無い場合、セッション一覧は空配列を返す
    // given (前提条件):
    let addr = spawn_relay().await;

    // when (操作):
    let response = reqwest::get(format!("http://{}/debug/sessions", addr))
        .await
        .expect("Failed to request sessions");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_debug_sessions_lists_connected_sessions() {
    // テスト項目: 接続中のセッションが表示名付きで一覧に現れる
    // given (前提条件):
    let addr = spawn_relay().await;
    let mut alice = connect(addr).await;
    let _ = recv_json(&mut alice).await;
    set_username(&mut alice, "alice").await;

    let mut anon = connect(addr).await;
    let _ = recv_json(&mut anon).await;

    // setUsername フレームの処理完了を待つ
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // when (操作):
    let response = reqwest::get(format!("http://{}/debug/sessions", addr))
        .await
        .expect("Failed to request sessions");

    // then (期待する結果):
    let body: serde_json::Value = response.json().await.expect("Failed to parse body");
    let sessions = body.as_array().expect("Expected an array");
    assert_eq!(sessions.len(), 2);

    let names: Vec<Option<&str>> = sessions
        .iter()
        .map(|s| s["display_name"].as_str())
        .collect();
    assert!(names.contains(&Some("alice")));
    assert!(names.contains(&None));

    for session in sessions {
        assert!(!session["session_id"].as_str().unwrap().is_empty());
        assert!(!session["connected_at"].as_str().unwrap().is_empty());
    }
}
