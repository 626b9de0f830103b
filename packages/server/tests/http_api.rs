//! HTTP API integration tests.
//!
//! Tests for the REST endpoints (health check, session list).

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_sessions_endpoint_empty() {
    // テスト項目: 接続がない場合 /api/sessions は空のリストを返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/sessions", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    assert_eq!(body["count"], 0);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_sessions_endpoint_lists_connected_clients() {
    // テスト項目: 接続中のセッションが session_id と connected_at 付きで列挙される
    // given (前提条件):
    let server = TestServer::start().await;
    let _alice = server.connect().await;
    let _bob = server.connect().await;
    server.wait_for_sessions(2).await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/sessions", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    assert_eq!(body["count"], 2);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    for session in sessions {
        assert_eq!(session["session_id"].as_str().unwrap().len(), 36);
        assert!(session["connected_at"].as_str().unwrap().ends_with('Z'));
    }
    assert_ne!(sessions[0]["session_id"], sessions[1]["session_id"]);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    // テスト項目: 存在しないパスには 404 を返す
    let server = TestServer::start().await;

    let response = reqwest::get(format!("{}/api/rooms", server.base_url()))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
