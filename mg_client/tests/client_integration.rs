//! Integration tests for mg_client network functionality.
//!
//! Tests the HTTP roster source against a throwaway local server, plus
//! the error paths for unreachable or malformed endpoints.

use memory_game::{
    Session, SessionSettings, SessionUpdate,
    entities::CharacterId,
    loader::{LoadError, RosterSource},
};
use mg_client::api_client::ApiClient;
use std::{sync::Arc, time::Duration};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    time::timeout,
};

const LISTING: &str = r#"{
    "characters": [
        {"id": 1, "name": "Naruto Uzumaki", "images": ["https://img/naruto.png"]},
        {"id": 2, "name": "Sasuke Uchiha", "images": ["https://img/sasuke.png"]},
        {"id": 3, "name": "Sakura Haruno", "images": []},
        {"id": 4, "name": "Kakashi Hatake", "images": ["https://img/kakashi.png"]}
    ],
    "currentPage": 1,
    "pageSize": 20
}"#;

/// Serve a single HTTP response and return the URL to request
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    });

    format!("http://{addr}/characters")
}

// ============================================================================
// Successful loads
// ============================================================================

#[tokio::test]
async fn test_fetch_roster_takes_first_entries() {
    let url = serve_once("200 OK", LISTING).await;
    let client = ApiClient::new(url);

    let roster = client.fetch_roster(3).await.unwrap();

    let ids: Vec<_> = roster.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![CharacterId(1), CharacterId(2), CharacterId(3)]);
    assert_eq!(roster[0].image.as_deref(), Some("https://img/naruto.png"));
    assert_eq!(roster[2].image, None);
}

#[tokio::test]
async fn test_fetch_roster_shorter_than_limit() {
    let url = serve_once("200 OK", LISTING).await;
    let client = ApiClient::new(url);

    let roster = client.fetch_roster(8).await.unwrap();
    assert_eq!(roster.len(), 4);
}

#[tokio::test]
async fn test_session_over_http() {
    let url = serve_once("200 OK", LISTING).await;
    let settings = SessionSettings {
        seed: Some(1),
        ..SessionSettings::default()
    };
    let mut session = Session::mount(Arc::new(ApiClient::new(url)), settings);

    let update = timeout(Duration::from_secs(5), session.next_update())
        .await
        .expect("load should finish");
    assert_eq!(update, Some(SessionUpdate::RosterLoaded { count: 4 }));
    assert_eq!(session.view().cards().len(), 4);
}

// ============================================================================
// HTTP Error Response Tests
// ============================================================================

#[tokio::test]
async fn test_http_error_status() {
    let url = serve_once("503 Service Unavailable", "{}").await;
    let client = ApiClient::new(url);

    let err = client.fetch_roster(8).await.unwrap_err();
    assert!(matches!(err, LoadError::Status { code: 503 }));
}

#[tokio::test]
async fn test_invalid_json_response() {
    let url = serve_once("200 OK", "<html>not json</html>").await;
    let client = ApiClient::new(url);

    let err = client.fetch_roster(8).await.unwrap_err();
    assert!(matches!(err, LoadError::Malformed(_)));
}

#[tokio::test]
async fn test_wrong_shape_response() {
    let url = serve_once("200 OK", r#"{"results": [{"id": 1}]}"#).await;
    let client = ApiClient::new(url);

    assert!(client.fetch_roster(8).await.is_err());
}

// ============================================================================
// Network Error Scenario Tests
// ============================================================================

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(format!("http://127.0.0.1:{port}/characters"));

    let err = client.fetch_roster(8).await.unwrap_err();
    assert!(matches!(err, LoadError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_url() {
    let client = ApiClient::new("not-a-valid-url".to_string());

    let result = client.fetch_roster(8).await;
    assert!(matches!(result, Err(LoadError::Transport(_))));
}

#[tokio::test]
async fn test_failed_load_degrades_to_empty_board() {
    let client = ApiClient::new("not-a-valid-url".to_string());
    let mut session = Session::mount(Arc::new(client), SessionSettings::default());

    let update = timeout(Duration::from_secs(5), session.next_update())
        .await
        .expect("load should finish");
    assert!(matches!(update, Some(SessionUpdate::LoadFailed(_))));
    assert!(!session.is_loading());
    assert!(session.view().cards().is_empty());
}
