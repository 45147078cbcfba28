//! StatusFetcher and TelegramNotifier against a local HTTP stub.

mod common;

use std::time::Duration;

use review_common::error::{NotifyError, WatchError};
use review_notifier::{Notifier, TelegramNotifier};
use review_watcher::fetcher::{StatusFetcher, StatusSource};

use common::{closed_url, serve_once};

fn fetcher(base: &str) -> StatusFetcher {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();
    StatusFetcher::new(
        http,
        format!("{base}/api/user_api/homework_statuses/"),
        "secret-token",
    )
}

// ============================================================
// StatusFetcher
// ============================================================

#[tokio::test]
async fn test_fetch_sends_cursor_and_oauth_header() {
    let stub = serve_once(
        200,
        r#"{"homeworks":[{"homework_name":"hw1","status":"approved","date_updated":"2021-01-01"}],"current_date":1700000300}"#,
    )
    .await;
    let fetcher = fetcher(&stub.url);

    let response = fetcher.fetch(1_700_000_000).await.unwrap();
    assert_eq!(response.current_date, Some(1_700_000_300));
    assert_eq!(response.latest().unwrap().name, "hw1");

    let request = stub.request().await.to_lowercase();
    assert!(request.starts_with("get /api/user_api/homework_statuses/?from_date=1700000000 "));
    assert!(request.contains("authorization: oauth secret-token"));
}

#[tokio::test]
async fn test_fetch_error_body_is_server_error() {
    let stub = serve_once(400, r#"{"error": {"error": "Wrong from_date format"}}"#).await;
    let fetcher = fetcher(&stub.url);

    match fetcher.fetch(0).await {
        Err(WatchError::Server { error, params, .. }) => {
            assert_eq!(error, "Wrong from_date format");
            assert_eq!(params, "from_date=0");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_code_body_is_server_code() {
    let stub = serve_once(
        401,
        r#"{"code": "not_authenticated", "message": "Учетные данные не были предоставлены."}"#,
    )
    .await;
    let fetcher = fetcher(&stub.url);

    let err = fetcher.fetch(0).await.unwrap_err();
    assert!(matches!(err, WatchError::ServerCode { ref code, .. } if code == "not_authenticated"));
}

#[tokio::test]
async fn test_fetch_without_homeworks_is_empty() {
    let stub = serve_once(200, r#"{"current_date": 1700000300}"#).await;
    let fetcher = fetcher(&stub.url);

    let response = fetcher.fetch(0).await.unwrap();
    assert!(response.latest().is_none());
}

#[tokio::test]
async fn test_fetch_connection_refused_is_transport() {
    let base = closed_url().await;
    let fetcher = fetcher(&base);

    match fetcher.fetch(0).await {
        Err(WatchError::Transport { target, cause }) => {
            assert_eq!(target, fetcher.url());
            assert!(!cause.is_empty());
            assert!(!cause.contains("secret-token"));
        }
        other => panic!("expected Transport error, got {other:?}"),
    }
}

// ============================================================
// TelegramNotifier
// ============================================================

#[tokio::test]
async fn test_notifier_posts_send_message() {
    let stub = serve_once(200, r#"{"ok": true, "result": {"message_id": 1}}"#).await;
    let notifier =
        TelegramNotifier::new(stub.url.clone(), "123:bot-token", "4242", Duration::from_secs(5))
            .unwrap();

    notifier.send("Your submission \"hw1\" was reviewed").await.unwrap();

    let request = stub.request().await;
    assert!(request.starts_with("POST /bot123:bot-token/sendMessage "));
    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["chat_id"], "4242");
    assert_eq!(json["text"], "Your submission \"hw1\" was reviewed");
}

#[tokio::test]
async fn test_notifier_rejected_reply() {
    let stub = serve_once(
        400,
        r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
    )
    .await;
    let notifier =
        TelegramNotifier::new(stub.url.clone(), "123:bot-token", "0", Duration::from_secs(5))
            .unwrap();

    match notifier.send("hello").await {
        Err(NotifyError::Rejected {
            status,
            description,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_notifier_transport_error_hides_token() {
    let base = closed_url().await;
    let notifier =
        TelegramNotifier::new(base, "123:bot-token", "4242", Duration::from_secs(5)).unwrap();

    match notifier.send("hello").await {
        Err(NotifyError::Transport(cause)) => assert!(!cause.contains("bot-token")),
        other => panic!("expected Transport error, got {other:?}"),
    }
}
