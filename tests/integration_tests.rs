//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → HTTP page source →
//! pagination controller → feed view

use feed_pager::feed::{Body, Footer};
use feed_pager::http::{HttpClient, HttpClientConfig};
use feed_pager::pagination::SkipReason;
use feed_pager::{
    load_config_from_str, FeedConfig, FeedSession, FetchError, HttpIdentityProvider,
    HttpPageSource, Item, LoadOutcome, PaginationController, Phase, StaticIdentity,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_config(server: &MockServer) -> FeedConfig {
    let yaml = format!(
        r#"
base_url: "{}"
http:
  timeout_secs: 5
  rate_limit: null
"#,
        server.uri()
    );
    load_config_from_str(&yaml).unwrap()
}

async fn mount_first_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [{"postId": "A", "text": "first"}, {"postId": "B"}],
            "lastKey": "k1"
        })))
        .mount(server)
        .await;
}

async fn mount_last_page(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/posts/next"))
        .and(body_json(json!({"lastKey": "k1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [{"postId": "C"}],
            "lastKey": ""
        })))
        .mount(server)
        .await;
}

fn ids<T: Item>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.item_id().to_string()).collect()
}

// ============================================================================
// Controller Over HTTP
// ============================================================================

#[tokio::test]
async fn test_initial_then_more_until_exhausted() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_last_page(&server).await;

    let source = HttpPageSource::from_config(&feed_config(&server)).unwrap();
    let controller = PaginationController::new(source);

    let outcome = controller.load_initial().await.unwrap();
    assert!(outcome.is_loaded());
    let status = controller.status();
    assert_eq!(ids(&status.items), vec!["A", "B"]);
    assert!(status.has_more);
    assert_eq!(status.phase, Phase::Idle);
    assert_eq!(status.items[0].payload["text"], "first");

    controller.load_more().await.unwrap();
    let status = controller.status();
    assert_eq!(ids(&status.items), vec!["A", "B", "C"]);
    assert!(!status.has_more);
    assert_eq!(status.phase, Phase::Idle);
}

#[tokio::test]
async fn test_exhausted_feed_issues_no_request() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/posts/next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [{"postId": "C"}],
            "lastKey": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpPageSource::from_config(&feed_config(&server)).unwrap();
    let controller = PaginationController::new(source);
    controller.load_initial().await.unwrap();
    controller.load_more().await.unwrap();

    let before = controller.status();
    let outcome = controller.load_more().await.unwrap();

    assert_eq!(outcome, LoadOutcome::Skipped(SkipReason::Exhausted));
    assert_eq!(controller.status(), before);
}

#[tokio::test]
async fn test_failed_load_more_keeps_state() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/posts/next"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let source = HttpPageSource::from_config(&feed_config(&server)).unwrap();
    let controller = PaginationController::new(source);
    controller.load_initial().await.unwrap();

    let err = controller.load_more().await.unwrap_err();
    assert_eq!(err, FetchError::server(500, "boom"));

    let status = controller.status();
    assert_eq!(ids(&status.items), vec!["A", "B"]);
    assert!(status.has_more);
    assert_eq!(status.phase, Phase::Idle);
}

#[tokio::test]
async fn test_unreachable_backend_surfaces_network_error() {
    let config = FeedConfig::new("http://127.0.0.1:1");
    let source = HttpPageSource::from_config(&config).unwrap();
    let controller = PaginationController::new(source);

    let err = controller.load_initial().await.unwrap_err();

    assert!(matches!(err, FetchError::Network { .. }));
    assert!(controller.is_empty());
    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_overlapping_calls_issue_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"posts": [{"postId": "A"}], "lastKey": "k1"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/posts/next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []})))
        .expect(0)
        .mount(&server)
        .await;

    let source = HttpPageSource::from_config(&feed_config(&server)).unwrap();
    let controller = PaginationController::new(source);

    let background = controller.clone();
    let initial = tokio::spawn(async move { background.load_initial().await });

    while controller.phase().is_idle() {
        tokio::task::yield_now().await;
    }
    let second = controller.load_more().await.unwrap();
    let third = controller.load_initial().await.unwrap();

    assert_eq!(
        second,
        LoadOutcome::Skipped(SkipReason::InFlight(Phase::LoadingInitial))
    );
    assert_eq!(
        third,
        LoadOutcome::Skipped(SkipReason::InFlight(Phase::LoadingInitial))
    );

    assert!(initial.await.unwrap().unwrap().is_loaded());
    assert_eq!(controller.len(), 1);
}

#[tokio::test]
async fn test_teardown_discards_late_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"posts": [{"postId": "A"}], "lastKey": "k1"}))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let source = HttpPageSource::from_config(&feed_config(&server)).unwrap();
    let controller = PaginationController::new(source);

    let background = controller.clone();
    let initial = tokio::spawn(async move { background.load_initial().await });

    while controller.phase().is_idle() {
        tokio::task::yield_now().await;
    }
    controller.teardown();

    assert_eq!(initial.await.unwrap().unwrap(), LoadOutcome::Discarded);
    assert!(controller.is_empty());
}

// ============================================================================
// Feed Session
// ============================================================================

#[tokio::test]
async fn test_authenticated_session_view() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_last_page(&server).await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handle": "ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = feed_config(&server);
    let client = Arc::new(HttpClient::with_config(config.http_client_config()).unwrap());
    let source = HttpPageSource::with_client(Arc::clone(&client), &config);
    let identity = HttpIdentityProvider::new(client, "/users/me", Some("secret".to_string()));
    let session = FeedSession::new(source, identity);

    session.mount().await.unwrap();

    let view = session.view();
    assert_eq!(view.body, Body::Items);
    assert_eq!(view.footer, Footer::LoadMore);
    assert!(view.can_compose);
    assert!(view.show_suggestions);
    assert_eq!(view.routes(), vec!["/posts/A", "/posts/B"]);
    assert_eq!(session.identity().user, Some(json!({"handle": "ada"})));

    session.load_more().await.unwrap();
    assert_eq!(session.view().footer, Footer::EndOfFeed);
}

#[tokio::test]
async fn test_identity_failure_degrades_to_anonymous() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = feed_config(&server);
    let client = Arc::new(HttpClient::with_config(config.http_client_config()).unwrap());
    let source = HttpPageSource::with_client(Arc::clone(&client), &config);
    let identity = HttpIdentityProvider::new(client, "/users/me", Some("stale".to_string()));
    let session = FeedSession::new(source, identity);

    assert!(session.mount().await.unwrap().is_loaded());

    let view = session.view();
    assert_eq!(view.items.len(), 2);
    assert!(!view.can_compose);
    assert!(!session.identity().is_auth);
}

#[tokio::test]
async fn test_first_page_failure_leaves_empty_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(server.uri())
            .no_rate_limit()
            .build(),
    )
    .unwrap();
    let source = HttpPageSource::with_client(Arc::new(client), &feed_config(&server));
    let session = FeedSession::new(source, StaticIdentity::anonymous());

    let err = session.mount().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));

    let view = session.view();
    assert!(view.items.is_empty());
    assert_eq!(view.body, Body::Items);
    assert_eq!(view.footer, Footer::EndOfFeed);
}
