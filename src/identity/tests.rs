//! Tests for identity module

use super::*;
use crate::http::{HttpClient, HttpClientConfig};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<HttpClient> {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

#[test]
fn test_identity_constructors() {
    let anon = Identity::anonymous();
    assert!(!anon.is_auth);
    assert!(anon.token.is_none());

    let user = Identity::authenticated("tok", json!({"handle": "ada"}));
    assert!(user.is_auth);
    assert_eq!(user.user.unwrap()["handle"], "ada");
}

#[test]
fn test_identity_never_serializes_token() {
    let identity = Identity::authenticated("secret", json!({}));
    let json = serde_json::to_string(&identity).unwrap();
    assert!(!json.contains("secret"));
}

#[tokio::test]
async fn test_static_identity() {
    let provider = StaticIdentity::new(Identity::authenticated("t", json!({"id": 1})));
    assert!(provider.current().await.is_auth);
    assert!(!StaticIdentity::anonymous().current().await.is_auth);
}

#[tokio::test]
async fn test_http_identity_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handle": "ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        HttpIdentityProvider::new(client_for(&server), "/users/me", Some("tok-1".to_string()));
    let identity = provider.current().await;

    assert!(identity.is_auth);
    assert_eq!(identity.token.as_deref(), Some("tok-1"));
    assert_eq!(identity.user, Some(json!({"handle": "ada"})));
}

#[tokio::test]
async fn test_http_identity_without_token_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(client_for(&server), "/users/me", None);
    assert_eq!(provider.current().await, Identity::anonymous());
}

#[tokio::test]
async fn test_http_identity_failure_degrades_to_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let provider =
        HttpIdentityProvider::new(client_for(&server), "/users/me", Some("old".to_string()));
    assert_eq!(provider.current().await, Identity::anonymous());
}
