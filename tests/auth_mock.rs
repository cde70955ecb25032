//! Auth API Mock Tests
//!
//! Exercises `/auth` discovery and the token exchange against wiremock servers:
//! one standing in for the control plane and one for the identity provider.

use photon_sdk::{
    AuthInfo, ClientOptions, PhotonClient, PhotonError, TokenOptions, AUTH_DISABLED_MESSAGE,
};
use serde_json::json;
use wiremock::{
    matchers::{any, body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> PhotonClient {
    PhotonClient::with_options(server.uri(), ClientOptions::new().with_auth_scheme("http"))
        .unwrap()
}

fn auth_info(enabled: bool, idp: &MockServer) -> AuthInfo {
    AuthInfo {
        enabled,
        endpoint: idp.address().ip().to_string(),
        port: idp.address().port(),
    }
}

async fn mount_auth_info(server: &MockServer, info: &AuthInfo) {
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(info))
        .expect(1)
        .mount(server)
        .await;
}

fn fake_tokens(refresh: bool) -> TokenOptions {
    TokenOptions {
        access_token: "fake_access_token".to_string(),
        expires_in: 36000,
        refresh_token: refresh.then(|| "fake_refresh_token".to_string()),
        id_token: "fake_id_token".to_string(),
        token_type: "Bearer".to_string(),
    }
}

// ============================================================================
// Auth Info Tests
// ============================================================================

#[tokio::test]
async fn test_get_auth_info() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    let expected = auth_info(true, &idp);
    mount_auth_info(&server, &expected).await;

    let info = client_for(&server).auth().get().await.unwrap();

    assert_eq!(info, expected);
}

#[tokio::test]
async fn test_get_auth_info_disabled_without_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"enabled": false})))
        .mount(&server)
        .await;

    let info = client_for(&server).auth().get().await.unwrap();

    assert!(!info.enabled);
    assert!(info.endpoint.is_empty());
    assert_eq!(info.port, 0);
}

#[tokio::test]
async fn test_get_auth_info_server_error_is_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "InternalError",
            "message": "Please contact the system administrator"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).auth().get().await.unwrap_err();

    match err {
        PhotonError::Api(api_error) => {
            assert_eq!(api_error.code, "InternalError");
            assert_eq!(api_error.message, "Please contact the system administrator");
            assert_eq!(api_error.http_status_code, 500);
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_auth_info_plain_text_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).auth().get().await.unwrap_err();

    assert_eq!(
        err,
        PhotonError::Http {
            status: 503,
            message: "Service Unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_get_auth_info_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let err = client_for(&server).auth().get().await.unwrap_err();

    assert!(matches!(err, PhotonError::Transport(_)));
}

#[tokio::test]
async fn test_get_auth_info_connection_refused() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = PhotonClient::new(uri);
    let err = client.auth().get().await.unwrap_err();

    assert!(matches!(err, PhotonError::Transport(_)));
}

#[tokio::test]
async fn test_bearer_token_only_sent_when_configured() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    let info = auth_info(false, &idp);

    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&info))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.auth().get().await.unwrap();
    client
        .clone()
        .with_tokens(fake_tokens(false))
        .auth()
        .get()
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").unwrap(),
        "Bearer fake_access_token"
    );
}

// ============================================================================
// GetTokensByPassword Tests
// ============================================================================

#[tokio::test]
async fn test_get_tokens_by_password_auth_disabled() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(false, &idp)).await;

    // The identity provider must never be contacted
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&idp)
        .await;

    let result = client_for(&server)
        .auth()
        .get_tokens_by_password("username", "password")
        .await;

    let err = result.unwrap_err();
    assert_eq!(err, PhotonError::AuthDisabled);
    assert_eq!(err.to_string(), AUTH_DISABLED_MESSAGE);
}

#[tokio::test]
async fn test_get_tokens_by_password_success() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    let expected = fake_tokens(true);
    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=u"))
        .and(body_string_contains("password=p"))
        .and(body_string_contains(
            "scope=openid+offline_access+rs_esxcloud+at_groups",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&idp)
        .await;

    let tokens = client_for(&server)
        .auth()
        .get_tokens_by_password("u", "p")
        .await
        .unwrap();

    assert_eq!(tokens, expected);
}

#[tokio::test]
async fn test_get_tokens_by_password_invalid_credentials() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "unauthorized: invalid username or password"
        })))
        .expect(1)
        .mount(&idp)
        .await;

    let err = client_for(&server)
        .auth()
        .get_tokens_by_password("u", "wrong")
        .await
        .unwrap_err();

    match err {
        PhotonError::Provider(provider_error) => {
            assert_eq!(provider_error.status, 400);
            assert_eq!(provider_error.error, "invalid_grant");
            assert_eq!(
                provider_error.error_description,
                "unauthorized: invalid username or password"
            );
        }
        other => panic!("expected Provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_tokens_by_password_provider_plain_text_error() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&idp)
        .await;

    let err = client_for(&server)
        .auth()
        .get_tokens_by_password("u", "p")
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Bad Gateway");
    assert!(matches!(err, PhotonError::Provider(_)));
}

#[tokio::test]
async fn test_get_tokens_by_password_incomplete_bundle() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "only_this"})),
        )
        .mount(&idp)
        .await;

    let err = client_for(&server)
        .auth()
        .get_tokens_by_password("u", "p")
        .await
        .unwrap_err();

    assert!(matches!(err, PhotonError::Transport(_)));
}

#[tokio::test]
async fn test_get_tokens_auth_info_failure_skips_provider() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&idp)
        .await;

    let err = client_for(&server)
        .auth()
        .get_tokens_by_password("u", "p")
        .await
        .unwrap_err();

    assert!(matches!(err, PhotonError::Http { status: 500, .. }));
}

// ============================================================================
// GetTokensByRefreshToken Tests
// ============================================================================

#[tokio::test]
async fn test_get_tokens_by_refresh_token_auth_disabled() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(false, &idp)).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&idp)
        .await;

    let err = client_for(&server)
        .auth()
        .get_tokens_by_refresh_token("refresh_token")
        .await
        .unwrap_err();

    assert_eq!(err, PhotonError::AuthDisabled);
}

#[tokio::test]
async fn test_get_tokens_by_refresh_token_success() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    let expected = fake_tokens(false);
    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=the_refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
        .expect(1)
        .mount(&idp)
        .await;

    let tokens = client_for(&server)
        .auth()
        .get_tokens_by_refresh_token("the_refresh_token")
        .await
        .unwrap();

    assert_eq!(tokens, expected);
    assert!(tokens.refresh_token.is_none());
}

#[tokio::test]
async fn test_get_tokens_by_refresh_token_expired() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Token expired"
        })))
        .expect(1)
        .mount(&idp)
        .await;

    let err = client_for(&server)
        .auth()
        .get_tokens_by_refresh_token("stale_refresh_token")
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Token expired");
    match err {
        PhotonError::Provider(provider_error) => {
            assert_eq!(provider_error.status, 400);
            assert_eq!(provider_error.error, "invalid_grant");
            assert_eq!(provider_error.error_description, "Token expired");
        }
        other => panic!("expected Provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_custom_token_scope_is_sent() {
    let server = MockServer::start().await;
    let idp = MockServer::start().await;
    mount_auth_info(&server, &auth_info(true, &idp)).await;

    Mock::given(method("POST"))
        .and(path("/openidconnect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fake_tokens(true)))
        .expect(1)
        .mount(&idp)
        .await;

    let options = ClientOptions::new()
        .with_auth_scheme("http")
        .with_token_scope("openid");
    let client = PhotonClient::with_options(server.uri(), options).unwrap();

    let tokens = client
        .auth()
        .get_tokens_by_refresh_token("r")
        .await
        .unwrap();
    assert_eq!(tokens.access_token, "fake_access_token");

    let requests = idp.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert_eq!(body, "grant_type=refresh_token&refresh_token=r&scope=openid");
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_token_requests_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            tokio::spawn(async move {
                let server = MockServer::start().await;
                let idp = MockServer::start().await;
                mount_auth_info(&server, &auth_info(true, &idp)).await;

                let expected = TokenOptions {
                    access_token: format!("access_{}", i),
                    expires_in: 100 + i,
                    refresh_token: Some(format!("refresh_{}", i)),
                    id_token: format!("id_{}", i),
                    token_type: "Bearer".to_string(),
                };
                Mock::given(method("POST"))
                    .and(path("/openidconnect/token"))
                    .and(body_string_contains(format!("username=user{}", i)))
                    .respond_with(ResponseTemplate::new(200).set_body_json(&expected))
                    .expect(1)
                    .mount(&idp)
                    .await;

                let tokens = client_for(&server)
                    .auth()
                    .get_tokens_by_password(format!("user{}", i), "p")
                    .await
                    .unwrap();
                (expected, tokens)
            })
        })
        .collect();

    for handle in handles {
        let (expected, tokens) = handle.await.unwrap();
        assert_eq!(tokens, expected);
    }
}
