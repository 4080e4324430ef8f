use crate::common::{mock_config, token_body};
use assert_json_diff::assert_json_eq;
use async_trait::async_trait;
use mockito::{Matcher, Server};
use reqwest::StatusCode;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use telematics_client::application::auth::AuthSession;
use telematics_client::error::AppError;
use telematics_client::model::auth::TokenPair;
use telematics_client::model::http::{ReqwestTransport, Transport};
use telematics_client::storage::{FileTokenStore, MemoryTokenStore, TokenStore};

const EMAIL: &str = "a@b.com";

fn transport() -> Arc<dyn Transport> {
    Arc::new(ReqwestTransport::new(5).unwrap())
}

fn login_body() -> Matcher {
    Matcher::Json(json!({
        "LoginFields": "{\"email\":\"a@b.com\"}",
        "Password": "secret"
    }))
}

/// Store whose writes always fail
struct ReadOnlyStore;

#[async_trait]
impl TokenStore for ReadOnlyStore {
    async fn load(&self, _identity: &str) -> TokenPair {
        TokenPair::default()
    }

    async fn save(&self, _identity: &str, _tokens: &TokenPair) -> Result<(), AppError> {
        Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read only",
        )))
    }
}

#[tokio::test]
async fn test_fresh_environment_logs_in_once_and_persists() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/Auth/Login")
        .match_body(login_body())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(token_body("T1", "R1"))
        .expect(1)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(FileTokenStore::new(config.token_store.dir.clone()));
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    assert_eq!(session.access_token().await.unwrap(), "T1");
    assert_eq!(session.access_token().await.unwrap(), "T1");
    login.assert_async().await;

    let path = store.dir().join(
        "fb98d44ad7501a959f3f4f4a3f004fe2d9e581ea6207e218c4b02c08a4d75adf.json",
    );
    let persisted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_json_eq!(
        persisted,
        json!({ "access_token": "T1", "refresh_token": "R1" })
    );

    fs::remove_dir_all(store.dir()).unwrap();
}

#[tokio::test]
async fn test_stored_tokens_are_used_without_login() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/Auth/Login")
        .expect(0)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::with_tokens(
        EMAIL,
        TokenPair::new("STORED", "R0"),
    ));
    let session = AuthSession::new(&config, transport(), store).await;

    assert!(session.is_authenticated().await);
    assert_eq!(session.access_token().await.unwrap(), "STORED");
    login.assert_async().await;
}

#[tokio::test]
async fn test_empty_session_reloads_from_store_before_login() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/Auth/Login")
        .expect(0)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::new());
    let session = AuthSession::new(&config, transport(), store.clone()).await;
    assert!(!session.is_authenticated().await);

    // another process logged in meanwhile
    store
        .save(EMAIL, &TokenPair::new("ELSEWHERE", "R9"))
        .await
        .unwrap();

    assert_eq!(session.access_token().await.unwrap(), "ELSEWHERE");
    login.assert_async().await;
}

#[tokio::test]
async fn test_refresh_without_refresh_token_logs_in() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/Auth/RefreshToken")
        .expect(0)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/Auth/Login")
        .match_body(login_body())
        .with_status(200)
        .with_body(token_body("T2", "R2"))
        .expect(1)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::with_tokens(
        EMAIL,
        TokenPair {
            access_token: Some("OLD".to_string()),
            refresh_token: None,
        },
    ));
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    session.refresh().await.unwrap();

    refresh.assert_async().await;
    login.assert_async().await;
    assert_eq!(session.tokens().await, TokenPair::new("T2", "R2"));
    assert_eq!(store.load(EMAIL).await, TokenPair::new("T2", "R2"));
}

#[tokio::test]
async fn test_rejected_refresh_falls_back_to_one_login() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/Auth/RefreshToken")
        .match_body(Matcher::Json(json!({
            "AccessToken": "OLD",
            "RefreshToken": "R0"
        })))
        .with_status(401)
        .with_body(r#"{"Title":"Invalid refresh token"}"#)
        .expect(1)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/Auth/Login")
        .match_body(login_body())
        .with_status(200)
        .with_body(token_body("T2", "R2"))
        .expect(1)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::with_tokens(
        EMAIL,
        TokenPair::new("OLD", "R0"),
    ));
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    session.handle_unauthorized().await.unwrap();

    refresh.assert_async().await;
    login.assert_async().await;
    assert_eq!(session.access_token().await.unwrap(), "T2");
    assert_eq!(store.load(EMAIL).await, TokenPair::new("T2", "R2"));
}

#[tokio::test]
async fn test_successful_refresh_persists_new_pair() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/Auth/RefreshToken")
        .with_status(200)
        .with_body(token_body("T2", "R2"))
        .expect(1)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/Auth/Login")
        .expect(0)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::with_tokens(
        EMAIL,
        TokenPair::new("OLD", "R0"),
    ));
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    session.refresh().await.unwrap();

    refresh.assert_async().await;
    login.assert_async().await;
    assert_eq!(store.load(EMAIL).await, TokenPair::new("T2", "R2"));
}

#[tokio::test]
async fn test_refresh_server_error_is_reported() {
    let mut server = Server::new_async().await;
    let _refresh = server
        .mock("POST", "/Auth/RefreshToken")
        .with_status(500)
        .with_body("upstream down")
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::with_tokens(
        EMAIL,
        TokenPair::new("OLD", "R0"),
    ));
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    match session.refresh().await {
        Err(AppError::Auth { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(store.load(EMAIL).await, TokenPair::new("OLD", "R0"));
}

#[tokio::test]
async fn test_failed_login_is_not_persisted() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/Auth/Login")
        .with_status(400)
        .with_body(r#"{"Title":"Wrong credentials"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::new());
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    let result = session.login().await;

    assert!(matches!(
        result,
        Err(AppError::Auth { status, .. }) if status == StatusCode::BAD_REQUEST
    ));
    login.assert_async().await;
    assert!(store.is_empty().await);
    assert!(session.tokens().await.is_empty());
}

#[tokio::test]
async fn test_login_without_token_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/Auth/Login")
        .with_status(200)
        .with_body(r#"{"Result":{},"Status":200}"#)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let store = Arc::new(MemoryTokenStore::new());
    let session = AuthSession::new(&config, transport(), store.clone()).await;

    assert!(matches!(
        session.access_token().await,
        Err(AppError::InvalidResponse(_))
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_failed_save_keeps_tokens_usable() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/Auth/Login")
        .with_status(200)
        .with_body(token_body("T1", "R1"))
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let session = AuthSession::new(&config, transport(), Arc::new(ReadOnlyStore)).await;

    assert_eq!(session.access_token().await.unwrap(), "T1");
}

#[tokio::test]
async fn test_network_failure_propagates() {
    let config = mock_config("http://127.0.0.1:1", EMAIL);
    let session = AuthSession::new(&config, transport(), Arc::new(MemoryTokenStore::new())).await;

    assert!(matches!(
        session.login().await,
        Err(AppError::Network(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_login() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/Auth/Login")
        .with_status(200)
        .with_body(token_body("T1", "R1"))
        .expect(1)
        .create_async()
        .await;

    let config = mock_config(&server.url(), EMAIL);
    let session = Arc::new(
        AuthSession::new(&config, transport(), Arc::new(MemoryTokenStore::new())).await,
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = session.clone();
            tokio::spawn(async move { session.access_token().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "T1");
    }
    login.assert_async().await;
}
