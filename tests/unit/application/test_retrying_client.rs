use crate::common::{CountingAuth, ScriptedTransport};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use telematics_client::error::AppError;
use telematics_client::model::http::{HttpRequest, HttpResponse, RetryingHttpClient};

fn ok(body: &str) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::new(StatusCode::OK, body))
}

fn unauthorized() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::new(StatusCode::UNAUTHORIZED, ""))
}

#[tokio::test]
async fn test_success_needs_one_call_and_no_refresh() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok(r#"{"Status":200}"#)]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    let headers = client.bearer_headers().await.unwrap();
    let response = client.get("https://api.test/x", headers).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(transport.calls(), 1);
    assert_eq!(auth.token_calls(), 1);
    assert_eq!(auth.unauthorized_calls(), 0);
    let sent = &transport.requests()[0];
    assert_eq!(sent.header("authorization"), Some("Bearer T1"));
    assert_eq!(sent.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_persistent_401_is_retried_exactly_once() {
    let transport = Arc::new(ScriptedTransport::always(StatusCode::UNAUTHORIZED));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    let headers = client.bearer_headers().await.unwrap();
    let response = client.get("https://api.test/x", headers).await.unwrap();

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(transport.calls(), 2);
    assert_eq!(auth.unauthorized_calls(), 1);
}

#[tokio::test]
async fn test_retry_uses_new_token_and_same_request() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        unauthorized(),
        ok(r#"{"Status":200}"#),
    ]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    let request = HttpRequest::put("https://user.test/Management/users")
        .with_headers(client.bearer_headers().await.unwrap())
        .with_header("UserDeviceToken", "u-1")
        .unwrap()
        .with_query("Page", 3)
        .with_json(&json!({ "Nickname": "speedy" }))
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let sent = transport.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].header("authorization"), Some("Bearer T1"));
    assert_eq!(sent[1].header("authorization"), Some("Bearer T2"));
    for request in &sent {
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url, "https://user.test/Management/users");
        assert_eq!(request.header("userdevicetoken"), Some("u-1"));
        assert_eq!(request.query, vec![("Page".to_string(), "3".to_string())]);
        assert_eq!(request.body, Some(json!({ "Nickname": "speedy" })));
    }
}

#[tokio::test]
async fn test_delete_is_retried_as_delete() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        unauthorized(),
        Ok(HttpResponse::new(StatusCode::NO_CONTENT, "")),
    ]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    let headers = client.bearer_headers().await.unwrap();
    let response = client
        .delete("https://user.test/Management/users/u-1", headers)
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(
        transport
            .requests()
            .iter()
            .all(|r| r.method == Method::DELETE)
    );
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::FORBIDDEN,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let transport = Arc::new(ScriptedTransport::always(status));
        let auth = Arc::new(CountingAuth::default());
        let client = RetryingHttpClient::new(transport.clone(), auth.clone());

        let headers = client.bearer_headers().await.unwrap();
        let response = client
            .post("https://api.test/x", headers, &json!({}))
            .await
            .unwrap();

        assert_eq!(response.status, status);
        assert_eq!(transport.calls(), 1);
        assert_eq!(auth.unauthorized_calls(), 0);
    }
}

#[tokio::test]
async fn test_transport_failure_propagates_without_retry() {
    let transport = Arc::new(ScriptedTransport::new(vec![Err(AppError::Io(
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
    ))]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    let result = client.get("https://api.test/x", HeaderMap::new()).await;

    assert!(matches!(result, Err(AppError::Io(_))));
    assert_eq!(transport.calls(), 1);
    assert_eq!(auth.unauthorized_calls(), 0);
}

#[tokio::test]
async fn test_first_attempt_sends_caller_headers_only() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    client
        .post("https://api.test/x", HeaderMap::new(), &json!({ "A": 1 }))
        .await
        .unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.header("content-type"), Some("application/json"));
    assert_eq!(sent.header("authorization"), None);
    assert_eq!(sent.body, Some(json!({ "A": 1 })));
    assert_eq!(auth.token_calls(), 0);
}

#[tokio::test]
async fn test_retry_adds_bearer_to_unauthenticated_request() {
    let transport = Arc::new(ScriptedTransport::new(vec![unauthorized(), ok("{}")]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport.clone(), auth.clone());

    client
        .get("https://api.test/x", HeaderMap::new())
        .await
        .unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].header("authorization"), None);
    assert_eq!(sent[1].header("authorization"), Some("Bearer T2"));
}

#[tokio::test]
async fn test_bearer_headers_use_current_token() {
    let transport = Arc::new(ScriptedTransport::new(vec![]));
    let auth = Arc::new(CountingAuth::default());
    let client = RetryingHttpClient::new(transport, auth.clone());

    let headers = client.bearer_headers().await.unwrap();
    assert_eq!(headers.get("authorization").unwrap(), "Bearer T1");
    assert_eq!(auth.token_calls(), 1);
}
