/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! HTTP transport abstraction
//!
//! Requests and responses are plain values so that the retry logic and the
//! authentication session can be exercised against scripted transports. The
//! production transport is [`ReqwestTransport`]; every authenticated call goes
//! through [`RetryingHttpClient`].

use crate::application::interfaces::auth::Authenticator;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const APPLICATION_JSON: &str = "application/json";

/// A request ready to be executed by a [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL, without query string
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Query parameters, encoded by the transport
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Creates a request without headers, query or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Creates a PUT request
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Creates a DELETE request
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Adds every header of `headers`, replacing existing values
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in headers.iter() {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Adds a single header given as strings
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, AppError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidInput(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidInput(format!("invalid value for header {name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Appends a query parameter
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter when the value is present
    pub fn with_optional_query(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.with_query(key, v),
            _ => self,
        }
    }

    /// Serializes `body` as the JSON payload
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, AppError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Sets `Authorization: Bearer <token>`, replacing any previous value
    pub fn set_bearer(&mut self, token: &str) -> Result<(), AppError> {
        self.headers.insert(AUTHORIZATION, bearer_value(token)?);
        Ok(())
    }

    /// Value of a header, if present and valid UTF-8
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A response as returned by a [`Transport`], whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body
    pub body: String,
}

impl HttpResponse {
    /// Creates a response
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserializes the body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Executes HTTP requests
///
/// Implementations must not turn HTTP error statuses into errors: any response
/// received from the server is returned as an [`HttpResponse`]. Only failures to
/// obtain a response are reported as `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes `request` once
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, AppError>;
}

/// [`Transport`] backed by a `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, AppError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(HttpResponse { status, body })
    }
}

/// HTTP client with a single retry after 401
///
/// Requests are sent with the headers the caller built, usually from
/// [`RetryingHttpClient::bearer_headers`]. When the server answers 401 the
/// [`Authenticator`] is told so, `Authorization: Bearer` is rebuilt from the new
/// token and the same request is sent once more with the same verb, URL, query
/// and body. The second response is returned whatever its status. Network
/// failures are never retried.
pub struct RetryingHttpClient<A: Authenticator + ?Sized> {
    transport: Arc<dyn Transport>,
    auth: Arc<A>,
}

impl<A: Authenticator + ?Sized> RetryingHttpClient<A> {
    /// Creates a client over `transport` using `auth` for tokens
    pub fn new(transport: Arc<dyn Transport>, auth: Arc<A>) -> Self {
        Self { transport, auth }
    }

    /// The token source
    pub fn auth(&self) -> &Arc<A> {
        &self.auth
    }

    /// The underlying transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// `accept: application/json` plus the current bearer token
    pub async fn bearer_headers(&self) -> Result<HeaderMap, AppError> {
        let token = self.auth.access_token().await?;
        bearer_headers(&token)
    }

    /// Executes `request` as given, retrying once with a fresh token after 401
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` - The last response received, success or not
    /// * `Err(AppError)` - The transport failed or no new token could be obtained
    pub async fn request(&self, mut request: HttpRequest) -> Result<HttpResponse, AppError> {
        let response = self.transport.execute(&request).await?;

        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        warn!(
            "{} {} answered 401, refreshing token and retrying once",
            request.method, request.url
        );
        self.auth.handle_unauthorized().await?;

        let token = self.auth.access_token().await?;
        request.set_bearer(&token)?;
        self.transport.execute(&request).await
    }

    /// Makes a GET request
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<HttpResponse, AppError> {
        self.request(HttpRequest::get(url).with_headers(headers))
            .await
    }

    /// Makes a POST request with a JSON body
    pub async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &B,
    ) -> Result<HttpResponse, AppError> {
        let request = HttpRequest::post(url)
            .with_headers(json_headers())
            .with_headers(headers)
            .with_json(body)?;
        self.request(request).await
    }

    /// Makes a PUT request with a JSON body
    pub async fn put<B: Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &B,
    ) -> Result<HttpResponse, AppError> {
        let request = HttpRequest::put(url)
            .with_headers(json_headers())
            .with_headers(headers)
            .with_json(body)?;
        self.request(request).await
    }

    /// Makes a DELETE request
    pub async fn delete(&self, url: &str, headers: HeaderMap) -> Result<HttpResponse, AppError> {
        self.request(HttpRequest::delete(url).with_headers(headers))
            .await
    }
}

/// `accept` and `content-type` headers set to `application/json`
#[must_use]
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers
}

/// `accept: application/json` plus the bearer token
pub fn bearer_headers(token: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(AUTHORIZATION, bearer_value(token)?);
    Ok(headers)
}

fn bearer_value(token: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| AppError::InvalidInput(format!("token is not a valid header value: {e}")))
}
