#![allow(dead_code)]

// Shared helpers for the unit tests

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use telematics_client::application::config::{
    Config, Credentials, RestApiConfig, TokenStoreConfig,
};
use telematics_client::application::interfaces::auth::Authenticator;
use telematics_client::error::AppError;
use telematics_client::model::http::{HttpRequest, HttpResponse, Transport};
use telematics_client::utils::get_id;

/// Fresh directory path under the system temp dir, not created
pub fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("telematics-client-test-{}", get_id()))
}

/// Configuration pointing every service at `base_url`
pub fn mock_config(base_url: &str, email: &str) -> Config {
    Config::from_parts(
        Credentials {
            email: email.to_string(),
            password: "secret".to_string(),
        },
        RestApiConfig::single_host(base_url),
        TokenStoreConfig { dir: temp_dir() },
    )
}

/// Transport replaying canned responses and recording what it was sent
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, AppError>>>,
    fallback: Option<HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<HttpResponse, AppError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with `status`
    pub fn always(status: StatusCode) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(HttpResponse::new(status, "")),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(next) => next,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| AppError::InvalidResponse("script exhausted".to_string())),
        }
    }
}

/// Authenticator handing out `T1`, then `T2` after the first 401, and so on
#[derive(Default)]
pub struct CountingAuth {
    generation: AtomicUsize,
    pub token_calls: AtomicUsize,
    pub unauthorized_calls: AtomicUsize,
}

impl CountingAuth {
    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn unauthorized_calls(&self) -> usize {
        self.unauthorized_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for CountingAuth {
    async fn access_token(&self) -> Result<String, AppError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("T{}", self.generation.load(Ordering::SeqCst) + 1))
    }

    async fn handle_unauthorized(&self) -> Result<(), AppError> {
        self.unauthorized_calls.fetch_add(1, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Identity provider answer carrying `access` and `refresh`
pub fn token_body(access: &str, refresh: &str) -> String {
    serde_json::json!({
        "Result": {
            "AccessToken": { "Token": access },
            "RefreshToken": refresh
        },
        "Status": 200
    })
    .to_string()
}
