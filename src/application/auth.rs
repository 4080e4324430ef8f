/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Authentication session for the telematics identity provider
//!
//! This module owns the token lifecycle:
//! - Login with email and password
//! - Refresh-token exchange, falling back to login when it is impossible or rejected
//! - Persistence of every new token pair through a [`TokenStore`]
//! - Lazy login on first use
//!
//! All reads and writes of the token pair happen under one async mutex held
//! across the identity provider round trip, so concurrent callers never issue
//! duplicate login or refresh calls.

use crate::application::config::{Config, Credentials};
use crate::application::interfaces::auth::Authenticator;
use crate::error::AppError;
use crate::model::auth::{LoginRequest, RefreshRequest, TokenPair, TokenResponse};
use crate::model::http::{HttpRequest, HttpResponse, Transport, json_headers};
use crate::storage::TokenStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Token lifecycle manager of one identity
pub struct AuthSession {
    credentials: Credentials,
    login_url: String,
    refresh_url: String,
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    tokens: Mutex<TokenPair>,
}

impl AuthSession {
    /// Creates a session, restoring the persisted tokens of the configured identity
    ///
    /// No network call is made; the first [`AuthSession::access_token`] logs in
    /// when nothing usable was stored.
    pub async fn new(
        config: &Config,
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let tokens = store.load(&config.credentials.email).await;
        if tokens.is_unauthenticated() {
            debug!("No stored access token for {}", config.credentials.email);
        } else {
            debug!("Restored stored tokens for {}", config.credentials.email);
        }

        Self {
            credentials: config.credentials.clone(),
            login_url: config.login_url(),
            refresh_url: config.refresh_url(),
            transport,
            store,
            tokens: Mutex::new(tokens),
        }
    }

    /// Identity the tokens belong to
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.credentials.email
    }

    /// Copy of the current token pair
    pub async fn tokens(&self) -> TokenPair {
        self.tokens.lock().await.clone()
    }

    /// True when an access token is held, fresh or not
    pub async fn is_authenticated(&self) -> bool {
        !self.tokens.lock().await.is_unauthenticated()
    }

    /// Logs in with the configured credentials
    ///
    /// # Returns
    /// * `Ok(())` - New tokens are held and persisted
    /// * `Err(AppError::Auth)` - The identity provider rejected the credentials;
    ///   the session is left without tokens
    pub async fn login(&self) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().await;
        self.login_locked(&mut tokens).await
    }

    /// Exchanges the refresh token for a new pair
    ///
    /// Logs in instead when no refresh token is held or the identity provider
    /// answers 401 to the exchange.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().await;
        self.refresh_locked(&mut tokens).await
    }

    /// Current access token, logging in first when none is available
    ///
    /// An empty in-memory token is first looked up in the store, which another
    /// process may have filled in the meantime.
    pub async fn access_token(&self) -> Result<String, AppError> {
        let mut tokens = self.tokens.lock().await;

        if tokens.is_unauthenticated() {
            let stored = self.store.load(self.identity()).await;
            if stored.is_unauthenticated() {
                info!("No access token available, logging in");
                self.login_locked(&mut tokens).await?;
            } else {
                debug!("Reloaded tokens from store");
                *tokens = stored;
            }
        }

        tokens
            .access_token()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidResponse("no access token after login".to_string()))
    }

    /// Refreshes unconditionally after a resource call was answered with 401
    pub async fn handle_unauthorized(&self) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().await;
        info!("Access token rejected, refreshing");
        self.refresh_locked(&mut tokens).await
    }

    async fn login_locked(&self, tokens: &mut TokenPair) -> Result<(), AppError> {
        debug!("Sending login request to: {}", self.login_url);

        let body = LoginRequest::new(&self.credentials.email, &self.credentials.password);
        let response = self.exchange(&self.login_url, &body).await?;

        if !response.is_success() {
            error!("Login failed with status {}: {}", response.status, response.body);
            *tokens = TokenPair::default();
            return Err(AppError::auth(response.status, &response.body));
        }

        self.accept(tokens, &response, "login").await?;
        info!("✓ Login successful for {}", self.identity());
        Ok(())
    }

    async fn refresh_locked(&self, tokens: &mut TokenPair) -> Result<(), AppError> {
        let Some(refresh_token) = tokens.refresh_token().map(str::to_string) else {
            warn!("No refresh token held, performing login");
            return self.login_locked(tokens).await;
        };

        debug!("Sending refresh request to: {}", self.refresh_url);

        let body = RefreshRequest {
            access_token: tokens.access_token().map(str::to_string),
            refresh_token,
        };
        let response = self.exchange(&self.refresh_url, &body).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            warn!("Refresh token rejected, performing login");
            return self.login_locked(tokens).await;
        }

        if !response.is_success() {
            error!(
                "Token refresh failed with status {}: {}",
                response.status, response.body
            );
            return Err(AppError::auth(response.status, &response.body));
        }

        self.accept(tokens, &response, "refresh").await?;
        info!("✓ Token refreshed successfully");
        Ok(())
    }

    async fn exchange<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<HttpResponse, AppError> {
        let request = HttpRequest::post(url)
            .with_headers(json_headers())
            .with_json(body)?;
        self.transport.execute(&request).await
    }

    /// Installs the pair carried by a successful exchange and persists it
    async fn accept(
        &self,
        tokens: &mut TokenPair,
        response: &HttpResponse,
        exchange: &str,
    ) -> Result<(), AppError> {
        let fresh: TokenPair = response.json::<TokenResponse>()?.into();
        if fresh.is_unauthenticated() {
            return Err(AppError::InvalidResponse(format!(
                "{exchange} response carried no access token"
            )));
        }

        *tokens = fresh;
        if let Err(e) = self.store.save(self.identity(), tokens).await {
            error!("Failed to persist tokens for {}: {}", self.identity(), e);
        }
        Ok(())
    }
}

#[async_trait]
impl Authenticator for AuthSession {
    async fn access_token(&self) -> Result<String, AppError> {
        AuthSession::access_token(self).await
    }

    async fn handle_unauthorized(&self) -> Result<(), AppError> {
        AuthSession::handle_unauthorized(self).await
    }
}
