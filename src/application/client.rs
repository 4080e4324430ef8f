/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Client facade wiring transport, token store, session and services together

use crate::application::auth::AuthSession;
use crate::application::config::Config;
use crate::application::services::{
    EngagementServiceImpl, StatisticsServiceImpl, TripsServiceImpl, UsersServiceImpl,
};
use crate::error::AppError;
use crate::model::http::{ReqwestTransport, RetryingHttpClient, Transport};
use crate::storage::{FileTokenStore, TokenStore};
use std::sync::Arc;
use tracing::debug;

/// Entry point of the library
///
/// Holds one [`AuthSession`] shared by every service, so all of them use the
/// same token pair and a refresh triggered by one is seen by the others.
pub struct Client {
    config: Arc<Config>,
    auth: Arc<AuthSession>,
    http: Arc<RetryingHttpClient<AuthSession>>,
    trips: TripsServiceImpl<AuthSession>,
    statistics: StatisticsServiceImpl<AuthSession>,
    users: UsersServiceImpl<AuthSession>,
    engagement: EngagementServiceImpl<AuthSession>,
}

impl Client {
    /// Creates a client over HTTP with tokens persisted under the configured directory
    ///
    /// No request is sent; the first resource call logs in if no stored token exists.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config.rest_api.timeout)?);
        let store: Arc<dyn TokenStore> =
            Arc::new(FileTokenStore::new(config.token_store.dir.clone()));
        Ok(Self::with_parts(config, transport, store).await)
    }

    /// Creates a client from explicit transport and token store
    pub async fn with_parts(
        config: Config,
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let config = Arc::new(config);
        let auth = Arc::new(AuthSession::new(&config, transport.clone(), store).await);
        let http = Arc::new(RetryingHttpClient::new(transport, auth.clone()));
        debug!("Client ready for {}", auth.identity());

        Self {
            trips: TripsServiceImpl::new(config.clone(), http.clone()),
            statistics: StatisticsServiceImpl::new(config.clone(), http.clone()),
            users: UsersServiceImpl::new(config.clone(), http.clone()),
            engagement: EngagementServiceImpl::new(config.clone(), http.clone()),
            config,
            auth,
            http,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The authentication session
    pub fn auth(&self) -> &Arc<AuthSession> {
        &self.auth
    }

    /// The authenticated HTTP client, for endpoints without a dedicated service
    pub fn http(&self) -> &Arc<RetryingHttpClient<AuthSession>> {
        &self.http
    }

    /// Trips service
    pub fn trips(&self) -> &TripsServiceImpl<AuthSession> {
        &self.trips
    }

    /// Statistics service
    pub fn statistics(&self) -> &StatisticsServiceImpl<AuthSession> {
        &self.statistics
    }

    /// Users service
    pub fn users(&self) -> &UsersServiceImpl<AuthSession> {
        &self.users
    }

    /// Engagement service
    pub fn engagement(&self) -> &EngagementServiceImpl<AuthSession> {
        &self.engagement
    }
}
