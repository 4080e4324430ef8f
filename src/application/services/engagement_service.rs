use crate::application::config::{Config, join_url};
use crate::application::interfaces::auth::Authenticator;
use crate::application::interfaces::engagement::EngagementService;
use crate::constants::LEADERBOARD_PATH;
use crate::error::AppError;
use crate::model::http::{HttpRequest, RetryingHttpClient};
use crate::model::requests::LeaderboardRequest;
use crate::model::response::ApiResponse;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Implementation of the engagement service
pub struct EngagementServiceImpl<A: Authenticator + ?Sized> {
    config: Arc<Config>,
    client: Arc<RetryingHttpClient<A>>,
}

impl<A: Authenticator + ?Sized> EngagementServiceImpl<A> {
    /// Creates a new instance of the engagement service
    pub fn new(config: Arc<Config>, client: Arc<RetryingHttpClient<A>>) -> Self {
        Self { config, client }
    }

    /// Gets the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    async fn request(&self, suffix: &str, user_id: &str) -> Result<HttpRequest, AppError> {
        let url = join_url(
            &self.config.rest_api.leaderboard_base_url,
            &format!("{LEADERBOARD_PATH}{suffix}"),
        );
        HttpRequest::get(url)
            .with_headers(self.client.bearer_headers().await?)
            .with_header("DeviceToken", user_id)
    }
}

#[async_trait]
impl<A: Authenticator + ?Sized + 'static> EngagementService for EngagementServiceImpl<A> {
    async fn user_leaderboard(&self, user_id: &str) -> Result<ApiResponse, AppError> {
        info!("Getting leaderboard position of {}", user_id);

        let request = self.request("/user", user_id).await?;
        let response = self.client.request(request).await?;
        ApiResponse::from_http(&response)
    }

    async fn general_leaderboard(
        &self,
        user_id: &str,
        request: LeaderboardRequest,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting general leaderboard around {}", user_id);

        let http_request = self
            .request("", user_id)
            .await?
            .with_query("UsersCount", request.leaders_count)
            .with_query("RoundUsersCount", request.round_users_count)
            .with_query("ScoringRate", request.rating_type);

        let response = self.client.request(http_request).await?;
        ApiResponse::from_http(&response)
    }
}
