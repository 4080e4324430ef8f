use crate::application::config::{Config, join_url};
use crate::application::interfaces::auth::Authenticator;
use crate::application::interfaces::users::UsersService;
use crate::error::AppError;
use crate::model::http::{HttpRequest, RetryingHttpClient, json_headers};
use crate::model::requests::{NewUser, UserProfile};
use crate::model::response::ApiResponse;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Implementation of the user management service
pub struct UsersServiceImpl<A: Authenticator + ?Sized> {
    config: Arc<Config>,
    client: Arc<RetryingHttpClient<A>>,
}

impl<A: Authenticator + ?Sized> UsersServiceImpl<A> {
    /// Creates a new instance of the users service
    pub fn new(config: Arc<Config>, client: Arc<RetryingHttpClient<A>>) -> Self {
        Self { config, client }
    }

    /// Gets the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.rest_api.user_base_url, path)
    }
}

#[async_trait]
impl<A: Authenticator + ?Sized + 'static> UsersService for UsersServiceImpl<A> {
    async fn create_user(
        &self,
        instance_id: &str,
        instance_key: &str,
        user: NewUser,
    ) -> Result<ApiResponse, AppError> {
        if instance_id.is_empty() || instance_key.is_empty() {
            return Err(AppError::InvalidInput(
                "both instance id and instance key must be provided".to_string(),
            ));
        }
        info!("Creating user in instance {}", instance_id);

        let request = HttpRequest::post(self.url("/registration/create"))
            .with_headers(json_headers())
            .with_header("InstanceId", instance_id)?
            .with_header("InstanceKey", instance_key)?
            .with_json(&user)?;

        // Instance credentials, not a bearer token: no retry policy applies.
        let response = self.client.transport().execute(&request).await?;
        ApiResponse::from_http(&response)
    }

    async fn update_user(
        &self,
        user_id: &str,
        profile: UserProfile,
    ) -> Result<ApiResponse, AppError> {
        info!("Updating user {}", user_id);

        let headers = self.client.bearer_headers().await?;
        let request = HttpRequest::put(self.url("/Management/users"))
            .with_headers(json_headers())
            .with_headers(headers)
            .with_header("UserDeviceToken", user_id)?
            .with_json(&profile)?;

        let response = self.client.request(request).await?;
        ApiResponse::from_http(&response)
    }

    async fn delete_user(&self, user_id: &str) -> Result<ApiResponse, AppError> {
        info!("Deleting user {}", user_id);

        let headers = self.client.bearer_headers().await?;
        let response = self
            .client
            .delete(&self.url(&format!("/Management/users/{user_id}")), headers)
            .await?;
        ApiResponse::from_http(&response)
    }
}
