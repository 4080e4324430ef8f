use crate::error::AppError;
use crate::model::requests::{NewUser, UserProfile};
use crate::model::response::ApiResponse;
use async_trait::async_trait;

/// Interface for the user management service
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a user under an instance
    ///
    /// Authenticated with the instance credentials instead of a bearer token.
    /// Both must be non-empty.
    async fn create_user(
        &self,
        instance_id: &str,
        instance_key: &str,
        user: NewUser,
    ) -> Result<ApiResponse, AppError>;

    /// Updates the profile of a user
    async fn update_user(
        &self,
        user_id: &str,
        profile: UserProfile,
    ) -> Result<ApiResponse, AppError>;

    /// Deletes a user
    async fn delete_user(&self, user_id: &str) -> Result<ApiResponse, AppError>;
}
