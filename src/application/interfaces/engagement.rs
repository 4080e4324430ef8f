use crate::error::AppError;
use crate::model::requests::LeaderboardRequest;
use crate::model::response::ApiResponse;
use async_trait::async_trait;

/// Interface for the engagement service
#[async_trait]
pub trait EngagementService: Send + Sync {
    /// Position of a user in the leaderboard
    async fn user_leaderboard(&self, user_id: &str) -> Result<ApiResponse, AppError>;

    /// Leaders and the users ranked around `user_id`
    async fn general_leaderboard(
        &self,
        user_id: &str,
        request: LeaderboardRequest,
    ) -> Result<ApiResponse, AppError>;
}
