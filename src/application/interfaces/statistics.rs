use crate::error::AppError;
use crate::model::requests::EntityScope;
use crate::model::response::ApiResponse;
use crate::utils::DateRange;
use async_trait::async_trait;

/// Interface for the driving indicators service
///
/// Daily queries are clamped to fourteen days, accumulated ones are sent as
/// given.
#[async_trait]
pub trait StatisticsService: Send + Sync {
    /// Daily driving statistics of a user
    async fn user_daily_statistics(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Daily eco score of a user
    async fn user_daily_eco_score(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<ApiResponse, AppError>;

    /// Daily safety score of a user
    async fn user_daily_safety_score(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Driving statistics of a user accumulated over the range
    async fn user_accumulated_statistics(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Eco score of a user accumulated over the range
    async fn user_accumulated_eco_score(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<ApiResponse, AppError>;

    /// Safety score of a user accumulated over the range
    async fn user_accumulated_safety_score(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Latest trip and scoring dates of a user
    async fn last_updates(&self, user_id: &str) -> Result<ApiResponse, AppError>;

    /// Tags seen on the trips of a user
    async fn unique_tags(&self, user_id: &str, range: DateRange)
    -> Result<ApiResponse, AppError>;

    /// Eco score of an entity accumulated over the range
    async fn entity_accumulated_eco_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Driving statistics of an entity accumulated over the range
    async fn entity_accumulated_statistics(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Daily eco score of an entity
    async fn entity_daily_eco_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Daily driving statistics of an entity
    async fn entity_daily_statistics(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Daily safety score of an entity
    async fn entity_daily_safety_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;

    /// Safety score of an entity over the range
    async fn entity_safety_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError>;
}
