use crate::error::AppError;
use crate::model::requests::{TripDetailsRequest, TripListRequest};
use crate::model::response::ApiResponse;
use async_trait::async_trait;

/// Interface for the trips service
#[async_trait]
pub trait TripsService: Send + Sync {
    /// Lists the trips of a user
    ///
    /// Without a limit every page is fetched and the returned envelope carries
    /// all trips in `Result.Trips`. With a limit a single call is made.
    async fn list_trips(&self, request: TripListRequest) -> Result<ApiResponse, AppError>;

    /// Gets a single trip
    async fn trip_details(
        &self,
        trip_id: &str,
        request: TripDetailsRequest,
    ) -> Result<ApiResponse, AppError>;
}
