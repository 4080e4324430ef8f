use crate::application::config::{Config, join_url};
use crate::application::interfaces::auth::Authenticator;
use crate::application::interfaces::trips::TripsService;
use crate::constants::{DEFAULT_PAGE_SIZE, TRIPS_PATH};
use crate::error::AppError;
use crate::model::http::RetryingHttpClient;
use crate::model::requests::{Paging, TripDetailsRequest, TripListRequest};
use crate::model::response::ApiResponse;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Implementation of the trips service
pub struct TripsServiceImpl<A: Authenticator + ?Sized> {
    config: Arc<Config>,
    client: Arc<RetryingHttpClient<A>>,
}

impl<A: Authenticator + ?Sized> TripsServiceImpl<A> {
    /// Creates a new instance of the trips service
    pub fn new(config: Arc<Config>, client: Arc<RetryingHttpClient<A>>) -> Self {
        Self { config, client }
    }

    /// Gets the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    fn url(&self, suffix: &str) -> String {
        join_url(
            &self.config.rest_api.api_base_url,
            &format!("{TRIPS_PATH}{suffix}"),
        )
    }

    async fn fetch_page(&self, request: &TripListRequest) -> Result<ApiResponse, AppError> {
        let headers = self.client.bearer_headers().await?;
        let response = self.client.post(&self.url(""), headers, request).await?;
        ApiResponse::from_http(&response)
    }
}

#[async_trait]
impl<A: Authenticator + ?Sized + 'static> TripsService for TripsServiceImpl<A> {
    async fn list_trips(&self, mut request: TripListRequest) -> Result<ApiResponse, AppError> {
        if let Some(limit) = request.limit {
            info!(
                "Getting up to {} trips of {}",
                limit, request.identifiers.user_id
            );
            request.paging = Some(Paging {
                count: limit,
                include_paging_info: false,
                page: None,
            });
            return self.fetch_page(&request).await;
        }

        info!("Getting all trips of {}", request.identifiers.user_id);
        let mut all_trips: Vec<Value> = Vec::new();
        let mut current_page = 1;

        loop {
            request.paging = Some(Paging {
                count: DEFAULT_PAGE_SIZE,
                include_paging_info: true,
                page: Some(current_page),
            });

            let mut page = self.fetch_page(&request).await?;
            if page.is_error() {
                warn!("Trip listing stopped at page {}", current_page);
                return Ok(page);
            }

            let page_trips = page.trips().to_vec();
            let fetched = page_trips.len();
            all_trips.extend(page_trips);
            debug!(
                "Page {}: {} trips, {} in total",
                current_page,
                fetched,
                all_trips.len()
            );

            if fetched < DEFAULT_PAGE_SIZE as usize || !page.has_next_page() {
                info!("Trips obtained: {}", all_trips.len());
                match page.result.as_object_mut() {
                    Some(result) => {
                        result.insert("Trips".to_string(), Value::Array(all_trips));
                    }
                    None => page.result = json!({ "Trips": all_trips }),
                }
                return Ok(page);
            }

            current_page += 1;
        }
    }

    async fn trip_details(
        &self,
        trip_id: &str,
        request: TripDetailsRequest,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting details of trip {}", trip_id);

        let headers = self.client.bearer_headers().await?;
        let response = self
            .client
            .post(&self.url(&format!("/{trip_id}")), headers, &request)
            .await?;

        ApiResponse::from_http(&response)
    }
}
