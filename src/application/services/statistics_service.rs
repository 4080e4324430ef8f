use crate::application::config::{Config, join_url};
use crate::application::interfaces::auth::Authenticator;
use crate::application::interfaces::statistics::StatisticsService;
use crate::constants::INDICATORS_PATH;
use crate::error::AppError;
use crate::model::http::{HttpRequest, RetryingHttpClient};
use crate::model::requests::EntityScope;
use crate::model::response::ApiResponse;
use crate::utils::DateRange;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Whether a range is shortened before being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Daily,
    Accumulated,
}

/// Implementation of the driving indicators service
pub struct StatisticsServiceImpl<A: Authenticator + ?Sized> {
    config: Arc<Config>,
    client: Arc<RetryingHttpClient<A>>,
}

impl<A: Authenticator + ?Sized> StatisticsServiceImpl<A> {
    /// Creates a new instance of the statistics service
    pub fn new(config: Arc<Config>, client: Arc<RetryingHttpClient<A>>) -> Self {
        Self { config, client }
    }

    /// Gets the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    fn request(&self, path: &str) -> HttpRequest {
        HttpRequest::get(join_url(
            &self.config.rest_api.api_base_url,
            &format!("{INDICATORS_PATH}{path}"),
        ))
    }

    async fn send(&self, request: HttpRequest) -> Result<ApiResponse, AppError> {
        debug!("Requesting indicators: {} {:?}", request.url, request.query);
        let headers = self.client.bearer_headers().await?;
        let response = self.client.request(request.with_headers(headers)).await?;
        ApiResponse::from_http(&response)
    }

    async fn user_indicator(
        &self,
        path: &str,
        user_id: &str,
        range: DateRange,
        span: Span,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        let request = self.request(path).with_query("UserId", user_id);
        let request = with_range(request, range, span)?.with_optional_query("Tag", tag);
        self.send(request).await
    }

    async fn entity_indicator(
        &self,
        path: &str,
        scope: &EntityScope,
        range: DateRange,
        span: Span,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        let (key, id) = scope.query_pair();
        let request = with_range(self.request(path), range, span)?
            .with_query(key, id)
            .with_optional_query("Tag", tag);
        self.send(request).await
    }
}

fn with_range(request: HttpRequest, range: DateRange, span: Span) -> Result<HttpRequest, AppError> {
    let range = match span {
        Span::Daily => range.clamped(),
        Span::Accumulated => range,
    };
    let (start, end) = range.date_strings()?;
    Ok(request
        .with_query("StartDate", start)
        .with_query("EndDate", end))
}

#[async_trait]
impl<A: Authenticator + ?Sized + 'static> StatisticsService for StatisticsServiceImpl<A> {
    async fn user_daily_statistics(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting daily statistics of {}", user_id);
        self.user_indicator("/Statistics/daily", user_id, range, Span::Daily, tag)
            .await
    }

    async fn user_daily_eco_score(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting daily eco score of {}", user_id);
        self.user_indicator("/Scores/eco/daily", user_id, range, Span::Daily, None)
            .await
    }

    async fn user_daily_safety_score(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting daily safety score of {}", user_id);
        self.user_indicator("/Scores/safety/daily", user_id, range, Span::Daily, tag)
            .await
    }

    async fn user_accumulated_statistics(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting accumulated statistics of {}", user_id);
        self.user_indicator("/Statistics", user_id, range, Span::Accumulated, tag)
            .await
    }

    async fn user_accumulated_eco_score(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting accumulated eco score of {}", user_id);
        self.user_indicator("/Scores/eco", user_id, range, Span::Accumulated, None)
            .await
    }

    async fn user_accumulated_safety_score(
        &self,
        user_id: &str,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting accumulated safety score of {}", user_id);
        self.user_indicator("/Scores/safety", user_id, range, Span::Accumulated, tag)
            .await
    }

    async fn last_updates(&self, user_id: &str) -> Result<ApiResponse, AppError> {
        info!("Getting last update dates of {}", user_id);
        let request = self
            .request("/Statistics/dates")
            .with_query("UserId", user_id);
        self.send(request).await
    }

    async fn unique_tags(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting unique tags of {}", user_id);
        self.user_indicator(
            "/Statistics/UniqueTags",
            user_id,
            range,
            Span::Accumulated,
            None,
        )
        .await
    }

    async fn entity_accumulated_eco_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting accumulated eco score of {:?}", scope);
        self.entity_indicator(
            "/Scores/eco/consolidated",
            scope,
            range,
            Span::Accumulated,
            tag,
        )
        .await
    }

    async fn entity_accumulated_statistics(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting accumulated statistics of {:?}", scope);
        self.entity_indicator(
            "/Statistics/consolidated",
            scope,
            range,
            Span::Accumulated,
            tag,
        )
        .await
    }

    async fn entity_daily_eco_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting daily eco score of {:?}", scope);
        self.entity_indicator(
            "/Scores/eco/consolidated/daily",
            scope,
            range,
            Span::Daily,
            tag,
        )
        .await
    }

    async fn entity_daily_statistics(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting daily statistics of {:?}", scope);
        self.entity_indicator(
            "/Statistics/consolidated/daily",
            scope,
            range,
            Span::Daily,
            tag,
        )
        .await
    }

    async fn entity_daily_safety_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting daily safety score of {:?}", scope);
        self.entity_indicator(
            "/Scores/safety/consolidated/daily",
            scope,
            range,
            Span::Daily,
            tag,
        )
        .await
    }

    async fn entity_safety_score(
        &self,
        scope: &EntityScope,
        range: DateRange,
        tag: Option<&str>,
    ) -> Result<ApiResponse, AppError> {
        info!("Getting safety score of {:?}", scope);
        self.entity_indicator(
            "/Scores/safety/consolidated",
            scope,
            range,
            Span::Daily,
            tag,
        )
        .await
    }
}
