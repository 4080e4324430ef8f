/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::constants::{DEFAULT_LOCALE, DEFAULT_TRIP_SORT};
use crate::utils::date_range::{DateRange, format_date};
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Unit system of distances and speeds in trip payloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Metric units
    #[default]
    Si,
    /// Imperial units
    Imperial,
}

impl From<&str> for UnitSystem {
    /// Unknown values fall back to [`UnitSystem::Si`]
    fn from(value: &str) -> Self {
        match value {
            "Si" => UnitSystem::Si,
            "Imperial" => UnitSystem::Imperial,
            other => {
                warn!("Invalid unit system '{}', choose 'Si' or 'Imperial'. Defaulting to 'Si'", other);
                UnitSystem::Si
            }
        }
    }
}

/// `Identifiers` block of trip payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Identifiers {
    /// Device token of the user
    pub user_id: String,
}

/// `Paging` block of the trip list payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paging {
    /// Trips per page
    pub count: u32,
    /// Whether the response carries `PagingInfo`
    pub include_paging_info: bool,
    /// One based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Parameters of the trip list endpoint
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TripListRequest {
    /// Whose trips
    pub identifiers: Identifiers,
    /// First day, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Range start as unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_timestamp_sec: Option<i64>,
    /// Range end as unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_timestamp_sec: Option<i64>,
    /// Include trip details
    pub include_details: bool,
    /// Include trip statistics
    pub include_statistics: bool,
    /// Include trip scores
    pub include_scores: bool,
    /// Include related trips
    pub include_related: bool,
    /// Tags a trip must carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags_included: Vec<String>,
    /// How `tags_included` combine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags_included_operator: Option<String>,
    /// Tags a trip must not carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags_excluded: Vec<String>,
    /// How `tags_excluded` combine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags_excluded_operator: Option<String>,
    /// Response locale
    pub locale: String,
    /// Response units
    pub unit_system: UnitSystem,
    /// Vehicles to filter on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<String>,
    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Paging, filled in by the trips service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    /// Maximum number of trips; when unset every page is fetched
    #[serde(skip)]
    pub limit: Option<u32>,
}

impl TripListRequest {
    /// Creates a request for every trip of `user_id`
    pub fn new(user_id: &str) -> Self {
        Self {
            identifiers: Identifiers {
                user_id: user_id.to_string(),
            },
            start_date: None,
            end_date: None,
            start_date_timestamp_sec: None,
            end_date_timestamp_sec: None,
            include_details: false,
            include_statistics: false,
            include_scores: false,
            include_related: false,
            tags_included: Vec::new(),
            tags_included_operator: None,
            tags_excluded: Vec::new(),
            tags_excluded_operator: None,
            locale: DEFAULT_LOCALE.to_string(),
            unit_system: UnitSystem::Si,
            vehicles: Vec::new(),
            sort_by: Some(DEFAULT_TRIP_SORT.to_string()),
            paging: None,
            limit: None,
        }
    }

    /// Restricts the request to `range`, clamped to the maximum span
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.start_date = None;
        self.end_date = None;
        self.start_date_timestamp_sec = None;
        self.end_date_timestamp_sec = None;
        match range.clamped() {
            DateRange::Dates { start, end } => {
                self.start_date = Some(format_date(start));
                self.end_date = Some(format_date(end));
            }
            DateRange::Timestamps { start, end } => {
                self.start_date_timestamp_sec = Some(start);
                self.end_date_timestamp_sec = Some(end);
            }
        }
        self
    }

    /// Sets the include flags: details, statistics, scores and related trips
    pub fn with_includes(
        mut self,
        details: bool,
        statistics: bool,
        scores: bool,
        related: bool,
    ) -> Self {
        self.include_details = details;
        self.include_statistics = statistics;
        self.include_scores = scores;
        self.include_related = related;
        self
    }

    /// Keeps trips carrying `tags`, combined with `operator`
    pub fn with_tags_included(mut self, tags: Vec<String>, operator: Option<&str>) -> Self {
        self.tags_included = tags;
        self.tags_included_operator = operator.map(str::to_string);
        self
    }

    /// Drops trips carrying `tags`, combined with `operator`
    pub fn with_tags_excluded(mut self, tags: Vec<String>, operator: Option<&str>) -> Self {
        self.tags_excluded = tags;
        self.tags_excluded_operator = operator.map(str::to_string);
        self
    }

    /// Sets the locale
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    /// Sets the unit system
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// Filters on vehicles
    pub fn with_vehicles(mut self, vehicles: Vec<String>) -> Self {
        self.vehicles = vehicles;
        self
    }

    /// Sets the sort order, an empty value removes it
    pub fn with_sort_by(mut self, sort_by: &str) -> Self {
        self.sort_by = Some(sort_by.to_string()).filter(|s| !s.is_empty());
        self
    }

    /// Fetches at most `limit` trips in a single call
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit).filter(|l| *l > 0);
        self
    }
}

/// Parameters of the trip details endpoint
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TripDetailsRequest {
    /// Owner of the trip
    pub identifiers: Identifiers,
    /// Include trip details
    pub include_details: bool,
    /// Include trip statistics
    pub include_statistics: bool,
    /// Include trip scores
    pub include_scores: bool,
    /// Include waypoints
    pub include_waypoints: bool,
    /// Include driving events
    pub include_events: bool,
    /// Include related trips
    pub include_related: bool,
    /// Response locale
    pub locale: String,
    /// Response units
    pub unit_system: UnitSystem,
}

impl TripDetailsRequest {
    /// Creates a request for a trip of `user_id`
    pub fn new(user_id: &str) -> Self {
        Self {
            identifiers: Identifiers {
                user_id: user_id.to_string(),
            },
            include_details: false,
            include_statistics: false,
            include_scores: false,
            include_waypoints: false,
            include_events: false,
            include_related: true,
            locale: DEFAULT_LOCALE.to_string(),
            unit_system: UnitSystem::Si,
        }
    }

    /// Sets the include flags: details, statistics, scores, waypoints, events and related trips
    pub fn with_includes(
        mut self,
        details: bool,
        statistics: bool,
        scores: bool,
        waypoints: bool,
        events: bool,
        related: bool,
    ) -> Self {
        self.include_details = details;
        self.include_statistics = statistics;
        self.include_scores = scores;
        self.include_waypoints = waypoints;
        self.include_events = events;
        self.include_related = related;
        self
    }

    /// Sets the locale
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    /// Sets the unit system
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }
}

/// `UserFields` block of user payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserFields {
    /// Caller side identifier of the user
    pub client_id: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Profile fields shared by user creation and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    /// Caller side identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_fields: Option<UserFields>,
    /// First name
    #[serde(default, skip_serializing_if = "is_blank")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(default, skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    /// Nickname
    #[serde(default, skip_serializing_if = "is_blank")]
    pub nickname: Option<String>,
    /// Phone number
    #[serde(default, skip_serializing_if = "is_blank")]
    pub phone: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "is_blank")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Sets the caller side identifier, an empty value removes it
    pub fn with_client_id(mut self, client_id: &str) -> Self {
        self.user_fields = Some(UserFields {
            client_id: client_id.to_string(),
        })
        .filter(|f| !f.client_id.is_empty());
        self
    }

    /// Sets first and last name
    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self.last_name = Some(last_name.to_string());
        self
    }

    /// Sets the nickname
    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    /// Sets the email address
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
}

/// Body of the user registration endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewUser {
    /// Ask the API to issue tokens for the new user
    pub create_access_token: bool,
    /// Profile fields
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl NewUser {
    /// Creates a registration body from a profile
    pub fn new(profile: UserProfile) -> Self {
        Self {
            create_access_token: false,
            profile,
        }
    }

    /// Requests tokens for the new user
    pub fn with_access_token(mut self) -> Self {
        self.create_access_token = true;
        self
    }
}

/// Exactly one entity whose consolidated indicators are requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityScope {
    /// An instance
    Instance(String),
    /// An application
    App(String),
    /// A company
    Company(String),
}

impl EntityScope {
    /// Query parameter naming this entity
    #[must_use]
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            EntityScope::Instance(id) => ("InstanceId", id),
            EntityScope::App(id) => ("AppId", id),
            EntityScope::Company(id) => ("CompanyId", id),
        }
    }
}

/// Parameters of the general leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardRequest {
    /// Number of leaders listed
    pub leaders_count: u32,
    /// Users listed around the caller
    pub round_users_count: u32,
    /// Rating used to rank users
    pub rating_type: u32,
}

impl Default for LeaderboardRequest {
    fn default() -> Self {
        Self {
            leaders_count: 5,
            round_users_count: 2,
            rating_type: 1,
        }
    }
}
