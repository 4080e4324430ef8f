/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # Telematics Client Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```ignore
//! use telematics_client::prelude::*;
//!
//! setup_logger();
//! let client = Client::new(Config::new()).await?;
//! let updates = client.statistics().last_updates("device-token").await?;
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration of the client
pub use crate::application::config::{Config, Credentials, RestApiConfig, TokenStoreConfig};

/// Client facade
pub use crate::application::client::Client;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

/// Result alias used by the library
pub type TelematicsResult<T> = Result<T, AppError>;

// ============================================================================
// AUTHENTICATION AND TRANSPORT
// ============================================================================

/// Token lifecycle manager
pub use crate::application::auth::AuthSession;

/// Token source trait
pub use crate::application::interfaces::auth::Authenticator;

/// Transport abstraction and authenticated client
pub use crate::model::http::{
    HttpRequest, HttpResponse, ReqwestTransport, RetryingHttpClient, Transport,
};

/// Token persistence
pub use crate::storage::{FileTokenStore, MemoryTokenStore, TokenStore};

// ============================================================================
// SERVICES
// ============================================================================

/// Service traits
pub use crate::application::services::{
    EngagementService, StatisticsService, TripsService, UsersService,
};

/// Service implementations
pub use crate::application::services::{
    EngagementServiceImpl, StatisticsServiceImpl, TripsServiceImpl, UsersServiceImpl,
};

// ============================================================================
// MODELS
// ============================================================================

/// Token pair
pub use crate::model::auth::TokenPair;

/// Request models
pub use crate::model::requests::{
    EntityScope, LeaderboardRequest, NewUser, TripDetailsRequest, TripListRequest, UnitSystem,
    UserProfile,
};

/// Response envelope and classification
pub use crate::model::response::{ApiResponse, ResponseClass, classify};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging setup
pub use crate::utils::logger::setup_logger;

/// Date ranges
pub use crate::utils::date_range::{DateRange, parse_date};

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export chrono for date handling
pub use chrono::{Duration, NaiveDate, Utc};
