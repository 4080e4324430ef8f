//! # Telematics Client
//!
//! Client for the Damoov telematics admin API.
//!
//! The crate is organized around an authenticated-request layer:
//!
//! - [`storage::TokenStore`] persists the token pair of an identity
//! - [`application::auth::AuthSession`] logs in, refreshes and hands out bearer tokens
//! - [`model::http::RetryingHttpClient`] executes requests and retries once after a 401
//!
//! On top of it live thin resource services for trips, statistics, users and the
//! engagement leaderboard, reachable from the [`application::client::Client`] facade.
//!
//! ```ignore
//! use telematics_client::prelude::*;
//!
//! let client = Client::new(Config::new()).await?;
//! let trips = client.trips().list_trips(TripListRequest::new("user-id")).await?;
//! ```

/// Authentication, retrying client, configuration and resource services
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Wire models, transport and response classification
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Token persistence
pub mod storage;
/// Configuration, logging and date helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
