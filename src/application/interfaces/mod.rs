/// Token source used by the retrying client
pub mod auth;
/// Engagement service interface
pub mod engagement;
/// Statistics service interface
pub mod statistics;
/// Trips service interface
pub mod trips;
/// Users service interface
pub mod users;
