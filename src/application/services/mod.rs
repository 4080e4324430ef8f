/// Module containing the engagement service
pub mod engagement_service;
/// Module containing the statistics service
pub mod statistics_service;
/// Module containing the trips service
pub mod trips_service;
/// Module containing the users service
pub mod users_service;

pub use crate::application::interfaces::engagement::*;
pub use crate::application::interfaces::statistics::*;
pub use crate::application::interfaces::trips::*;
pub use crate::application::interfaces::users::*;
pub use engagement_service::EngagementServiceImpl;
pub use statistics_service::StatisticsServiceImpl;
pub use trips_service::TripsServiceImpl;
pub use users_service::UsersServiceImpl;
