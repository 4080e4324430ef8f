/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = "telematics-client/0.1.0";
/// Default base URL of the user service (authentication, registration, management)
pub const DEFAULT_USER_BASE_URL: &str = "https://user.telematicssdk.com/v1";
/// Default base URL of the trips and indicators services
pub const DEFAULT_API_BASE_URL: &str = "https://api.telematicssdk.com";
/// Default base URL of the leaderboard service
pub const DEFAULT_LEADERBOARD_BASE_URL: &str = "https://leaderboard.telematicssdk.com/v1";
/// Default timeout in seconds for REST requests
pub const DEFAULT_REST_TIMEOUT: u64 = 30;
/// Application name used for the token directory
pub const APP_NAME: &str = "telematics-client";
/// Login path, relative to the user base URL
pub const LOGIN_PATH: &str = "/Auth/Login";
/// Refresh path, relative to the user base URL
pub const REFRESH_PATH: &str = "/Auth/RefreshToken";
/// Trips path, relative to the API base URL
pub const TRIPS_PATH: &str = "/trips/get/admin/v1";
/// Indicators path, relative to the API base URL
pub const INDICATORS_PATH: &str = "/indicators/admin/v2";
/// Leaderboard path, relative to the leaderboard base URL
pub const LEADERBOARD_PATH: &str = "/Leaderboard";
/// Page size used when walking the trip list
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Longest date range, in days, the daily endpoints accept
pub const MAX_DATE_RANGE_DAYS: i64 = 14;
/// Default locale for trip payloads
pub const DEFAULT_LOCALE: &str = "EN";
/// Default sort order of the trip list
pub const DEFAULT_TRIP_SORT: &str = "StartDateUtc_Desc";
/// Maximum length of response bodies kept in error messages
pub const MAX_ERROR_BODY_LENGTH: usize = 500;
