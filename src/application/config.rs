use crate::constants::{
    APP_NAME, DEFAULT_API_BASE_URL, DEFAULT_LEADERBOARD_BASE_URL, DEFAULT_REST_TIMEOUT,
    DEFAULT_USER_BASE_URL,
};
use crate::utils::config::{get_env_or_default, get_env_path};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Credentials of the admin account used against the identity provider
pub struct Credentials {
    /// Login email, also the identity tokens are stored under
    pub email: String,
    /// Account password, never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration of the telematics client
pub struct Config {
    /// Authentication credentials
    pub credentials: Credentials,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Token persistence configuration
    pub token_store: TokenStoreConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Base URLs and timeout of the REST services
pub struct RestApiConfig {
    /// User service: authentication, registration and user management
    pub user_base_url: String,
    /// Trips and indicators services
    pub api_base_url: String,
    /// Leaderboard service
    pub leaderboard_base_url: String,
    /// Timeout in seconds for REST requests
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Where token pairs are persisted
pub struct TokenStoreConfig {
    /// Directory holding one file per identity
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            user_base_url: DEFAULT_USER_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            leaderboard_base_url: DEFAULT_LEADERBOARD_BASE_URL.to_string(),
            timeout: DEFAULT_REST_TIMEOUT,
        }
    }
}

impl Default for TokenStoreConfig {
    fn default() -> Self {
        Self {
            dir: default_token_dir(),
        }
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// A `.env` file is loaded first when present. Missing credentials are
    /// logged and replaced by placeholders, which the identity provider will
    /// reject on first login.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let email = get_env_or_default("TELEMATICS_EMAIL", String::from("default_email"));
        let password = get_env_or_default("TELEMATICS_PASSWORD", String::from("default_password"));

        if email == "default_email" {
            error!("TELEMATICS_EMAIL not found in environment variables or .env file");
        }
        if password == "default_password" {
            error!("TELEMATICS_PASSWORD not found in environment variables or .env file");
        }

        Config {
            credentials: Credentials { email, password },
            rest_api: RestApiConfig::from_env(),
            token_store: TokenStoreConfig {
                dir: get_env_path("TELEMATICS_TOKEN_DIR").unwrap_or_else(default_token_dir),
            },
        }
    }

    /// Creates a configuration with explicit credentials and the environment for the rest
    pub fn with_credentials(email: &str, password: &str) -> Self {
        let mut config = Self::new();
        config.credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        config
    }

    /// Creates a configuration that reads nothing from the environment
    pub fn from_parts(
        credentials: Credentials,
        rest_api: RestApiConfig,
        token_store: TokenStoreConfig,
    ) -> Self {
        Self {
            credentials,
            rest_api,
            token_store,
        }
    }

    /// `POST` target of the login exchange
    #[must_use]
    pub fn login_url(&self) -> String {
        join_url(&self.rest_api.user_base_url, crate::constants::LOGIN_PATH)
    }

    /// `POST` target of the refresh exchange
    #[must_use]
    pub fn refresh_url(&self) -> String {
        join_url(&self.rest_api.user_base_url, crate::constants::REFRESH_PATH)
    }
}

impl RestApiConfig {
    /// Reads base URLs and timeout from the environment
    pub fn from_env() -> Self {
        Self {
            user_base_url: get_env_or_default(
                "TELEMATICS_USER_BASE_URL",
                String::from(DEFAULT_USER_BASE_URL),
            ),
            api_base_url: get_env_or_default(
                "TELEMATICS_API_BASE_URL",
                String::from(DEFAULT_API_BASE_URL),
            ),
            leaderboard_base_url: get_env_or_default(
                "TELEMATICS_LEADERBOARD_BASE_URL",
                String::from(DEFAULT_LEADERBOARD_BASE_URL),
            ),
            timeout: get_env_or_default("TELEMATICS_REST_TIMEOUT", DEFAULT_REST_TIMEOUT),
        }
    }

    /// Points every service at the same base URL, as a mock server does
    pub fn single_host(base_url: &str) -> Self {
        Self {
            user_base_url: base_url.to_string(),
            api_base_url: base_url.to_string(),
            leaderboard_base_url: base_url.to_string(),
            timeout: DEFAULT_REST_TIMEOUT,
        }
    }
}

/// `<config dir>/telematics-client/tokens`, relative to the working directory
/// when the platform has no configuration directory
pub fn default_token_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("tokens")
}

/// Joins a base URL and a path that starts with `/`
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
