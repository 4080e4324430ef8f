/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};

/// Access and refresh token of one identity
///
/// Both fields are independently optional. An access token without a refresh
/// token is valid, the next refresh will simply log in again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token sent with resource requests
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token exchanged for a new pair at the refresh endpoint
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Creates a pair with both tokens present
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Access token, ignoring empty strings
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Refresh token, ignoring empty strings
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }

    /// True when there is no usable access token
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        self.access_token().is_none()
    }

    /// True when neither token is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token().is_none() && self.refresh_token().is_none()
    }
}

/// Body of `POST /Auth/Login`
///
/// The vendor expects `LoginFields` as a JSON document encoded in a string,
/// e.g. `{"LoginFields":"{\"email\":\"a@b.com\"}","Password":"secret"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    /// JSON encoded `{"email": ...}`
    pub login_fields: String,
    /// Account password
    pub password: String,
}

impl LoginRequest {
    /// Builds the login body for an email/password pair
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            login_fields: serde_json::json!({ "email": email }).to_string(),
            password: password.to_string(),
        }
    }
}

/// Body of `POST /Auth/RefreshToken`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshRequest {
    /// Current, possibly expired, access token
    pub access_token: Option<String>,
    /// Refresh token issued with it
    pub refresh_token: String,
}

/// Response of both login and refresh endpoints
///
/// `{"Result": {"AccessToken": {"Token": "..."}, "RefreshToken": "..."}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenResponse {
    /// Token payload
    #[serde(default)]
    pub result: Option<TokenResult>,
}

/// `Result` object of a [`TokenResponse`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenResult {
    /// Access token wrapper
    #[serde(default)]
    pub access_token: Option<AccessTokenField>,
    /// Refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// `AccessToken` object of a [`TokenResult`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessTokenField {
    /// The bearer token itself
    #[serde(default)]
    pub token: Option<String>,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        let result = response.result.unwrap_or_default();
        TokenPair {
            access_token: result.access_token.and_then(|a| a.token),
            refresh_token: result.refresh_token,
        }
    }
}
