/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::constants::MAX_ERROR_BODY_LENGTH;
use reqwest::StatusCode;
use thiserror::Error;

/// Main error type of the library
///
/// HTTP error statuses returned by resource endpoints are not errors: they are
/// classified into an [`crate::model::response::ApiResponse`]. Only failures of
/// the identity provider, the network or local I/O end up here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Login or refresh rejected by the identity provider
    #[error("authentication failed with status {status}: {body}")]
    Auth {
        /// HTTP status returned by the identity provider
        status: StatusCode,
        /// Response body, truncated
        body: String,
    },

    /// Connection, timeout or protocol failure of the transport
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON encoding or decoding failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied arguments the API cannot accept
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Successful response that does not carry what it should
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AppError {
    /// Builds an [`AppError::Auth`] keeping at most `MAX_ERROR_BODY_LENGTH` bytes of the body
    pub fn auth(status: StatusCode, body: &str) -> Self {
        AppError::Auth {
            status,
            body: truncate_body(body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}
