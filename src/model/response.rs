/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::error::AppError;
use crate::model::http::HttpResponse;
use pretty_simple_display::DisplaySimple;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

/// Outcome of a resource call, derived from its HTTP status only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 2xx other than 204, the body carries the payload
    Ok,
    /// 204
    NoContent,
    /// 400
    BadRequest,
    /// 401, after the single retry
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 5xx
    ServerError,
    /// Anything else
    Unexpected(u16),
}

impl ResponseClass {
    /// True for [`ResponseClass::Ok`]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseClass::Ok)
    }

    /// Title used in the empty envelope built for this class
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            ResponseClass::Ok => "OK".to_string(),
            ResponseClass::NoContent => "No Content".to_string(),
            ResponseClass::BadRequest => "Bad Request".to_string(),
            ResponseClass::Unauthorized => "Unauthorized".to_string(),
            ResponseClass::Forbidden => "Forbidden".to_string(),
            ResponseClass::NotFound => "Not Found".to_string(),
            ResponseClass::ServerError => "Internal Server Error".to_string(),
            ResponseClass::Unexpected(status) => format!("Unexpected Status {status}"),
        }
    }

    /// Human readable hint for logs
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            ResponseClass::Ok => "request succeeded",
            ResponseClass::NoContent => "no content received from server, check your input",
            ResponseClass::BadRequest => "bad request, check your input parameters",
            ResponseClass::Unauthorized => "unauthorized, check your credentials",
            ResponseClass::Forbidden => "access forbidden, missing permissions",
            ResponseClass::NotFound => "resource not found, check your input parameters",
            ResponseClass::ServerError => "server error, try again later",
            ResponseClass::Unexpected(_) => "unexpected response from server",
        }
    }
}

/// Maps an HTTP status to its [`ResponseClass`]
#[must_use]
pub fn classify(status: StatusCode) -> ResponseClass {
    match status.as_u16() {
        204 => ResponseClass::NoContent,
        200..=299 => ResponseClass::Ok,
        400 => ResponseClass::BadRequest,
        401 => ResponseClass::Unauthorized,
        403 => ResponseClass::Forbidden,
        404 => ResponseClass::NotFound,
        500..=599 => ResponseClass::ServerError,
        other => ResponseClass::Unexpected(other),
    }
}

/// Envelope shared by every resource endpoint: `{Result, Status, Title, Errors}`
#[derive(Debug, Clone, Default, PartialEq, DisplaySimple, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponse {
    /// Endpoint specific payload
    #[serde(default)]
    pub result: Value,
    /// Vendor status, a number on success and `"Error"` on the envelopes built here
    #[serde(default)]
    pub status: Value,
    /// Short description
    #[serde(default)]
    pub title: Option<String>,
    /// Vendor error details
    #[serde(default)]
    pub errors: Value,
}

impl ApiResponse {
    /// Empty error envelope standing in for a failed call
    #[must_use]
    pub fn empty(class: ResponseClass) -> Self {
        Self {
            result: json!([]),
            status: json!("Error"),
            title: Some(class.title()),
            errors: json!([]),
        }
    }

    /// Converts a transport response into an envelope
    ///
    /// Successful responses are parsed; every other class becomes
    /// [`ApiResponse::empty`]. Only an unparsable success body is an error.
    pub fn from_http(response: &HttpResponse) -> Result<Self, AppError> {
        let class = classify(response.status);
        if !class.is_ok() {
            warn!("{} (status {})", class.hint(), response.status);
            return Ok(Self::empty(class));
        }

        if response.body.trim().is_empty() {
            return Ok(Self {
                status: json!(response.status.as_u16()),
                ..Self::default()
            });
        }

        match serde_json::from_str::<Value>(&response.body)? {
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Ok(Self {
                result: other,
                status: json!(response.status.as_u16()),
                ..Self::default()
            }),
        }
    }

    /// The `Result` payload
    #[must_use]
    pub fn result(&self) -> &Value {
        &self.result
    }

    /// The `Result` payload, unwrapping single element lists
    #[must_use]
    pub fn first_result(&self) -> &Value {
        match self.result.as_array() {
            Some(items) if items.len() == 1 => &items[0],
            _ => &self.result,
        }
    }

    /// True for envelopes flagged as errors
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.as_str() == Some("Error")
    }

    /// The `Title`
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The `Errors` list, empty when absent
    #[must_use]
    pub fn errors(&self) -> &[Value] {
        self.errors.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Result.Trips` of a trip list response
    #[must_use]
    pub fn trips(&self) -> &[Value] {
        self.result
            .get("Trips")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `Result.PagingInfo` of a trip list response
    #[must_use]
    pub fn paging_info(&self) -> Option<&Value> {
        self.result.get("PagingInfo")
    }

    /// `Result.PagingInfo.HasNextPage`, false when absent
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.paging_info()
            .and_then(|p| p.get("HasNextPage"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
