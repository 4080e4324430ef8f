use reqwest::StatusCode;
use telematics_client::error::AppError;

#[test]
fn test_app_error_display_auth() {
    let error = AppError::auth(StatusCode::BAD_REQUEST, "wrong password");
    assert_eq!(
        error.to_string(),
        "authentication failed with status 400 Bad Request: wrong password"
    );
}

#[test]
fn test_app_error_auth_truncates_long_body() {
    let body = "x".repeat(2_000);
    let error = AppError::auth(StatusCode::INTERNAL_SERVER_ERROR, &body);
    match error {
        AppError::Auth { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.starts_with(&"x".repeat(500)));
            assert!(body.ends_with("(truncated, 2000 total bytes)"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_app_error_auth_truncates_on_char_boundary() {
    // 'é' is two bytes, so byte 500 falls inside a character
    let body = format!("a{}", "é".repeat(400));
    let error = AppError::auth(StatusCode::UNAUTHORIZED, &body);
    assert!(error.to_string().contains("truncated"));
}

#[test]
fn test_app_error_display_invalid_input() {
    let error = AppError::InvalidInput("empty instance id".to_string());
    assert_eq!(error.to_string(), "invalid input: empty instance id");
}

#[test]
fn test_app_error_display_invalid_response() {
    let error = AppError::InvalidResponse("no token".to_string());
    assert_eq!(error.to_string(), "invalid response: no token");
}

#[test]
fn test_app_error_from_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: AppError = json_err.into();
    assert!(matches!(error, AppError::Json(_)));
    assert!(error.to_string().starts_with("json error:"));
}

#[test]
fn test_app_error_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: AppError = io_err.into();
    assert!(matches!(error, AppError::Io(_)));
    assert_eq!(error.to_string(), "io error: denied");
}
