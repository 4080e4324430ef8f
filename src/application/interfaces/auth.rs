use crate::error::AppError;
use async_trait::async_trait;

/// Source of bearer tokens for the retrying client
///
/// Implemented by [`crate::application::auth::AuthSession`]; tests substitute
/// their own implementations to observe the retry policy.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Current access token, acquiring one first if needed
    async fn access_token(&self) -> Result<String, AppError>;

    /// Called once after a resource request was answered with 401
    async fn handle_unauthorized(&self) -> Result<(), AppError>;
}
