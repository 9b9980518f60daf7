//! Trait abstraction for the gateway's auth endpoints to enable mocking in tests

use super::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Tokens returned by a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// External submission actions used by the auth pages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Ask the gateway to email a password reset link
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Set a new password using the token from a reset link
    async fn confirm_password_reset(&self, token: &str, password: &str) -> Result<(), ApiError>;

    /// Exchange credentials for a token pair
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInTokens, ApiError>;
}
