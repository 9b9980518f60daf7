//! HTTP client for the portal gateway
//!
//! Thin JSON wrapper over the gateway's `/auth/*` routes. Responses are read
//! as text first so that status and parse failures carry the raw body.

use super::traits::{AuthApi, SignInTokens};
use super::ApiError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default gateway address
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Client for the gateway's auth endpoints
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080/api/v1`)
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    /// POST a JSON body and return the response text of a 2xx reply
    async fn post_json<B: Serialize + ?Sized>(&self, route: &str, body: &B) -> Result<String, ApiError> {
        let url = self.endpoint(route);
        debug!(%url, "POST");

        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.post_json("auth/forgot-password", &ForgotPasswordRequest { email })
            .await
            .map(|_| ())
    }

    async fn confirm_password_reset(&self, token: &str, password: &str) -> Result<(), ApiError> {
        self.post_json("auth/reset-password", &ResetPasswordRequest { token, password })
            .await
            .map(|_| ())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInTokens, ApiError> {
        let text = self
            .post_json("auth/login", &LoginRequest { email, password })
            .await?;
        parse_tokens(&text)
    }
}

// Wire types

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

fn parse_tokens(json: &str) -> Result<SignInTokens, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpAuthApi {
        HttpAuthApi::new(&format!("{}/api/v1", server.uri()), Duration::from_secs(5))
            .expect("client builds")
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpAuthApi::new("http://gateway:8080/api/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://gateway:8080/api/v1");
        assert_eq!(
            client.endpoint("auth/login"),
            "http://gateway:8080/api/v1/auth/login"
        );
    }

    #[test]
    fn test_parse_tokens_rejects_garbage() {
        let err = parse_tokens("not json").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_request_password_reset_posts_email() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/auth/forgot-password"))
            .and(body_json(json!({"email": "user@example.com"})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_ok!(client.request_password_reset("user@example.com").await);
    }

    #[tokio::test]
    async fn test_confirm_password_reset_posts_token_and_password() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/auth/reset-password"))
            .and(body_json(json!({"token": "tok-123", "password": "abcdefgh"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_ok!(client.confirm_password_reset("tok-123", "abcdefgh").await);
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/auth/reset-password"))
            .respond_with(ResponseTemplate::new(400).set_body_string("token expired"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .confirm_password_reset("stale", "abcdefgh")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                body: "token expired".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_parses_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .and(body_json(json!({"email": "user@example.com", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access",
                "refresh_token": "refresh",
                "expires_in": 900
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tokens = client.sign_in("user@example.com", "hunter22").await.unwrap();

        assert_eq!(
            tokens,
            SignInTokens {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                expires_in: 900,
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_with_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "x"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = assert_err!(client.sign_in("user@example.com", "pw").await);
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_request_error() {
        // Port 9 (discard) is not expected to be listening
        let client = HttpAuthApi::new("http://127.0.0.1:9/api/v1", Duration::from_secs(2)).unwrap();
        let err = client.request_password_reset("user@example.com").await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_) | ApiError::Timeout));
    }
}
