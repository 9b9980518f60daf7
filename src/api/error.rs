//! Gateway client errors

/// Failure of a call against the portal gateway
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("gateway responded with status {status}")]
    Status { status: u16, body: String },

    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether the gateway answered at all (as opposed to a transport failure)
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err.to_string())
        }
    }
}
