use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;

/// Fallback when a failed response carries no usable `message`.
pub const GENERIC_API_MESSAGE: &str = "Something went wrong";

/// Errors raised by the portfolio API client.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Non-2xx status; `message` comes from the JSON body or the generic fallback.
    #[error("API responded {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// 2xx response whose envelope reported `success: false`.
    #[error("API rejected the request: {message}")]
    Rejected { message: String },

    /// 2xx envelope without the expected `data` member.
    #[error("API response is missing data")]
    MissingData,

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API base url: {0}")]
    BaseUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Reqwest(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The message the API itself sent back, if it answered at all.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => {
                Some(message.as_str()).filter(|m| *m != GENERIC_API_MESSAGE)
            }
            _ => None,
        }
    }

    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => message.clone(),
            ApiError::Reqwest(e) if e.is_timeout() => "The API did not respond in time".to_string(),
            ApiError::Reqwest(_) => "Could not reach the API".to_string(),
            _ => GENERIC_API_MESSAGE.to_string(),
        }
    }
}

impl IsRetryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            ApiError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}
