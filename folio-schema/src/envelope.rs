use serde::{Deserialize, Serialize};

/// Response wrapper used by every portfolio API endpoint.
///
/// `success == false` is a failure even when the HTTP status is 2xx.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Non-empty server message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Minimal error payload shape returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorMessage {
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}
