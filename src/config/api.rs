use serde::{Deserialize, Serialize};
use url::Url;

/// Portfolio REST API configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    /// TOML: `api.base_url`. Default: `http://localhost:5000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Optional upstream HTTP proxy for the reqwest client.
    /// TOML: `api.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Whole-request timeout in seconds.
    /// TOML: `api.timeout_secs`. Default: `30`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    /// TOML: `api.connect_timeout_secs`. Default: `10`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Retries for idempotent reads (transport errors and 5xx). Writes are never retried.
    /// TOML: `api.retry_max_times`. Default: `2`.
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,

    /// Resource paths relative to `base_url`.
    #[serde(default)]
    pub paths: ApiPaths,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            retry_max_times: default_retry_max_times(),
            paths: ApiPaths::default(),
        }
    }
}

/// Endpoint paths of each resource. Defaults match the portfolio backend, including its
/// `experiance` spelling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiPaths {
    pub projects: String,
    pub blogs: String,
    pub experience: String,
    pub skills: String,
    pub auth: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            projects: "/project".to_string(),
            blogs: "/blog".to_string(),
            experience: "/experiance".to_string(),
            skills: "/skills".to_string(),
            auth: "/auth".to_string(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:5000/api").expect("default base url is valid")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_retry_max_times() -> usize {
    2
}
