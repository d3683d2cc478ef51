use crate::config::{ApiConfig, ApiPaths};
use crate::error::{ApiError, GENERIC_API_MESSAGE, IsRetryable};

use backon::{ExponentialBuilder, Retryable};
use folio_schema::{AccessGrant, ApiEnvelope, ApiErrorMessage, Credentials};
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const FOLIO_USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

const BODY_PREVIEW_CHARS: usize = 300;

/// JSON client for the portfolio REST API.
///
/// Every call is `base_url + endpoint`. A bearer token is attached when the caller has one.
/// Non-2xx responses and envelopes with `success: false` become [`ApiError`]s.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    paths: Arc<ApiPaths>,
    retry_policy: ExponentialBuilder,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, ApiError> {
        let scheme = cfg.base_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ApiError::BaseUrl(cfg.base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(FOLIO_USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.timeout_secs));

        if let Some(proxy_url) = &cfg.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300))
            .with_max_times(cfg.retry_max_times)
            .with_jitter();

        Ok(Self {
            http: builder.build()?,
            base_url: Arc::from(cfg.base_url.as_str().trim_end_matches('/')),
            paths: Arc::new(cfg.paths.clone()),
            retry_policy,
        })
    }

    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    fn request(&self, method: Method, endpoint: &str, token: Option<&str>) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.url(endpoint))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        method: &Method,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let start = Instant::now();
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorMessage>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string());

            warn!(
                method = %method,
                endpoint,
                status = status.as_u16(),
                latency_ms,
                body = %format!("{:.len$}", String::from_utf8_lossy(&bytes), len = BODY_PREVIEW_CHARS),
                "[API] {} {} failed: {}",
                method,
                endpoint,
                message
            );
            return Err(ApiError::Status { status, message });
        }

        info!(
            method = %method,
            endpoint,
            status = status.as_u16(),
            latency_ms,
            "[API] {} {}",
            method,
            endpoint
        );

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiEnvelope {
                success: true,
                message: None,
                data: None,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes).inspect_err(|e| {
            debug!(
                endpoint,
                error = %e,
                body = %format!("{:.len$}", String::from_utf8_lossy(&bytes), len = BODY_PREVIEW_CHARS),
                "[API] Response did not match the expected shape"
            );
        })?;

        if !envelope.success {
            let message = envelope.message().unwrap_or(GENERIC_API_MESSAGE).to_string();
            warn!(method = %method, endpoint, "[API] Envelope reported failure: {}", message);
            return Err(ApiError::Rejected { message });
        }

        Ok(envelope)
    }

    /// GET with retries on transport errors, 429 and 5xx.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let this = self;
        (move || async move {
            this.execute(this.request(Method::GET, endpoint, token), &Method::GET, endpoint)
                .await
        })
        .retry(self.retry_policy)
        .when(|err: &ApiError| err.is_retryable())
        .notify(|err: &ApiError, dur: Duration| {
            warn!("[API] GET {} retrying after error {} in {:?}", endpoint, err, dur);
        })
        .await
    }

    /// Sends a single request with an optional JSON body. Never retried.
    pub async fn send<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<ApiEnvelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut req = self.request(method.clone(), endpoint, token);
        if let Some(body) = body {
            if tracing::enabled!(tracing::Level::DEBUG) {
                let pretty = serde_json::to_string_pretty(body)
                    .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
                debug!(method = %method, endpoint, body = %pretty, "[API] Request body");
            }
            req = req.json(body);
        }
        self.execute(req, &method, endpoint).await
    }

    /// `POST /auth` with the admin's credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessGrant, ApiError> {
        let endpoint = self.paths.auth.clone();
        let envelope: ApiEnvelope<AccessGrant> = self
            .send(Method::POST, &endpoint, None, Some(&LoginBody::from(credentials)))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }
}

/// Login body without the `Validate` baggage of [`Credentials`].
#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginBody<'a> {
    fn from(c: &'a Credentials) -> Self {
        Self {
            email: c.email.trim(),
            password: &c.password,
        }
    }
}
