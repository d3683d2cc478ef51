use crate::api::ApiClient;
use crate::config::Config;
use crate::error::FolioError;
use crate::server::routes::{auth, dashboard, entities, skills};
use crate::session::session_gate;

use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use base64::Engine as _;
use folio_schema::{Blog, Experience, Project};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use rand::RngCore;
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct FolioState {
    pub api: ApiClient,
    pub cookie_key: Key,
    pub insecure_cookie: bool,
    /// Login attempts per peer address.
    pub login_limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl FolioState {
    pub fn new(cfg: &Config) -> Result<Self, FolioError> {
        let api = ApiClient::new(&cfg.api)?;
        let cookie_key = cookie_key(&cfg.basic.cookie_secret)?;
        let per_minute = NonZeroU32::new(cfg.basic.login_per_minute).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            api,
            cookie_key,
            insecure_cookie: cfg.basic.insecure_cookie,
            login_limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
        })
    }

    /// Whether cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        !self.insecure_cookie
    }
}

fn cookie_key(secret: &str) -> Result<Key, FolioError> {
    if secret.is_empty() {
        warn!("basic.cookie_secret is empty; sessions will not survive a restart");
        return Ok(Key::generate());
    }
    Key::try_from(secret.as_bytes()).map_err(|_| {
        FolioError::Config("basic.cookie_secret must be at least 64 bytes".to_string())
    })
}

impl FromRef<FolioState> for Key {
    fn from_ref(state: &FolioState) -> Self {
        state.cookie_key.clone()
    }
}

async fn not_found_handler() -> FolioError {
    FolioError::NotFound
}

async fn healthz() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

fn security_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

pub fn folio_router(state: FolioState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(entities::router::<Project>())
        .merge(entities::router::<Blog>())
        .merge(entities::router::<Experience>())
        .merge(skills::router())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .with_state(state)
        .layer(security_header("x-frame-options", "DENY"))
        .layer(security_header("x-content-type-options", "nosniff"))
        .layer(security_header("referrer-policy", "same-origin"))
        .layer(security_header("cache-control", "no-store"))
        .layer(middleware::from_fn(access_log))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cookie_secret_is_a_config_error() {
        assert!(matches!(cookie_key("short"), Err(FolioError::Config(_))));
        assert!(cookie_key(&"k".repeat(64)).is_ok());
        assert!(cookie_key("").is_ok());
    }
}
