//! Login state kept in an encrypted `token` cookie.

mod flash;
mod gate;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::{Duration, OffsetDateTime};

use crate::error::signed_out_redirect;
use crate::server::FolioState;
use crate::utils::jwt::decode_claims;

pub use flash::{FLASH_COOKIE, Flash, FlashKind};
pub use gate::{GateDecision, decide, is_exempt, session_gate};

pub const TOKEN_COOKIE: &str = "token";
pub const LOGIN_PATH: &str = "/auth";

const SESSION_DAYS: i64 = 7;

/// An authenticated request. Rejects with a redirect to the login page.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl Session {
    /// Reads a usable token from the jar. Tokens whose `exp` has passed are ignored.
    pub fn from_jar(jar: &PrivateCookieJar) -> Option<Self> {
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|c| c.value().trim().to_string())
            .filter(|t| !t.is_empty())?;

        let claims = decode_claims(&token).unwrap_or_default();
        if claims.is_expired_at(OffsetDateTime::now_utc().unix_timestamp()) {
            return None;
        }

        Some(Self {
            token,
            user_name: claims.name,
            user_email: claims.email,
        })
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    FolioState: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = FolioState::from_ref(state);
        let jar = PrivateCookieJar::from_headers(&parts.headers, Key::from_ref(&state));
        Session::from_jar(&jar).ok_or_else(signed_out_redirect)
    }
}

/// Stores the access token for seven days.
pub fn sign_in(jar: PrivateCookieJar, token: String, secure: bool) -> PrivateCookieJar {
    jar.add(
        Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(SESSION_DAYS))
            .build(),
    )
}

pub fn sign_out(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(TOKEN_COOKIE).path("/"))
}
