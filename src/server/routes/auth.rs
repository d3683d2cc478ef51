use axum::{
    Router,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::{Form, cookie::PrivateCookieJar};
use folio_schema::Credentials;
use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{info, warn};
use validator::Validate;

use super::redirect_with;
use crate::FolioError;
use crate::forms::FieldErrors;
use crate::server::FolioState;
use crate::session::{Flash, LOGIN_PATH, sign_in, sign_out};
use crate::ui::{APP_TITLE, LoginPage, render};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const TOO_MANY_ATTEMPTS: &str = "Too many login attempts. Please try again in a minute.";
/// Limiter entries kept before idle peers are dropped.
const LIMITER_KEYS: usize = 1024;

pub fn router() -> Router<FolioState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Address of the connecting peer. Requests served without connect info
/// share the unspecified address.
pub struct PeerIp(pub IpAddr);

impl<S> FromRequestParts<S> for PeerIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |ConnectInfo(addr)| addr.ip());
        Ok(Self(ip))
    }
}

fn login_view(email: &str) -> LoginPage {
    LoginPage {
        app_title: APP_TITLE,
        email: email.to_string(),
        email_error: String::new(),
        password_error: String::new(),
        form_error: String::new(),
        flash_kind: String::new(),
        flash_message: String::new(),
    }
}

/// GET /auth
pub async fn login_page(jar: PrivateCookieJar) -> Result<Response, FolioError> {
    let (jar, flash) = Flash::take(jar);
    let mut page = login_view("");
    if let Some(flash) = flash {
        page.flash_kind = flash.kind.as_str().to_string();
        page.flash_message = flash.message;
    }
    Ok((jar, render(&page)?).into_response())
}

/// POST /auth
///
/// Validates the credentials, exchanges them for an access token and stores it.
pub async fn login(
    State(state): State<FolioState>,
    PeerIp(peer): PeerIp,
    jar: PrivateCookieJar,
    Form(credentials): Form<Credentials>,
) -> Result<Response, FolioError> {
    let mut page = login_view(credentials.email.trim());

    if state.login_limiter.len() > LIMITER_KEYS {
        state.login_limiter.retain_recent();
    }
    if state.login_limiter.check_key(&peer).is_err() {
        warn!("[Auth] Login throttled for {}", peer);
        page.form_error = TOO_MANY_ATTEMPTS.to_string();
        return Ok((StatusCode::TOO_MANY_REQUESTS, render(&page)?).into_response());
    }

    if let Err(errors) = credentials.validate() {
        let errors = FieldErrors::from_validation(&errors);
        page.email_error = errors.get("email").to_string();
        page.password_error = errors.get("password").to_string();
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
    }

    match state.api.login(&credentials).await {
        Ok(grant) => {
            info!("[Auth] Signed in");
            let jar = sign_in(jar, grant.access_token, state.secure_cookies());
            Ok(redirect_with(
                &state,
                jar,
                "/",
                Flash::success("Logged in successfully"),
            ))
        }
        Err(e) => {
            warn!("[Auth] Login failed: {}", e);
            let status = match e.status() {
                Some(status) if status.is_client_error() => {
                    page.form_error = INVALID_CREDENTIALS.to_string();
                    StatusCode::UNAUTHORIZED
                }
                _ => {
                    page.form_error = e.user_message();
                    StatusCode::BAD_GATEWAY
                }
            };
            Ok((status, render(&page)?).into_response())
        }
    }
}

/// POST /logout
pub async fn logout(State(state): State<FolioState>, jar: PrivateCookieJar) -> Response {
    let jar = sign_out(jar);
    redirect_with(
        &state,
        jar,
        LOGIN_PATH,
        Flash::success("Logged out successfully"),
    )
}
