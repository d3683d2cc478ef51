use axum::extract::{FromRef, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use tracing::debug;

use super::{LOGIN_PATH, Session, TOKEN_COOKIE};
use crate::error::signed_out_redirect;
use crate::server::FolioState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    ToDashboard,
    ToLogin,
}

/// Paths served without looking at the session.
pub fn is_exempt(path: &str) -> bool {
    path == "/healthz" || path == "/favicon.ico" || path.starts_with("/static/")
}

/// Signed-in users skip the login page; everyone else is sent to it.
pub fn decide(path: &str, authenticated: bool) -> GateDecision {
    let on_login = path == LOGIN_PATH;
    match (on_login, authenticated) {
        (true, true) => GateDecision::ToDashboard,
        (false, false) => GateDecision::ToLogin,
        _ => GateDecision::Pass,
    }
}

pub async fn session_gate(State(state): State<FolioState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if is_exempt(&path) {
        return next.run(req).await;
    }

    let jar = PrivateCookieJar::from_headers(req.headers(), Key::from_ref(&state));
    let authenticated = Session::from_jar(&jar).is_some();

    match decide(&path, authenticated) {
        GateDecision::Pass => next.run(req).await,
        GateDecision::ToDashboard => Redirect::to("/").into_response(),
        GateDecision::ToLogin if jar.get(TOKEN_COOKIE).is_some() => {
            debug!(path = %path, "[Session] Stale token; signing out");
            signed_out_redirect()
        }
        GateDecision::ToLogin => Redirect::to(LOGIN_PATH).into_response(),
    }
}
