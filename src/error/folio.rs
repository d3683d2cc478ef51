use askama::Template;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::Cookie;
use thiserror::Error as ThisError;
use tracing::{error, warn};

use super::ApiError;
use crate::session::{LOGIN_PATH, TOKEN_COOKIE};
use crate::ui::ErrorPage;

#[derive(Debug, ThisError)]
pub enum FolioError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FolioError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FolioError::Api(e) if e.is_unauthorized())
    }

    pub fn user_message(&self) -> String {
        match self {
            FolioError::Api(e) => e.user_message(),
            FolioError::BadRequest(msg) => msg.clone(),
            FolioError::NotFound => "The page you requested does not exist.".to_string(),
            _ => "An internal server error occurred.".to_string(),
        }
    }
}

impl IntoResponse for FolioError {
    fn into_response(self) -> Response {
        if self.is_unauthorized() {
            warn!("[Session] API rejected the token; signing out");
            return signed_out_redirect();
        }

        let (status, title) = match &self {
            FolioError::Api(e) if e.is_not_found() => (StatusCode::NOT_FOUND, "Not found"),
            FolioError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            FolioError::Api(_) => (StatusCode::BAD_GATEWAY, "API error"),
            FolioError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            FolioError::Template(_) | FolioError::Config(_) => {
                error!("[Folio] {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        let message = self.user_message();
        let page = ErrorPage {
            title,
            message: &message,
        };
        match page.render() {
            Ok(html) => (status, axum::response::Html(html)).into_response(),
            Err(e) => {
                error!("[Folio] Failed to render error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}

/// Redirect to the login page while expiring the token cookie.
pub(crate) fn signed_out_redirect() -> Response {
    let mut removal = Cookie::from(TOKEN_COOKIE);
    removal.set_path("/");
    removal.make_removal();

    let mut resp = Redirect::to(LOGIN_PATH).into_response();
    if let Ok(value) = HeaderValue::from_str(&removal.to_string()) {
        resp.headers_mut().append(header::SET_COOKIE, value);
    }
    resp
}
