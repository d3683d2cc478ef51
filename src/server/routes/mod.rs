pub mod auth;
pub mod dashboard;
pub mod entities;
pub mod skills;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::server::FolioState;
use crate::session::{Flash, Session};
use crate::ui::Shell;

/// Layout for `path`, consuming any pending toast.
pub(crate) fn shell(
    jar: PrivateCookieJar,
    title: impl Into<String>,
    path: &str,
    session: &Session,
) -> (PrivateCookieJar, Shell) {
    let (jar, flash) = Flash::take(jar);
    (jar, Shell::new(title, path, session).with_flash(flash))
}

/// Redirects to `to` with a toast for the next page.
pub(crate) fn redirect_with(
    state: &FolioState,
    jar: PrivateCookieJar,
    to: &str,
    flash: Flash,
) -> Response {
    let jar = flash.set(jar, state.secure_cookies());
    (jar, Redirect::to(to)).into_response()
}
