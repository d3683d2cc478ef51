use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::PrivateCookieJar;

use super::shell;
use crate::FolioError;
use crate::server::FolioState;
use crate::session::Session;
use crate::ui::{DashboardCard, DashboardPage, render};

const CARDS: [DashboardCard; 4] = [
    DashboardCard {
        title: "Projects",
        description: "Manage your portfolio projects",
        href: "/projects",
    },
    DashboardCard {
        title: "Blogs",
        description: "Write and edit blog posts",
        href: "/blogs",
    },
    DashboardCard {
        title: "Skills",
        description: "Update your skill list",
        href: "/skills",
    },
    DashboardCard {
        title: "Experience",
        description: "Manage your work experience",
        href: "/experience",
    },
];

pub fn router() -> Router<FolioState> {
    Router::new().route("/", get(dashboard))
}

/// GET /
pub async fn dashboard(session: Session, jar: PrivateCookieJar) -> Result<Response, FolioError> {
    let (jar, shell) = shell(jar, "Dashboard", "/", &session);
    let page = DashboardPage {
        shell,
        cards: CARDS.to_vec(),
    };
    Ok((jar, render(&page)?).into_response())
}
