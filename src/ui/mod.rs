//! Server-rendered pages. Templates live under `templates/` and escape every value.

mod nav;
mod pages;
mod views;

use askama::Template;
use axum::response::Html;

use crate::error::FolioError;

pub use nav::{APP_TITLE, NAV_ITEMS, NavLink, Shell, nav_links};
pub use pages::{
    BlogFormPage, CellView, ConfirmPage, DashboardCard, DashboardPage, ErrorPage,
    ExperienceFormPage, FormChrome, HeaderView, ListPage, LoginPage, PanelPage, PriorityOption,
    ProjectFormPage, RowView, SkillRow, SkillsPage, priority_options,
};
pub use views::{EntityView, list_page};

pub fn render<T: Template>(page: &T) -> Result<Html<String>, FolioError> {
    Ok(Html(page.render()?))
}
