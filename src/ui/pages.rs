use askama::Template;
use folio_schema::{BlogInput, ExperienceInput, Priority, ProjectInput};

use super::Shell;
use crate::forms::FormState;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub app_title: &'static str,
    pub email: String,
    pub email_error: String,
    pub password_error: String,
    pub form_error: String,
    pub flash_kind: String,
    pub flash_message: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone)]
pub struct DashboardCard {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub shell: Shell,
    pub cards: Vec<DashboardCard>,
}

/// A sortable column header.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub header: &'static str,
    pub sortable: bool,
    pub href: String,
    pub indicator: &'static str,
}

/// One rendered table cell.
#[derive(Debug, Clone, Default)]
pub struct CellView {
    pub text: String,
    pub strong: bool,
    pub badges: Vec<String>,
    /// `+N` when the list was cut short, else empty.
    pub more: String,
    /// CSS class of a single colored badge (priority), else empty.
    pub badge_class: String,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub cells: Vec<CellView>,
    pub edit_href: String,
    pub delete_href: String,
    pub live_href: String,
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListPage {
    pub shell: Shell,
    pub description: &'static str,
    pub new_href: String,
    pub new_label: String,
    pub base_href: &'static str,
    pub filter: String,
    pub filter_placeholder: &'static str,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub colspan: usize,
    pub empty_message: &'static str,
    pub total_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_href: String,
    pub next_href: String,
    pub page_label: String,
}

/// Heading, target and buttons shared by every entity form.
#[derive(Debug, Clone)]
pub struct FormChrome {
    pub heading: String,
    pub action: String,
    pub submit_label: &'static str,
    pub back_href: &'static str,
    pub form_error: String,
}

#[derive(Debug, Clone)]
pub struct PriorityOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn priority_options(current: Priority) -> Vec<PriorityOption> {
    Priority::ALL
        .iter()
        .map(|&p| PriorityOption {
            value: p.as_str(),
            label: p.label(),
            selected: p == current,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "project_form.html")]
pub struct ProjectFormPage {
    pub shell: Shell,
    pub chrome: FormChrome,
    pub state: FormState<ProjectInput>,
    pub priorities: Vec<PriorityOption>,
}

#[derive(Template)]
#[template(path = "blog_form.html")]
pub struct BlogFormPage {
    pub shell: Shell,
    pub chrome: FormChrome,
    pub state: FormState<BlogInput>,
}

#[derive(Template)]
#[template(path = "experience_form.html")]
pub struct ExperienceFormPage {
    pub shell: Shell,
    pub chrome: FormChrome,
    pub state: FormState<ExperienceInput>,
}

/// Error panel inside the layout, with a way back.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelPage {
    pub shell: Shell,
    pub heading: String,
    pub message: String,
    pub back_href: &'static str,
    pub back_label: String,
}

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmPage {
    pub shell: Shell,
    pub heading: String,
    pub message: String,
    pub action: String,
    pub cancel_href: String,
    /// Hidden `name=value` carried with the confirmation, if any.
    pub hidden_name: &'static str,
    pub hidden_value: String,
}

#[derive(Debug, Clone)]
pub struct SkillRow {
    pub name: String,
    pub editing: bool,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Template)]
#[template(path = "skills.html")]
pub struct SkillsPage {
    pub shell: Shell,
    pub skills: Vec<SkillRow>,
    pub new_skill: String,
    pub count_label: String,
}
