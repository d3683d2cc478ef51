use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::{Form, cookie::PrivateCookieJar};
use serde::Deserialize;
use tracing::{info, warn};
use url::form_urlencoded;

use super::{redirect_with, shell};
use crate::FolioError;
use crate::server::FolioState;
use crate::session::{Flash, Session};
use crate::skills::{DUPLICATE_SKILL, SkillEdit, SkillOutcome, SkillsManager};
use crate::ui::{ConfirmPage, PanelPage, SkillRow, SkillsPage, render};

const SKILLS_PATH: &str = "/skills";

pub fn router() -> Router<FolioState> {
    Router::new()
        .route(SKILLS_PATH, get(skills_page))
        .route("/skills/add", post(add_skill))
        .route("/skills/rename", post(rename_skill))
        .route("/skills/delete", get(confirm_delete).post(delete_skill))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkillsQuery {
    /// Skill currently shown in its inline edit form.
    pub edit: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkillForm {
    pub skill: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenameForm {
    pub original: String,
    pub updated: String,
}

fn skill_href(path: &str, key: &str, skill: &str) -> String {
    let qs = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, skill)
        .finish();
    format!("{path}?{qs}")
}

async fn load(state: &FolioState, session: &Session) -> Result<SkillsManager, crate::ApiError> {
    let skills = state.api.skills(&session.token).fetch().await?;
    Ok(SkillsManager::new(skills))
}

/// GET /skills
pub async fn skills_page(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Query(query): Query<SkillsQuery>,
) -> Result<Response, FolioError> {
    let manager = match load(&state, &session).await {
        Ok(manager) => manager,
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            warn!("[Skills] Fetch failed: {}", e);
            let (jar, shell) = shell(jar, "Skills", SKILLS_PATH, &session);
            let page = PanelPage {
                shell,
                heading: "Failed to fetch skills".to_string(),
                message: e.user_message(),
                back_href: "/",
                back_label: "Back to Dashboard".to_string(),
            };
            return Ok((StatusCode::BAD_GATEWAY, jar, render(&page)?).into_response());
        }
    };

    let skills = manager
        .skills()
        .iter()
        .map(|name| SkillRow {
            editing: *name == query.edit,
            edit_href: skill_href(SKILLS_PATH, "edit", name),
            delete_href: skill_href("/skills/delete", "skill", name),
            name: name.clone(),
        })
        .collect();

    let (jar, shell) = shell(jar, "Skills", SKILLS_PATH, &session);
    let page = SkillsPage {
        shell,
        skills,
        new_skill: String::new(),
        count_label: format!("{} skill(s) total", manager.skills().len()),
    };
    Ok((jar, render(&page)?).into_response())
}

async fn apply(
    state: &FolioState,
    session: &Session,
    jar: PrivateCookieJar,
    edit: SkillEdit,
) -> Result<Response, FolioError> {
    let mut manager = match load(state, session).await {
        Ok(manager) => manager,
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            warn!("[Skills] Fetch failed: {}", e);
            let flash = Flash::error(e.server_message().unwrap_or("Failed to fetch skills"));
            return Ok(redirect_with(state, jar, SKILLS_PATH, flash));
        }
    };

    let flash = match manager.apply(&edit, &state.api.skills(&session.token)).await {
        Ok(SkillOutcome::Saved(message)) => {
            info!("[Skills] {}", message);
            Some(Flash::success(message))
        }
        Ok(SkillOutcome::Duplicate) => Some(Flash::error(DUPLICATE_SKILL)),
        Ok(SkillOutcome::Unchanged) => None,
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            warn!("[Skills] Write failed: {}", e);
            Some(Flash::error(
                e.server_message().unwrap_or(edit.failure_message()),
            ))
        }
    };

    Ok(match flash {
        Some(flash) => redirect_with(state, jar, SKILLS_PATH, flash),
        None => (jar, axum::response::Redirect::to(SKILLS_PATH)).into_response(),
    })
}

/// POST /skills/add
pub async fn add_skill(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Form(form): Form<SkillForm>,
) -> Result<Response, FolioError> {
    apply(&state, &session, jar, SkillEdit::Add(form.skill)).await
}

/// POST /skills/rename
pub async fn rename_skill(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Form(form): Form<RenameForm>,
) -> Result<Response, FolioError> {
    let edit = SkillEdit::Rename {
        original: form.original,
        updated: form.updated,
    };
    apply(&state, &session, jar, edit).await
}

/// GET /skills/delete
pub async fn confirm_delete(
    session: Session,
    jar: PrivateCookieJar,
    Query(form): Query<SkillForm>,
) -> Result<Response, FolioError> {
    if form.skill.is_empty() {
        return Err(FolioError::BadRequest("Missing skill".to_string()));
    }
    let (jar, shell) = shell(jar, "Skills", SKILLS_PATH, &session);
    let page = ConfirmPage {
        shell,
        heading: "Are you sure?".to_string(),
        message: format!(
            "This will permanently delete the skill \"{}\" from your portfolio.",
            form.skill
        ),
        action: "/skills/delete".to_string(),
        cancel_href: SKILLS_PATH.to_string(),
        hidden_name: "skill",
        hidden_value: form.skill,
    };
    Ok((jar, render(&page)?).into_response())
}

/// POST /skills/delete
pub async fn delete_skill(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Form(form): Form<SkillForm>,
) -> Result<Response, FolioError> {
    apply(&state, &session, jar, SkillEdit::Remove(form.skill)).await
}
