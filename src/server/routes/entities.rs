//! List, add, edit and delete pages, shared by every form-backed entity.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::{Form, cookie::PrivateCookieJar};
use tracing::{info, warn};

use super::{redirect_with, shell};
use crate::FolioError;
use crate::editor::Editor;
use crate::entity::is_valid_id;
use crate::error::ApiError;
use crate::forms::{FormState, FormStep, Intent};
use crate::server::FolioState;
use crate::session::{Flash, Session};
use crate::table::{TableQuery, TableState};
use crate::ui::{ConfirmPage, EntityView, FormChrome, PanelPage, list_page, render};

pub fn router<E: EntityView>() -> Router<FolioState> {
    let base = E::KIND.href();
    Router::new()
        .route(base, get(list::<E>))
        .route(&format!("{base}/new"), get(new_form::<E>).post(create::<E>))
        .route(&format!("{base}/{{id}}"), get(edit_form::<E>).post(update::<E>))
        .route(
            &format!("{base}/{{id}}/delete"),
            get(confirm_delete::<E>).post(delete::<E>),
        )
}

fn checked_id(id: String) -> Result<String, FolioError> {
    if is_valid_id(&id) {
        Ok(id)
    } else {
        Err(FolioError::NotFound)
    }
}

/// Panel shown when a record or list cannot be loaded. Unauthorized errors still sign out.
fn fetch_failed<E: EntityView>(
    jar: PrivateCookieJar,
    session: &Session,
    path: &str,
    err: ApiError,
) -> Result<Response, FolioError> {
    if err.is_unauthorized() {
        return Err(err.into());
    }
    warn!("[{}] Fetch failed: {}", E::KIND.label(), err);

    let kind = E::KIND;
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_GATEWAY
    };
    let (jar, shell) = shell(jar, kind.plural(), path, session);
    let page = PanelPage {
        shell,
        heading: kind.fetch_failed_message(),
        message: err.user_message(),
        back_href: kind.href(),
        back_label: format!("Back to {}", kind.plural()),
    };
    Ok((status, jar, render(&page)?).into_response())
}

fn form_page<E: EntityView>(
    jar: PrivateCookieJar,
    session: &Session,
    editor: &Editor<'_, E>,
    state: FormState<E::Input>,
    status: StatusCode,
) -> Result<Response, FolioError> {
    let action = editor.action();
    let (jar, shell) = shell(jar, editor.heading(), &action, session);
    let chrome = FormChrome {
        heading: editor.heading(),
        form_error: state.form_error.clone().unwrap_or_default(),
        action,
        submit_label: editor.submit_label(),
        back_href: E::KIND.href(),
    };
    let html = E::render_form(shell, chrome, state)?;
    Ok((status, jar, axum::response::Html(html)).into_response())
}

/// GET /{entity}
pub async fn list<E: EntityView>(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Query(query): Query<TableQuery>,
) -> Result<Response, FolioError> {
    let kind = E::KIND;
    let records = match state.api.entity::<E>(&session.token).list().await {
        Ok(records) => records,
        Err(e) => return fetch_failed::<E>(jar, &session, kind.href(), e),
    };

    let table = TableState::from_query::<E>(&query);
    let (jar, shell) = shell(jar, kind.plural(), kind.href(), &session);
    let page = list_page(shell, &records, &table);
    Ok((jar, render(&page)?).into_response())
}

/// GET /{entity}/new
pub async fn new_form<E: EntityView>(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
) -> Result<Response, FolioError> {
    let editor = Editor::<E>::create(state.api.entity(&session.token));
    let values = editor.defaults().await?;
    form_page(jar, &session, &editor, FormState::new(values), StatusCode::OK)
}

/// GET /{entity}/{id}
pub async fn edit_form<E: EntityView>(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Path(id): Path<String>,
) -> Result<Response, FolioError> {
    let id = checked_id(id)?;
    let editor = Editor::<E>::edit(state.api.entity(&session.token), id);
    match editor.defaults().await {
        Ok(values) => form_page(jar, &session, &editor, FormState::new(values), StatusCode::OK),
        Err(e) => fetch_failed::<E>(jar, &session, &editor.action(), e),
    }
}

/// POST /{entity}/new
pub async fn create<E: EntityView>(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Form(data): Form<E::FormData>,
) -> Result<Response, FolioError> {
    let editor = Editor::<E>::create(state.api.entity(&session.token));
    submit(&state, jar, &session, &editor, data).await
}

/// POST /{entity}/{id}
pub async fn update<E: EntityView>(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Path(id): Path<String>,
    Form(data): Form<E::FormData>,
) -> Result<Response, FolioError> {
    let id = checked_id(id)?;
    let editor = Editor::<E>::edit(state.api.entity(&session.token), id);
    submit(&state, jar, &session, &editor, data).await
}

async fn submit<E: EntityView>(
    state: &FolioState,
    jar: PrivateCookieJar,
    session: &Session,
    editor: &Editor<'_, E>,
    data: E::FormData,
) -> Result<Response, FolioError> {
    let (mut form, raw_intent) = FormState::from_post(data);
    let intent = Intent::parse(&raw_intent)
        .ok_or_else(|| FolioError::BadRequest(format!("Unknown form intent: {raw_intent}")))?;

    match form.handle(intent, editor, &editor.failure_message()).await? {
        FormStep::Saved(message) => {
            let message = editor.success_message(message);
            info!("[{}] {}", E::KIND.label(), message);
            Ok(redirect_with(state, jar, E::KIND.href(), Flash::success(message)))
        }
        FormStep::Invalid => {
            form_page(jar, session, editor, form, StatusCode::UNPROCESSABLE_ENTITY)
        }
        FormStep::Edited | FormStep::Failed => {
            form_page(jar, session, editor, form, StatusCode::OK)
        }
    }
}

/// GET /{entity}/{id}/delete
pub async fn confirm_delete<E: EntityView>(
    session: Session,
    jar: PrivateCookieJar,
    Path(id): Path<String>,
) -> Result<Response, FolioError> {
    let id = checked_id(id)?;
    let kind = E::KIND;
    let action = format!("{}/{}/delete", kind.href(), id);
    let (jar, shell) = shell(jar, kind.plural(), &action, &session);
    let page = ConfirmPage {
        shell,
        heading: "Are you sure?".to_string(),
        message: format!(
            "This action cannot be undone. This will permanently delete the {} from your portfolio.",
            kind.noun()
        ),
        action,
        cancel_href: kind.href().to_string(),
        hidden_name: "",
        hidden_value: String::new(),
    };
    Ok((jar, render(&page)?).into_response())
}

/// POST /{entity}/{id}/delete
pub async fn delete<E: EntityView>(
    State(state): State<FolioState>,
    session: Session,
    jar: PrivateCookieJar,
    Path(id): Path<String>,
) -> Result<Response, FolioError> {
    let id = checked_id(id)?;
    let kind = E::KIND;
    match state.api.entity::<E>(&session.token).delete(&id).await {
        Ok(message) => {
            let message = message.unwrap_or_else(|| kind.deleted_message().to_string());
            info!(id = %id, "[{}] {}", kind.label(), message);
            Ok(redirect_with(&state, jar, kind.href(), Flash::success(message)))
        }
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            warn!(id = %id, "[{}] Delete failed: {}", kind.label(), e);
            let message = e
                .server_message()
                .map_or_else(|| kind.delete_failed_message(), str::to_string);
            Ok(redirect_with(&state, jar, kind.href(), Flash::error(message)))
        }
    }
}
