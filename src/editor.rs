//! Add and edit wrappers around the form base.

use async_trait::async_trait;

use crate::api::EntityApi;
use crate::entity::Entity;
use crate::error::{ApiError, FolioError};
use crate::forms::SubmitHandler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

/// Binds a form to either `POST` (create) or the entity's update verb (edit).
pub struct Editor<'a, E> {
    api: EntityApi<'a, E>,
    mode: EditorMode,
}

impl<'a, E: Entity> Editor<'a, E> {
    pub fn create(api: EntityApi<'a, E>) -> Self {
        Self {
            api,
            mode: EditorMode::Create,
        }
    }

    pub fn edit(api: EntityApi<'a, E>, id: impl Into<String>) -> Self {
        Self {
            api,
            mode: EditorMode::Edit(id.into()),
        }
    }

    /// Starting values: empty for a new record, the stored record otherwise.
    pub async fn defaults(&self) -> Result<E::Input, ApiError> {
        match &self.mode {
            EditorMode::Create => Ok(E::Input::default()),
            EditorMode::Edit(id) => Ok(self.api.get(id).await?.into()),
        }
    }

    pub fn heading(&self) -> String {
        match self.mode {
            EditorMode::Create => format!("Add {}", E::KIND.label()),
            EditorMode::Edit(_) => format!("Edit {}", E::KIND.label()),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => E::KIND.create_label(),
            EditorMode::Edit(_) => E::KIND.update_label(),
        }
    }

    /// Where the form posts back to.
    pub fn action(&self) -> String {
        match &self.mode {
            EditorMode::Create => format!("{}/new", E::KIND.href()),
            EditorMode::Edit(id) => format!("{}/{}", E::KIND.href(), id),
        }
    }

    pub fn failure_message(&self) -> String {
        match self.mode {
            EditorMode::Create => E::KIND.create_failed_message(),
            EditorMode::Edit(_) => E::KIND.update_failed_message(),
        }
    }

    /// Toast after a successful save; the server's wording wins.
    pub fn success_message(&self, server: Option<String>) -> String {
        server.unwrap_or_else(|| match self.mode {
            EditorMode::Create => E::KIND.created_message().to_string(),
            EditorMode::Edit(_) => E::KIND.updated_message().to_string(),
        })
    }
}

#[async_trait]
impl<E: Entity> SubmitHandler<E::Input> for Editor<'_, E> {
    async fn submit(&self, values: E::Input) -> Result<Option<String>, FolioError> {
        let message = match &self.mode {
            EditorMode::Create => self.api.create(&values).await?,
            EditorMode::Edit(id) => self.api.update(id, &values).await?,
        };
        Ok(message)
    }
}
