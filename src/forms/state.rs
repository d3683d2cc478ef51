use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::{debug, warn};
use validator::ValidationErrors;

use super::{FormModel, FormPost, Intent};
use crate::error::FolioError;

/// Persists validated form values.
///
/// Returns the server's confirmation message, if it sent one.
#[async_trait]
pub trait SubmitHandler<V>: Send + Sync {
    async fn submit(&self, values: V) -> Result<Option<String>, FolioError>;
}

/// First validation message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                map.insert(field.to_string(), message);
            }
        }
        Self(map)
    }

    /// Message for `field`, or an empty string.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Outcome of one form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStep {
    /// A list was edited; re-render without saving.
    Edited,
    /// Validation failed; re-render with field errors.
    Invalid,
    /// The handler accepted the values.
    Saved(Option<String>),
    /// The handler failed; re-render with `form_error`.
    Failed,
}

/// Values being edited plus everything needed to re-render the form.
#[derive(Debug, Clone)]
pub struct FormState<V> {
    pub values: V,
    /// Text typed into each list's "add" input but not yet added.
    pub pending: BTreeMap<String, String>,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
}

impl<V: FormModel> FormState<V> {
    pub fn new(values: V) -> Self {
        Self {
            values,
            pending: BTreeMap::new(),
            errors: FieldErrors::default(),
            form_error: None,
        }
    }

    /// Rebuilds the state from a post; also returns the raw intent.
    pub fn from_post<P: FormPost<Model = V>>(post: P) -> (Self, String) {
        let (values, pending, intent) = post.into_parts();
        let state = Self {
            pending,
            ..Self::new(values)
        };
        (state, intent)
    }

    pub fn pending(&self, field: &str) -> &str {
        self.pending.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn validate(&mut self) -> bool {
        match self.values.validate() {
            Ok(()) => {
                self.errors = FieldErrors::default();
                true
            }
            Err(errors) => {
                self.errors = FieldErrors::from_validation(&errors);
                false
            }
        }
    }

    /// Runs `intent` against the values.
    ///
    /// List edits never reach `handler`. An unauthorized submit propagates so the
    /// caller signs out; any other submit failure stays on the form.
    pub async fn handle<H>(
        &mut self,
        intent: Intent,
        handler: &H,
        failure_message: &str,
    ) -> Result<FormStep, FolioError>
    where
        H: SubmitHandler<V> + ?Sized,
    {
        match intent {
            Intent::Add(field) => {
                let raw = self.pending(&field).to_string();
                let mut list = self
                    .values
                    .list_field(&field)
                    .ok_or_else(|| FolioError::BadRequest(format!("Unknown list field: {field}")))?;
                if list.add(&raw) {
                    self.pending.remove(&field);
                }
                Ok(FormStep::Edited)
            }
            Intent::Remove(field, index) => {
                let mut list = self
                    .values
                    .list_field(&field)
                    .ok_or_else(|| FolioError::BadRequest(format!("Unknown list field: {field}")))?;
                list.remove(index);
                Ok(FormStep::Edited)
            }
            Intent::Save => {
                if !self.validate() {
                    debug!(errors = self.errors.len(), "[Form] Validation failed");
                    return Ok(FormStep::Invalid);
                }
                match handler.submit(self.values.clone()).await {
                    Ok(message) => Ok(FormStep::Saved(message)),
                    Err(e) if e.is_unauthorized() => Err(e),
                    Err(e) => {
                        warn!("[Form] Submit failed: {}", e);
                        let message = match &e {
                            FolioError::Api(api) => api.server_message(),
                            _ => None,
                        };
                        self.form_error =
                            Some(message.unwrap_or(failure_message).to_string());
                        Ok(FormStep::Failed)
                    }
                }
            }
        }
    }
}
