//! Schema-validated forms shared by the project, blog and experience editors.
//!
//! A form post is decoded into the entity's values plus the text pending in each
//! list's "add" box and an [`Intent`]. List edits re-render the form; a save
//! validates and hands the values to a [`SubmitHandler`].

mod blog;
mod experience;
mod intent;
mod list_field;
mod project;
mod state;

use std::collections::BTreeMap;

use validator::Validate;

pub use blog::BlogFormData;
pub use experience::ExperienceFormData;
pub use intent::Intent;
pub use list_field::{ListField, ListPolicy};
pub use project::ProjectFormData;
pub use state::{FieldErrors, FormState, FormStep, SubmitHandler};

/// Values edited through a form.
pub trait FormModel: Validate + Clone + Send + Sync + 'static {
    /// The list-valued field called `name`, if there is one.
    fn list_field(&mut self, name: &str) -> Option<ListField<'_>>;
}

/// A decoded form post: `(values, pending list inputs, raw intent)`.
pub trait FormPost {
    type Model;

    fn into_parts(self) -> (Self::Model, BTreeMap<String, String>, String);
}

/// Collects the non-empty pending inputs keyed by list name.
fn pending_map<'a>(
    entries: impl IntoIterator<Item = (&'a str, String)>,
) -> BTreeMap<String, String> {
    entries
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
