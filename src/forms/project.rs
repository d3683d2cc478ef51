use std::collections::BTreeMap;

use folio_schema::{Priority, ProjectInput};
use serde::Deserialize;

use super::{FormModel, FormPost, ListField, pending_map};

impl FormModel for ProjectInput {
    fn list_field(&mut self, name: &str) -> Option<ListField<'_>> {
        match name {
            "images" => Some(ListField::sequence(&mut self.images)),
            "technologies" => Some(ListField::unique(&mut self.technologies)),
            _ => None,
        }
    }
}

/// Urlencoded body of the project form. List items repeat their key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectFormData {
    pub title: String,
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub frontend: String,
    pub server: String,
    pub description: String,
    pub live: String,
    pub deadline: String,
    pub priority: Priority,
    pub pending_images: String,
    pub pending_technologies: String,
    pub intent: String,
}

impl FormPost for ProjectFormData {
    type Model = ProjectInput;

    fn into_parts(self) -> (ProjectInput, BTreeMap<String, String>, String) {
        let values = ProjectInput {
            title: self.title.trim().to_string(),
            images: self.images,
            technologies: self.technologies,
            frontend: self.frontend.trim().to_string(),
            server: self.server.trim().to_string(),
            description: self.description,
            live: self.live.trim().to_string(),
            deadline: self.deadline.trim().to_string(),
            priority: self.priority,
        };
        let pending = pending_map([
            ("images", self.pending_images),
            ("technologies", self.pending_technologies),
        ]);
        (values, pending, self.intent)
    }
}
