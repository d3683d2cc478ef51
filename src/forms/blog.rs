use std::collections::BTreeMap;

use folio_schema::BlogInput;
use serde::Deserialize;

use super::{FormModel, FormPost, ListField, pending_map};

impl FormModel for BlogInput {
    fn list_field(&mut self, name: &str) -> Option<ListField<'_>> {
        match name {
            "tags" => Some(ListField::unique(&mut self.tags)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlogFormData {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image: String,
    pub pending_tags: String,
    pub intent: String,
}

impl FormPost for BlogFormData {
    type Model = BlogInput;

    fn into_parts(self) -> (BlogInput, BTreeMap<String, String>, String) {
        let values = BlogInput {
            title: self.title.trim().to_string(),
            content: self.content,
            tags: self.tags,
            image: self.image.trim().to_string(),
        };
        (values, pending_map([("tags", self.pending_tags)]), self.intent)
    }
}
