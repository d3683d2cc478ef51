use std::collections::BTreeMap;

use folio_schema::ExperienceInput;
use serde::Deserialize;

use super::{FormModel, FormPost, ListField, pending_map};

impl FormModel for ExperienceInput {
    fn list_field(&mut self, name: &str) -> Option<ListField<'_>> {
        match name {
            "technologies" => Some(ListField::unique(&mut self.technologies)),
            "description" => Some(ListField::sequence(&mut self.description)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceFormData {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub technologies: Vec<String>,
    pub description: Vec<String>,
    pub pending_technologies: String,
    pub pending_description: String,
    pub intent: String,
}

impl FormPost for ExperienceFormData {
    type Model = ExperienceInput;

    fn into_parts(self) -> (ExperienceInput, BTreeMap<String, String>, String) {
        let values = ExperienceInput {
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            period: self.period.trim().to_string(),
            technologies: self.technologies,
            description: self.description,
        };
        let pending = pending_map([
            ("technologies", self.pending_technologies),
            ("description", self.pending_description),
        ]);
        (values, pending, self.intent)
    }
}
