//! Flat skills list. Every change sends the whole list back to the API.

use reqwest::Method;

use crate::api::SkillStore;
use crate::error::ApiError;

pub const DUPLICATE_SKILL: &str = "This skill already exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEdit {
    Add(String),
    Rename { original: String, updated: String },
    Remove(String),
}

impl SkillEdit {
    /// Verb the API expects for this kind of change.
    pub fn method(&self) -> Method {
        match self {
            SkillEdit::Add(_) => Method::PATCH,
            SkillEdit::Rename { .. } => Method::PUT,
            SkillEdit::Remove(_) => Method::DELETE,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            SkillEdit::Add(_) => "Skill added successfully",
            SkillEdit::Rename { .. } => "Skill updated successfully",
            SkillEdit::Remove(_) => "Skill deleted successfully",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            SkillEdit::Add(_) => "Failed to add skill",
            SkillEdit::Rename { .. } => "Failed to update skill",
            SkillEdit::Remove(_) => "Failed to delete skill",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillOutcome {
    /// Nothing to send: blank input, a rename to the same value or of a skill
    /// that is no longer listed.
    Unchanged,
    Duplicate,
    Saved(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillsManager {
    skills: Vec<String>,
}

impl SkillsManager {
    pub fn new(skills: Vec<String>) -> Self {
        Self { skills }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// The list after `edit`, or the outcome that stops it from being sent.
    pub fn plan(&self, edit: &SkillEdit) -> Result<Vec<String>, SkillOutcome> {
        match edit {
            SkillEdit::Add(raw) => {
                let skill = raw.trim();
                if skill.is_empty() {
                    return Err(SkillOutcome::Unchanged);
                }
                if self.contains(skill) {
                    return Err(SkillOutcome::Duplicate);
                }
                let mut next = self.skills.clone();
                next.push(skill.to_string());
                Ok(next)
            }
            SkillEdit::Rename { original, updated } => {
                let updated = updated.trim();
                if updated.is_empty() || updated == original || !self.contains(original) {
                    return Err(SkillOutcome::Unchanged);
                }
                if self.contains(updated) {
                    return Err(SkillOutcome::Duplicate);
                }
                Ok(self
                    .skills
                    .iter()
                    .map(|s| if s == original { updated.to_string() } else { s.clone() })
                    .collect())
            }
            SkillEdit::Remove(skill) => {
                if !self.contains(skill) {
                    return Err(SkillOutcome::Unchanged);
                }
                Ok(self.skills.iter().filter(|s| *s != skill).cloned().collect())
            }
        }
    }

    /// Persists `edit`; the local list only changes once the store accepts it.
    pub async fn apply<S>(&mut self, edit: &SkillEdit, store: &S) -> Result<SkillOutcome, ApiError>
    where
        S: SkillStore + ?Sized,
    {
        let next = match self.plan(edit) {
            Ok(next) => next,
            Err(outcome) => return Ok(outcome),
        };
        if let Some(message) = store.replace(edit.method(), &next).await? {
            tracing::debug!(%message, "skills saved");
        }
        self.skills = next;
        Ok(SkillOutcome::Saved(edit.success_message().to_string()))
    }
}
