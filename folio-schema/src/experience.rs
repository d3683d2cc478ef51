use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Experience {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Description bullets, in display order.
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct ExperienceInput {
    #[validate(length(min = 2, message = "Title must be at least 2 characters."))]
    pub title: String,
    #[validate(length(min = 2, message = "Company must be at least 2 characters."))]
    pub company: String,
    #[validate(length(min = 2, message = "Location must be at least 2 characters."))]
    pub location: String,
    #[validate(length(min = 2, message = "Period must be at least 2 characters."))]
    pub period: String,
    #[validate(length(min = 1, message = "At least one technology is required."))]
    pub technologies: Vec<String>,
    #[validate(length(min = 1, message = "At least one description item is required."))]
    pub description: Vec<String>,
}

impl From<Experience> for ExperienceInput {
    fn from(e: Experience) -> Self {
        Self {
            title: e.title,
            company: e.company,
            location: e.location,
            period: e.period,
            technologies: e.technologies,
            description: e.description,
        }
    }
}
