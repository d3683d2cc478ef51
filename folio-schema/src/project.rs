use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Project record as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub frontend: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Editable project values, validated before they are sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 2, message = "Title must be at least 2 characters."))]
    pub title: String,
    #[validate(length(min = 1, message = "At least one image is required."))]
    pub images: Vec<String>,
    #[validate(length(min = 1, message = "At least one technology is required."))]
    pub technologies: Vec<String>,
    pub frontend: String,
    pub server: String,
    pub description: String,
    #[validate(custom(function = "optional_url"))]
    pub live: String,
    pub deadline: String,
    pub priority: Priority,
}

impl From<Project> for ProjectInput {
    fn from(p: Project) -> Self {
        Self {
            title: p.title,
            images: p.images,
            technologies: p.technologies,
            frontend: p.frontend.unwrap_or_default(),
            server: p.server.unwrap_or_default(),
            description: p.description.unwrap_or_default(),
            live: p.live.unwrap_or_default(),
            deadline: p.deadline.unwrap_or_default(),
            priority: p.priority,
        }
    }
}

fn optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        return Ok(());
    }
    let mut err = ValidationError::new("url");
    err.message = Some("Please enter a valid URL.".into());
    Err(err)
}
