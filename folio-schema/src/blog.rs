use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Featured image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct BlogInput {
    #[validate(length(min = 2, message = "Title must be at least 2 characters."))]
    pub title: String,
    #[validate(length(min = 10, message = "Content must be at least 10 characters."))]
    pub content: String,
    #[validate(length(min = 1, message = "At least one tag is required."))]
    pub tags: Vec<String>,
    #[validate(length(min = 1, message = "Featured image is required."))]
    pub image: String,
}

impl From<Blog> for BlogInput {
    fn from(b: Blog) -> Self {
        Self {
            title: b.title,
            content: b.content,
            tags: b.tags,
            image: b.image.unwrap_or_default(),
        }
    }
}
