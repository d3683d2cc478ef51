//! The three form-backed portfolio resources and what differs between them.

use folio_schema::{Blog, BlogInput, Experience, ExperienceInput, Project, ProjectInput};
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::ApiPaths;
use crate::forms::{BlogFormData, ExperienceFormData, FormModel, FormPost, ProjectFormData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Blog,
    Experience,
}

impl EntityKind {
    /// Lower-case noun used in messages ("project", "blog post", "experience").
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Blog => "blog post",
            EntityKind::Experience => "experience",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Blog => "Blog Post",
            EntityKind::Experience => "Experience",
        }
    }

    /// Page title of the list view; matches the navigation entry.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Project => "Projects",
            EntityKind::Blog => "Blogs",
            EntityKind::Experience => "Experience",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            EntityKind::Project => "/projects",
            EntityKind::Blog => "/blogs",
            EntityKind::Experience => "/experience",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EntityKind::Project => "Manage your portfolio projects",
            EntityKind::Blog => "Manage your blog posts",
            EntityKind::Experience => "Manage your work experience",
        }
    }

    pub fn api_path(self, paths: &ApiPaths) -> &str {
        match self {
            EntityKind::Project => &paths.projects,
            EntityKind::Blog => &paths.blogs,
            EntityKind::Experience => &paths.experience,
        }
    }

    /// Projects are replaced with PUT; blogs and experience are patched.
    pub fn update_method(self) -> Method {
        match self {
            EntityKind::Project => Method::PUT,
            EntityKind::Blog | EntityKind::Experience => Method::PATCH,
        }
    }

    pub fn create_label(self) -> &'static str {
        match self {
            EntityKind::Project => "Create Project",
            EntityKind::Blog => "Publish Post",
            EntityKind::Experience => "Add Experience",
        }
    }

    pub fn update_label(self) -> &'static str {
        match self {
            EntityKind::Project => "Update Project",
            EntityKind::Blog => "Update Post",
            EntityKind::Experience => "Update Experience",
        }
    }

    pub fn created_message(self) -> &'static str {
        match self {
            EntityKind::Project => "Project created successfully",
            EntityKind::Blog => "Blog post created successfully",
            EntityKind::Experience => "Experience added successfully",
        }
    }

    pub fn updated_message(self) -> &'static str {
        match self {
            EntityKind::Project => "Project updated successfully",
            EntityKind::Blog => "Blog post updated successfully",
            EntityKind::Experience => "Experience updated successfully",
        }
    }

    pub fn deleted_message(self) -> &'static str {
        match self {
            EntityKind::Project => "Project deleted successfully",
            EntityKind::Blog => "Blog post deleted successfully",
            EntityKind::Experience => "Experience deleted successfully",
        }
    }

    pub fn create_failed_message(self) -> String {
        match self {
            EntityKind::Experience => "Failed to add experience".to_string(),
            _ => format!("Failed to create {}", self.noun()),
        }
    }

    pub fn update_failed_message(self) -> String {
        format!("Failed to update {}", self.noun())
    }

    pub fn fetch_failed_message(self) -> String {
        format!("Failed to fetch {}", self.noun())
    }

    pub fn delete_failed_message(self) -> String {
        format!("Failed to delete {}", self.noun())
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            EntityKind::Project => "No projects found.",
            EntityKind::Blog => "No blog posts found.",
            EntityKind::Experience => "No experience found.",
        }
    }

    pub fn count_label(self) -> &'static str {
        match self {
            EntityKind::Project => "project(s)",
            EntityKind::Blog => "blog(s)",
            EntityKind::Experience => "experience(s)",
        }
    }

    pub fn filter_placeholder(self) -> &'static str {
        match self {
            EntityKind::Project => "Filter projects...",
            EntityKind::Blog => "Filter blogs...",
            EntityKind::Experience => "Filter experience...",
        }
    }
}

/// A record type served by the API and edited through a form.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// Editable values; also the JSON body of create/update calls.
    type Input: FormModel + Serialize + From<Self> + Default;
    /// Raw urlencoded post of the entity's form.
    type FormData: FormPost<Model = Self::Input> + DeserializeOwned + Send + 'static;

    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
}

impl Entity for Project {
    type Input = ProjectInput;
    type FormData = ProjectFormData;
    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Blog {
    type Input = BlogInput;
    type FormData = BlogFormData;
    const KIND: EntityKind = EntityKind::Blog;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Experience {
    type Input = ExperienceInput;
    type FormData = ExperienceFormData;
    const KIND: EntityKind = EntityKind::Experience;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// Record ids travel in URL paths; anything beyond a plain token is rejected.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
