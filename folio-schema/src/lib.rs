pub mod auth;
pub mod blog;
pub mod envelope;
pub mod experience;
pub mod project;
pub mod skills;

pub use auth::{AccessGrant, Credentials};
pub use blog::{Blog, BlogInput};
pub use envelope::{ApiEnvelope, ApiErrorMessage};
pub use experience::{Experience, ExperienceInput};
pub use project::{Priority, Project, ProjectInput};
pub use skills::SkillSet;
