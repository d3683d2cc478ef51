mod client;
mod resources;

pub use client::{ApiClient, FOLIO_USER_AGENT};
pub use resources::{EntityApi, SkillStore, SkillsApi};
