use serde::{Deserialize, Serialize};

/// The whole skills list; every write replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkillSet {
    #[serde(default)]
    pub skills: Vec<String>,
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        Self { skills }
    }
}
