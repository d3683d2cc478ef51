/// What a form post asks for, carried in its `intent` field.
///
/// `save`, `add:<field>` or `remove:<field>:<index>`; an empty value means `save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Save,
    Add(String),
    Remove(String, usize),
}

impl Intent {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "save" {
            return Some(Intent::Save);
        }

        let mut parts = raw.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("add"), Some(field), None) if !field.is_empty() => {
                Some(Intent::Add(field.to_string()))
            }
            (Some("remove"), Some(field), Some(index)) if !field.is_empty() => {
                let index = index.parse().ok()?;
                Some(Intent::Remove(field.to_string(), index))
            }
            _ => None,
        }
    }
}
