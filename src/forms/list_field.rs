/// How a list-valued field treats repeated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPolicy {
    /// Technologies, tags: an existing value is not added twice.
    Unique,
    /// Images, description bullets: order matters and repeats are kept.
    Sequence,
}

/// Mutable view over one list inside a form's values.
pub struct ListField<'a> {
    items: &'a mut Vec<String>,
    policy: ListPolicy,
}

impl<'a> ListField<'a> {
    pub fn new(items: &'a mut Vec<String>, policy: ListPolicy) -> Self {
        Self { items, policy }
    }

    pub fn unique(items: &'a mut Vec<String>) -> Self {
        Self::new(items, ListPolicy::Unique)
    }

    pub fn sequence(items: &'a mut Vec<String>) -> Self {
        Self::new(items, ListPolicy::Sequence)
    }

    /// Appends the trimmed value. Returns `true` when the list changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }
        if self.policy == ListPolicy::Unique && self.items.iter().any(|v| v == value) {
            return false;
        }
        self.items.push(value.to_string());
        true
    }

    /// Out-of-range indices leave the list untouched.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}
