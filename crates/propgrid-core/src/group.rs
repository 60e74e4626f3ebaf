//! Category groups of property entries

use crate::entry::PropertyEntry;

/// A named bucket of entries sharing a category
#[derive(Debug)]
pub struct CategoryGroup {
    name: String,
    entries: Vec<PropertyEntry>,
    expanded: bool,
}

impl CategoryGroup {
    /// Create an expanded group
    #[must_use]
    pub fn new(name: impl Into<String>, entries: Vec<PropertyEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            expanded: true,
        }
    }

    /// Category name as first spelled
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries ordered by display name
    #[must_use]
    pub fn entries(&self) -> &[PropertyEntry] {
        &self.entries
    }

    /// Mutable access for forwarding edits
    pub fn entries_mut(&mut self) -> &mut [PropertyEntry] {
        &mut self.entries
    }

    /// Entry by property name
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Mutable entry by property name
    pub fn entry_mut(&mut self, name: &str) -> Option<&mut PropertyEntry> {
        self.entries.iter_mut().find(|e| e.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the group is shown expanded
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip the expanded flag
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_by_default() {
        let mut group = CategoryGroup::new("Appearance", Vec::new());
        assert!(group.is_expanded());
        assert!(group.is_empty());
        group.toggle();
        assert!(!group.is_expanded());
        group.set_expanded(true);
        assert!(group.is_expanded());
    }
}
