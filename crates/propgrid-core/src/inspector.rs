//! Property introspection and the inspection session
//!
//! [`build_groups`] turns an instance into ordered category groups of
//! entries. [`Inspector`] holds the published groups for one instance at a
//! time and replaces them wholesale whenever the instance changes.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::collate::{eq_ignore_case, Collation};
use crate::config::InspectorConfig;
use crate::descriptor::InstanceRef;
use crate::entry::PropertyEntry;
use crate::group::CategoryGroup;
use crate::view::InspectorView;

/// Build grouped, sorted entries for every browsable property of `instance`.
///
/// Categories are matched ignoring case and a group takes the spelling of
/// the first property that introduced it. Groups are ordered by name and
/// entries by display name, both with the configured language's collation
/// ignoring case; ties keep declaration order.
#[must_use]
pub fn build_groups(instance: &InstanceRef, config: &InspectorConfig) -> Vec<CategoryGroup> {
    let descriptors = instance.borrow().descriptors();
    let collation = Collation::new(&config.locale);

    let mut buckets: Vec<(String, Vec<PropertyEntry>)> = Vec::new();
    for descriptor in descriptors.into_iter().filter(|d| d.browsable) {
        let entry = PropertyEntry::new(Rc::clone(instance), descriptor, config);
        match buckets.iter().position(|(name, _)| eq_ignore_case(name, entry.category())) {
            Some(i) => buckets[i].1.push(entry),
            None => buckets.push((entry.category().to_string(), vec![entry])),
        }
    }

    buckets.sort_by(|(a, _), (b, _)| collation.compare(a, b));
    buckets
        .into_iter()
        .map(|(name, mut entries)| {
            entries.sort_by(|a, b| collation.compare(a.display_name(), b.display_name()));
            CategoryGroup::new(name, entries)
        })
        .collect()
}

// ============================================================================
// Session
// ============================================================================

/// Inspection session over one instance at a time
pub struct Inspector {
    config: InspectorConfig,
    instance: Option<InstanceRef>,
    groups: Vec<CategoryGroup>,
    selected: Option<(usize, usize)>,
}

impl Inspector {
    /// Create an inspector with no instance
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            instance: None,
            groups: Vec::new(),
            selected: None,
        }
    }

    /// Create an inspector already showing `instance`
    #[must_use]
    pub fn with_instance(config: InspectorConfig, instance: InstanceRef) -> Self {
        let mut inspector = Self::new(config);
        inspector.set_instance(Some(instance));
        inspector
    }

    /// Configuration used for every rebuild
    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// The inspected instance
    #[must_use]
    pub fn instance(&self) -> Option<&InstanceRef> {
        self.instance.as_ref()
    }

    /// Inspect a new instance, or clear with `None`.
    ///
    /// The new groups are built completely before the old ones are dropped.
    pub fn set_instance(&mut self, instance: Option<InstanceRef>) {
        let groups = instance
            .as_ref()
            .map(|i| build_groups(i, &self.config))
            .unwrap_or_default();
        self.instance = instance;
        self.publish(groups);
    }

    /// Rebuild groups from the current instance
    pub fn refresh(&mut self) {
        let groups = self
            .instance
            .as_ref()
            .map(|i| build_groups(i, &self.config))
            .unwrap_or_default();
        self.publish(groups);
    }

    fn publish(&mut self, groups: Vec<CategoryGroup>) {
        let entries: usize = groups.iter().map(CategoryGroup::len).sum();
        debug!(groups = groups.len(), entries, "rebuilt property groups");
        self.groups = groups;
        self.selected = None;
    }

    /// Published groups in display order
    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Group by display position, for toggling or forwarding edits
    pub fn group_mut(&mut self, index: usize) -> Option<&mut CategoryGroup> {
        self.groups.get_mut(index)
    }

    /// Find an entry by property name in any group
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&PropertyEntry> {
        self.groups.iter().find_map(|g| g.entry(name))
    }

    /// Find an entry by property name for editing
    pub fn entry_mut(&mut self, name: &str) -> Option<&mut PropertyEntry> {
        self.groups.iter_mut().find_map(|g| g.entry_mut(name))
    }

    /// Flip a group's expanded flag; returns false for an unknown index
    pub fn toggle_group(&mut self, index: usize) -> bool {
        match self.groups.get_mut(index) {
            Some(group) => {
                group.toggle();
                true
            }
            None => false,
        }
    }

    /// Move the selection cursor to the named entry.
    ///
    /// Returns false and keeps the current selection if no entry matches.
    pub fn select_entry(&mut self, name: &str) -> bool {
        let found = self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.entries().iter().position(|e| e.name() == name).map(|ei| (gi, ei))
        });
        if found.is_some() {
            self.selected = found;
        }
        found.is_some()
    }

    /// Clear the selection cursor
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Entry under the selection cursor
    #[must_use]
    pub fn selected_entry(&self) -> Option<&PropertyEntry> {
        let (gi, ei) = self.selected?;
        self.groups.get(gi)?.entries().get(ei)
    }

    /// Read-only view of all groups for rendering
    #[must_use]
    pub fn snapshot(&self) -> InspectorView {
        InspectorView::capture(&self.groups, self.selected_entry().map(PropertyEntry::name))
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl fmt::Debug for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("has_instance", &self.instance.is_some())
            .field("groups", &self.groups)
            .field("selected", &self.selected)
            .finish()
    }
}
