//! Serializable snapshots for rendering layers
//!
//! A view is a plain copy of what the groups expose at one moment. It holds
//! no references back into the inspected instance, so it can be handed to a
//! renderer or serialized as JSON without keeping the session borrowed.

use serde::Serialize;

use crate::entry::{EditorKind, PropertyEntry};
use crate::group::CategoryGroup;
use crate::tree::TreeNode;

/// Snapshot of every published group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorView {
    pub groups: Vec<GroupView>,
    /// Property name under the selection cursor
    pub selected: Option<String>,
}

impl InspectorView {
    /// Capture the current state of `groups`
    #[must_use]
    pub fn capture(groups: &[CategoryGroup], selected: Option<&str>) -> Self {
        Self {
            groups: groups.iter().map(GroupView::capture).collect(),
            selected: selected.map(str::to_string),
        }
    }

    /// Total number of entries across groups
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Snapshot of one category group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub name: String,
    pub expanded: bool,
    pub entries: Vec<EntryView>,
}

impl GroupView {
    fn capture(group: &CategoryGroup) -> Self {
        Self {
            name: group.name().to_string(),
            expanded: group.is_expanded(),
            entries: group.entries().iter().map(EntryView::capture).collect(),
        }
    }
}

/// Snapshot of one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    pub type_name: String,
    pub read_only: bool,
    pub kind: EditorKind,
    /// Current value as display text
    pub value: String,
    pub editor: EditorView,
}

impl EntryView {
    fn capture(entry: &PropertyEntry) -> Self {
        Self {
            name: entry.name().to_string(),
            display_name: entry.display_name().to_string(),
            description: entry.description().to_string(),
            category: entry.category().to_string(),
            type_name: entry.type_name().to_string(),
            read_only: entry.is_read_only(),
            kind: entry.editor_kind(),
            value: entry.string_value(),
            editor: EditorView::capture(entry),
        }
    }
}

/// Kind-specific editor state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorView {
    Text,
    Bool {
        checked: bool,
    },
    Enum {
        options: Vec<String>,
        selected: Option<String>,
    },
    Cascader {
        open: bool,
        /// Option labels for levels one to three
        options: [Vec<String>; 3],
        /// Selected label per level
        selected: [Option<String>; 3],
    },
    ListPicker {
        options: Vec<String>,
        selected: Option<String>,
    },
}

impl EditorView {
    fn capture(entry: &PropertyEntry) -> Self {
        match entry.editor_kind() {
            EditorKind::Text => EditorView::Text,
            EditorKind::Bool => EditorView::Bool {
                checked: entry.bool_value(),
            },
            EditorKind::Enum => EditorView::Enum {
                options: entry.enum_values().iter().map(|v| v.name().to_string()).collect(),
                selected: entry.enum_value().map(|v| v.name().to_string()),
            },
            EditorKind::Cascader => EditorView::Cascader {
                open: entry.is_cascader_open(),
                options: [
                    labels(entry.level1_options()),
                    labels(entry.level2_options()),
                    labels(entry.level3_options()),
                ],
                selected: [
                    entry.selected_level1().map(label),
                    entry.selected_level2().map(label),
                    entry.selected_level3().map(label),
                ],
            },
            EditorKind::ListPicker => EditorView::ListPicker {
                options: entry.item_option_displays(),
                selected: entry.selected_item_display(),
            },
        }
    }
}

fn label(node: &TreeNode) -> String {
    node.label().to_string()
}

fn labels(nodes: &[TreeNode]) -> Vec<String> {
    nodes.iter().map(label).collect()
}
