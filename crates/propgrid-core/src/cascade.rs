//! Three-level cascade selector
//!
//! Selection slots form a chain: a level can only be set when the level
//! above it is set, and only to one of that parent's children. Option lists
//! are derived from the parent selection and never edited directly.
//!
//! Reaching a fully-determined selection commits the joined label path and
//! closes the popup. There is no terminal state: the selector can be
//! reopened and re-navigated, and each new commit replaces the last.

use crate::notify::Accessor;
use crate::tree::{same_node, TreeNode};

/// Outcome of a selection transition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeUpdate {
    /// Accessors whose value changed, in transition order
    pub changed: Vec<Accessor>,
    /// Label path to write back when the selection became fully determined
    pub commit: Option<String>,
    /// The popup was closed by the commit
    pub closed: bool,
}

impl CascadeUpdate {
    /// Check whether the transition had no effect
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && self.commit.is_none() && !self.closed
    }
}

/// Cascade selection state over a tree forest
#[derive(Debug, Clone)]
pub struct CascadeSelector {
    level1_options: Vec<TreeNode>,
    level2_options: Vec<TreeNode>,
    level3_options: Vec<TreeNode>,
    level1: Option<TreeNode>,
    level2: Option<TreeNode>,
    level3: Option<TreeNode>,
    open: bool,
    separator: char,
}

impl CascadeSelector {
    /// Create a closed selector with nothing selected
    #[must_use]
    pub fn new(roots: Vec<TreeNode>, separator: char) -> Self {
        Self {
            level1_options: roots,
            level2_options: Vec::new(),
            level3_options: Vec::new(),
            level1: None,
            level2: None,
            level3: None,
            open: false,
            separator,
        }
    }

    /// First-level options (the root forest)
    #[must_use]
    pub fn level1_options(&self) -> &[TreeNode] {
        &self.level1_options
    }

    /// Children of the first-level selection
    #[must_use]
    pub fn level2_options(&self) -> &[TreeNode] {
        &self.level2_options
    }

    /// Children of the second-level selection
    #[must_use]
    pub fn level3_options(&self) -> &[TreeNode] {
        &self.level3_options
    }

    /// First-level selection
    #[must_use]
    pub fn level1(&self) -> Option<&TreeNode> {
        self.level1.as_ref()
    }

    /// Second-level selection
    #[must_use]
    pub fn level2(&self) -> Option<&TreeNode> {
        self.level2.as_ref()
    }

    /// Third-level selection
    #[must_use]
    pub fn level3(&self) -> Option<&TreeNode> {
        self.level3.as_ref()
    }

    /// Popup visibility
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Check whether all three levels are selected
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.level1.is_some() && self.level2.is_some() && self.level3.is_some()
    }

    /// Labels of the selected levels joined by the separator
    #[must_use]
    pub fn path(&self) -> Option<String> {
        let (l1, l2, l3) = (self.level1.as_ref()?, self.level2.as_ref()?, self.level3.as_ref()?);
        let sep = self.separator.to_string();
        Some([l1.label(), l2.label(), l3.label()].join(&sep))
    }

    /// Select a first-level node, resetting the levels below.
    ///
    /// A node that is not one of the current options is ignored.
    pub fn set_level1(&mut self, node: Option<TreeNode>) -> CascadeUpdate {
        let mut update = CascadeUpdate::default();
        if same_node(self.level1.as_ref(), node.as_ref()) || !is_option(&self.level1_options, node.as_ref()) {
            return update;
        }

        self.level1 = node;
        update.changed.push(Accessor::SelectedLevel1);
        if self.level2.take().is_some() {
            update.changed.push(Accessor::SelectedLevel2);
        }
        if self.level3.take().is_some() {
            update.changed.push(Accessor::SelectedLevel3);
        }
        self.level2_options = children_of(self.level1.as_ref());
        self.level3_options.clear();
        update.changed.push(Accessor::Level2Options);
        update.changed.push(Accessor::Level3Options);
        update
    }

    /// Select a second-level node, resetting the third level.
    ///
    /// A node that is not a child of the first-level selection is ignored.
    pub fn set_level2(&mut self, node: Option<TreeNode>) -> CascadeUpdate {
        let mut update = CascadeUpdate::default();
        if same_node(self.level2.as_ref(), node.as_ref()) || !is_option(&self.level2_options, node.as_ref()) {
            return update;
        }

        self.level2 = node;
        update.changed.push(Accessor::SelectedLevel2);
        if self.level3.take().is_some() {
            update.changed.push(Accessor::SelectedLevel3);
        }
        self.level3_options = children_of(self.level2.as_ref());
        update.changed.push(Accessor::Level3Options);
        update
    }

    /// Select a third-level node, committing when all levels are set.
    ///
    /// A node that is not a child of the second-level selection is ignored.
    pub fn set_level3(&mut self, node: Option<TreeNode>) -> CascadeUpdate {
        let mut update = CascadeUpdate::default();
        if same_node(self.level3.as_ref(), node.as_ref()) || !is_option(&self.level3_options, node.as_ref()) {
            return update;
        }

        self.level3 = node;
        update.changed.push(Accessor::SelectedLevel3);
        if let Some(path) = self.path() {
            update.commit = Some(path);
            update.closed = self.set_open(false);
        }
        update
    }

    /// Set popup visibility; returns whether it changed
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }
}

fn children_of(node: Option<&TreeNode>) -> Vec<TreeNode> {
    node.map(|n| n.children().to_vec()).unwrap_or_default()
}

/// `None` is always allowed; a node must be one of the options by identity
fn is_option(options: &[TreeNode], node: Option<&TreeNode>) -> bool {
    node.map_or(true, |n| options.iter().any(|o| o.ptr_eq(n)))
}
