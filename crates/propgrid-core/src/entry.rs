//! Per-property editing binding
//!
//! A [`PropertyEntry`] reads and writes one property of an inspected
//! instance. Its [`EditorKind`] is fixed at construction and gates which
//! setters have any effect; setters for another kind return silently.
//!
//! Every successful write goes straight through to the instance and then
//! notifies all dependent display accessors, whichever setter triggered it.
//! Malformed text, read-only targets and refused writes leave the value as
//! it was and raise no notification.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cascade::{CascadeSelector, CascadeUpdate};
use crate::coerce::Coercer;
use crate::config::InspectorConfig;
use crate::descriptor::{InstanceRef, PropertyDescriptor};
use crate::notify::{Accessor, ChangeEvent, ChangeNotifier, SubscriptionId};
use crate::picker::ListPicker;
use crate::tree::TreeNode;
use crate::value::{EnumValue, Value, ValueType};

/// How a property is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    /// Free text, coerced to the declared type
    Text,
    /// Checkbox
    Bool,
    /// Choice among declared enum variants
    Enum,
    /// Three-level cascade over a tree forest
    Cascader,
    /// Single choice from a candidate list
    ListPicker,
}

impl EditorKind {
    /// Classify a property; the first matching rule wins and `Text` is the fallback
    #[must_use]
    pub fn classify(descriptor: &PropertyDescriptor) -> Self {
        match &descriptor.value_type {
            ValueType::Bool => EditorKind::Bool,
            ValueType::Enum(_) => EditorKind::Enum,
            ValueType::String if descriptor.editor.cascader.is_some() => EditorKind::Cascader,
            _ if descriptor.editor.list_picker.is_some() => EditorKind::ListPicker,
            _ => EditorKind::Text,
        }
    }
}

/// Editor-specific state; at most one kind exists per entry
#[derive(Debug, Clone)]
enum EditorState {
    Plain,
    Cascade(CascadeSelector),
    Picker(ListPicker),
}

/// Binding between one property of an instance and its editor state
pub struct PropertyEntry {
    instance: InstanceRef,
    descriptor: PropertyDescriptor,
    category: String,
    type_name: String,
    kind: EditorKind,
    enum_values: Vec<EnumValue>,
    coercer: Coercer,
    state: EditorState,
    notifier: ChangeNotifier,
}

impl PropertyEntry {
    /// Create an entry, classifying it and resolving editor sources
    #[must_use]
    pub fn new(instance: InstanceRef, descriptor: PropertyDescriptor, config: &InspectorConfig) -> Self {
        let kind = EditorKind::classify(&descriptor);
        let enum_values = match &descriptor.value_type {
            ValueType::Enum(ty) => ty.values(),
            _ => Vec::new(),
        };
        let category = descriptor
            .category
            .clone()
            .unwrap_or_else(|| config.default_category.clone());
        let coercer = Coercer::new(config.locale.clone());

        let state = match kind {
            EditorKind::Cascader => {
                let source = descriptor.editor.cascader.as_ref().and_then(|c| c.source.as_deref());
                let roots = source.map(|s| read_forest(&instance, s)).unwrap_or_default();
                EditorState::Cascade(CascadeSelector::new(roots, config.path_separator))
            }
            EditorKind::ListPicker => {
                let source = descriptor.editor.list_picker.as_ref().map(|c| c.source.as_str());
                let candidates = source.map(|s| read_candidates(&instance, s)).unwrap_or_default();
                let current = instance.borrow().get(&descriptor.name).unwrap_or_default();
                EditorState::Picker(ListPicker::with_current(candidates, &current, &coercer))
            }
            _ => EditorState::Plain,
        };

        let mut entry = Self {
            instance,
            type_name: descriptor.value_type.friendly_name(),
            descriptor,
            category,
            kind,
            enum_values,
            coercer,
            state,
            notifier: ChangeNotifier::new(),
        };
        if kind == EditorKind::Cascader {
            entry.seed_cascade(config.path_separator);
        }
        entry
    }

    // ==================== Metadata ====================

    /// Property name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Display name, falling back to the property name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.descriptor.display_name.as_deref().unwrap_or(&self.descriptor.name)
    }

    /// Description, empty when none was declared
    #[must_use]
    pub fn description(&self) -> &str {
        self.descriptor.description.as_deref().unwrap_or_default()
    }

    /// Category, falling back to the configured default
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Friendly name of the declared type
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether writes are dropped
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.descriptor.read_only
    }

    /// Editor classification
    #[must_use]
    pub fn editor_kind(&self) -> EditorKind {
        self.kind
    }

    /// Declared enum values in declaration order (empty unless `Enum`)
    #[must_use]
    pub fn enum_values(&self) -> &[EnumValue] {
        &self.enum_values
    }

    /// The descriptor this entry was built from
    #[must_use]
    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.descriptor
    }

    // ==================== Notifications ====================

    /// Register an observer for accessor changes
    pub fn subscribe(&mut self, observer: impl FnMut(&ChangeEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    /// Remove an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ==================== Value access ====================

    /// Current value read from the instance
    #[must_use]
    pub fn value(&self) -> Value {
        self.instance.borrow().get(&self.descriptor.name).unwrap_or_default()
    }

    /// Current value as display text
    #[must_use]
    pub fn string_value(&self) -> String {
        self.coercer.to_display_string(&self.value())
    }

    /// Parse text into the declared type and write it (`Text` entries only).
    ///
    /// Text that does not convert is discarded and the value is kept.
    pub fn set_string_value(&mut self, text: &str) {
        if self.kind != EditorKind::Text {
            return;
        }
        match self.coercer.from_display_string(text, &self.descriptor.value_type) {
            Ok(value) => {
                self.write_value(value);
            }
            Err(err) => trace!(property = %self.descriptor.name, %err, "discarding unconvertible text"),
        }
    }

    /// Current value as a checkbox state
    #[must_use]
    pub fn bool_value(&self) -> bool {
        matches!(self.value(), Value::Bool(true))
    }

    /// Write a boolean (`Bool` entries only)
    pub fn set_bool_value(&mut self, value: bool) {
        if self.kind == EditorKind::Bool {
            self.write_value(Value::Bool(value));
        }
    }

    /// Current enum value
    #[must_use]
    pub fn enum_value(&self) -> Option<EnumValue> {
        match self.value() {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Write an enum value of the declared type (`Enum` entries only)
    pub fn set_enum_value(&mut self, value: EnumValue) {
        let value = Value::Enum(value);
        if self.kind == EditorKind::Enum && self.descriptor.value_type.accepts(&value) {
            self.write_value(value);
        }
    }

    /// Write through to the instance and fan out notifications.
    ///
    /// Returns whether the instance accepted the value.
    fn write_value(&mut self, value: Value) -> bool {
        let name = self.descriptor.name.as_str();
        if self.descriptor.read_only {
            debug!(property = name, "dropping write to read-only property");
            return false;
        }
        let result = self.instance.borrow_mut().set(name, value);
        match result {
            Ok(()) => {
                self.notifier.notify_all(name, Accessor::WRITE_THROUGH);
                true
            }
            Err(err) => {
                debug!(property = name, %err, "instance refused write");
                false
            }
        }
    }

    // ==================== Cascade ====================

    fn cascade(&self) -> Option<&CascadeSelector> {
        match &self.state {
            EditorState::Cascade(sel) => Some(sel),
            _ => None,
        }
    }

    fn cascade_mut(&mut self) -> Option<&mut CascadeSelector> {
        match &mut self.state {
            EditorState::Cascade(sel) => Some(sel),
            _ => None,
        }
    }

    /// First-level cascade options
    #[must_use]
    pub fn level1_options(&self) -> &[TreeNode] {
        self.cascade().map(CascadeSelector::level1_options).unwrap_or_default()
    }

    /// Second-level cascade options
    #[must_use]
    pub fn level2_options(&self) -> &[TreeNode] {
        self.cascade().map(CascadeSelector::level2_options).unwrap_or_default()
    }

    /// Third-level cascade options
    #[must_use]
    pub fn level3_options(&self) -> &[TreeNode] {
        self.cascade().map(CascadeSelector::level3_options).unwrap_or_default()
    }

    /// First-level cascade selection
    #[must_use]
    pub fn selected_level1(&self) -> Option<&TreeNode> {
        self.cascade().and_then(CascadeSelector::level1)
    }

    /// Second-level cascade selection
    #[must_use]
    pub fn selected_level2(&self) -> Option<&TreeNode> {
        self.cascade().and_then(CascadeSelector::level2)
    }

    /// Third-level cascade selection
    #[must_use]
    pub fn selected_level3(&self) -> Option<&TreeNode> {
        self.cascade().and_then(CascadeSelector::level3)
    }

    /// Select a first-level node
    pub fn set_selected_level1(&mut self, node: Option<TreeNode>) {
        if let Some(update) = self.cascade_mut().map(|sel| sel.set_level1(node)) {
            self.apply_cascade(update);
        }
    }

    /// Select a second-level node
    pub fn set_selected_level2(&mut self, node: Option<TreeNode>) {
        if let Some(update) = self.cascade_mut().map(|sel| sel.set_level2(node)) {
            self.apply_cascade(update);
        }
    }

    /// Select a third-level node, committing the path when complete
    pub fn set_selected_level3(&mut self, node: Option<TreeNode>) {
        if let Some(update) = self.cascade_mut().map(|sel| sel.set_level3(node)) {
            self.apply_cascade(update);
        }
    }

    /// Cascade popup visibility
    #[must_use]
    pub fn is_cascader_open(&self) -> bool {
        self.cascade().is_some_and(CascadeSelector::is_open)
    }

    /// Show or hide the cascade popup
    pub fn set_cascader_open(&mut self, open: bool) {
        if self.cascade_mut().is_some_and(|sel| sel.set_open(open)) {
            self.notifier.notify(&self.descriptor.name, Accessor::CascaderOpen);
        }
    }

    /// Flip the cascade popup
    pub fn toggle_cascader(&mut self) {
        let open = self.is_cascader_open();
        self.set_cascader_open(!open);
    }

    fn apply_cascade(&mut self, update: CascadeUpdate) {
        self.notifier.notify_all(&self.descriptor.name, update.changed);
        if let Some(path) = update.commit {
            self.write_value(Value::string(path));
        }
        if update.closed {
            self.notifier.notify(&self.descriptor.name, Accessor::CascaderOpen);
        }
    }

    /// Pre-select levels from the current `a/b/c` value
    fn seed_cascade(&mut self, separator: char) {
        let Value::String(current) = self.value() else {
            return;
        };
        let parts: Vec<&str> = current
            .split(separator)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut parts = parts.into_iter();
        let Some(first) = parts.next() else {
            return;
        };
        let node = TreeNode::find(self.level1_options(), first).cloned();
        if node.is_none() {
            trace!(property = %self.descriptor.name, label = first, "cascade seed not found");
            return;
        }
        self.set_selected_level1(node);

        if let Some(second) = parts.next() {
            let node = TreeNode::find(self.level2_options(), second).cloned();
            if node.is_none() {
                return;
            }
            self.set_selected_level2(node);

            if let Some(third) = parts.next() {
                let node = TreeNode::find(self.level3_options(), third).cloned();
                self.set_selected_level3(node);
            }
        }
    }

    // ==================== List picker ====================

    fn picker(&self) -> Option<&ListPicker> {
        match &self.state {
            EditorState::Picker(p) => Some(p),
            _ => None,
        }
    }

    /// List picker candidates
    #[must_use]
    pub fn item_options(&self) -> &[Value] {
        self.picker().map(ListPicker::candidates).unwrap_or_default()
    }

    /// Display text of every candidate, in order
    #[must_use]
    pub fn item_option_displays(&self) -> Vec<String> {
        self.item_options()
            .iter()
            .map(|v| self.coercer.to_display_string(v))
            .collect()
    }

    /// Selected list picker candidate
    #[must_use]
    pub fn selected_item(&self) -> Option<&Value> {
        self.picker().and_then(ListPicker::selected)
    }

    /// Display text of the selected candidate
    #[must_use]
    pub fn selected_item_display(&self) -> Option<String> {
        self.picker().and_then(|p| p.selected_display(&self.coercer))
    }

    /// Select a candidate by value, or clear with `None`.
    ///
    /// The value is matched to a candidate the same way the initial value
    /// is; a value that matches no candidate is ignored.
    pub fn set_selected_item(&mut self, item: Option<Value>) {
        let index = match (self.picker(), item) {
            (None, _) => return,
            (Some(_), None) => None,
            (Some(p), Some(v)) => match ListPicker::resolve(p.candidates(), &v, &self.coercer) {
                Some(i) => Some(i),
                None => return,
            },
        };
        self.select_item_index(index);
    }

    /// Select a candidate by index, or clear with `None`
    pub fn select_item_index(&mut self, index: Option<usize>) {
        if self.descriptor.read_only {
            debug!(property = %self.descriptor.name, "ignoring selection on read-only property");
            return;
        }
        let EditorState::Picker(picker) = &mut self.state else {
            return;
        };
        if !picker.select_index(index) {
            return;
        }
        let value = ListPicker::value_for(picker.selected(), &self.descriptor.value_type, &self.coercer);
        if !self.write_value(value) {
            self.notifier.notify_all(
                &self.descriptor.name,
                [Accessor::SelectedItem, Accessor::SelectedItemDisplay],
            );
        }
    }
}

fn read_forest(instance: &InstanceRef, source: &str) -> Vec<TreeNode> {
    match instance.borrow().get(source) {
        Some(Value::List(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::Node(n) => Some(n.clone()),
                _ => None,
            })
            .collect(),
        _ => {
            trace!(source, "cascade source missing or not a list");
            Vec::new()
        }
    }
}

fn read_candidates(instance: &InstanceRef, source: &str) -> Vec<Value> {
    match instance.borrow().get(source) {
        Some(Value::List(items)) => items.to_vec(),
        _ => {
            trace!(source, "list picker source missing or not a list");
            Vec::new()
        }
    }
}

impl fmt::Debug for PropertyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("name", &self.descriptor.name)
            .field("category", &self.category)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
