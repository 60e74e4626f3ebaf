//! Propgrid Core - headless property inspection
//!
//! This crate provides the state behind a property grid:
//! - Descriptors: what an instance exposes and how each property is edited
//! - Coercion: text to typed values and back
//! - Entries: per-property read/write bindings with change notification
//! - Cascade: three-level selection over a tree forest
//! - Picker: single selection from a candidate list
//! - Inspector: grouping, ordering and the inspection session
//!
//! Rendering is left to the caller, which reads entries (or a serialized
//! [`InspectorView`]) and forwards user edits to the entry setters.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types
pub mod error;

/// Inspector configuration (TOML)
pub mod config;

/// Locale collation used for groups and entries
pub mod collate;

/// Dynamic values and declared types
pub mod value;

/// Tree nodes for cascade sources
pub mod tree;

/// Property descriptors and the `Inspectable` capability
pub mod descriptor;

/// String and value conversion
pub mod coerce;

/// Accessor change notifications
pub mod notify;

/// Cascade selection state machine
pub mod cascade;

/// List picker candidate resolution
pub mod picker;

/// Per-property entries
pub mod entry;

/// Category groups
pub mod group;

/// Introspection and inspection session
pub mod inspector;

/// Serializable snapshots
pub mod view;

pub use config::{InspectorConfig, LocaleConfig};
pub use descriptor::{instance_ref, DynamicObject, Inspectable, InstanceRef, PropertyDescriptor};
pub use entry::{EditorKind, PropertyEntry};
pub use error::{AccessError, CoercionError, InspectorError, InspectorResult};
pub use group::CategoryGroup;
pub use inspector::{build_groups, Inspector};
pub use notify::{Accessor, ChangeEvent, SubscriptionId};
pub use tree::TreeNode;
pub use value::{EnumType, EnumValue, ObjectValue, Value, ValueType};
pub use view::InspectorView;
