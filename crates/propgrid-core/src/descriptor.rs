//! Property descriptors and the instance capability
//!
//! An inspected instance describes its properties through [`Inspectable`].
//! Types can implement it by hand with explicit descriptor tables, or use
//! [`DynamicObject`], which stores values in a field map keyed by name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AccessError;
use crate::value::{Value, ValueType};

/// Opt-in for the three-level cascade editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascaderConfig {
    /// Sibling property holding the root forest; `None` yields no options
    pub source: Option<String>,
}

/// Opt-in for the list picker editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPickerConfig {
    /// Sibling property holding the candidate list
    pub source: String,
}

/// Per-property editor configuration attached at registration time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Cascade editor opt-in (only honored for string properties)
    pub cascader: Option<CascaderConfig>,
    /// List picker opt-in
    pub list_picker: Option<ListPickerConfig>,
}

/// Metadata for one inspectable property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Property name, unique within an instance
    pub name: String,
    /// Label shown to the user
    pub display_name: Option<String>,
    /// Help text
    pub description: Option<String>,
    /// Grouping category
    pub category: Option<String>,
    /// Declared type
    pub value_type: ValueType,
    /// Writes are dropped when set
    pub read_only: bool,
    /// Hidden from inspection when false
    pub browsable: bool,
    /// Editor opt-ins
    pub editor: EditorConfig,
}

impl PropertyDescriptor {
    /// Create a browsable, writable descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            category: None,
            value_type,
            read_only: false,
            browsable: true,
            editor: EditorConfig::default(),
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Mark the property read-only
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Hide the property from inspection
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.browsable = false;
        self
    }

    /// Opt into the cascade editor, optionally naming the forest source
    #[must_use]
    pub fn with_cascader(mut self, source: Option<&str>) -> Self {
        self.editor.cascader = Some(CascaderConfig {
            source: source.map(str::to_string),
        });
        self
    }

    /// Opt into the list picker, naming the candidate source
    #[must_use]
    pub fn with_list_picker(mut self, source: impl Into<String>) -> Self {
        self.editor.list_picker = Some(ListPickerConfig { source: source.into() });
        self
    }
}

/// Capability implemented by anything the inspector can edit
pub trait Inspectable {
    /// Descriptors for all properties, browsable or not
    fn descriptors(&self) -> Vec<PropertyDescriptor>;

    /// Read a property by name
    fn get(&self, name: &str) -> Option<Value>;

    /// Write a property by name
    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError>;
}

/// Shared handle to an inspected instance
pub type InstanceRef = Rc<RefCell<dyn Inspectable>>;

/// Wrap an inspectable value in a shared handle
pub fn instance_ref<T: Inspectable + 'static>(instance: T) -> InstanceRef {
    Rc::new(RefCell::new(instance))
}

/// Table-driven instance with values stored by property name
#[derive(Debug, Clone, Default)]
pub struct DynamicObject {
    descriptors: Vec<PropertyDescriptor>,
    values: HashMap<String, Value>,
}

impl DynamicObject {
    /// Create an object with no properties
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property with its initial value
    #[must_use]
    pub fn with_property(mut self, descriptor: PropertyDescriptor, initial: impl Into<Value>) -> Self {
        self.add_property(descriptor, initial);
        self
    }

    /// Add a property with its initial value, replacing one of the same name
    pub fn add_property(&mut self, descriptor: PropertyDescriptor, initial: impl Into<Value>) {
        self.descriptors.retain(|d| d.name != descriptor.name);
        self.values.insert(descriptor.name.clone(), initial.into());
        self.descriptors.push(descriptor);
    }

    /// Wrap in a shared handle
    #[must_use]
    pub fn into_ref(self) -> InstanceRef {
        instance_ref(self)
    }
}

impl Inspectable for DynamicObject {
    fn descriptors(&self) -> Vec<PropertyDescriptor> {
        self.descriptors.clone()
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        let descriptor = self
            .descriptors
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| AccessError::UnknownProperty(name.to_string()))?;

        if descriptor.read_only {
            return Err(AccessError::ReadOnly(name.to_string()));
        }
        if !descriptor.value_type.accepts(&value) {
            return Err(AccessError::TypeMismatch {
                property: name.to_string(),
                expected: descriptor.value_type.friendly_name(),
                actual: value.type_name(),
            });
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DynamicObject {
        DynamicObject::new()
            .with_property(
                PropertyDescriptor::new("RetryCount", ValueType::Int)
                    .with_display_name("Retry Count")
                    .with_category("Advanced"),
                3,
            )
            .with_property(PropertyDescriptor::new("SessionId", ValueType::String).read_only(), "abc")
    }

    #[test]
    fn test_builder_defaults() {
        let d = PropertyDescriptor::new("Name", ValueType::String);
        assert!(d.browsable);
        assert!(!d.read_only);
        assert_eq!(d.editor, EditorConfig::default());

        let d = d.with_cascader(None).with_list_picker("Items").hidden();
        assert_eq!(d.editor.cascader, Some(CascaderConfig { source: None }));
        assert_eq!(d.editor.list_picker.unwrap().source, "Items");
        assert!(!d.browsable);
    }

    #[test]
    fn test_dynamic_object_get_set() {
        let mut obj = sample();
        assert_eq!(obj.get("RetryCount"), Some(Value::Int(3)));
        obj.set("RetryCount", Value::Int(5)).unwrap();
        assert_eq!(obj.get("RetryCount"), Some(Value::Int(5)));
    }

    #[test]
    fn test_dynamic_object_rejects_bad_writes() {
        let mut obj = sample();
        assert_eq!(
            obj.set("Missing", Value::Int(1)),
            Err(AccessError::UnknownProperty("Missing".to_string()))
        );
        assert_eq!(
            obj.set("SessionId", Value::string("x")),
            Err(AccessError::ReadOnly("SessionId".to_string()))
        );
        assert!(matches!(
            obj.set("RetryCount", Value::string("5")),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert_eq!(obj.get("RetryCount"), Some(Value::Int(3)));
    }

    #[test]
    fn test_add_property_replaces_same_name() {
        let mut obj = sample();
        obj.add_property(PropertyDescriptor::new("RetryCount", ValueType::Float), 1.5);
        let descriptors = obj.descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.iter().find(|d| d.name == "RetryCount").unwrap().value_type, ValueType::Float);
        assert_eq!(obj.get("RetryCount"), Some(Value::Float(1.5)));
    }
}
