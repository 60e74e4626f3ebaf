//! Dynamic property values and declared property types
//!
//! [`Value`] is what flows between an inspected instance and its entries.
//! [`ValueType`] is what a descriptor declares; it drives editor
//! classification, text coercion, and list-picker assignability.

use std::fmt;
use std::rc::Rc;

use crate::tree::TreeNode;

// ============================================================================
// Enumerations
// ============================================================================

/// An enumerated type with variants in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    /// Create a shared enum type
    #[must_use]
    pub fn new(name: impl Into<String>, variants: impl IntoIterator<Item = impl Into<String>>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        })
    }

    /// Type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant names in declaration order
    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// All values of this type in declaration order
    #[must_use]
    pub fn values(self: &Rc<Self>) -> Vec<EnumValue> {
        (0..self.variants.len())
            .map(|index| EnumValue {
                ty: Rc::clone(self),
                index,
            })
            .collect()
    }

    /// Value at a declaration index
    #[must_use]
    pub fn value_at(self: &Rc<Self>, index: usize) -> Option<EnumValue> {
        (index < self.variants.len()).then(|| EnumValue {
            ty: Rc::clone(self),
            index,
        })
    }

    /// Value for an exact variant name
    #[must_use]
    pub fn value(self: &Rc<Self>, name: &str) -> Option<EnumValue> {
        let index = self.variants.iter().position(|v| v == name)?;
        self.value_at(index)
    }
}

/// One variant of an [`EnumType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    ty: Rc<EnumType>,
    index: usize,
}

impl EnumValue {
    /// The owning enum type
    #[must_use]
    pub fn enum_type(&self) -> &Rc<EnumType> {
        &self.ty
    }

    /// Declaration index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Variant name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.ty.variants[self.index]
    }
}

// ============================================================================
// Objects
// ============================================================================

/// An opaque record value, typically a list-picker candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    type_name: String,
    label: String,
    fields: Vec<(String, Value)>,
}

impl ObjectValue {
    /// Create a record with a type name and display label
    #[must_use]
    pub fn new(type_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Type name
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

// ============================================================================
// Values
// ============================================================================

/// A dynamically typed property value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating-point number
    Float(f64),
    /// String (reference-counted)
    String(Rc<str>),
    /// Enum variant
    Enum(EnumValue),
    /// Record (reference-counted)
    Object(Rc<ObjectValue>),
    /// Tree node
    Node(TreeNode),
    /// Ordered list (reference-counted)
    List(Rc<[Value]>),
}

impl Value {
    /// Create a string value
    #[must_use]
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Rc::from(s.as_ref()))
    }

    /// Create an object value
    #[must_use]
    pub fn object(object: ObjectValue) -> Self {
        Self::Object(Rc::new(object))
    }

    /// Create a list value
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Create a list of tree nodes, the shape a cascade source expects
    #[must_use]
    pub fn forest(nodes: impl IntoIterator<Item = TreeNode>) -> Self {
        Self::list(nodes.into_iter().map(Value::Node))
    }

    /// Check whether both values are the same reference-counted allocation.
    ///
    /// Scalars have no identity and never match.
    #[must_use]
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Node(a), Value::Node(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Check for null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short runtime type name, used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "Null".to_string(),
            Value::Bool(_) => "Boolean".to_string(),
            Value::Int(_) => "Int64".to_string(),
            Value::Float(_) => "Double".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Enum(e) => e.enum_type().name().to_string(),
            Value::Object(o) => o.type_name().to_string(),
            Value::Node(_) => "TreeNode".to_string(),
            Value::List(_) => "List".to_string(),
        }
    }

    /// Borrow as a string slice
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow list items
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Enum(e) => f.write_str(e.name()),
            Value::Object(o) => f.write_str(o.label()),
            Value::Node(n) => f.write_str(n.label()),
            Value::List(items) => {
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<TreeNode> for Value {
    fn from(n: TreeNode) -> Self {
        Value::Node(n)
    }
}

// ============================================================================
// Declared types
// ============================================================================

/// The declared type of a property
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Floating-point number
    Float,
    /// Text
    String,
    /// Enumerated type
    Enum(Rc<EnumType>),
    /// Record type, identified by name
    Object(Rc<str>),
    /// Tree node
    Node,
    /// Ordered list
    List,
    /// Nullable wrapper around a value type
    Nullable(Box<ValueType>),
}

impl ValueType {
    /// Nullable wrapper
    #[must_use]
    pub fn nullable(inner: ValueType) -> Self {
        ValueType::Nullable(Box::new(inner))
    }

    /// Record type by name
    #[must_use]
    pub fn object(name: impl AsRef<str>) -> Self {
        ValueType::Object(Rc::from(name.as_ref()))
    }

    /// Non-nullable primitive types that always hold a value
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        matches!(self, ValueType::Bool | ValueType::Int | ValueType::Float | ValueType::Enum(_))
    }

    /// The value an unset property of this type holds
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Enum(ty) => ty.value_at(0).map_or(Value::Null, Value::Enum),
            _ => Value::Null,
        }
    }

    /// Check whether a value can be stored as this type without conversion
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Nullable(inner), v) => v.is_null() || inner.accepts(v),
            (ValueType::String | ValueType::Object(_) | ValueType::Node | ValueType::List, Value::Null) => true,
            (ValueType::Bool, Value::Bool(_))
            | (ValueType::Int, Value::Int(_))
            | (ValueType::Float, Value::Float(_))
            | (ValueType::String, Value::String(_))
            | (ValueType::Node, Value::Node(_))
            | (ValueType::List, Value::List(_)) => true,
            (ValueType::Enum(ty), Value::Enum(e)) => **e.enum_type() == **ty,
            (ValueType::Object(name), Value::Object(o)) => o.type_name() == &**name,
            _ => false,
        }
    }

    /// Human-readable type name shown next to an entry
    #[must_use]
    pub fn friendly_name(&self) -> String {
        match self {
            ValueType::Bool => "Boolean".to_string(),
            ValueType::Int => "Int64".to_string(),
            ValueType::Float => "Double".to_string(),
            ValueType::String => "String".to_string(),
            ValueType::Enum(ty) => ty.name().to_string(),
            ValueType::Object(name) => name.to_string(),
            ValueType::Node => "TreeNode".to_string(),
            ValueType::List => "List".to_string(),
            ValueType::Nullable(inner) => format!("{}?", inner.friendly_name()),
        }
    }
}
