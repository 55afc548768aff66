//! Runtime values captured from a stack frame's call arguments.
//!
//! A [`Value`] is a snapshot of whatever the failing program passed to a
//! function: scalars, ordered collections and objects with their instance
//! fields. The snapshot is produced by whatever captured the stack and is
//! only ever read by this crate.
//!
//! # Examples
//!
//! ```
//! use plaintrace::value::{Key, Mapping, ObjectValue, Value};
//! use plaintrace::visibility::Visibility;
//!
//! let mut options = Mapping::default();
//! options.insert(Key::from("verbose"), Value::from(true));
//!
//! let command = ObjectValue::new(r"App\Command")
//!     .with_field("name", Visibility::Public, "import")
//!     .with_field("options", Visibility::Private, options);
//!
//! let args = vec![Value::from(command), Value::from(3)];
//! assert_eq!(args[1].type_name(), "int");
//! ```

use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use triomphe::Arc;

use crate::visibility::Visibility;

/// An insertion-ordered associative collection.
///
/// Iteration order is the order entries were inserted, which is also the
/// order they are rendered in.
pub type Mapping = IndexMap<Key, Value, FxBuildHasher>;

/// Instance fields of an [`ObjectValue`], keyed by their stored name.
pub type Fields = IndexMap<String, Value, FxBuildHasher>;

/// A key of a [`Mapping`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(index) => write!(f, "{index}"),
            Key::Str(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Int(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Str(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Str(name)
    }
}

/// A captured runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// A positional list of values.
    Sequence(Vec<Value>),
    /// An ordered key/value collection.
    Mapping(Mapping),
    /// An object instance. Shared, so cloning a value never copies the
    /// object graph below it.
    Object(Arc<ObjectValue>),
    /// A value of a kind the renderer has no dedicated layout for, such as a
    /// resource handle or a closure. Only its type name is shown.
    Opaque(Cow<'static, str>),
}

impl Value {
    /// The human-readable type name of this value.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) | Value::Mapping(_) => "array",
            Value::Object(object) => &object.class_name,
            Value::Opaque(type_name) => type_name,
        }
    }

    /// Creates an opaque value displayed as `type_name`.
    pub fn opaque(type_name: impl Into<Cow<'static, str>>) -> Self {
        Value::Opaque(type_name.into())
    }
}

/// Whether the keys of `mapping` are exactly `0, 1, ..., n - 1` in order.
///
/// Such mappings are displayed like sequences, without their keys.
pub fn is_positional(mapping: &Mapping) -> bool {
    mapping
        .keys()
        .enumerate()
        .all(|(index, key)| matches!(key, Key::Int(k) if usize::try_from(*k) == Ok(index)))
}

/// An object instance: its class and its stored instance fields.
///
/// Field keys use the stored-name convention understood by
/// [`classify`](crate::visibility::classify): private fields are prefixed by
/// `\0Class\0`, protected fields by `\0*\0`, and public fields are bare.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    /// The fully qualified class name.
    pub class_name: String,
    /// Instance fields in declaration order.
    pub fields: Fields,
}

impl ObjectValue {
    /// Creates an object of class `class_name` without fields.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Fields::default(),
        }
    }

    /// Adds a field declared with `visibility` by this object's class.
    pub fn with_field(
        mut self,
        name: &str,
        visibility: Visibility,
        value: impl Into<Value>,
    ) -> Self {
        let key = visibility.mangle(name, &self.class_name);
        self.fields.insert(key, value.into());
        self
    }

    /// Adds a field under an already encoded stored name, as produced by an
    /// upstream serializer.
    pub fn with_raw_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Sequence(values)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Mapping(mapping)
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::Object(Arc::new(object))
    }
}

impl From<Arc<ObjectValue>> for Value {
    fn from(object: Arc<ObjectValue>) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().map(Into::into).collect())
    }
}
