//! Constructors, accessors and conversions

use std::sync::Arc;

use super::{StructValue, Value, ValueRef, ValueRefMut};

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a vec value
    pub fn vec(items: Vec<Value>) -> Self {
        Value::Vec(Arc::new(items))
    }

    /// Create a tuple value
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Arc::new(items))
    }

    /// Create an array value
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    /// Create a struct value
    pub fn structure(s: StructValue) -> Self {
        Value::Struct(Arc::new(s))
    }

    /// Create `Some(value)`
    pub fn some(value: Value) -> Self {
        Value::Option(Arc::new(Some(value)))
    }

    /// Create `None`
    pub fn none() -> Self {
        Value::Option(Arc::new(None))
    }

    /// Create an immutable reference to `value`
    pub fn reference(value: Value) -> Self {
        Value::Ref(ValueRef::new(value))
    }

    /// Create a new addressable slot holding `value`
    pub fn slot(value: Value) -> Self {
        Value::RefMut(ValueRefMut::new(value))
    }

    /// Whether this value can be mocked in place.
    pub fn is_addressable(&self) -> bool {
        matches!(self, Value::RefMut(_))
    }

    /// The string inside a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The slot behind a `RefMut`.
    pub fn as_slot(&self) -> Option<&ValueRefMut> {
        match self {
            Value::RefMut(r) => Some(r),
            _ => None,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Value::structure(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::vec(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        Value::Option(Arc::new(opt.map(Into::into)))
    }
}
