//! Struct values

use indexmap::IndexMap;

use super::{Value, ValueType};

/// A struct instance.
///
/// Fields keep definition order, which is also the order their types are
/// compared in.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    /// The struct's type name (e.g., "Config", "Endpoint")
    pub type_name: String,

    /// Fields in definition order; a tuple struct uses "0", "1", ...
    pub fields: IndexMap<String, Value>,

    /// Whether fields are positional
    pub is_tuple_struct: bool,
}

impl StructValue {
    /// Start a struct with named fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
            is_tuple_struct: false,
        }
    }

    /// Start a tuple struct.
    pub fn tuple(type_name: impl Into<String>) -> Self {
        Self {
            is_tuple_struct: true,
            ..Self::new(type_name)
        }
    }

    /// Add a field (builder pattern)
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// The struct's type: name, kind and every field's type.
    pub fn value_type(&self) -> ValueType {
        ValueType::Struct {
            name: self.type_name.clone(),
            tuple: self.is_tuple_struct,
            fields: self
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.value_type()))
                .collect(),
        }
    }

    /// Same struct type, every field set to its zero value.
    pub fn zeroed(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), v.zero_like()))
                .collect(),
            ..self.clone()
        }
    }
}
