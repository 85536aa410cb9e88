//! Type inference and unification

use std::fmt;

use super::{Value, ValueType};
use crate::error::{MockError, Result};

impl ValueType {
    /// Merge two descriptions of the same type, filling the `Unknown` parts of
    /// either side from the other.
    ///
    /// Returns `None` when the two describe different types.
    pub fn unify(&self, other: &ValueType) -> Option<ValueType> {
        let merged = match (self, other) {
            (ValueType::Unknown, t) | (t, ValueType::Unknown) => t.clone(),
            (ValueType::Vec(a), ValueType::Vec(b)) => ValueType::Vec(Box::new(a.unify(b)?)),
            (ValueType::Option(a), ValueType::Option(b)) => {
                ValueType::Option(Box::new(a.unify(b)?))
            }
            (ValueType::Ref(a), ValueType::Ref(b)) => ValueType::Ref(Box::new(a.unify(b)?)),
            (ValueType::RefMut(a), ValueType::RefMut(b)) => {
                ValueType::RefMut(Box::new(a.unify(b)?))
            }
            (ValueType::Array(a, n), ValueType::Array(b, m)) if n == m => {
                ValueType::Array(Box::new(a.unify(b)?), *n)
            }
            (ValueType::Tuple(a), ValueType::Tuple(b)) if a.len() == b.len() => ValueType::Tuple(
                a.iter()
                    .zip(b)
                    .map(|(x, y)| x.unify(y))
                    .collect::<Option<Vec<_>>>()?,
            ),
            (
                ValueType::Struct {
                    name,
                    tuple,
                    fields,
                },
                ValueType::Struct {
                    name: other_name,
                    tuple: other_tuple,
                    fields: other_fields,
                },
            ) if name == other_name && tuple == other_tuple && fields.len() == other_fields.len() => {
                let fields = fields
                    .iter()
                    .zip(other_fields)
                    .map(|((a, x), (b, y))| {
                        if a == b {
                            Some((a.clone(), x.unify(y)?))
                        } else {
                            None
                        }
                    })
                    .collect::<Option<Vec<_>>>()?;
                ValueType::Struct {
                    name: name.clone(),
                    tuple: *tuple,
                    fields,
                }
            }
            _ if self == other => self.clone(),
            _ => return None,
        };
        Some(merged)
    }

    /// Whether `value` has this type, checking every element of every
    /// collection inside it.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Unknown, _) => true,
            (ValueType::Vec(elem), Value::Vec(items)) => items.iter().all(|v| elem.admits(v)),
            (ValueType::Array(elem, len), Value::Array(items)) => {
                items.len() == *len && items.iter().all(|v| elem.admits(v))
            }
            (ValueType::Tuple(types), Value::Tuple(items)) => {
                types.len() == items.len() && types.iter().zip(items.iter()).all(|(t, v)| t.admits(v))
            }
            (ValueType::Option(inner), Value::Option(opt)) => {
                (**opt).as_ref().map_or(true, |v| inner.admits(v))
            }
            (
                ValueType::Struct {
                    name,
                    tuple,
                    fields,
                },
                Value::Struct(s),
            ) => {
                *name == s.type_name
                    && *tuple == s.is_tuple_struct
                    && fields.len() == s.fields.len()
                    && fields
                        .iter()
                        .zip(s.fields.iter())
                        .all(|((a, t), (b, v))| a == b && t.admits(v))
            }
            (ValueType::Ref(inner), Value::Ref(r)) => inner.admits(&r.value),
            // A slot's contents are checked when they are written.
            (ValueType::RefMut(inner), Value::RefMut(r)) => inner.unify(&r.value_type()).is_some(),
            _ => *self == value.value_type(),
        }
    }
}

impl Value {
    /// The type of this value.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if a collection somewhere inside mixes element types.
    pub fn checked_type(&self) -> Result<ValueType> {
        let value_type = self.value_type();
        if value_type.admits(self) {
            Ok(value_type)
        } else {
            Err(MockError::type_mismatch(&value_type, format!("{:?}", self)))
        }
    }
}

pub(super) fn element_type(items: &[Value]) -> ValueType {
    items.iter().fold(ValueType::Unknown, |acc, item| {
        acc.unify(&item.value_type()).unwrap_or(acc)
    })
}

pub(super) fn write_tuple(f: &mut fmt::Formatter<'_>, types: &[ValueType]) -> fmt::Result {
    write!(f, "(")?;
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", t)?;
    }
    if types.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, ")")
}

pub(super) fn write_struct(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    tuple: bool,
    fields: &[(String, ValueType)],
) -> fmt::Result {
    write!(f, "{}", name)?;
    if fields.is_empty() {
        return Ok(());
    }
    let (open, close) = if tuple { ("(", ")") } else { (" { ", " }") };
    write!(f, "{}", open)?;
    for (i, (field, t)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if tuple {
            write!(f, "{}", t)?;
        } else {
            write!(f, "{}: {}", field, t)?;
        }
    }
    write!(f, "{}", close)
}
