//! References: the addressable slots mocks operate on

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Value, ValueType};
use crate::error::{MockError, Result};

/// An immutable reference to a value.
///
/// Writing a `Ref` into a slot that holds a `T` is how "a reference to a `T`"
/// is expressed, and is always rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRef {
    /// The referenced value
    pub value: Arc<Value>,
}

impl ValueRef {
    /// Create a reference to a new value.
    pub fn new(value: Value) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

struct Slot {
    value: Value,
    value_type: ValueType,
}

/// A typed, shared storage location.
///
/// The slot's type is taken from the value it is created with and never
/// changes; [`set`](Self::set) may only fill in parts the first value left
/// [`Unknown`](ValueType::Unknown). The check and the write happen under
/// one lock.
///
/// Clones share the slot, and two handles compare equal only when they are
/// the same slot. Lock poisoning is ignored.
#[derive(Clone)]
pub struct ValueRefMut {
    slot: Arc<RwLock<Slot>>,
}

impl ValueRefMut {
    /// Create a new slot holding `value`, typed by it.
    pub fn new(value: Value) -> Self {
        let value_type = value.value_type();
        Self::typed(value, value_type)
    }

    fn typed(value: Value, value_type: ValueType) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot { value, value_type })),
        }
    }

    /// Snapshot the current contents.
    pub fn get(&self) -> Value {
        self.read().value.clone()
    }

    /// The slot's type.
    pub fn value_type(&self) -> ValueType {
        self.read().value_type.clone()
    }

    /// Write `value`, returning the previous contents.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `value` does not have the slot's type. The slot is
    /// left unchanged.
    pub fn set(&self, value: Value) -> Result<Value> {
        // Typed before locking: `value` may hold a handle to this slot.
        let got = value.checked_type()?;
        let mut slot = self.write();
        let refined = slot
            .value_type
            .unify(&got)
            .ok_or_else(|| MockError::type_mismatch(&slot.value_type, &got))?;
        slot.value_type = refined;
        Ok(std::mem::replace(&mut slot.value, value))
    }

    /// Write without a type check. Only for values known to fit, such as a
    /// snapshot of this slot or a zero of its type.
    pub(crate) fn overwrite(&self, value: Value) -> Value {
        std::mem::replace(&mut self.write().value, value)
    }

    /// A new slot of the same type holding the zero value.
    pub(crate) fn zeroed(&self) -> Self {
        let (value, value_type) = {
            let slot = self.read();
            (slot.value.clone(), slot.value_type.clone())
        };
        Self::typed(value.zero_like(), value_type)
    }

    /// Whether two handles point at the same slot.
    pub fn ptr_eq(&self, other: &ValueRefMut) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    fn read(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for ValueRefMut {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Never prints the contents: a slot may contain a handle to itself.
impl fmt::Debug for ValueRefMut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<slot: {}>", self.value_type())
    }
}
