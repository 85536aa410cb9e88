//! Mocks over [`Value`] slots
//!
//! A [`DynMock`] is constructed from a [`Value`] that must be an addressable
//! slot ([`Value::RefMut`]). Every replacement goes through the slot's type
//! check, so the usual misuse cases surface as errors at run time:
//!
//! - passing a plain value instead of a slot is `NotAddressable`
//! - replacing with a value of another type is `TypeMismatch`, down to
//!   element and field types
//! - replacing with a reference to a value of the right type is also
//!   `TypeMismatch`

use tracing::{debug, warn};

use crate::error::{type_name, MockError, Result};
use crate::value::{Value, ValueRefMut, ValueType};

/// A value mock over a shared [`Value`] slot.
///
/// Unlike [`ValueMock`](crate::ValueMock), the mock does not borrow the
/// target; code under test keeps reading and writing the slot through its own
/// handles while the mock is alive. Dropping the mock restores the slot
/// unless [`persist`](Self::persist) was called.
///
/// # Example
///
/// ```
/// use valuemock::{DynMock, MockError, Value};
///
/// let slot = Value::slot(Value::string("original value"));
/// let mut mock = DynMock::new(slot.clone()).unwrap();
///
/// mock.replace(Some(Value::string("mock value"))).unwrap();
/// assert_eq!(mock.target(), Value::string("mock value"));
///
/// let err = mock.replace(Some(Value::I64(21))).unwrap_err();
/// assert!(matches!(err, MockError::TypeMismatch { .. }));
///
/// mock.restore();
/// assert_eq!(mock.target(), Value::string("original value"));
/// ```
#[derive(Debug)]
pub struct DynMock {
    slot: ValueRefMut,
    original: Value,
    replaced: bool,
    restore_on_drop: bool,
}

impl DynMock {
    /// Capture the slot behind `target`. The slot is not modified.
    ///
    /// # Errors
    ///
    /// `NotAddressable` if `target` is anything other than `Value::RefMut`,
    /// including a `Value::Ref`. No mock is produced.
    pub fn new(target: Value) -> Result<Self> {
        let slot = match target {
            Value::RefMut(slot) => slot,
            other => {
                let got = type_name(&other);
                warn!(got = %got, "refused to mock a non-addressable value");
                return Err(MockError::NotAddressable { got });
            }
        };

        let original = slot.get();
        debug!(value_type = %slot.value_type(), "created dynamic value mock");
        Ok(Self {
            slot,
            original,
            replaced: false,
            restore_on_drop: true,
        })
    }

    /// Capture `target` and immediately replace it with `value`.
    ///
    /// # Errors
    ///
    /// Any error of [`new`](Self::new) or [`replace`](Self::replace). The slot
    /// keeps its value either way.
    pub fn with_value(target: Value, value: Value) -> Result<Self> {
        let mut mock = Self::new(target)?;
        mock.replace(Some(value))?;
        Ok(mock)
    }

    /// Overwrite the slot with `value`, or with the zero value of the slot's
    /// type when `None`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `value` does not have the slot's type; the slot is
    /// left unchanged. `None` never fails.
    pub fn replace(&mut self, value: Option<Value>) -> Result<()> {
        match value {
            Some(value) => {
                if let Err(err) = self.slot.set(value) {
                    warn!(error = %err, "rejected replacement of mocked value");
                    return Err(err);
                }
            }
            None => {
                self.slot.overwrite(self.original.zero_like());
            }
        }

        self.replaced = true;
        debug!(value_type = %self.slot.value_type(), "replaced mocked value");
        Ok(())
    }

    /// Copy the original back into the slot.
    pub fn restore(&mut self) {
        self.slot.overwrite(self.original.clone());
        self.replaced = false;
        debug!(value_type = %self.slot.value_type(), "restored mocked value");
    }

    /// Current contents of the slot.
    pub fn target(&self) -> Value {
        self.slot.get()
    }

    /// The value captured at construction.
    pub fn original(&self) -> &Value {
        &self.original
    }

    /// The slot's type. Parts the original left unknown, like the element
    /// type of an empty `Vec`, are pinned by the first value that shows them.
    pub fn value_type(&self) -> ValueType {
        self.slot.value_type()
    }

    /// Whether a replacement is in effect.
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    /// Release the slot without restoring it.
    pub fn persist(mut self) {
        self.restore_on_drop = false;
        debug!(value_type = %self.slot.value_type(), "persisted mocked value");
    }
}

impl Drop for DynMock {
    fn drop(&mut self) {
        if self.restore_on_drop {
            self.restore();
        }
    }
}
