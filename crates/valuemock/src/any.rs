//! Type-erased mocks over arbitrary Rust types
//!
//! [`AnyMock`] hides the target's type behind the [`ErasedTarget`]
//! capability trait. Replacements are accepted as any `'static` value and
//! checked against the target's `TypeId` at run time, so a single call site
//! can drive mocks of different types.

use std::any::{type_name, Any};

use tracing::{debug, warn};

use crate::error::{MockError, Result};

/// Capability object for a captured target of some erased type.
///
/// Implementations own the snapshot of the original value and hold the only
/// handle to the target.
pub trait ErasedTarget {
    /// Name of the target's type, for messages.
    fn type_name(&self) -> &'static str;

    /// Whether `value` has exactly the target's type.
    fn type_matches(&self, value: &dyn Any) -> bool;

    /// Write `value` into the target, or hand it back untouched if its type
    /// does not match.
    fn overwrite(&mut self, value: Box<dyn Any>) -> std::result::Result<(), Box<dyn Any>>;

    /// Write the zero value of the target's type into the target.
    fn zero(&mut self) -> Result<()>;

    /// Copy the snapshot back into the target.
    fn restore(&mut self);

    /// Current value of the target.
    fn target(&self) -> &dyn Any;

    /// The snapshot taken at construction.
    fn original(&self) -> &dyn Any;
}

/// A `&mut T` target together with its snapshot.
struct Captured<'a, T> {
    target: &'a mut T,
    original: T,
    zero: Option<fn() -> T>,
}

impl<'a, T: Any + Clone> Captured<'a, T> {
    fn new(target: &'a mut T, zero: Option<fn() -> T>) -> Self {
        let original = target.clone();
        Self {
            target,
            original,
            zero,
        }
    }
}

impl<T: Any + Clone> ErasedTarget for Captured<'_, T> {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn type_matches(&self, value: &dyn Any) -> bool {
        value.is::<T>()
    }

    fn overwrite(&mut self, value: Box<dyn Any>) -> std::result::Result<(), Box<dyn Any>> {
        let value = value.downcast::<T>()?;
        *self.target = *value;
        Ok(())
    }

    fn zero(&mut self) -> Result<()> {
        let zero = self.zero.ok_or_else(|| MockError::NoZeroValue {
            type_name: type_name::<T>().to_string(),
        })?;
        *self.target = zero();
        Ok(())
    }

    fn restore(&mut self) {
        *self.target = self.original.clone();
    }

    fn target(&self) -> &dyn Any {
        &*self.target
    }

    fn original(&self) -> &dyn Any {
        &self.original
    }
}

/// A value mock whose target type is only known at run time.
///
/// # Example
///
/// ```
/// use valuemock::{AnyMock, MockError};
///
/// let mut endpoint = String::from("https://prod.example.org");
/// {
///     let mut mock = AnyMock::new(&mut endpoint);
///     mock.replace(String::from("http://localhost:8080")).unwrap();
///     assert_eq!(
///         mock.target::<String>().map(String::as_str),
///         Some("http://localhost:8080")
///     );
///
///     let err = mock.replace(8080u16).unwrap_err();
///     assert!(matches!(err, MockError::TypeMismatch { .. }));
/// }
/// assert_eq!(endpoint, "https://prod.example.org");
/// ```
pub struct AnyMock<'a> {
    inner: Box<dyn ErasedTarget + 'a>,
    replaced: bool,
    restore_on_drop: bool,
}

impl<'a> AnyMock<'a> {
    /// Capture `target`. `T::default()` is registered as its zero value.
    pub fn new<T: Any + Clone + Default>(target: &'a mut T) -> Self {
        Self::from_target(Captured::new(target, Some(T::default as fn() -> T)))
    }

    /// Capture a target whose type has no `Default`. Replacing such a
    /// target with "no value" fails with [`MockError::NoZeroValue`].
    pub fn without_default<T: Any + Clone>(target: &'a mut T) -> Self {
        Self::from_target(Captured::new(target, None))
    }

    /// Wrap a custom [`ErasedTarget`].
    pub fn from_target(target: impl ErasedTarget + 'a) -> Self {
        debug!(type_name = target.type_name(), "created erased value mock");
        Self {
            inner: Box::new(target),
            replaced: false,
            restore_on_drop: true,
        }
    }

    /// Capture `target` and immediately replace it with `value`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `V` is not `T`. No mock is produced and the target
    /// keeps its value.
    pub fn with_value<T, V>(target: &'a mut T, value: V) -> Result<Self>
    where
        T: Any + Clone + Default,
        V: Any,
    {
        let mut mock = Self::new(target);
        mock.replace(value)?;
        Ok(mock)
    }

    /// Overwrite the target with `value`.
    ///
    /// `V` must be exactly the target's type. References, boxes and other
    /// wrappers around that type are rejected, as is a `Box<dyn Any>` (use
    /// [`replace_boxed`](Self::replace_boxed) for already-boxed values).
    ///
    /// # Errors
    ///
    /// `TypeMismatch`; the target is left unchanged.
    pub fn replace<V: Any>(&mut self, value: V) -> Result<()> {
        self.overwrite(Box::new(value), type_name::<V>())
    }

    /// Overwrite the target with a boxed value, or with the zero value of
    /// the target's type when `None`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for a value of another type, `NoZeroValue` for `None`
    /// on a target built with [`without_default`](Self::without_default).
    pub fn replace_boxed(&mut self, value: Option<Box<dyn Any>>) -> Result<()> {
        match value {
            Some(value) => self.overwrite(value, "a value of another type"),
            None => self.replace_with_zero(),
        }
    }

    /// Overwrite the target with the zero value of its type.
    pub fn replace_with_zero(&mut self) -> Result<()> {
        self.inner.zero()?;
        self.replaced = true;
        debug!(type_name = self.inner.type_name(), "replaced mocked value with zero");
        Ok(())
    }

    fn overwrite(&mut self, value: Box<dyn Any>, got: &str) -> Result<()> {
        if self.inner.overwrite(value).is_err() {
            warn!(
                expected = self.inner.type_name(),
                got, "rejected replacement of mocked value"
            );
            return Err(MockError::type_mismatch(self.inner.type_name(), got));
        }
        self.replaced = true;
        debug!(type_name = self.inner.type_name(), "replaced mocked value");
        Ok(())
    }

    /// Copy the original back into the target.
    pub fn restore(&mut self) {
        self.inner.restore();
        self.replaced = false;
        debug!(type_name = self.inner.type_name(), "restored mocked value");
    }

    /// Current value of the target, if it is a `U`.
    pub fn target<U: Any>(&self) -> Option<&U> {
        self.inner.target().downcast_ref()
    }

    /// The value captured at construction, if it is a `U`.
    pub fn original<U: Any>(&self) -> Option<&U> {
        self.inner.original().downcast_ref()
    }

    /// Name of the target's type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Whether `value` would be accepted by [`replace_boxed`](Self::replace_boxed).
    pub fn accepts(&self, value: &dyn Any) -> bool {
        self.inner.type_matches(value)
    }

    /// Whether a replacement is in effect.
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    /// Release the target without restoring it.
    pub fn persist(mut self) {
        self.restore_on_drop = false;
        debug!(type_name = self.inner.type_name(), "persisted mocked value");
    }
}

impl Drop for AnyMock<'_> {
    fn drop(&mut self) {
        if self.restore_on_drop {
            self.restore();
        }
    }
}

impl std::fmt::Debug for AnyMock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyMock")
            .field("type_name", &self.inner.type_name())
            .field("replaced", &self.replaced)
            .finish()
    }
}
