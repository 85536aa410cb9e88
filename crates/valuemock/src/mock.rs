//! Statically typed value mocks

use std::any::type_name;

use tracing::debug;

/// Replaces the value behind a `&mut T` and puts the original back.
///
/// The exclusive borrow is the handle to the target: nothing else can read or
/// write the variable while the mock is alive, so reads go through
/// [`target`](Self::target). The original value is cloned once, at
/// construction, and never changes afterwards.
///
/// Dropping the mock restores the original unless [`persist`](Self::persist)
/// was called.
///
/// # Example
///
/// ```
/// use valuemock::ValueMock;
///
/// let mut retries: u32 = 3;
/// {
///     let mut mock = ValueMock::with_value(&mut retries, 10);
///     assert_eq!(*mock.target(), 10);
///
///     mock.replace(20);
///     assert_eq!(*mock.target(), 20);
///     assert_eq!(*mock.original(), 3);
/// }
/// assert_eq!(retries, 3);
/// ```
///
/// Only a reference to addressable storage can be mocked; handing over the
/// value itself does not compile:
///
/// ```compile_fail
/// use valuemock::ValueMock;
///
/// let value = String::from("original value");
/// let _mock = ValueMock::new(value);
/// ```
///
/// Nor does a replacement of another type, including a reference to `T`:
///
/// ```compile_fail
/// use valuemock::ValueMock;
///
/// let mut value = String::from("original value");
/// let other = String::from("original value");
/// let mut mock = ValueMock::new(&mut value);
/// mock.replace(&other);
/// ```
#[derive(Debug)]
pub struct ValueMock<'a, T: Clone> {
    target: &'a mut T,
    original: T,
    replaced: bool,
    restore_on_drop: bool,
}

impl<'a, T: Clone> ValueMock<'a, T> {
    /// Capture the current value of `target`. The target is not modified.
    pub fn new(target: &'a mut T) -> Self {
        let original = target.clone();
        debug!(type_name = type_name::<T>(), "created value mock");
        Self {
            target,
            original,
            replaced: false,
            restore_on_drop: true,
        }
    }

    /// Capture `target` and immediately replace it with `value`.
    pub fn with_value(target: &'a mut T, value: T) -> Self {
        let mut mock = Self::new(target);
        mock.replace(value);
        mock
    }

    /// Overwrite the target with `value`. The original is untouched.
    pub fn replace(&mut self, value: T) {
        *self.target = value;
        self.replaced = true;
        debug!(type_name = type_name::<T>(), "replaced mocked value");
    }

    /// Replace with `value`, or with `T::default()` when `None`.
    pub fn replace_with(&mut self, value: Option<T>)
    where
        T: Default,
    {
        self.replace(value.unwrap_or_default());
    }

    /// Overwrite the target with `T::default()`.
    pub fn replace_with_default(&mut self)
    where
        T: Default,
    {
        self.replace(T::default());
    }

    /// Copy the original back into the target. Calling this again is a no-op
    /// in effect.
    pub fn restore(&mut self) {
        *self.target = self.original.clone();
        self.replaced = false;
        debug!(type_name = type_name::<T>(), "restored mocked value");
    }

    /// Current value of the target.
    pub fn target(&self) -> &T {
        &*self.target
    }

    /// The value captured at construction.
    pub fn original(&self) -> &T {
        &self.original
    }

    /// Whether a replacement is in effect since construction or the last
    /// restore.
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    /// Release the target without restoring it; the current replacement
    /// stays installed.
    pub fn persist(mut self) {
        self.restore_on_drop = false;
        debug!(type_name = type_name::<T>(), "persisted mocked value");
    }
}

impl<T: Clone> Drop for ValueMock<'_, T> {
    fn drop(&mut self) {
        if self.restore_on_drop {
            self.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_touch_target() {
        let mut value = String::from("original value");
        let mock = ValueMock::new(&mut value);
        assert_eq!(mock.target(), "original value");
        assert_eq!(mock.original(), "original value");
        assert!(!mock.is_replaced());
    }

    #[test]
    fn test_replace_then_restore() {
        let mut value = String::from("original value");
        let mut mock = ValueMock::new(&mut value);

        mock.replace("mock value".to_string());
        assert_eq!(mock.target(), "mock value");
        assert_eq!(mock.original(), "original value");
        assert!(mock.is_replaced());

        mock.restore();
        assert_eq!(mock.target(), "original value");
        assert!(!mock.is_replaced());
    }

    #[test]
    fn test_replace_with_default() {
        let mut value = String::from("original value");
        let mut mock = ValueMock::new(&mut value);
        mock.replace_with_default();
        assert_eq!(mock.target(), "");
    }

    #[test]
    fn test_replace_with_option() {
        let mut n: i64 = 7;
        let mut mock = ValueMock::new(&mut n);
        mock.replace_with(Some(9));
        assert_eq!(*mock.target(), 9);
        mock.replace_with(None);
        assert_eq!(*mock.target(), 0);
    }

    #[test]
    fn test_drop_restores() {
        let mut value = vec![1, 2, 3];
        {
            let mut mock = ValueMock::new(&mut value);
            mock.replace(vec![]);
        }
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_persist_keeps_replacement() {
        let mut value = 1u8;
        ValueMock::with_value(&mut value, 2).persist();
        assert_eq!(value, 2);
    }
}
