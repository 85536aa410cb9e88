//! Named process-wide slots
//!
//! [`Globals`] stands in for package-level mutable state: code under test
//! reads and writes values by name, tests mock them by name. Each name maps
//! to one [`ValueRefMut`] slot for the lifetime of the registry, so a mock
//! and the code under test always see the same location.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::dynamic::DynMock;
use crate::error::{MockError, Result};
use crate::value::{Value, ValueRefMut};

/// A concurrent registry of named, typed slots.
///
/// The type of a global is the type of the value it was first defined with;
/// redefinition, [`set`](Self::set) and mocks all enforce it. The registry
/// itself is safe to share between threads, but it does not isolate mocks:
/// two tests mocking the same name at the same time will clobber each other.
///
/// # Example
///
/// ```
/// use std::sync::LazyLock;
/// use valuemock::{Globals, Value};
///
/// static GLOBALS: LazyLock<Globals> = LazyLock::new(|| {
///     let globals = Globals::new();
///     globals
///         .define("api_url", Value::string("https://prod.example.org"))
///         .unwrap();
///     globals
/// });
///
/// {
///     let _mock = GLOBALS
///         .mock_with_value("api_url", Value::string("http://localhost"))
///         .unwrap();
///     assert_eq!(GLOBALS.get("api_url"), Some(Value::string("http://localhost")));
/// }
/// assert_eq!(
///     GLOBALS.get("api_url"),
///     Some(Value::string("https://prod.example.org"))
/// );
/// ```
#[derive(Debug, Default)]
pub struct Globals {
    slots: DashMap<String, ValueRefMut>,
}

impl Globals {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a global, or overwrite the value of an existing one.
    ///
    /// Redefining keeps the existing slot, so outstanding handles and mocks
    /// see the new value.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the global exists and `value` has a different type.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Result<()> {
        let name = name.into();
        match self.slots.entry(name.clone()) {
            Entry::Occupied(entry) => {
                entry.get().set(value)?;
            }
            Entry::Vacant(entry) => {
                entry.insert(ValueRefMut::new(value));
            }
        }
        debug!(name = %name, "defined global");
        Ok(())
    }

    /// Current value of a global.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.slots.get(name).map(|slot| slot.value().get())
    }

    /// Assign to an existing global.
    ///
    /// # Errors
    ///
    /// - `UndefinedGlobal` if the name is unknown
    /// - `TypeMismatch` if `value` has a different type than the global
    pub fn set(&self, name: &str, value: Value) -> Result<()> {
        self.slot_ref(name)?.set(value)?;
        Ok(())
    }

    /// An addressable handle to a global's slot.
    ///
    /// # Errors
    ///
    /// `UndefinedGlobal` if the name is unknown.
    pub fn slot(&self, name: &str) -> Result<Value> {
        self.slot_ref(name).map(Value::RefMut)
    }

    /// Mock a global.
    ///
    /// # Errors
    ///
    /// `UndefinedGlobal` if the name is unknown.
    pub fn mock(&self, name: &str) -> Result<DynMock> {
        debug!(name = %name, "mocking global");
        DynMock::new(self.slot(name)?)
    }

    /// Mock a global and immediately replace its value.
    ///
    /// # Errors
    ///
    /// `UndefinedGlobal` if the name is unknown, `TypeMismatch` if `value`
    /// has a different type than the global.
    pub fn mock_with_value(&self, name: &str, value: Value) -> Result<DynMock> {
        debug!(name = %name, "mocking global");
        DynMock::with_value(self.slot(name)?, value)
    }

    /// Check if a global exists.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Get the number of globals.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All global names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn slot_ref(&self, name: &str) -> Result<ValueRefMut> {
        self.slots
            .get(name)
            .map(|slot| slot.value().clone())
            .ok_or_else(|| MockError::UndefinedGlobal {
                name: name.to_string(),
            })
    }
}
