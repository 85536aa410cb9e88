//! Error types for mock construction and replacement
//!
//! Every variant describes a test-authoring mistake, not an environmental
//! failure. Callers are expected to surface them immediately (usually with
//! `?` or `unwrap` in the test body) rather than branch on them.

use thiserror::Error;

use crate::value::Value;

/// Main error type for valuemock operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    /// The mock target is a plain value rather than an addressable slot
    #[error("Cannot mock a non-addressable value of type {got}; pass a mutable reference")]
    NotAddressable {
        /// Type of the value that was passed instead
        got: String,
    },

    /// A replacement value does not have the target's exact type
    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch {
        /// The target's type, fixed at construction
        expected: String,
        /// Type of the rejected replacement
        got: String,
    },

    /// The target type has no registered zero value
    #[error("No zero value registered for {type_name}")]
    NoZeroValue {
        /// The target's type
        type_name: String,
    },

    /// No global with this name has been defined
    #[error("Undefined global: {name}")]
    UndefinedGlobal {
        /// The name that was looked up
        name: String,
    },
}

impl MockError {
    /// Build a `TypeMismatch` from anything displayable.
    pub fn type_mismatch(expected: impl ToString, got: impl ToString) -> Self {
        MockError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}

/// Result type alias for valuemock operations
pub type Result<T> = std::result::Result<T, MockError>;

/// Human-readable type name of a runtime value, as used in error messages.
pub fn type_name(value: &Value) -> String {
    value.value_type().to_string()
}
