//! # valuemock
//!
//! Swap the value behind a variable for the duration of a test, then put the
//! exact original back.
//!
//! A mock is constructed against a reference to some storage location. It
//! snapshots the value held there, lets the test [`replace`](ValueMock::replace)
//! it any number of times, and [`restore`](ValueMock::restore)s the snapshot
//! afterwards. Only data values are mocked, never behaviour.
//!
//! ## Flavours
//!
//! - [`ValueMock`]: statically typed, borrows the target exclusively. Type
//!   mismatches are compile errors.
//! - [`AnyMock`]: erased over any `'static + Clone` Rust type. Replacements
//!   arrive as `Box<dyn Any>` and are checked against the target's `TypeId`.
//! - [`DynMock`]: works on the [`Value`] tagged union. The target must be a
//!   [`Value::RefMut`] slot; replacements are checked against the slot's
//!   [`ValueType`].
//! - [`Globals`]: a registry of named slots standing in for process-wide
//!   mutable state, with [`DynMock`]s handed out by name.
//!
//! All three mocks restore their target when dropped unless `persist` is
//! called.
//!
//! ## Example
//!
//! ```
//! use valuemock::ValueMock;
//!
//! let mut greeting = String::from("original value");
//! {
//!     let mut mock = ValueMock::new(&mut greeting);
//!     mock.replace(String::from("mock value"));
//!     assert_eq!(mock.target(), "mock value");
//!     assert_eq!(mock.original(), "original value");
//!     mock.restore();
//! }
//! assert_eq!(greeting, "original value");
//! ```
//!
//! ## Concurrency
//!
//! None of the mocks provide isolation. When the target is shared (a
//! [`Globals`] slot, a static behind a lock), callers must keep other code
//! away from it between `replace` and `restore`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod any;
pub mod dynamic;
pub mod error;
pub mod globals;
pub mod mock;
pub mod value;

// Re-export main types
pub use any::{AnyMock, ErasedTarget};
pub use dynamic::DynMock;
pub use error::{MockError, Result};
pub use globals::Globals;
pub use mock::ValueMock;
pub use value::{StructValue, Value, ValueRef, ValueRefMut, ValueType};

/// valuemock version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
