//! Runtime values for slot-based mocking
//!
//! [`Value`] is the data a [`DynMock`](crate::DynMock) or a
//! [`Globals`](crate::Globals) entry holds, and [`ValueType`] is the shape a
//! replacement has to match. Scalars are listed once in the table at the
//! bottom of this file; everything that maps over them is generated from it.

mod compound;
mod construct;
mod kind;
mod refs;

pub use compound::StructValue;
pub use refs::{ValueRef, ValueRefMut};

use std::fmt;
use std::sync::Arc;

macro_rules! values {
    ($($variant:ident($ty:ty) = $zero:expr),* $(,)?) => {
        /// A runtime value.
        ///
        /// Compounds sit behind an `Arc` and are never mutated in place, so a
        /// clone is an independent snapshot. The exception is
        /// [`Value::RefMut`]: a clone shares the slot.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Value {
            /// `()`
            Unit,
            $(
                #[doc = concat!("`", stringify!($ty), "`")]
                $variant($ty),
            )*
            /// `String`
            String(Arc<String>),
            /// `Vec<T>`, every element of one type
            Vec(Arc<Vec<Value>>),
            /// `(A, B, ..)`
            Tuple(Arc<Vec<Value>>),
            /// `[T; N]`
            Array(Arc<Vec<Value>>),
            /// A named or tuple struct
            Struct(Arc<StructValue>),
            /// `Option<T>`
            Option(Arc<Option<Value>>),
            /// `&T`
            Ref(ValueRef),
            /// `&mut T`: an addressable slot
            RefMut(ValueRefMut),
        }

        /// The type of a [`Value`].
        ///
        /// Types are structural: element types of collections, field names
        /// and types of structs and the pointee of references all take part
        /// in a comparison. [`ValueType::Unknown`] stands for the part of a
        /// type a value could not show, such as the element type of an empty
        /// `Vec`; [`unify`](ValueType::unify) fills it in later.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum ValueType {
            /// `()`
            Unit,
            $(
                #[doc = concat!("`", stringify!($ty), "`")]
                $variant,
            )*
            /// `String`
            String,
            /// `Vec<T>`
            Vec(Box<ValueType>),
            /// `(A, B, ..)`
            Tuple(Vec<ValueType>),
            /// `[T; N]`
            Array(Box<ValueType>, usize),
            /// A struct type
            Struct {
                /// Type name
                name: String,
                /// Whether fields are positional
                tuple: bool,
                /// Field names and types, in definition order
                fields: Vec<(String, ValueType)>,
            },
            /// `Option<T>`
            Option(Box<ValueType>),
            /// `&T`
            Ref(Box<ValueType>),
            /// `&mut T`
            RefMut(Box<ValueType>),
            /// Not known yet: the element type of an empty `Vec` or array, or
            /// the payload of `None`
            Unknown,
        }

        impl Value {
            /// The type of this value.
            ///
            /// A collection's element type is unified across its elements;
            /// where they disagree the first one wins, and
            /// [`checked_type`](Self::checked_type) reports the value as
            /// ill-typed.
            pub fn value_type(&self) -> ValueType {
                match self {
                    Value::Unit => ValueType::Unit,
                    $(Value::$variant(_) => ValueType::$variant,)*
                    Value::String(_) => ValueType::String,
                    Value::Vec(items) => ValueType::Vec(Box::new(kind::element_type(items))),
                    Value::Tuple(items) => {
                        ValueType::Tuple(items.iter().map(Value::value_type).collect())
                    }
                    Value::Array(items) => {
                        ValueType::Array(Box::new(kind::element_type(items)), items.len())
                    }
                    Value::Struct(s) => s.value_type(),
                    Value::Option(opt) => ValueType::Option(Box::new(
                        (**opt).as_ref().map_or(ValueType::Unknown, Value::value_type),
                    )),
                    Value::Ref(r) => ValueType::Ref(Box::new(r.value.value_type())),
                    Value::RefMut(r) => ValueType::RefMut(Box::new(r.value_type())),
                }
            }

            /// The zero value of this value's type.
            ///
            /// Numbers become zero, `bool` false, `char` `'\0'`, strings and
            /// vecs empty, options `None`. Tuples, arrays and structs keep
            /// their shape with every element zeroed. References point at a
            /// fresh zero of their pointee; a zeroed `RefMut` is a new slot.
            pub fn zero_like(&self) -> Value {
                match self {
                    Value::Unit => Value::Unit,
                    $(Value::$variant(_) => Value::$variant($zero),)*
                    Value::String(_) => Value::string(""),
                    Value::Vec(_) => Value::vec(Vec::new()),
                    Value::Tuple(items) => Value::tuple(items.iter().map(Value::zero_like).collect()),
                    Value::Array(items) => Value::array(items.iter().map(Value::zero_like).collect()),
                    Value::Struct(s) => Value::structure(s.zeroed()),
                    Value::Option(_) => Value::none(),
                    Value::Ref(r) => Value::reference(r.value.zero_like()),
                    Value::RefMut(r) => Value::RefMut(r.zeroed()),
                }
            }
        }

        impl fmt::Display for ValueType {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    ValueType::Unit => f.write_str("()"),
                    $(ValueType::$variant => f.write_str(stringify!($ty)),)*
                    ValueType::String => f.write_str("String"),
                    ValueType::Vec(elem) => write!(f, "Vec<{}>", elem),
                    ValueType::Tuple(types) => kind::write_tuple(f, types),
                    ValueType::Array(elem, len) => write!(f, "[{}; {}]", elem, len),
                    ValueType::Struct { name, tuple, fields } => {
                        kind::write_struct(f, name, *tuple, fields)
                    }
                    ValueType::Option(inner) => write!(f, "Option<{}>", inner),
                    ValueType::Ref(inner) => write!(f, "&{}", inner),
                    ValueType::RefMut(inner) => write!(f, "&mut {}", inner),
                    ValueType::Unknown => f.write_str("_"),
                }
            }
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

values! {
    Bool(bool) = false,
    Char(char) = '\0',
    I8(i8) = 0,
    I16(i16) = 0,
    I32(i32) = 0,
    I64(i64) = 0,
    I128(i128) = 0,
    Isize(isize) = 0,
    U8(u8) = 0,
    U16(u16) = 0,
    U32(u32) = 0,
    U64(u64) = 0,
    U128(u128) = 0,
    Usize(usize) = 0,
    F32(f32) = 0.0,
    F64(f64) = 0.0,
}
