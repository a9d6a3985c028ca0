//! Void Value - the dynamic value model of the VoidScript runtime.
//!
//! # Architecture
//!
//! - [`ValueType`]: the runtime type tag
//! - [`Value`]: owned tagged union with an independent null flag; `Clone`
//!   deep-copies
//! - [`ValuePtr`]: shared handle; `Clone` aliases, `deep_clone` copies
//! - [`ObjectMap`]: key/value storage behind `object` and `class` values
//! - [`HandleArena`] / [`NativeHandle`]: native state referenced from
//!   instances by generation-checked handle
//! - [`RuntimeError`]: the error type shared by every runtime layer

pub mod errors;
mod handle;
mod stack;
mod value;
mod value_type;

pub use errors::{RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use handle::{HandleArena, NativeHandle, HANDLE_KEY};
pub use stack::ensure_sufficient_stack;
pub use value::{
    array_items, deep_clone_map, object_from_pairs, ObjectMap, Payload, Value, ValueData,
    ValuePtr, CLASS_KEY,
};
pub use value_type::ValueType;
