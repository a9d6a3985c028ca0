//! Dynamic value representation.
//!
//! [`Value`] is an owned tagged union plus an independent null flag. Its
//! `Clone` is always a deep copy. Sharing goes through [`ValuePtr`], whose
//! `Clone` aliases the same allocation; the two behaviours are chosen by
//! type, never by convention.
//!
//! # Null
//!
//! A value is logically null when its null flag is set or it stores no
//! payload. The tag survives nulling, so a null `string` is distinct from
//! an empty one.

mod convert;
mod ptr;

pub use convert::array_items;
pub use ptr::ValuePtr;

use ptr::{CopyMemo, SeenPairs};

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{null_value, type_mismatch, RuntimeError, RuntimeResult};
use crate::value_type::ValueType;

/// Key/value representation of `object` and `class` values.
///
/// Keys are unique; iteration order is by key.
pub type ObjectMap = BTreeMap<String, ValuePtr>;

/// Key naming the class of a `class` value.
pub const CLASS_KEY: &str = "__class__";

/// Stored data of a non-null value.
#[derive(Debug)]
pub enum Payload {
    Int(i64),
    Double(f64),
    Float(f32),
    Str(String),
    Bool(bool),
    Map(ObjectMap),
}

impl Payload {
    fn deep_clone(&self, copies: &mut CopyMemo) -> Payload {
        match self {
            Payload::Int(v) => Payload::Int(*v),
            Payload::Double(v) => Payload::Double(*v),
            Payload::Float(v) => Payload::Float(*v),
            Payload::Str(v) => Payload::Str(v.clone()),
            Payload::Bool(v) => Payload::Bool(*v),
            Payload::Map(map) => Payload::Map(clone_map_with(map, copies)),
        }
    }

    fn eq_with(&self, other: &Payload, seen: &mut SeenPairs) -> bool {
        match (self, other) {
            (Payload::Int(a), Payload::Int(b)) => a == b,
            (Payload::Double(a), Payload::Double(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => a == b,
            (Payload::Str(a), Payload::Str(b)) => a == b,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Map(a), Payload::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.eq_with(vb, seen))
            }
            _ => false,
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut SeenPairs::default())
    }
}

/// Rust types that can be stored in and read from a [`Value`].
pub trait ValueData: Sized {
    /// Tag assigned by [`Value::set`].
    const TYPE: ValueType;

    fn into_payload(self) -> Payload;
    fn from_payload(payload: &Payload) -> Option<&Self>;
    fn from_payload_mut(payload: &mut Payload) -> Option<&mut Self>;
}

macro_rules! impl_value_data {
    ($($ty:ty => $tag:ident, $variant:ident;)*) => {
        $(
            impl ValueData for $ty {
                const TYPE: ValueType = ValueType::$tag;

                #[inline]
                fn into_payload(self) -> Payload {
                    Payload::$variant(self)
                }

                #[inline]
                fn from_payload(payload: &Payload) -> Option<&Self> {
                    match payload {
                        Payload::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn from_payload_mut(payload: &mut Payload) -> Option<&mut Self> {
                    match payload {
                        Payload::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_value_data! {
    i64 => Integer, Int;
    f64 => Double, Double;
    f32 => Float, Float;
    String => String, Str;
    bool => Boolean, Bool;
    ObjectMap => Object, Map;
}

/// A dynamically typed script value.
#[derive(Debug)]
pub struct Value {
    ty: ValueType,
    data: Option<Payload>,
    null: bool,
}

impl Value {
    /// Create a value holding `data`, tagged by its Rust type.
    pub fn new<T: ValueData>(data: T) -> Self {
        Value {
            ty: T::TYPE,
            data: Some(data.into_payload()),
            null: false,
        }
    }

    /// The untyped null value.
    pub fn null() -> Self {
        Value {
            ty: ValueType::Null,
            data: None,
            null: true,
        }
    }

    /// Placeholder for a declared but never assigned slot.
    pub fn undefined() -> Self {
        Value {
            ty: ValueType::Undefined,
            data: None,
            null: true,
        }
    }

    /// A typed null.
    ///
    /// `string`, `object` and `class` do not produce a null: they produce a
    /// non-null empty string or empty map carrying that tag.
    pub fn null_of(ty: ValueType) -> Self {
        match ty {
            ValueType::String => Value::new(String::new()),
            ValueType::Object => Value::new(ObjectMap::new()),
            ValueType::Class => Value::class(ObjectMap::new()),
            ty => Value {
                ty,
                data: None,
                null: true,
            },
        }
    }

    /// A `class` value over `map`.
    pub fn class(map: ObjectMap) -> Self {
        Value {
            ty: ValueType::Class,
            data: Some(Payload::Map(map)),
            null: false,
        }
    }

    /// An enumerator with the given ordinal.
    pub fn enumerator(ordinal: i64) -> Self {
        Value {
            ty: ValueType::Enum,
            data: Some(Payload::Int(ordinal)),
            null: false,
        }
    }

    /// Store `data`, retag to its type and clear the null flag.
    pub fn set<T: ValueData>(&mut self, data: T) {
        self.data = Some(data.into_payload());
        self.ty = T::TYPE;
        self.null = false;
    }

    /// Borrow the stored data as `T`.
    ///
    /// Fails with `TypeMismatch` when the tag's storage is not `T`, and with
    /// `NullValue` when the tag matches but nothing is stored.
    pub fn get<T: ValueData>(&self) -> RuntimeResult<&T> {
        self.check_storage::<T>()?;
        self.data
            .as_ref()
            .and_then(T::from_payload)
            .ok_or_else(|| null_value(self.ty))
    }

    /// Mutable counterpart of [`Value::get`].
    pub fn get_mut<T: ValueData>(&mut self) -> RuntimeResult<&mut T> {
        self.check_storage::<T>()?;
        let ty = self.ty;
        self.data
            .as_mut()
            .and_then(T::from_payload_mut)
            .ok_or_else(|| null_value(ty))
    }

    fn check_storage<T: ValueData>(&self) -> RuntimeResult<()> {
        if self.ty.storage() == T::TYPE.storage() {
            Ok(())
        } else {
            Err(type_mismatch(T::TYPE, self.ty))
        }
    }

    /// Current tag, regardless of the null flag.
    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.null || self.data.is_none()
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    /// Retag a null value. Non-null values keep their type.
    pub fn set_type(&mut self, ty: ValueType) -> RuntimeResult<()> {
        if !self.is_null() {
            return Err(RuntimeError::new(format!(
                "cannot retag a non-null {} value as {ty}",
                self.ty
            )));
        }
        self.ty = ty;
        Ok(())
    }

    /// Drop the payload and mark the value null, keeping its tag.
    pub fn set_null(&mut self) {
        self.data = None;
        self.null = true;
    }

    /// Retag an `object` as `class` in place.
    pub(crate) fn mark_class(&mut self) {
        if self.ty == ValueType::Object {
            self.ty = ValueType::Class;
        }
    }

    /// The object map of a non-null `object` or `class` value.
    pub fn as_map(&self) -> Option<&ObjectMap> {
        match &self.data {
            Some(Payload::Map(map)) if !self.null => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ObjectMap> {
        match &mut self.data {
            Some(Payload::Map(map)) if !self.null => Some(map),
            _ => None,
        }
    }

    /// Truthiness used by conditionals.
    ///
    /// Numbers and enumerators are true when non-zero, strings and maps when
    /// non-empty. Reading a null value fails.
    pub fn to_bool(&self) -> RuntimeResult<bool> {
        if self.is_null() {
            return Err(null_value(self.ty));
        }
        match &self.data {
            Some(Payload::Bool(b)) => Ok(*b),
            Some(Payload::Int(i)) => Ok(*i != 0),
            Some(Payload::Double(d)) => Ok(*d != 0.0),
            Some(Payload::Float(f)) => Ok(*f != 0.0),
            Some(Payload::Str(s)) => Ok(!s.is_empty()),
            Some(Payload::Map(map)) => Ok(!map.is_empty()),
            None => Err(null_value(self.ty)),
        }
    }

    fn class_label(map: &ObjectMap) -> String {
        let Some(entry) = map.get(CLASS_KEY) else {
            return "[Class Object]".to_string();
        };
        let Ok(entry) = entry.try_borrow() else {
            return "[Invalid Class Object]".to_string();
        };
        match entry.get::<String>() {
            Ok(name) => format!("[Class {name}]"),
            Err(_) if entry.value_type() == ValueType::String => {
                "[Invalid Class Object]".to_string()
            }
            Err(_) => "[Class Object]".to_string(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl Value {
    fn clone_with(&self, copies: &mut CopyMemo) -> Value {
        Value {
            ty: self.ty,
            data: self.data.as_ref().map(|data| data.deep_clone(copies)),
            null: self.null,
        }
    }

    fn eq_with(&self, other: &Value, seen: &mut SeenPairs) -> bool {
        if self.ty != other.ty || self.is_null() != other.is_null() {
            return false;
        }
        if self.is_null() {
            return true;
        }
        match (&self.data, &other.data) {
            (Some(a), Some(b)) => a.eq_with(b, seen),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Clone for Value {
    /// Deep copy: nested maps are cloned entry by entry. A map reachable
    /// from itself is copied once, so the copy has the same shape.
    fn clone(&self) -> Self {
        self.clone_with(&mut CopyMemo::default())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut SeenPairs::default())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        match &self.data {
            Some(Payload::Int(i)) => write!(f, "{i}"),
            Some(Payload::Double(d)) => write!(f, "{d:.6}"),
            Some(Payload::Float(v)) => write!(f, "{v:.6}"),
            Some(Payload::Str(s)) => f.write_str(s),
            Some(Payload::Bool(b)) => f.write_str(if *b { "true" } else { "false" }),
            Some(Payload::Map(map)) if self.ty == ValueType::Class => {
                f.write_str(&Value::class_label(map))
            }
            Some(Payload::Map(_)) => f.write_str("[Object]"),
            None => f.write_str("null"),
        }
    }
}

/// Deep copy of every entry in `map`.
pub fn deep_clone_map(map: &ObjectMap) -> ObjectMap {
    clone_map_with(map, &mut CopyMemo::default())
}

fn clone_map_with(map: &ObjectMap, copies: &mut CopyMemo) -> ObjectMap {
    map.iter()
        .map(|(key, value)| (key.clone(), value.deep_clone_with(copies)))
        .collect()
}

/// Build an object map from key/value pairs.
pub fn object_from_pairs<K, V, I>(pairs: I) -> ObjectMap
where
    K: Into<String>,
    V: Into<ValuePtr>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
