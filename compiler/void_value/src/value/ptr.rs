use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::{deep_clone_map, ObjectMap, Value, ValueData};
use crate::errors::{null_value, type_mismatch, RuntimeResult};
use crate::stack::ensure_sufficient_stack;
use crate::value_type::ValueType;

/// Copies made so far during one deep clone, keyed by source allocation.
pub(super) type CopyMemo = FxHashMap<*const RefCell<Value>, ValuePtr>;

/// Pairs of allocations already under comparison during one equality check.
pub(super) type SeenPairs = FxHashSet<(*const RefCell<Value>, *const RefCell<Value>)>;

/// Shared, mutable handle to a [`Value`].
///
/// `Clone` aliases: every clone observes mutations made through any other.
/// Use [`ValuePtr::deep_clone`] for an isolated copy.
///
/// Single-threaded by construction (`Rc`, not `Arc`).
#[repr(transparent)]
pub struct ValuePtr(Rc<RefCell<Value>>);

impl ValuePtr {
    #[inline]
    pub fn new(value: Value) -> Self {
        ValuePtr(Rc::new(RefCell::new(value)))
    }

    pub fn null() -> Self {
        ValuePtr::new(Value::null())
    }

    pub fn undefined() -> Self {
        ValuePtr::new(Value::undefined())
    }

    /// See [`Value::null_of`] for the `string`/`object`/`class` exception.
    pub fn null_of(ty: ValueType) -> Self {
        ValuePtr::new(Value::null_of(ty))
    }

    pub fn object(map: ObjectMap) -> Self {
        ValuePtr::new(Value::new(map))
    }

    pub fn class(map: ObjectMap) -> Self {
        ValuePtr::new(Value::class(map))
    }

    pub fn enumerator(ordinal: i64) -> Self {
        ValuePtr::new(Value::enumerator(ordinal))
    }

    /// A deep copy of an `object` value, tagged `class`.
    pub fn as_class(&self) -> RuntimeResult<ValuePtr> {
        let ty = self.value_type();
        if ty != ValueType::Object {
            return Err(type_mismatch(ValueType::Object, ty));
        }
        let copy = self.deep_clone();
        copy.0.borrow_mut().mark_class();
        Ok(copy)
    }

    /// Isolated copy; nested maps are copied recursively.
    ///
    /// Aliasing inside the source is preserved: a value reachable twice is
    /// copied once, and a map that contains itself yields a copy that
    /// contains the copy.
    pub fn deep_clone(&self) -> ValuePtr {
        self.deep_clone_with(&mut CopyMemo::default())
    }

    pub(super) fn deep_clone_with(&self, copies: &mut CopyMemo) -> ValuePtr {
        let source = Rc::as_ptr(&self.0);
        if let Some(copy) = copies.get(&source) {
            return copy.clone();
        }
        let copy = ValuePtr::null();
        copies.insert(source, copy.clone());
        let value = ensure_sufficient_stack(|| self.0.borrow().clone_with(copies));
        copy.assign(value);
        copy
    }

    /// Structural equality. A pair already under comparison counts as
    /// equal, so cyclic values terminate.
    pub(super) fn eq_with(&self, other: &ValuePtr, seen: &mut SeenPairs) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if !seen.insert((Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))) {
            return true;
        }
        ensure_sufficient_stack(|| self.0.borrow().eq_with(&other.0.borrow(), seen))
    }

    /// Whether both handles alias the same value.
    #[inline]
    pub fn ptr_eq(&self, other: &ValuePtr) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.0.borrow().value_type()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.borrow().is_null()
    }

    /// Copy out the stored data as `T`.
    ///
    /// For `ObjectMap` the returned map is new but its entries alias the
    /// originals.
    pub fn get<T: ValueData + Clone>(&self) -> RuntimeResult<T> {
        self.0.borrow().get::<T>().cloned()
    }

    pub fn set<T: ValueData>(&self, data: T) {
        self.0.borrow_mut().set(data);
    }

    /// Replace the pointee, keeping every alias attached.
    pub fn assign(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    pub fn set_type(&self, ty: ValueType) -> RuntimeResult<()> {
        self.0.borrow_mut().set_type(ty)
    }

    pub fn set_null(&self) {
        self.0.borrow_mut().set_null();
    }

    pub fn to_bool(&self) -> RuntimeResult<bool> {
        self.0.borrow().to_bool()
    }

    /// Run `f` over the map of an `object` or `class` value.
    pub fn with_map<R>(&self, f: impl FnOnce(&ObjectMap) -> R) -> RuntimeResult<R> {
        let value = self.0.borrow();
        let map = map_or_error(&value)?;
        Ok(f(map))
    }

    pub fn with_map_mut<R>(&self, f: impl FnOnce(&mut ObjectMap) -> R) -> RuntimeResult<R> {
        let mut value = self.0.borrow_mut();
        let ty = value.value_type();
        check_map(&value)?;
        value.as_map_mut().map(f).ok_or_else(|| null_value(ty))
    }

    /// Alias of the entry under `key`, if this is a map holding one.
    pub fn property(&self, key: &str) -> Option<ValuePtr> {
        self.0
            .borrow()
            .as_map()
            .and_then(|map| map.get(key))
            .cloned()
    }

    /// Insert or overwrite an entry.
    ///
    /// A value that is not a non-null map is first reset to an empty
    /// `object`, mirroring subscript assignment in scripts.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<ValuePtr>) {
        let mut inner = self.0.borrow_mut();
        if inner.as_map().is_none() {
            inner.set(ObjectMap::new());
        }
        if let Some(map) = inner.as_map_mut() {
            map.insert(key.into(), value.into());
        }
    }

    /// Remove an entry, returning it.
    pub fn remove_property(&self, key: &str) -> Option<ValuePtr> {
        self.0
            .borrow_mut()
            .as_map_mut()
            .and_then(|map| map.remove(key))
    }

    /// Deep copy of the map behind an `object` or `class` value.
    pub fn clone_map(&self) -> RuntimeResult<ObjectMap> {
        self.with_map(|map| ensure_sufficient_stack(|| deep_clone_map(map)))
    }
}

fn check_map(value: &Value) -> RuntimeResult<()> {
    if value.value_type().is_compound() {
        Ok(())
    } else {
        Err(type_mismatch(ValueType::Object, value.value_type()))
    }
}

fn map_or_error(value: &Value) -> RuntimeResult<&ObjectMap> {
    check_map(value)?;
    value.as_map().ok_or_else(|| null_value(value.value_type()))
}

impl Clone for ValuePtr {
    /// Aliases the same value.
    #[inline]
    fn clone(&self) -> Self {
        ValuePtr(Rc::clone(&self.0))
    }
}

impl Deref for ValuePtr {
    type Target = RefCell<Value>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for ValuePtr {
    fn default() -> Self {
        ValuePtr::null()
    }
}

impl PartialEq for ValuePtr {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut SeenPairs::default())
    }
}

impl fmt::Debug for ValuePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValuePtr").field(&self.0).finish()
    }
}

impl fmt::Display for ValuePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => fmt::Display::fmt(&*value, f),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}

impl From<Value> for ValuePtr {
    fn from(value: Value) -> Self {
        ValuePtr::new(value)
    }
}

impl From<i32> for ValuePtr {
    fn from(value: i32) -> Self {
        ValuePtr::new(Value::new(i64::from(value)))
    }
}

impl From<&str> for ValuePtr {
    fn from(value: &str) -> Self {
        ValuePtr::new(Value::new(value.to_string()))
    }
}

macro_rules! impl_from_data {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ValuePtr {
                fn from(value: $ty) -> Self {
                    ValuePtr::new(Value::new(value))
                }
            }
        )*
    };
}

impl_from_data!(i64, f64, f32, String, bool, ObjectMap);
