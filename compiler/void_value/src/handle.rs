//! Native state attached to script instances.
//!
//! Native modules keep their per-instance state (connections, images,
//! parsers) in a [`HandleArena`]. The instance only stores a
//! [`NativeHandle`] under [`HANDLE_KEY`] in its own property map, so a
//! deep clone copies the handle, never the state, and a removed slot can
//! never be reached again through an old handle.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::errors::{stale_handle, RuntimeError, RuntimeResult};
use crate::value::{ObjectMap, ValuePtr};

/// Property key holding an instance's native handle.
pub const HANDLE_KEY: &str = "__handle__";

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

/// Opaque reference to a slot in a specific arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeHandle {
    pub arena: u32,
    pub index: u32,
    pub generation: u32,
}

impl NativeHandle {
    /// Encode as a plain `object` value.
    pub fn to_value(self) -> ValuePtr {
        let mut map = ObjectMap::new();
        map.insert("arena".to_string(), ValuePtr::from(i64::from(self.arena)));
        map.insert("index".to_string(), ValuePtr::from(i64::from(self.index)));
        map.insert(
            "generation".to_string(),
            ValuePtr::from(i64::from(self.generation)),
        );
        ValuePtr::object(map)
    }

    /// Decode a value produced by [`NativeHandle::to_value`].
    pub fn from_value(value: &ValuePtr) -> RuntimeResult<NativeHandle> {
        let field = |name: &str| -> RuntimeResult<u32> {
            let raw = value
                .property(name)
                .ok_or_else(stale_handle)?
                .get::<i64>()?;
            u32::try_from(raw).map_err(|_| stale_handle())
        };
        Ok(NativeHandle {
            arena: field("arena")?,
            index: field("index")?,
            generation: field("generation")?,
        })
    }

    /// Store this handle inside `instance`.
    pub fn attach(self, instance: &ValuePtr) {
        instance.set_property(HANDLE_KEY, self.to_value());
    }

    /// Read the handle stored inside `instance`.
    pub fn read(instance: &ValuePtr) -> RuntimeResult<NativeHandle> {
        let stored = instance.property(HANDLE_KEY).ok_or_else(stale_handle)?;
        NativeHandle::from_value(&stored)
    }
}

struct Slot<T> {
    generation: u32,
    item: Option<T>,
}

/// Generational slot storage for native state.
pub struct HandleArena<T> {
    id: u32,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> HandleArena<T> {
    pub fn new() -> Self {
        HandleArena {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn insert(&mut self, item: T) -> RuntimeResult<NativeHandle> {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.item = Some(item);
                let generation = slot.generation;
                return Ok(self.handle(index, generation));
            }
        }
        let index = u32::try_from(self.slots.len())
            .map_err(|_| RuntimeError::new("native handle arena is full"))?;
        self.slots.push(Slot {
            generation: 0,
            item: Some(item),
        });
        Ok(self.handle(index, 0))
    }

    fn handle(&self, index: u32, generation: u32) -> NativeHandle {
        NativeHandle {
            arena: self.id,
            index,
            generation,
        }
    }

    fn slot(&self, handle: NativeHandle) -> RuntimeResult<&Slot<T>> {
        if handle.arena != self.id {
            return Err(stale_handle());
        }
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.item.is_some())
            .ok_or_else(stale_handle)
    }

    pub fn get(&self, handle: NativeHandle) -> RuntimeResult<&T> {
        self.slot(handle)?.item.as_ref().ok_or_else(stale_handle)
    }

    pub fn get_mut(&mut self, handle: NativeHandle) -> RuntimeResult<&mut T> {
        self.slot(handle)?;
        self.slots
            .get_mut(handle.index as usize)
            .and_then(|slot| slot.item.as_mut())
            .ok_or_else(stale_handle)
    }

    /// Take the state out; every copy of `handle` becomes stale.
    pub fn remove(&mut self, handle: NativeHandle) -> RuntimeResult<T> {
        self.slot(handle)?;
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or_else(stale_handle)?;
        let item = slot.item.take().ok_or_else(stale_handle)?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        tracing::trace!(arena = self.id, index = handle.index, "native slot released");
        Ok(item)
    }

    pub fn contains(&self, handle: NativeHandle) -> bool {
        self.slot(handle).is_ok()
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for HandleArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
