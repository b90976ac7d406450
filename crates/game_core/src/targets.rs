//! Generational slot table backing target handles.

use event_core::TargetHandle;
use generational_arena::{Arena, Index};

use crate::SceneError;

/// Fixed-capacity arena addressed by [`TargetHandle`]s.
///
/// Freed slots are reused with a bumped generation, so a stale handle never resolves to the
/// value that later took its slot.
#[derive(Debug, Clone)]
pub struct TargetTable<T> {
    arena: Arena<T>,
    capacity: usize,
}

fn to_handle(index: Index) -> TargetHandle {
    let (slot, generation) = index.into_raw_parts();
    // capacity is tiny, so the slot always fits
    TargetHandle::new(slot as u32, generation)
}

fn to_index(handle: TargetHandle) -> Index {
    Index::from_raw_parts(handle.index as usize, handle.generation)
}

impl<T> TargetTable<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { arena: Arena::with_capacity(capacity), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn insert(&mut self, value: T) -> Result<TargetHandle, SceneError> {
        if self.arena.len() >= self.capacity {
            return Err(SceneError::TargetLimit { capacity: self.capacity });
        }
        Ok(to_handle(self.arena.insert(value)))
    }

    pub fn get(&self, handle: TargetHandle) -> Option<&T> {
        self.arena.get(to_index(handle))
    }

    pub fn get_mut(&mut self, handle: TargetHandle) -> Option<&mut T> {
        self.arena.get_mut(to_index(handle))
    }

    pub fn contains(&self, handle: TargetHandle) -> bool {
        self.arena.contains(to_index(handle))
    }

    /// Frees the slot. Returns `None` for stale or unknown handles.
    pub fn remove(&mut self, handle: TargetHandle) -> Option<T> {
        self.arena.remove(to_index(handle))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetHandle, &T)> {
        self.arena.iter().map(|(i, v)| (to_handle(i), v))
    }
}
