//! Stable-id slot arena
//!
//! Ids are handed out from an ever-increasing counter and never reused.
//! Entries live in an ordered map keyed by id, so storage tracks the live
//! count no matter which ids stay alive, and iteration is always in
//! ascending id order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier assigned by a [`SlotArena`]
pub type SlotId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotArena<T> {
    next_id: SlotId,
    entries: BTreeMap<SlotId, T>,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotArena<T> {
    /// Create an empty arena whose first id is 1
    pub fn new() -> Self {
        Self::with_first_id(1)
    }

    /// Create an empty arena whose first id is `first`
    pub fn with_first_id(first: SlotId) -> Self {
        Self {
            next_id: first,
            entries: BTreeMap::new(),
        }
    }

    /// Id the next insert will receive
    pub fn next_id(&self) -> SlotId {
        self.next_id
    }

    /// Store a value under a fresh id
    pub fn insert(&mut self, value: T) -> SlotId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, value);
        id
    }

    /// Remove a value. Unknown or already-removed ids are a no-op.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live ids in ascending order (a snapshot, safe to hold across mutation)
    pub fn ids(&self) -> Vec<SlotId> {
        self.entries.keys().copied().collect()
    }

    /// Iterate live entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    /// Iterate live entries mutably in ascending id order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> + '_ {
        self.entries.iter_mut().map(|(id, v)| (*id, v))
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(SlotId, &T) -> bool) {
        self.entries.retain(|id, v| keep(*id, v));
    }
}
