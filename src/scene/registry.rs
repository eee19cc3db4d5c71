//! Entity registry: drawables and logic participants
//!
//! Two independent arenas share entities through `Rc<RefCell<_>>`. Each
//! arena hands out its own never-reused ids, and an entity keeps the ids it
//! was given so it can remove itself later.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::entity::Sprite;
use crate::sim::{SlotArena, SlotId};

/// Shared handle to a registered entity
pub type SpriteRef = Rc<RefCell<Sprite>>;

/// Slots an entity occupies in each registry arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityIds {
    pub draw: Option<SlotId>,
    pub logic: Option<SlotId>,
}

#[derive(Default)]
pub struct Registry {
    drawables: SlotArena<SpriteRef>,
    logic: SlotArena<SpriteRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprite for drawing and/or logic, storing the assigned ids
    /// on the sprite. Returns the ids and the shared handle.
    pub fn add(
        &mut self,
        sprite: Sprite,
        wants_draw: bool,
        wants_logic: bool,
    ) -> (EntityIds, SpriteRef) {
        let handle = Rc::new(RefCell::new(sprite));
        let ids = EntityIds {
            draw: wants_draw.then(|| self.drawables.insert(Rc::clone(&handle))),
            logic: wants_logic.then(|| self.logic.insert(Rc::clone(&handle))),
        };
        handle.borrow_mut().set_ids(ids);
        (ids, handle)
    }

    /// Remove every slot in `ids`. Missing slots are ignored.
    pub fn remove(&mut self, ids: EntityIds) {
        if let Some(id) = ids.draw {
            self.drawables.remove(id);
        }
        if let Some(id) = ids.logic {
            self.logic.remove(id);
        }
    }

    pub fn drawable(&self, id: SlotId) -> Option<SpriteRef> {
        self.drawables.get(id).cloned()
    }

    pub fn logic(&self, id: SlotId) -> Option<SpriteRef> {
        self.logic.get(id).cloned()
    }

    /// Snapshot of drawable ids, ascending
    pub fn drawable_ids(&self) -> Vec<SlotId> {
        self.drawables.ids()
    }

    /// Snapshot of logic ids, ascending
    pub fn logic_ids(&self) -> Vec<SlotId> {
        self.logic.ids()
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn logic_count(&self) -> usize {
        self.logic.len()
    }

    /// Iterate drawables in ascending id order
    pub fn drawables(&self) -> impl Iterator<Item = (SlotId, &SpriteRef)> + '_ {
        self.drawables.iter()
    }

    /// Drop every entity without rewinding either id counter
    pub fn clear(&mut self) {
        self.drawables = SlotArena::with_first_id(self.drawables.next_id());
        self.logic = SlotArena::with_first_id(self.logic.next_id());
    }
}
