//! Sparse component storage
//!
//! Maps entity indices to per-entity data with `Option<T>` holes. The sprite
//! counts in one map are small (a few hundred), so a flat sparse array beats
//! anything fancier and stays trivial to reason about.

use super::entity::Entity;

/// Storage for a single component type, indexed by `Entity::index()`.
#[derive(Debug)]
pub struct ComponentStorage<T> {
    data: Vec<Option<T>>,
}

// Not derived: the derive would add a `T: Default` bound.
impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Insert or replace the component for an entity.
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        if idx >= self.data.len() {
            self.data.resize_with(idx + 1, || None);
        }
        self.data[idx] = Some(component);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data.get_mut(entity.index() as usize)?.take()
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(entity.index() as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(entity.index() as usize)?.as_mut()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Drop the component stored at a raw slot index (entity was despawned).
    pub fn clear_slot(&mut self, index: u32) {
        if let Some(slot) = self.data.get_mut(index as usize) {
            *slot = None;
        }
    }

    /// Iterate (slot index, component). Caller validates liveness if needed.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (i as u32, c)))
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}
