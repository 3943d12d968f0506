//! Sprite groups
//!
//! Unordered set-like collections of entities. A group answers both "what do
//! I draw" and "what does this collision scan look at"; one sprite commonly
//! sits in several groups (grass is visible, an obstacle and attackable).

use super::entity::Entity;

/// An unordered collection of entities with set semantics (no duplicates).
#[derive(Debug, Default)]
pub struct SpriteGroup {
    members: Vec<Entity>,
}

impl SpriteGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. Inserting a member twice is a no-op.
    pub fn insert(&mut self, entity: Entity) {
        if !self.members.contains(&entity) {
            self.members.push(entity);
        }
    }

    /// Remove an entity if present.
    pub fn remove(&mut self, entity: Entity) {
        self.members.retain(|m| *m != entity);
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied()
    }

    /// Keep only members the predicate accepts.
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) {
        self.members.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
