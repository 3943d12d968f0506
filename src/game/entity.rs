//! Entities as generational indices
//!
//! A sprite that dies frees its slot for reuse; the generation counter on the
//! slot is bumped so any reference still held to the dead sprite stops
//! matching. This keeps the level's single-weapon slot and group members safe
//! without reference counting.

/// Identifier for one game sprite: slot index plus slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, used to address component storage.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Hands out entity slots and tracks which are alive.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Current generation per slot; a live entity matches its slot's value.
    generations: Vec<u32>,
    /// Freed slots available for reuse.
    free: Vec<u32>,
    alive: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        self.alive += 1;
        match self.free.pop() {
            // Slot generation was bumped when it was freed
            Some(index) => Entity::new(index, self.generations[index as usize]),
            None => {
                self.generations.push(0);
                Entity::new(self.generations.len() as u32 - 1, 0)
            }
        }
    }

    /// Free an entity's slot. Returns false if it was already dead.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.free.push(entity.index);
        self.alive -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|gen| *gen == entity.generation)
    }

    pub fn alive_count(&self) -> u32 {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_then_free() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);

        assert!(alloc.free(a));
        assert!(!alloc.is_alive(a));
        assert!(alloc.is_alive(b));
        // Double free is a no-op
        assert!(!alloc.free(a));
        assert_eq!(alloc.alive_count(), 1);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        alloc.free(a);

        let b = alloc.allocate();
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(!alloc.is_alive(a));
        assert!(alloc.is_alive(b));
    }
}
