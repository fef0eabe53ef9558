//! Generational id allocation for the entity arena.

use bastion_core::types::EntityId;

pub struct EntityAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    next_index: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_indices: Vec::new(),
            next_index: 0,
        }
    }

    pub fn allocate(&mut self) -> EntityId {
        if let Some(index) = self.free_indices.pop() {
            EntityId::new(index, self.generations[index as usize])
        } else {
            let index = self.next_index;
            self.next_index += 1;
            self.generations.push(0);
            EntityId::new(index, 0)
        }
    }

    pub fn deallocate(&mut self, id: EntityId) {
        if self.is_alive(id) {
            self.generations[id.index as usize] += 1;
            self.free_indices.push(id.index);
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.generations
            .get(id.index as usize)
            .is_some_and(|&generation| generation == id.generation)
            && !self.free_indices.contains(&id.index)
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_deallocate() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert_eq!(e0, EntityId::new(0, 0));
        assert!(alloc.is_alive(e0));

        alloc.deallocate(e0);
        assert!(!alloc.is_alive(e0));

        let reused = alloc.allocate();
        assert_eq!(reused, EntityId::new(0, 1));
        assert!(alloc.is_alive(reused));
        assert!(!alloc.is_alive(e0));
    }

    #[test]
    fn double_free_is_ignored() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        alloc.deallocate(e0);
        alloc.deallocate(e0);

        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_ne!(a.index, b.index);
    }
}
