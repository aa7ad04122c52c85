use std::collections::{BTreeMap, VecDeque};

use chunkwell_common::ChunkCoord;
use glam::Vec3;

use crate::factory::ChunkInstance;

/// Authoritative record of which chunk instance backs which coordinate.
///
/// Keys are unique and every instance is owned exactly once, either by a slot
/// or by the spare pool. Instances are never dropped while the registry
/// lives. Uses BTreeMap so that iteration order is the same on every
/// platform.
#[derive(Debug, Clone)]
pub struct ChunkRegistry<C> {
    slots: BTreeMap<ChunkCoord, C>,
    /// Instances owned by the registry but not bound to any coordinate.
    spare: VecDeque<C>,
    created: usize,
}

impl<C> Default for ChunkRegistry<C> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
            spare: VecDeque::new(),
            created: 0,
        }
    }
}

impl<C: ChunkInstance> ChunkRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resident coordinates.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if a coordinate is currently resident.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.slots.contains_key(&coord)
    }

    /// Instance resident at `coord`, if any.
    pub fn get(&self, coord: ChunkCoord) -> Option<&C> {
        self.slots.get(&coord)
    }

    /// Resident coordinates in ascending order.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.slots.keys().copied()
    }

    /// Resident slots in ascending coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &C)> {
        self.slots.iter().map(|(c, chunk)| (*c, chunk))
    }

    /// Instances not bound to any coordinate.
    pub fn spares(&self) -> impl Iterator<Item = &C> {
        self.spare.iter()
    }

    /// Total instances owned, resident plus spare.
    pub fn instance_count(&self) -> usize {
        self.slots.len() + self.spare.len()
    }

    /// Number of instances that entered the registry from a factory.
    pub fn created(&self) -> usize {
        self.created
    }

    /// True when every slot's instance is tagged with the slot's key.
    pub fn is_consistent(&self) -> bool {
        self.slots.iter().all(|(c, chunk)| chunk.coord() == *c)
    }

    /// Store a freshly produced instance under `coord`.
    pub(crate) fn insert_created(&mut self, coord: ChunkCoord, chunk: C) {
        self.created += 1;
        self.slots.insert(coord, chunk);
    }

    /// Move the instance at `from` to `to`, repositioning it at `center`.
    /// Returns false when nothing was resident at `from`.
    pub(crate) fn relocate(&mut self, from: ChunkCoord, to: ChunkCoord, center: Vec3) -> bool {
        match self.slots.remove(&from) {
            Some(mut chunk) => {
                chunk.rebind(to, center);
                self.slots.insert(to, chunk);
                true
            }
            None => false,
        }
    }

    /// Unbind the instance at `coord` and keep it in the spare pool.
    pub(crate) fn park(&mut self, coord: ChunkCoord) -> bool {
        match self.slots.remove(&coord) {
            Some(chunk) => {
                self.spare.push_back(chunk);
                true
            }
            None => false,
        }
    }

    /// Bind the oldest spare instance to `coord`. Returns false when the
    /// spare pool is empty.
    pub(crate) fn unpark(&mut self, coord: ChunkCoord, center: Vec3) -> bool {
        match self.spare.pop_front() {
            Some(mut chunk) => {
                chunk.rebind(coord, center);
                self.slots.insert(coord, chunk);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ChunkFactory, TemplateFactory};

    fn produce(factory: &mut TemplateFactory, c: ChunkCoord) -> crate::PlacedChunk {
        factory.produce(c, Vec3::ZERO).unwrap()
    }

    #[test]
    fn empty_registry() {
        let reg: ChunkRegistry<crate::PlacedChunk> = ChunkRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.instance_count(), 0);
        assert_eq!(reg.created(), 0);
        assert!(reg.is_consistent());
    }

    #[test]
    fn insert_and_lookup() {
        let mut factory = TemplateFactory::new("t");
        let mut reg = ChunkRegistry::new();
        let c = ChunkCoord::new(1, 2, 3);
        reg.insert_created(c, produce(&mut factory, c));
        assert!(reg.contains(c));
        assert_eq!(reg.get(c).unwrap().coord, c);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.created(), 1);
    }

    #[test]
    fn relocate_moves_key_and_tag() {
        let mut factory = TemplateFactory::new("t");
        let mut reg = ChunkRegistry::new();
        let from = ChunkCoord::new(-1, 0, 0);
        let to = ChunkCoord::new(2, 0, 0);
        reg.insert_created(from, produce(&mut factory, from));
        let id = reg.get(from).unwrap().id;

        assert!(reg.relocate(from, to, Vec3::new(12.5, 2.5, 2.5)));
        assert!(!reg.contains(from));
        let moved = reg.get(to).unwrap();
        assert_eq!(moved.id, id);
        assert_eq!(moved.center, Vec3::new(12.5, 2.5, 2.5));
        assert!(reg.is_consistent());
        assert_eq!(reg.created(), 1);

        assert!(!reg.relocate(from, to, Vec3::ZERO));
    }

    #[test]
    fn park_and_unpark_keep_instances() {
        let mut factory = TemplateFactory::new("t");
        let mut reg = ChunkRegistry::new();
        let a = ChunkCoord::new(0, 0, 0);
        reg.insert_created(a, produce(&mut factory, a));
        let id = reg.get(a).unwrap().id;

        assert!(reg.park(a));
        assert!(reg.is_empty());
        assert_eq!(reg.instance_count(), 1);
        assert_eq!(reg.spares().count(), 1);

        let b = ChunkCoord::new(5, 5, 5);
        assert!(reg.unpark(b, Vec3::ONE));
        assert_eq!(reg.get(b).unwrap().id, id);
        assert_eq!(reg.instance_count(), 1);
        assert!(!reg.unpark(a, Vec3::ZERO));
    }

    #[test]
    fn iteration_is_ordered() {
        let mut factory = TemplateFactory::new("t");
        let mut reg = ChunkRegistry::new();
        for c in [
            ChunkCoord::new(3, 0, 0),
            ChunkCoord::new(-2, 1, 0),
            ChunkCoord::new(0, 0, 0),
        ] {
            reg.insert_created(c, produce(&mut factory, c));
        }
        let coords: Vec<_> = reg.coords().collect();
        let mut sorted = coords.clone();
        sorted.sort();
        assert_eq!(coords, sorted);
    }
}
