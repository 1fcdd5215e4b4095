//! Target-to-entity bookkeeping

use crate::ar::entity::{ContentDescriptor, EntityId, SpawnedEntity};
use crate::ar::target::{TargetId, TrackedTarget};
use rustc_hash::FxHashMap;

/// Owns every spawned entity, keyed by the target it is bound to
#[derive(Debug)]
pub struct EntityRegistry {
    entities: FxHashMap<TargetId, SpawnedEntity>,
    targets_by_entity: FxHashMap<EntityId, TargetId>,
    next_id: u64,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: FxHashMap::default(),
            targets_by_entity: FxHashMap::default(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.targets_by_entity.contains_key(&id)
    }

    pub fn contains_target(&self, target: &TargetId) -> bool {
        self.entities.contains_key(target)
    }

    pub fn entity_for_target(&self, target: &TargetId) -> Option<EntityId> {
        self.entities.get(target).map(|entity| entity.id)
    }

    pub fn get(&self, id: EntityId) -> Option<&SpawnedEntity> {
        self.targets_by_entity
            .get(&id)
            .and_then(|target| self.entities.get(target))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SpawnedEntity> {
        let target = self.targets_by_entity.get(&id)?;
        self.entities.get_mut(target)
    }

    pub fn get_by_target(&self, target: &TargetId) -> Option<&SpawnedEntity> {
        self.entities.get(target)
    }

    pub fn get_by_target_mut(&mut self, target: &TargetId) -> Option<&mut SpawnedEntity> {
        self.entities.get_mut(target)
    }

    /// Spawn content at the target's pose.
    ///
    /// Returns `None` without touching the registry when the target already
    /// has an entity.
    pub fn spawn(
        &mut self,
        target: &TrackedTarget,
        content: &ContentDescriptor,
    ) -> Option<EntityId> {
        if self.entities.contains_key(&target.id) {
            return None;
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let entity = SpawnedEntity::new(
            id,
            target.id.clone(),
            content.clone(),
            target.pose,
            target.is_tracking(),
        );
        self.targets_by_entity.insert(id, target.id.clone());
        self.entities.insert(target.id.clone(), entity);
        Some(id)
    }

    /// Remove the entity bound to a target along with every record of it
    pub fn remove_target(&mut self, target: &TargetId) -> Option<SpawnedEntity> {
        let entity = self.entities.remove(target)?;
        self.targets_by_entity.remove(&entity.id);
        Some(entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnedEntity> {
        self.entities.values()
    }

    /// Entities ordered by id, for stable output
    pub fn sorted(&self) -> Vec<&SpawnedEntity> {
        let mut entities: Vec<_> = self.entities.values().collect();
        entities.sort_by_key(|entity| entity.id);
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ar::target::{Pose, TrackingState};
    use glam::Vec3;

    fn target(name: &str, state: TrackingState) -> TrackedTarget {
        TrackedTarget::new(name, Pose::from_position(Vec3::new(0.0, 0.0, -1.0)), state)
    }

    #[test]
    fn test_spawn_allocates_unique_ids() {
        let mut registry = EntityRegistry::new();
        let content = ContentDescriptor::new("cube");

        let a = registry.spawn(&target("a", TrackingState::Tracking), &content).unwrap();
        let b = registry.spawn(&target("b", TrackingState::Limited), &content).unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(a).unwrap().visible);
        assert!(!registry.get(b).unwrap().visible);
    }

    #[test]
    fn test_spawn_twice_is_rejected() {
        let mut registry = EntityRegistry::new();
        let content = ContentDescriptor::new("cube");
        let t = target("a", TrackingState::Tracking);

        assert!(registry.spawn(&t, &content).is_some());
        assert!(registry.spawn(&t, &content).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_clears_both_indexes() {
        let mut registry = EntityRegistry::new();
        let t = target("a", TrackingState::Tracking);
        let id = registry.spawn(&t, &ContentDescriptor::new("cube")).unwrap();

        let removed = registry.remove_target(&t.id).unwrap();
        assert_eq!(removed.id, id);
        assert!(!registry.contains(id));
        assert!(!registry.contains_target(&t.id));
        assert!(registry.get(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut registry = EntityRegistry::new();
        let content = ContentDescriptor::new("cube");
        let t = target("a", TrackingState::Tracking);

        let first = registry.spawn(&t, &content).unwrap();
        registry.remove_target(&t.id);
        let second = registry.spawn(&t, &content).unwrap();

        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
    }
}
