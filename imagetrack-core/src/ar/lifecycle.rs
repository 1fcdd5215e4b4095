//! Tracked-entity lifecycle
//!
//! Applies the recognition feed's add/update/remove batches to the entity
//! registry. Every lookup that comes up empty (no spawn rule, no entity)
//! is a silent no-op: an image without a rule is simply not instrumented.

use crate::ar::entity::{ContentDescriptor, EntityId, SpawnRule};
use crate::ar::registry::EntityRegistry;
use crate::ar::target::{TargetsChanged, TrackedTarget};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, trace};

/// What a batch of lifecycle events did to the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleReport {
    pub spawned: Vec<EntityId>,
    /// Entities whose rotation was restored on reacquiring tracking
    pub reset: Vec<EntityId>,
    /// Entities that went from visible to hidden
    pub hidden: Vec<EntityId>,
    pub destroyed: Vec<EntityId>,
}

impl LifecycleReport {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
            && self.reset.is_empty()
            && self.hidden.is_empty()
            && self.destroyed.is_empty()
    }

    /// Entities a selection must let go of: reset discards manual edits,
    /// destruction ends the entity
    pub fn invalidated(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.reset.iter().chain(self.destroyed.iter()).copied()
    }
}

/// Maps recognized targets to spawned content
#[derive(Debug, Clone, Default)]
pub struct LifecycleManager {
    rules: FxHashMap<String, ContentDescriptor>,
}

impl LifecycleManager {
    /// Build from the spawn table. The first rule for an image name wins.
    pub fn new(rules: &[SpawnRule]) -> Self {
        let mut table = FxHashMap::default();
        for rule in rules {
            table
                .entry(rule.image_name.clone())
                .or_insert_with(|| rule.content.clone());
        }
        Self { rules: table }
    }

    pub fn rule_for(&self, image_name: &str) -> Option<&ContentDescriptor> {
        self.rules.get(image_name)
    }

    /// Apply one tick's batches in order: added, updated, removed
    pub fn on_targets_changed(
        &self,
        registry: &mut EntityRegistry,
        changes: &TargetsChanged,
    ) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        for target in &changes.added {
            if let Some(id) = self.added(registry, target) {
                report.spawned.push(id);
            }
        }
        for target in &changes.updated {
            self.updated(registry, target, &mut report);
        }
        for target in &changes.removed {
            if let Some(id) = self.removed(registry, target) {
                report.destroyed.push(id);
            }
        }

        report
    }

    /// Spawn content for a newly recognized target.
    ///
    /// No-op when the image has no rule or the target already has an entity.
    pub fn added(&self, registry: &mut EntityRegistry, target: &TrackedTarget) -> Option<EntityId> {
        let Some(content) = self.rule_for(target.id.as_str()) else {
            trace!("No spawn rule for image '{}'", target.id);
            return None;
        };

        let id = registry.spawn(target, content)?;
        debug!(
            "Spawned {} '{}' for image '{}' (visible: {})",
            id,
            content.name,
            target.id,
            target.is_tracking()
        );
        Some(id)
    }

    /// Follow a target's new pose and tracking quality
    pub fn updated(
        &self,
        registry: &mut EntityRegistry,
        target: &TrackedTarget,
        report: &mut LifecycleReport,
    ) {
        if !registry.contains_target(&target.id) {
            // Recover targets whose entity was never spawned
            if target.is_tracking() {
                if let Some(id) = self.added(registry, target) {
                    report.spawned.push(id);
                }
            }
            return;
        }
        let Some(entity) = registry.get_by_target_mut(&target.id) else {
            return;
        };

        if target.is_tracking() {
            if !entity.visible {
                entity.reset_rotation();
                report.reset.push(entity.id);
                debug!("Tracking reacquired for '{}', {} rotation reset", target.id, entity.id);
            }
            entity.visible = true;
            // Position only; manual rotation survives while tracking holds
            entity.pose.position = target.pose.position;
        } else if entity.visible {
            entity.visible = false;
            report.hidden.push(entity.id);
            debug!("Tracking lost for '{}', hiding {}", target.id, entity.id);
        }
    }

    /// Destroy the entity bound to a removed target
    pub fn removed(
        &self,
        registry: &mut EntityRegistry,
        target: &TrackedTarget,
    ) -> Option<EntityId> {
        let entity = registry.remove_target(&target.id)?;
        debug!("Destroyed {} for removed image '{}'", entity.id, target.id);
        Some(entity.id)
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
