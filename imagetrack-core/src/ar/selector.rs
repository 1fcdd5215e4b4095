//! Screen-point entity picking

use crate::ar::entity::{EntityId, SpawnedEntity};
use crate::ar::registry::EntityRegistry;
use crate::config::{Occluder, SelectionConfig};
use crate::three_d::{Camera3D, Ray};
use glam::{Vec2, Vec3};
use tracing::trace;

/// What a selection ray struck first
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayHit {
    /// A collider part of spawned content
    Part {
        entity: EntityId,
        part: usize,
        distance: f32,
    },
    /// A static occluder, by index
    Occluder { index: usize, distance: f32 },
}

impl RayHit {
    pub fn distance(&self) -> f32 {
        match *self {
            RayHit::Part { distance, .. } | RayHit::Occluder { distance, .. } => distance,
        }
    }
}

/// Resolves which spawned entity, if any, lies under a screen point
#[derive(Debug, Clone)]
pub struct EntitySelector {
    camera: Camera3D,
    viewport: Vec2,
    default_radius: f32,
    occluders: Vec<Occluder>,
}

impl EntitySelector {
    pub fn new(config: &SelectionConfig, camera: Camera3D, viewport: Vec2) -> Self {
        Self {
            camera,
            viewport,
            default_radius: config.default_radius,
            occluders: config.occluders.clone(),
        }
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera3D {
        &mut self.camera
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        if viewport.y > 0.0 {
            self.camera.set_aspect_ratio(viewport.x / viewport.y);
        }
    }

    /// Find the entity under `screen_point`.
    ///
    /// Pure query: the caller decides what to do with the result.
    pub fn resolve(&self, registry: &EntityRegistry, screen_point: Vec2) -> Option<EntityId> {
        let ray = self.camera.screen_point_to_ray(screen_point, self.viewport)?;
        match self.raycast(registry, &ray)? {
            RayHit::Part { entity, part, .. } => {
                let owner = registry.get(entity)?;
                owns_part(owner, part).then_some(entity)
            }
            RayHit::Occluder { index, .. } => {
                trace!("Selection blocked by occluder '{}'", self.occluders[index].name);
                None
            }
        }
    }

    /// Nearest collider along the ray. Hidden content has no active colliders.
    pub fn raycast(&self, registry: &EntityRegistry, ray: &Ray) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        let mut consider = |hit: RayHit| {
            if nearest.map_or(true, |current| hit.distance() < current.distance()) {
                nearest = Some(hit);
            }
        };

        for entity in registry.iter().filter(|entity| entity.visible) {
            for (part, transform) in entity.part_transforms().into_iter().enumerate() {
                let center = transform.transform_point3(Vec3::ZERO);
                let radius = entity.content.radius_of(part).unwrap_or(self.default_radius);
                if let Some(distance) = ray.intersect_sphere(center, radius) {
                    consider(RayHit::Part {
                        entity: entity.id,
                        part,
                        distance,
                    });
                }
            }
        }

        for (index, occluder) in self.occluders.iter().enumerate() {
            if let Some(distance) = ray.intersect_sphere(occluder.center, occluder.radius) {
                consider(RayHit::Occluder { index, distance });
            }
        }

        nearest
    }
}

/// True when `part` is the entity's root or one of its descendants
fn owns_part(entity: &SpawnedEntity, part: usize) -> bool {
    let count = entity.content.part_count();
    if part >= count {
        return false;
    }
    let mut current = part;
    // A well-formed chain is never longer than the part count
    for _ in 0..count {
        match entity.content.parent_of(current) {
            Some(parent) => current = parent,
            None => return current == 0,
        }
    }
    false
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
