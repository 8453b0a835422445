//! Ray picking over the scene hierarchy
//!
//! Picking is two-phase:
//! 1. Broad phase: collect, in depth-first pre-order, every enabled game
//!    object whose world bounds the ray hits. Disabled objects and objects
//!    without bounds cannot be hit, but their children are still visited.
//! 2. Narrow phase: the first collected object whose own
//!    [`GameObject::intersect_ray`] succeeds wins.
//!
//! The result is the first hit in traversal order, not the closest one.

use crate::scene::game_object::GameObject;
use crate::scene::hierarchy::{GameObjectHandle, Hierarchy};
use crate::scene::{Ray, RayHit};

/// Result of a successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Picked game object
    pub handle: GameObjectHandle,
    /// Where the ray hit it
    pub hit: RayHit,
}

/// Broad phase: enabled objects whose world bounds the ray hits, in pre-order
///
/// The root is never a candidate. A disabled object is skipped itself; its
/// enabled descendants remain candidates.
pub fn collect_candidates(hierarchy: &Hierarchy, ray: &Ray) -> Vec<GameObjectHandle> {
    let Some(root) = hierarchy.root() else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    let mut stack: Vec<GameObjectHandle> = hierarchy
        .get(root)
        .map(|object| object.children().iter().rev().copied().collect())
        .unwrap_or_default();

    while let Some(handle) = stack.pop() {
        let Some(object) = hierarchy.get(handle) else {
            continue;
        };
        let bounds_hit = object
            .world_bounds()
            .is_some_and(|bounds| bounds.intersect_ray(ray).is_some());
        if object.is_enabled() && bounds_hit {
            candidates.push(handle);
        }
        stack.extend(object.children().iter().rev().copied());
    }

    candidates
}

/// Pick the first candidate whose fine intersection test succeeds
pub fn pick(hierarchy: &Hierarchy, ray: &Ray) -> Option<PickResult> {
    collect_candidates(hierarchy, ray).into_iter().find_map(|handle| {
        hierarchy
            .get(handle)
            .and_then(|object: &GameObject| object.intersect_ray(ray))
            .map(|hit| PickResult { handle, hit })
    })
}
