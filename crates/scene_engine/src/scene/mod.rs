//! Scene graph
//!
//! Owns the game object tree and everything that walks it.
//!
//! ```text
//! SceneManager (frame protocol, selection, persistence)
//!      ↓
//! Hierarchy (slotmap arena, root, deferred deletion)
//!      ↓
//! GameObject (components, world placement, ray test)
//! ```
//!
//! Geometry helpers (bounds, rays, frustum) live here too because culling and
//! picking are the only things that use them.

pub mod bounds;
pub mod document;
pub mod frustum;
pub mod game_object;
pub mod hierarchy;
pub mod picking;
pub mod ray;
mod scene_manager;

pub use bounds::{Plane, AABB};
pub use document::{ComponentRecord, GameObjectRecord, SceneDocument};
pub use frustum::Frustum;
pub use game_object::{GameObject, GameObjectId, ObjectState, NO_PARENT};
pub use hierarchy::{GameObjectHandle, Hierarchy};
pub use picking::PickResult;
pub use ray::{Ray, RayHit, Triangle};
pub use scene_manager::{OutlineEntry, SceneManager, SceneState, ROOT_NAME};
