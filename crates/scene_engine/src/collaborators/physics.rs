//! Physics collaborator interface
//!
//! The scene core never simulates anything. It only reads rigid-body
//! placement back into game object transforms.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Handle to a rigid body owned by the physics engine
pub trait PhysicsBody {
    /// Current world transform of the body
    fn world_transform(&self) -> Mat4;

    /// Teleport the body to a new world transform
    fn set_world_transform(&mut self, transform: &Mat4);

    /// Move the body, keeping its orientation
    fn set_position(&mut self, x: f32, y: f32, z: f32);

    /// Current world position of the body
    fn position(&self) -> Vec3 {
        self.world_transform().translation_part()
    }
}
