//! Transform component
//!
//! Local placement relative to the parent (position, rotation, scale) plus the
//! world matrix cached by the last propagation. World matrices always satisfy
//! `world = parent_world * local` after an update pass.
//!
//! All coordinates follow Y-up right-handed conventions.

use super::{ComponentKind, ComponentData, ComponentType, InspectorField, InspectorValue};
use crate::foundation::math::{utils, Mat4, Quat, Quaternion, Unit, Vec3};
use serde::{Deserialize, Serialize};

/// Local TRS placement with a cached world matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation relative to the parent
    pub rotation: Quat,

    /// Scale factors relative to the parent
    pub scale: Vec3,

    world: Mat4,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            world: Mat4::identity(),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position, rotation and scale
    pub fn from_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Default::default()
        }
    }

    /// Create from a local transformation matrix (decompose TRS)
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let mut transform = Self::default();
        transform.set_local_matrix(matrix);
        transform
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from Euler angles (radians, XYZ order)
    pub fn with_rotation_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler_angles(x, y, z);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Local matrix (translation * rotation * scale)
    pub fn local_matrix(&self) -> Mat4 {
        utils::compose(&self.position, &self.rotation, &self.scale)
    }

    /// Replace the local placement from a matrix
    pub fn set_local_matrix(&mut self, matrix: &Mat4) {
        let (position, rotation, scale) = utils::decompose(matrix);
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
    }

    /// World matrix cached by the last propagation
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// World-space position cached by the last propagation
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.world.m14, self.world.m24, self.world.m34)
    }

    /// Recompute the world matrix from the parent's and return it
    pub fn propagate(&mut self, parent_world: &Mat4) -> Mat4 {
        self.world = parent_world * self.local_matrix();
        self.world
    }

    /// Rotation as Euler angles in degrees (roll, pitch, yaw)
    pub fn euler_degrees(&self) -> Vec3 {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        Vec3::new(utils::rad_to_deg(roll), utils::rad_to_deg(pitch), utils::rad_to_deg(yaw))
    }
}

/// Persisted Transform fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRecord {
    /// Local position
    #[serde(rename = "Position")]
    pub position: [f32; 3],
    /// Local rotation quaternion as `[x, y, z, w]`
    #[serde(rename = "Rotation")]
    pub rotation: [f32; 4],
    /// Local scale
    #[serde(rename = "Scale")]
    pub scale: [f32; 3],
}

impl ComponentType for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;
    type Record = TransformRecord;

    fn from_data(data: &ComponentData) -> Option<&Self> {
        match data {
            ComponentData::Transform(transform) => Some(transform),
            _ => None,
        }
    }

    fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self> {
        match data {
            ComponentData::Transform(transform) => Some(transform),
            _ => None,
        }
    }

    fn to_record(&self) -> TransformRecord {
        let q = self.rotation.quaternion();
        TransformRecord {
            position: utils::vec3_to_array(&self.position),
            rotation: [q.i, q.j, q.k, q.w],
            scale: utils::vec3_to_array(&self.scale),
        }
    }

    fn apply_record(&mut self, record: TransformRecord) {
        let [x, y, z, w] = record.rotation;
        self.position = utils::array_to_vec3(record.position);
        // A zero quaternion cannot be normalized
        self.rotation = Unit::try_new(Quaternion::new(w, x, y, z), f32::EPSILON)
            .unwrap_or_else(Quat::identity);
        self.scale = utils::array_to_vec3(record.scale);
    }

    fn inspector_fields(&self) -> Vec<InspectorField> {
        vec![
            InspectorField::editable("Position", InspectorValue::Vec3(utils::vec3_to_array(&self.position))),
            InspectorField::editable("Rotation", InspectorValue::Vec3(utils::vec3_to_array(&self.euler_degrees()))),
            InspectorField::editable("Scale", InspectorValue::Vec3(utils::vec3_to_array(&self.scale))),
        ]
    }

    fn apply_inspector_edit(&mut self, label: &str, value: &InspectorValue) -> bool {
        let InspectorValue::Vec3(v) = value else {
            return false;
        };
        match label {
            "Position" => self.position = utils::array_to_vec3(*v),
            "Rotation" => {
                self.rotation = Quat::from_euler_angles(
                    utils::deg_to_rad(v[0]),
                    utils::deg_to_rad(v[1]),
                    utils::deg_to_rad(v[2]),
                );
            }
            "Scale" => self.scale = utils::array_to_vec3(*v),
            _ => return false,
        }
        true
    }
}
