//! Camera component
//!
//! Wraps a [`Frustum`] whose placement mirrors the owning game object's world
//! matrix. The scene manager re-syncs it every update and right after a load,
//! so the persisted `Frustum Pos/front/up` fields are informational only.

use super::{ComponentData, ComponentKind, ComponentType, FrameContext, InspectorField, InspectorValue};
use crate::config::CameraSettings;
use crate::foundation::math::{utils, Mat4};
use crate::scene::Frustum;
use serde::{Deserialize, Serialize};

/// Inspector slider range for the near plane
pub const NEAR_PLANE_RANGE: (f32, f32) = (1.0, 4999.0);
/// Inspector slider range for the far plane
pub const FAR_PLANE_RANGE: (f32, f32) = (1.0, 5000.0);
/// Inspector slider range for the vertical field of view, in degrees
pub const FOV_RANGE: (f32, f32) = (1.0, 150.0);

/// Camera attached to a game object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraComponent {
    frustum: Frustum,
    /// Whether meshes outside this camera's frustum are skipped when it is active
    pub culling: bool,
    /// Whether the frustum outline is drawn every update
    pub debug_frustum: bool,
}

impl CameraComponent {
    /// Create a camera from configured defaults
    pub fn from_settings(settings: &CameraSettings, aspect_ratio: f32) -> Self {
        Self {
            frustum: Frustum::new(
                settings.field_of_view,
                aspect_ratio,
                settings.near_plane,
                settings.far_plane,
            ),
            culling: false,
            debug_frustum: false,
        }
    }

    /// Viewing volume
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Mutable viewing volume; setters keep `0 < near < far`
    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }

    /// Follow the owning game object's world matrix
    pub fn sync_from_transform(&mut self, world: &Mat4) {
        self.frustum.sync_from_transform(world);
    }
}

/// Persisted Camera fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Frustum culling flag
    #[serde(rename = "Culling")]
    pub culling: bool,
    /// Debug outline flag
    #[serde(rename = "Debug Frustum")]
    pub debug_frustum: bool,
    /// Frustum position at save time
    #[serde(rename = "Frustum Pos", default)]
    pub position: [f32; 3],
    /// Frustum front at save time
    #[serde(rename = "Frustum front", default)]
    pub front: [f32; 3],
    /// Frustum up at save time
    #[serde(rename = "Frustum up", default)]
    pub up: [f32; 3],
    /// Near plane distance
    #[serde(rename = "Near plane")]
    pub near_plane: f32,
    /// Far plane distance
    #[serde(rename = "Far plane")]
    pub far_plane: f32,
    /// Vertical field of view in degrees
    #[serde(rename = "FOV")]
    pub field_of_view: f32,
    /// Width / height ratio
    #[serde(rename = "Aspect ratio", alias = "Aspect Ratio")]
    pub aspect_ratio: f32,
}

impl ComponentType for CameraComponent {
    const KIND: ComponentKind = ComponentKind::Camera;
    type Record = CameraRecord;

    fn from_data(data: &ComponentData) -> Option<&Self> {
        match data {
            ComponentData::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self> {
        match data {
            ComponentData::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    fn on_update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.debug_frustum {
            ctx.renderer.render_debug_frustum(&self.frustum, ctx.debug_color);
        }
    }

    fn to_record(&self) -> CameraRecord {
        CameraRecord {
            culling: self.culling,
            debug_frustum: self.debug_frustum,
            position: utils::vec3_to_array(&self.frustum.position()),
            front: utils::vec3_to_array(&self.frustum.front()),
            up: utils::vec3_to_array(&self.frustum.up()),
            near_plane: self.frustum.near_distance(),
            far_plane: self.frustum.far_distance(),
            field_of_view: self.frustum.field_of_view(),
            aspect_ratio: self.frustum.aspect_ratio(),
        }
    }

    fn apply_record(&mut self, record: CameraRecord) {
        self.culling = record.culling;
        self.debug_frustum = record.debug_frustum;

        if !self.frustum.set_planes(record.near_plane, record.far_plane) {
            log::warn!(
                "Ignored camera planes near={} far={}, keeping near={} far={}",
                record.near_plane,
                record.far_plane,
                self.frustum.near_distance(),
                self.frustum.far_distance()
            );
        }

        self.frustum.set_field_of_view(record.field_of_view);
        if record.aspect_ratio.is_finite() && record.aspect_ratio > 0.0 {
            self.frustum.set_aspect_ratio(record.aspect_ratio);
        } else {
            log::warn!("Ignored camera aspect ratio {}", record.aspect_ratio);
        }
    }

    fn inspector_fields(&self) -> Vec<InspectorField> {
        let slider = |value: f32, (min, max): (f32, f32)| InspectorValue::Float { value, min, max };
        vec![
            InspectorField::editable("Debug Frustum", InspectorValue::Bool(self.debug_frustum)),
            InspectorField::editable("Culling", InspectorValue::Bool(self.culling)),
            InspectorField::editable("Near plane", slider(self.frustum.near_distance(), NEAR_PLANE_RANGE)),
            InspectorField::editable("Far plane", slider(self.frustum.far_distance(), FAR_PLANE_RANGE)),
            InspectorField::editable("FOV", slider(self.frustum.field_of_view(), FOV_RANGE)),
            InspectorField::read_only(
                "Aspect ratio",
                InspectorValue::Float {
                    value: self.frustum.aspect_ratio(),
                    min: 0.0,
                    max: self.frustum.aspect_ratio(),
                },
            ),
        ]
    }

    fn apply_inspector_edit(&mut self, label: &str, value: &InspectorValue) -> bool {
        match (label, value) {
            ("Debug Frustum", InspectorValue::Bool(flag)) => {
                self.debug_frustum = *flag;
                true
            }
            ("Culling", InspectorValue::Bool(flag)) => {
                self.culling = *flag;
                true
            }
            ("Near plane", InspectorValue::Float { value, .. }) => {
                self.frustum.set_near_distance(*value);
                self.frustum.near_distance() == *value
            }
            ("Far plane", InspectorValue::Float { value, .. }) => {
                self.frustum.set_far_distance(*value);
                self.frustum.far_distance() == *value
            }
            ("FOV", InspectorValue::Float { value, .. }) => {
                self.frustum.set_field_of_view(*value);
                true
            }
            _ => false,
        }
    }
}
