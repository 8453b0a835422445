//! # Camera frustum
//!
//! Viewing volume used by camera components for projection, culling and
//! screen-space picking.
//!
//! ## Coordinate System
//! Right-handed, Y-up world space. The view matrix looks along `front`
//! (view space -Z), and the projection follows OpenGL clip conventions
//! (NDC depth in [-1, 1]). Matrices are nalgebra column-major; hand them to
//! the graphics API with [`Mat4Ext::to_column_major`].
//!
//! ## Invariants
//! `0 < near < far` always holds. Setters that would break it are ignored.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3, Vec4};
use crate::scene::bounds::{Plane, AABB};
use crate::scene::ray::Ray;

/// Perspective viewing volume
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    near: f32,
    far: f32,
    /// Vertical field of view as configured, in degrees
    field_of_view: f32,
    /// Vertical field of view in radians
    vertical_fov: f32,
    /// Horizontal field of view in radians, derived from aspect ratio
    horizontal_fov: f32,
    aspect_ratio: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(60.0, 16.0 / 9.0, 1.0, 1000.0)
    }
}

impl Frustum {
    /// Create a frustum at the origin looking down +Z with +Y up
    ///
    /// Invalid plane distances fall back to near 1.0 / far 1000.0.
    pub fn new(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let (near, far) = if near > 0.0 && near < far {
            (near, far)
        } else {
            log::warn!("Rejected frustum planes near={} far={}, using defaults", near, far);
            (1.0, 1000.0)
        };

        let mut frustum = Self {
            position: Vec3::zeros(),
            front: Vec3::z(),
            up: Vec3::y(),
            near,
            far,
            field_of_view: fov_degrees,
            vertical_fov: utils::deg_to_rad(fov_degrees),
            horizontal_fov: 0.0,
            aspect_ratio,
        };
        frustum.set_aspect_ratio(aspect_ratio);
        frustum
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit viewing direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit up direction, orthogonal to `front`
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right direction
    pub fn right(&self) -> Vec3 {
        self.front.cross(&self.up)
    }

    /// Near plane distance
    pub fn near_distance(&self) -> f32 {
        self.near
    }

    /// Far plane distance
    pub fn far_distance(&self) -> f32 {
        self.far
    }

    /// Vertical field of view in degrees
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Vertical field of view in radians
    pub fn vertical_fov(&self) -> f32 {
        self.vertical_fov
    }

    /// Horizontal field of view in radians
    pub fn horizontal_fov(&self) -> f32 {
        self.horizontal_fov
    }

    /// Width / height ratio used for the projection
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Set the vertical field of view in degrees
    ///
    /// The caller is expected to clamp to a sane range; no validation here.
    pub fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees;
        self.vertical_fov = utils::deg_to_rad(degrees);
        self.set_aspect_ratio(self.aspect_ratio);
    }

    /// Set the aspect ratio and re-derive the horizontal field of view
    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_ratio = ratio;
        self.horizontal_fov = 2.0 * ((self.vertical_fov * 0.5).tan() * ratio).atan();
    }

    /// Set the near plane distance; ignored unless `0 < distance < far`
    pub fn set_near_distance(&mut self, distance: f32) {
        if distance > 0.0 && distance < self.far {
            self.near = distance;
        } else {
            log::trace!("Ignored near distance {} (far = {})", distance, self.far);
        }
    }

    /// Set the far plane distance; ignored unless `distance > near`
    pub fn set_far_distance(&mut self, distance: f32) {
        if distance > self.near {
            self.far = distance;
        } else {
            log::trace!("Ignored far distance {} (near = {})", distance, self.near);
        }
    }

    /// Set both plane distances at once
    ///
    /// Returns false and leaves the frustum untouched unless `0 < near < far`.
    pub fn set_planes(&mut self, near: f32, far: f32) -> bool {
        if near > 0.0 && near < far {
            self.near = near;
            self.far = far;
            true
        } else {
            false
        }
    }

    /// Place the frustum explicitly
    ///
    /// `front` and `up` are normalized and `up` is re-orthogonalized against
    /// `front`. Degenerate input leaves the orientation unchanged.
    pub fn set_placement(&mut self, position: Vec3, front: Vec3, up: Vec3) {
        self.position = position;
        let Some(front) = front.try_normalize(f32::EPSILON) else {
            return;
        };
        let Some(right) = front.cross(&up).try_normalize(f32::EPSILON) else {
            return;
        };
        self.front = front;
        self.up = right.cross(&front);
    }

    /// Follow the owning entity's world matrix
    ///
    /// Position is the translation, front is the world Z axis and up the
    /// world Y axis.
    pub fn sync_from_transform(&mut self, world: &Mat4) {
        self.position = world.translation_part();
        if let Some(front) = world.axis_z().try_normalize(f32::EPSILON) {
            self.front = front;
        }
        if let Some(up) = world.axis_y().try_normalize(f32::EPSILON) {
            self.up = up;
        }
    }

    /// Turn the frustum to face a world-space point, keeping world Y as up reference
    pub fn look_at(&mut self, target: Vec3) {
        let Some(direction) = (target - self.position).try_normalize(f32::EPSILON) else {
            return;
        };
        let right = direction
            .cross(&Vec3::y())
            .try_normalize(1e-6)
            .unwrap_or_else(|| self.right());
        self.front = direction;
        self.up = right.cross(&direction).normalize();
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_towards(self.position, self.front, self.up)
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.vertical_fov, self.aspect_ratio, self.near, self.far)
    }

    /// Combined projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The six bounding planes with outward-facing normals
    ///
    /// Order: near, far, left, right, top, bottom.
    pub fn planes(&self) -> [Plane; 6] {
        let front = self.front;
        let up = self.up;
        let right = self.right();
        let (sin_h, cos_h) = (self.horizontal_fov * 0.5).sin_cos();
        let (sin_v, cos_v) = (self.vertical_fov * 0.5).sin_cos();
        let eye = self.position;

        [
            Plane::from_point_normal(eye + front * self.near, -front),
            Plane::from_point_normal(eye + front * self.far, front),
            Plane::from_point_normal(eye, -right * cos_h - front * sin_h),
            Plane::from_point_normal(eye, right * cos_h - front * sin_h),
            Plane::from_point_normal(eye, up * cos_v - front * sin_v),
            Plane::from_point_normal(eye, -up * cos_v - front * sin_v),
        ]
    }

    /// The eight corners: four on the near plane, then four on the far plane
    pub fn corner_points(&self) -> [Vec3; 8] {
        let right = self.right();
        let tan_h = (self.horizontal_fov * 0.5).tan();
        let tan_v = (self.vertical_fov * 0.5).tan();
        let mut corners = [Vec3::zeros(); 8];

        for (slot, distance) in [self.near, self.far].into_iter().enumerate() {
            let center = self.position + self.front * distance;
            let half_width = right * (distance * tan_h);
            let half_height = self.up * (distance * tan_v);
            let base = slot * 4;
            corners[base] = center - half_width - half_height;
            corners[base + 1] = center + half_width - half_height;
            corners[base + 2] = center + half_width + half_height;
            corners[base + 3] = center - half_width + half_height;
        }

        corners
    }

    /// Conservative containment test
    ///
    /// Returns false only when all eight box corners lie outside one plane.
    /// Boxes near a frustum edge can pass while being fully outside.
    pub fn contains_box(&self, aabb: &AABB) -> bool {
        let corners = aabb.corners();
        self.planes().iter().all(|plane| {
            !corners.iter().all(|corner| plane.is_on_positive_side(*corner))
        })
    }

    /// Unproject a normalized device coordinate into a world-space ray
    ///
    /// The ray starts on the near plane and points toward the far plane.
    pub fn unproject(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inverse = self.view_projection_matrix().try_inverse()?;

        let near_h = inverse * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_h = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near_h.w.abs() <= f32::EPSILON || far_h.w.abs() <= f32::EPSILON {
            return None;
        }

        let near_point = near_h.xyz() / near_h.w;
        let far_point = far_h.xyz() / far_h.w;

        Some(Ray::new(near_point, far_point - near_point))
    }

    /// Cast a world-space ray through a screen pixel
    ///
    /// Screen Y grows downward, so it is flipped when normalizing.
    pub fn cast_ray_from_screen(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<Ray> {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return None;
        }
        let (ndc_x, ndc_y) =
            crate::input::screen_to_ndc(screen_x, screen_y, viewport_width, viewport_height);
        self.unproject(ndc_x, ndc_y)
    }
}
