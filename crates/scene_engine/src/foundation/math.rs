//! Math utilities and types
//!
//! Provides the nalgebra-backed math types used by the scene core, plus the
//! handful of matrix helpers the camera and transform code rely on.
//!
//! ## Conventions
//!
//! - Right-handed, Y-up world space
//! - Clip space follows OpenGL conventions (NDC depth in [-1, 1])
//! - Matrices are column-major (nalgebra storage order); the renderer boundary
//!   receives them through [`Mat4Ext::to_column_major`]

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Build a TRS matrix (translation * rotation * scale)
    pub fn compose(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
        Mat4::new_translation(position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(scale)
    }

    /// Split an affine TRS matrix back into position, rotation and scale
    ///
    /// Shear is not representable and is discarded. Zero scale on an axis
    /// yields an identity rotation for that axis.
    pub fn decompose(matrix: &Mat4) -> (Vec3, Quat, Vec3) {
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        if scale_x <= f32::EPSILON || scale_y <= f32::EPSILON || scale_z <= f32::EPSILON {
            return (position, Quat::identity(), scale);
        }

        let rotation_matrix = Mat3::new(
            matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
            matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
            matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
        );
        let rotation = Quat::from_matrix(&rotation_matrix);

        (position, rotation, scale)
    }

    /// Convert a vector into the `[x, y, z]` form used by scene documents
    pub fn vec3_to_array(v: &Vec3) -> [f32; 3] {
        [v.x, v.y, v.z]
    }

    /// Convert a `[x, y, z]` document array into a vector
    pub fn array_to_vec3(a: [f32; 3]) -> Vec3 {
        Vec3::new(a[0], a[1], a[2])
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a right-handed perspective projection (OpenGL clip conventions)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed view matrix looking along `forward`
    fn look_towards(eye: Vec3, forward: Vec3, up: Vec3) -> Mat4;

    /// Translation part of an affine matrix
    fn translation_part(&self) -> Vec3;

    /// World-space X axis (first column) of an affine matrix
    fn axis_x(&self) -> Vec3;

    /// World-space Y axis (second column) of an affine matrix
    fn axis_y(&self) -> Vec3;

    /// World-space Z axis (third column) of an affine matrix
    fn axis_z(&self) -> Vec3;

    /// Flatten to 16 floats in column-major order for the graphics API
    fn to_column_major(&self) -> [f32; 16];
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_towards(eye: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
        let eye_point = Point3::from(eye);
        let target = Point3::from(eye + forward);
        Mat4::look_at_rh(&eye_point, &target, &up)
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn axis_x(&self) -> Vec3 {
        Vec3::new(self.m11, self.m21, self.m31)
    }

    fn axis_y(&self) -> Vec3 {
        Vec3::new(self.m12, self.m22, self.m32)
    }

    fn axis_z(&self) -> Vec3 {
        Vec3::new(self.m13, self.m23, self.m33)
    }

    fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.as_slice());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_decompose_roundtrip() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.5);
        let scale = Vec3::new(2.0, 1.5, 0.8);

        let matrix = utils::compose(&position, &rotation, &scale);
        let (p, r, s) = utils::decompose(&matrix);

        assert_relative_eq!(p, position, epsilon = 1e-5);
        assert_relative_eq!(s, scale, epsilon = 1e-5);
        let dot = r.coords.dot(&rotation.coords);
        assert!(dot.abs() > 0.999, "rotation mismatch: dot = {}", dot);
    }

    #[test]
    fn test_column_major_layout() {
        let m = Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0));
        let flat = m.to_column_major();

        // Translation lives in the last column
        assert_eq!(&flat[12..15], &[4.0, 5.0, 6.0]);
        assert_eq!(flat[15], 1.0);
    }

    #[test]
    fn test_axes_of_rotated_matrix() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), constants::PI / 2.0);
        let m = rotation.to_homogeneous();

        assert_relative_eq!(m.axis_z(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(m.axis_y(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }
}
