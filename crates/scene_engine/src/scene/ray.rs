//! Rays and ray/geometry intersection

use crate::foundation::math::{Mat4, Point3, Vec3};

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray expressed in another space
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        let origin = matrix.transform_point(&Point3::from(self.origin)).coords;
        let direction = matrix.transform_vector(&self.direction);
        Ray::new(origin, direction)
    }
}

/// Result of a ray intersection test against a game object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The distance from the ray origin to the hit point (world units)
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// A triangle for ray intersection
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns the distance along the ray if hit, None otherwise
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        const EPSILON: f32 = 0.000001;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some(t)
        } else {
            None // Behind ray origin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(ray.direction.magnitude(), 1.0);
        assert_relative_eq!(ray.point_at(2.0), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_triangle_hit() {
        let triangle = Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 1.0));

        assert_relative_eq!(triangle.intersect_ray(&ray).unwrap(), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_triangle_miss_and_behind() {
        let triangle = Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );

        let beside = Ray::new(Vec3::new(2.0, 2.0, -3.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(triangle.intersect_ray(&beside).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(triangle.intersect_ray(&behind).is_none());

        let parallel = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(triangle.intersect_ray(&parallel).is_none());
    }

    #[test]
    fn test_ray_transformed_into_local_space() {
        let world = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
        let inverse = world.try_inverse().unwrap();
        let ray = Ray::new(Vec3::new(10.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let local = ray.transformed(&inverse);
        assert_relative_eq!(local.origin, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-6);
        assert_relative_eq!(local.direction, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
