//! Ray/triangle intersection via Möller–Trumbore

use glam::Vec3A;

use crate::{
    hittables::{Hittable, RayHit},
    material::MaterialId,
    ray::Ray,
};

/// A bare triangle: three positions, no material
///
/// This is the transient render form, used for direct intersection and as
/// the BVH builder's element type. A hit reports the flat geometric normal
/// and a placeholder material; the owning [`Mesh`](crate::mesh::Mesh) fills
/// the material in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3A,
    pub v1: Vec3A,
    pub v2: Vec3A,
}

impl Triangle {
    pub fn new(v0: Vec3A, v1: Vec3A, v2: Vec3A) -> Self {
        Self { v0, v1, v2 }
    }

    /// Average of the three vertex coordinates along one axis.
    pub fn centroid_on_axis(&self, axis: usize) -> f32 {
        (self.v0[axis] + self.v1[axis] + self.v2[axis]) / 3.0
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<RayHit> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);
        // parallel to the triangle plane, either winding; also rejects
        // zero-area triangles
        if a.abs() < 1e-6 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let distance = f * edge2.dot(q);
        if distance <= 1e-6 {
            // line intersection, but behind (or grazing) the ray origin
            return None;
        }

        Some(RayHit {
            position: ray.at(distance),
            // flat shading: the geometric normal, not interpolated
            normal: edge1.cross(edge2).normalize(),
            distance,
            material: MaterialId::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::Y)
    }

    #[test]
    fn interior_hit() {
        let ray = Ray::new(Vec3A::new(0.2, 0.2, 5.0), -Vec3A::Z);
        let hit = unit_triangle().hit(&ray).expect("ray through the interior");
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.normal, Vec3A::Z);
    }

    #[test]
    fn both_windings_hit() {
        let ray = Ray::new(Vec3A::new(0.2, 0.2, 5.0), -Vec3A::Z);
        let flipped = Triangle::new(Vec3A::ZERO, Vec3A::Y, Vec3A::X);
        let hit = flipped.hit(&ray).expect("reversed winding still hits");
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.normal, -Vec3A::Z);
    }

    #[test]
    fn outside_barycentric_misses() {
        let ray = Ray::new(Vec3A::new(0.9, 0.9, 5.0), -Vec3A::Z);
        assert!(unit_triangle().hit(&ray).is_none());
    }

    #[test]
    fn degenerate_triangle_misses() {
        let sliver = Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::X * 2.0);
        let ray = Ray::new(Vec3A::new(0.5, 0.0, 5.0), -Vec3A::Z);
        assert!(sliver.hit(&ray).is_none());
    }

    #[test]
    fn centroid_on_axis() {
        let tri = Triangle::new(Vec3A::ZERO, Vec3A::new(3.0, 0.0, 0.0), Vec3A::new(0.0, 3.0, 0.0));
        assert_eq!(tri.centroid_on_axis(0), 1.0);
        assert_eq!(tri.centroid_on_axis(1), 1.0);
        assert_eq!(tri.centroid_on_axis(2), 0.0);
    }
}
