//! Implementation of an infinite plane

use glam::Vec3A;

use crate::{
    hittables::{Hittable, RayHit},
    material::MaterialId,
    ray::Ray,
};

/// An infinite plane through `position` with unit normal `normal`
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub position: Vec3A,
    pub normal: Vec3A,
    pub material: MaterialId,
}

impl Plane {
    pub fn new(position: Vec3A, normal: Vec3A, material: MaterialId) -> Self {
        Self {
            position,
            normal,
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray) -> Option<RayHit> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() <= 1e-6 {
            // parallel to the plane
            return None;
        }

        let distance = (self.position - ray.origin).dot(self.normal) / denom;
        if distance < 0.0 {
            return None;
        }

        Some(RayHit {
            position: ray.at(distance),
            // reported as stored, never flipped toward the ray
            normal: self.normal,
            distance,
            material: self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_down() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y, MaterialId(0));
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), -Vec3A::Y);
        let hit = plane.hit(&ray).expect("ray aimed at ground plane");
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.position, Vec3A::ZERO);
        assert_eq!(hit.normal, Vec3A::Y);
    }

    #[test]
    fn parallel_misses() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y, MaterialId(0));
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::X);
        assert!(plane.hit(&ray).is_none());
    }

    #[test]
    fn backside_keeps_stored_normal() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y, MaterialId(0));
        let ray = Ray::new(Vec3A::new(0.0, -5.0, 0.0), Vec3A::Y);
        let hit = plane.hit(&ray).expect("ray aimed at plane from below");
        assert_eq!(hit.normal, Vec3A::Y);
    }
}
