//! Implementation of a sphere

use glam::Vec3A;

use crate::{
    hittables::{Hittable, RayHit},
    material::MaterialId,
    ray::Ray,
};

/// A sphere defined by its center and radius
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Vec3A,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(center: Vec3A, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<RayHit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        // near root only; a ray starting inside the sphere gets t <= 0
        // and reports no hit rather than the far root
        let distance = (-b - discriminant.sqrt()) / (2.0 * a);
        if distance <= 0.0 {
            return None;
        }

        let position = ray.at(distance);
        Some(RayHit {
            position,
            normal: (position - self.center).normalize(),
            distance,
            material: self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_on_hit() {
        let sphere = Sphere::new(Vec3A::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z);
        let hit = sphere.hit(&ray).expect("ray aimed at sphere center");
        assert_eq!(hit.distance, 4.0);
        assert_eq!(hit.position, Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(hit.normal, Vec3A::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn miss() {
        let sphere = Sphere::new(Vec3A::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 5.0), Vec3A::Z);
        assert!(sphere.hit(&ray).is_none());
    }

    #[test]
    fn behind_origin_rejected() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, 10.0), 1.0, MaterialId(0));
        let ray = Ray::new(Vec3A::ZERO, -Vec3A::Z);
        assert!(sphere.hit(&ray).is_none());
    }
}
