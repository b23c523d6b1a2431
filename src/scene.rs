//! Scene container and the closest-hit query

use crate::{
    hittables::{Hittable, Plane, RayHit, Sphere},
    material::{Material, MaterialId},
    mesh::Mesh,
    ray::Ray,
};

/// Everything a ray can be traced against
///
/// Materials live in one append-only list; primitives refer to them by
/// [MaterialId], so growing the list never invalidates a primitive.
#[derive(Debug, Default)]
pub struct Scene {
    materials: Vec<Material>,
    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a material and returns its stable id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0 as usize]
    }

    /// Finds the nearest valid hit across every primitive.
    ///
    /// Iteration order is spheres, then planes, then meshes, with strict
    /// less-than replacement; on an exact distance tie the primitive tested
    /// earliest wins. This ordering is part of the output contract.
    pub fn closest_hit(&self, ray: &Ray) -> Option<RayHit> {
        let mut closest = RayHit::sentinel();
        let mut found = false;

        for sphere in &self.spheres {
            if let Some(hit) = sphere.hit(ray) {
                if hit.distance < closest.distance {
                    closest = hit;
                    found = true;
                }
            }
        }
        for plane in &self.planes {
            if let Some(hit) = plane.hit(ray) {
                if hit.distance < closest.distance {
                    closest = hit;
                    found = true;
                }
            }
        }
        for mesh in &self.meshes {
            if let Some(hit) = mesh.hit(ray) {
                if hit.distance < closest.distance {
                    closest = hit;
                    found = true;
                }
            }
        }

        found.then_some(closest)
    }
}
