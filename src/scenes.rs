//! Scene generation functionality

use glam::Vec3A;

use crate::{
    camera::Camera,
    hittables::{Plane, Sphere},
    material::Material,
    mesh::Mesh,
    scene::Scene,
};

/// Possible hard-coded scenes to choose from.
#[derive(Debug, Clone, Copy, clap::clap_derive::ValueEnum)]
pub enum SceneType {
    /// Two spheres and a light over a ground plane
    Spheres,
    /// The sphere scene plus a metallic cube mesh
    MeshDemo,
}

/// Returns a [Camera] and the scene contents for the chosen preset.
pub fn get_scene(scene_type: SceneType) -> (Camera, Scene) {
    let camera = Camera::new(
        Vec3A::new(0.0, 1.0, 2.0),
        -Vec3A::Z,
        Vec3A::new(0.5, 0.7, 1.0),
    );

    let scene = match scene_type {
        SceneType::Spheres => gen_spheres(),
        SceneType::MeshDemo => gen_mesh_demo(),
    };

    (camera, scene)
}

/// Two spheres, a big diffuse light, and a ground plane.
fn gen_spheres() -> Scene {
    let mut scene = Scene::new();

    let blue = scene.add_material(Material::new(Vec3A::new(0.55, 0.89, 1.0), 0.4));
    let red = scene.add_material(Material::new(Vec3A::new(1.0, 0.34, 0.34), 0.95));
    let light = scene.add_material(Material::light(Vec3A::ONE, 1.0));
    let grass = scene.add_material(Material::new(Vec3A::new(0.45, 0.67, 0.44), 0.0));

    scene
        .spheres
        .push(Sphere::new(Vec3A::new(-1.0, 1.0, -2.0), 1.0, blue));
    scene
        .spheres
        .push(Sphere::new(Vec3A::new(1.0, 1.0, -2.0), 1.0, red));
    scene
        .spheres
        .push(Sphere::new(Vec3A::new(-4.0, 6.0, -10.0), 5.0, light));

    scene.planes.push(Plane::new(Vec3A::ZERO, Vec3A::Y, grass));

    scene
}

/// [gen_spheres] plus a procedural cube standing in for an imported mesh.
fn gen_mesh_demo() -> Scene {
    let mut scene = gen_spheres();

    let amber = scene.add_material(Material::new(Vec3A::new(1.0, 0.64, 0.22), 0.2));
    scene
        .meshes
        .push(Mesh::cube(Vec3A::new(0.0, 0.75, -4.0), 1.5, amber));

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::Ray;

    #[test]
    fn sphere_preset_contents() {
        let (_cam, scene) = get_scene(SceneType::Spheres);
        assert_eq!(scene.spheres.len(), 3);
        assert_eq!(scene.planes.len(), 1);
        assert!(scene.meshes.is_empty());
    }

    #[test]
    fn mesh_demo_cube_is_hittable() {
        let (_cam, scene) = get_scene(SceneType::MeshDemo);
        assert_eq!(scene.meshes.len(), 1);

        // straight down onto the cube's top face
        let ray = Ray::new(Vec3A::new(0.0, 5.0, -4.0), -Vec3A::Y);
        let hit = scene.closest_hit(&ray).expect("cube below the ray");
        assert_eq!(hit.material, scene.meshes[0].material);
        assert_eq!(hit.distance, 3.5);
    }
}
