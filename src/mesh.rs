//! Triangle meshes
//!
//! A [Mesh] owns vertex and index buffers supplied by an importer or built
//! procedurally. The index buffer is assumed fully triangulated: every
//! consecutive triple of indices is one triangle.

use glam::{Vec2, Vec3A};

use crate::{
    bvh::{Bvh, BvhBuilder},
    hittables::{Hittable, RayHit, Triangle},
    material::MaterialId,
    ray::Ray,
};

/// A single mesh vertex
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub position: Vec3A,
    pub normal: Vec3A,
    pub uv: Vec2,
}

/// An indexed triangle mesh with a single material
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    pub material: MaterialId,
    bvh: Option<Bvh>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: MaterialId) -> Self {
        Self {
            vertices,
            indices,
            material,
            bvh: None,
        }
    }

    /// An axis-aligned cube centered at `center` with the given edge length.
    ///
    /// 24 vertices (4 per face, so normals stay flat) and 36 indices.
    pub fn cube(center: Vec3A, edge: f32, material: MaterialId) -> Self {
        let h = edge / 2.0;
        // (normal, two in-plane tangents) per face
        let faces = [
            (Vec3A::X, Vec3A::Y, Vec3A::Z),
            (-Vec3A::X, Vec3A::Z, Vec3A::Y),
            (Vec3A::Y, Vec3A::Z, Vec3A::X),
            (-Vec3A::Y, Vec3A::X, Vec3A::Z),
            (Vec3A::Z, Vec3A::X, Vec3A::Y),
            (-Vec3A::Z, Vec3A::Y, Vec3A::X),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, tan_u, tan_v) in faces {
            let base = vertices.len() as u32;
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                vertices.push(Vertex {
                    position: center + (normal + tan_u * u + tan_v * v) * h,
                    normal,
                    uv: Vec2::new((u + 1.0) / 2.0, (v + 1.0) / 2.0),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices, material)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles encoded by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flattens the index buffer into position-only triangles, one per
    /// consecutive index triple, in index-buffer order.
    pub fn extract_triangles(&self) -> Vec<Triangle> {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                Triangle::new(
                    self.vertices[tri[0] as usize].position,
                    self.vertices[tri[1] as usize].position,
                    self.vertices[tri[2] as usize].position,
                )
            })
            .collect()
    }

    /// Builds (or rebuilds) this mesh's BVH; later hits traverse it instead
    /// of testing every triangle.
    pub fn build_bvh(&mut self, max_depth: u32) {
        self.bvh = Some(BvhBuilder::from_mesh(self, max_depth).build());
    }

    pub fn bvh(&self) -> Option<&Bvh> {
        self.bvh.as_ref()
    }

    /// Tests every triangle in index-buffer order, keeping the nearest hit.
    fn hit_brute_force(&self, ray: &Ray) -> Option<RayHit> {
        let mut closest = RayHit::sentinel();
        let mut found = false;

        for tri in self.indices.chunks_exact(3) {
            let triangle = Triangle::new(
                self.vertices[tri[0] as usize].position,
                self.vertices[tri[1] as usize].position,
                self.vertices[tri[2] as usize].position,
            );
            if let Some(hit) = triangle.hit(ray) {
                if hit.distance < closest.distance {
                    closest = hit;
                    found = true;
                }
            }
        }

        found.then_some(closest)
    }
}

impl Hittable for Mesh {
    fn hit(&self, ray: &Ray) -> Option<RayHit> {
        let hit = match &self.bvh {
            Some(bvh) => bvh.hit(ray),
            None => self.hit_brute_force(ray),
        };

        // triangles report a placeholder material; stamp in the mesh's own
        hit.map(|mut hit| {
            hit.material = self.material;
            hit
        })
    }
}
