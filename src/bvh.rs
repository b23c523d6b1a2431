//! Bounding Volume Hierarchy
//!
//! A flat-array BVH over a mesh's triangles: nodes live in one append-only
//! `Vec` in pre-order with siblings adjacent, children addressed by index
//! (arena + index, no owning pointers), and the triangle buffer is permuted
//! in place during construction so every node's triangles are contiguous.
//!
//! Construction splits on the spatial median of the longest axis and stops
//! on a pure depth cutoff. There is no triangle-count floor and no empty-leaf
//! pruning, so the tree is always full to `max_depth`; downstream traversal
//! is tuned against exactly this shape.

use std::io;

use crate::{
    bounds::BoundingBox,
    hittables::{Hittable, RayHit, Triangle},
    mesh::Mesh,
    ray::Ray,
};

/// A node in the flat BVH array
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    /// AABB tightly bounding every triangle in this node's range
    pub bounds: BoundingBox,
    /// Index of the left child; the right child is `child_index + 1`.
    /// Zero marks a leaf (the root can never be another node's child).
    pub child_index: u32,
    /// Start of this node's range in the permuted triangle buffer
    pub triangle_index: u32,
    /// Length of this node's range
    pub triangle_count: u32,
}

impl Default for BvhNode {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::default(),
            child_index: 0,
            triangle_index: 0,
            triangle_count: 0,
        }
    }
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        self.child_index == 0
    }

    /// Extends this node's AABB to contain all three triangle vertices.
    fn grow(&mut self, triangle: &Triangle) {
        self.bounds.grow(triangle.v0);
        self.bounds.grow(triangle.v1);
        self.bounds.grow(triangle.v2);
    }
}

/// Top-down builder; owns the triangle buffer while it permutes it.
pub struct BvhBuilder {
    triangles: Vec<Triangle>,
    nodes: Vec<BvhNode>,
    max_depth: u32,
}

impl BvhBuilder {
    /// Creates a builder over an already-extracted triangle list.
    ///
    /// `max_depth` must be at least 1; depth 1 yields a single leaf holding
    /// every triangle.
    pub fn new(triangles: Vec<Triangle>, max_depth: u32) -> Self {
        Self {
            triangles,
            nodes: Vec::new(),
            max_depth,
        }
    }

    /// Creates a builder over the triangles extracted from a mesh.
    pub fn from_mesh(mesh: &Mesh, max_depth: u32) -> Self {
        Self::new(mesh.extract_triangles(), max_depth)
    }

    /// Builds the hierarchy, consuming the builder.
    pub fn build(mut self) -> Bvh {
        // full binary tree up to the depth cutoff
        self.nodes.reserve((1usize << self.max_depth.min(20)) - 1);

        let mut root = BvhNode {
            triangle_count: self.triangles.len() as u32,
            ..BvhNode::default()
        };
        for triangle in &self.triangles {
            root.grow(triangle);
        }
        if self.triangles.is_empty() {
            // nothing ever grew the box; collapse the inverted sentinel to a
            // zero-volume box at the origin
            root.bounds = BoundingBox::point(glam::Vec3A::ZERO);
        }
        self.nodes.push(root);

        self.build_layer(0, 1);

        Bvh {
            nodes: self.nodes,
            triangles: self.triangles,
        }
    }

    /// Splits `parent` into two children and recurses, depth first, left
    /// child before right.
    fn build_layer(&mut self, parent: usize, depth: u32) {
        if depth >= self.max_depth {
            // depth cutoff; parent stays a leaf
            return;
        }

        let child_index = self.nodes.len() as u32;
        self.nodes[parent].child_index = child_index;

        let parent_node = self.nodes[parent];
        let axis = parent_node.bounds.longest_axis();
        let split_pos = parent_node.bounds.centroid()[axis];

        let mut left = BvhNode {
            triangle_index: parent_node.triangle_index,
            ..BvhNode::default()
        };
        let mut right = BvhNode {
            triangle_index: parent_node.triangle_index,
            ..BvhNode::default()
        };

        // single pass: lefts are swapped down to the front of the range,
        // which pushes the right child's start forward one slot each time
        for i in parent_node.triangle_index..parent_node.triangle_index + parent_node.triangle_count
        {
            let triangle = self.triangles[i as usize];
            let is_left = triangle.centroid_on_axis(axis) < split_pos;
            let child = if is_left { &mut left } else { &mut right };
            child.grow(&triangle);
            child.triangle_count += 1;

            if is_left {
                let swap_index = left.triangle_index + left.triangle_count - 1;
                self.triangles.swap(i as usize, swap_index as usize);
                right.triangle_index += 1;
            }
        }

        self.nodes.push(left);
        self.nodes.push(right);

        self.build_layer(child_index as usize, depth + 1);
        self.build_layer(child_index as usize + 1, depth + 1);
    }
}

/// A finished hierarchy: the pre-order node array plus the permuted triangle
/// buffer. Immutable once built; share freely.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    triangles: Vec<Triangle>,
}

impl Bvh {
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Aggregate leaf statistics over the node array.
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            nodes: self.nodes.len(),
            ..BvhStats::default()
        };

        let mut occupied_total = 0;
        for node in &self.nodes {
            if !node.is_leaf() {
                continue;
            }
            stats.leaves += 1;
            if node.triangle_count > 0 {
                stats.occupied_leaves += 1;
                occupied_total += node.triangle_count;
            }
            stats.max_leaf_triangles = stats.max_leaf_triangles.max(node.triangle_count);
        }

        if stats.occupied_leaves > 0 {
            stats.avg_leaf_triangles = occupied_total as f32 / stats.occupied_leaves as f32;
        }

        stats
    }

    /// Writes the node array as CSV, one row per node in array order.
    pub fn export_csv<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "MinX,MinY,MinZ,MaxX,MaxY,MaxZ,ChildIndex,TriangleCount")?;
        for node in &self.nodes {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                node.bounds.min.x,
                node.bounds.min.y,
                node.bounds.min.z,
                node.bounds.max.x,
                node.bounds.max.y,
                node.bounds.max.z,
                node.child_index,
                node.triangle_count,
            )?;
        }
        Ok(())
    }
}

impl Hittable for Bvh {
    /// Iterative stack walk over the flat node array; only leaf ranges whose
    /// AABB passes the slab test are intersected.
    fn hit(&self, ray: &Ray) -> Option<RayHit> {
        let mut closest = RayHit::sentinel();
        let mut found = false;

        let mut stack = Vec::with_capacity(32);
        stack.push(0usize);

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.bounds.hit(ray, 0.0, closest.distance) {
                continue;
            }

            if node.is_leaf() {
                let start = node.triangle_index as usize;
                let end = start + node.triangle_count as usize;
                for triangle in &self.triangles[start..end] {
                    if let Some(hit) = triangle.hit(ray) {
                        if hit.distance < closest.distance {
                            closest = hit;
                            found = true;
                        }
                    }
                }
            } else {
                stack.push(node.child_index as usize + 1);
                stack.push(node.child_index as usize);
            }
        }

        found.then_some(closest)
    }
}

/// Leaf occupancy summary for one built hierarchy
#[derive(Debug, Clone, Copy, Default)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,
    pub occupied_leaves: usize,
    pub avg_leaf_triangles: f32,
    pub max_leaf_triangles: u32,
}

impl std::fmt::Display for BvhStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves ({} occupied), avg {:.2} triangles per occupied leaf, max {} in a leaf",
            self.nodes,
            self.leaves,
            self.occupied_leaves,
            self.avg_leaf_triangles,
            self.max_leaf_triangles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialId;
    use glam::Vec3A;

    fn cube_triangles() -> Vec<Triangle> {
        Mesh::cube(Vec3A::ZERO, 2.0, MaterialId(0)).extract_triangles()
    }

    #[test]
    fn degenerate_depth_is_single_leaf() {
        let triangles = cube_triangles();
        let count = triangles.len() as u32;
        let bvh = BvhBuilder::new(triangles, 1).build();

        assert_eq!(bvh.nodes().len(), 1);
        let root = &bvh.nodes()[0];
        assert!(root.is_leaf());
        assert_eq!(root.triangle_index, 0);
        assert_eq!(root.triangle_count, count);
        assert_eq!(root.bounds, BoundingBox::new(-Vec3A::ONE, Vec3A::ONE));
    }

    #[test]
    fn full_tree_to_depth_cutoff() {
        let bvh = BvhBuilder::new(cube_triangles(), 4).build();
        // pure depth cutoff: every node below the cutoff splits, even when empty
        assert_eq!(bvh.nodes().len(), 2usize.pow(4) - 1);
    }

    #[test]
    fn partition_invariant() {
        let bvh = BvhBuilder::new(cube_triangles(), 6).build();
        for node in bvh.nodes() {
            if node.is_leaf() {
                continue;
            }
            let left = &bvh.nodes()[node.child_index as usize];
            let right = &bvh.nodes()[node.child_index as usize + 1];
            assert_eq!(left.triangle_index, node.triangle_index);
            assert_eq!(right.triangle_index, left.triangle_index + left.triangle_count);
            assert_eq!(
                left.triangle_count + right.triangle_count,
                node.triangle_count
            );
        }
    }

    #[test]
    fn containment_invariant() {
        let bvh = BvhBuilder::new(cube_triangles(), 6).build();
        for node in bvh.nodes() {
            let start = node.triangle_index as usize;
            let end = start + node.triangle_count as usize;
            for triangle in &bvh.triangles()[start..end] {
                for vertex in [triangle.v0, triangle.v1, triangle.v2] {
                    assert!(
                        node.bounds.contains(vertex),
                        "vertex {vertex} escaped node bounds {:?}",
                        node.bounds
                    );
                }
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        let a = BvhBuilder::new(cube_triangles(), 8).build();
        let b = BvhBuilder::new(cube_triangles(), 8).build();
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.triangles(), b.triangles());
    }

    #[test]
    fn permutation_keeps_every_triangle() {
        let input = cube_triangles();
        let bvh = BvhBuilder::new(input.clone(), 8).build();
        assert_eq!(bvh.triangles().len(), input.len());
        for triangle in &input {
            assert!(
                bvh.triangles().contains(triangle),
                "input triangle lost during partitioning"
            );
        }
    }

    #[test]
    fn empty_mesh_collapses_root_box() {
        let bvh = BvhBuilder::new(Vec::new(), 4).build();
        let root = &bvh.nodes()[0];
        assert_eq!(root.triangle_count, 0);
        assert_eq!(root.bounds, BoundingBox::point(Vec3A::ZERO));
        // still a full tree; all leaves empty
        assert_eq!(bvh.nodes().len(), 2usize.pow(4) - 1);
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z);
        assert!(bvh.hit(&ray).is_none());
    }

    #[test]
    fn csv_export_shape() {
        let bvh = BvhBuilder::new(cube_triangles(), 2).build();
        let mut out = Vec::new();
        bvh.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("MinX,MinY,MinZ,MaxX,MaxY,MaxZ,ChildIndex,TriangleCount")
        );
        assert_eq!(lines.count(), bvh.nodes().len());
    }

    #[test]
    fn stats_count_leaves() {
        let bvh = BvhBuilder::new(cube_triangles(), 3).build();
        let stats = bvh.stats();
        assert_eq!(stats.nodes, 7);
        assert_eq!(stats.leaves, 4);
        assert!(stats.occupied_leaves <= stats.leaves);
        assert!(stats.max_leaf_triangles >= 1);
    }
}
