mod color;
mod utils;

// public: axis-aligned bounding boxes
pub mod bounds;
// public: flat-array BVH builder and traversal
pub mod bvh;
// public: pinhole camera
pub mod camera;
// public: commandline parser
pub mod cli;
// public: `Hittable` trait and primitive shapes
pub mod hittables;
// public: materials and stable material ids
pub mod material;
// public: triangle meshes
pub mod mesh;
// public: golden-output P3 writer
pub mod ppm;
// public: `Ray`
pub mod ray;
// public: renderer functionality
pub mod render;
// public: scene container and closest-hit query
pub mod scene;
// public: scene selection
pub mod scenes;
