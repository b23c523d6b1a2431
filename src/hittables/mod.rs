//! Intersectable primitives and their intersection results

mod plane;
mod sphere;
mod triangle;

pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::Triangle;

use glam::Vec3A;

use crate::{material::MaterialId, ray::Ray};

/// Placeholder distance meaning "no hit found yet" during nearest-hit search.
pub const SENTINEL_DISTANCE: f32 = 1e30;

/// The result of a successful ray intersection
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Point of intersection in world space
    pub position: Vec3A,
    /// Surface normal at the intersection, unit length
    pub normal: Vec3A,
    /// Distance from the ray origin, in units of the ray direction's length
    pub distance: f32,
    /// Material of the intersected surface
    pub material: MaterialId,
}

impl RayHit {
    /// A hit record at the sentinel distance, for initializing nearest-hit searches.
    pub fn sentinel() -> Self {
        Self {
            position: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            distance: SENTINEL_DISTANCE,
            material: MaterialId::default(),
        }
    }
}

/// Anything a [Ray] can intersect.
pub trait Hittable {
    /// Returns the intersection of the ray with this primitive, if any.
    ///
    /// Implementations are pure: a miss leaves no trace, and no
    /// implementation ever panics on degenerate input.
    fn hit(&self, ray: &Ray) -> Option<RayHit>;
}
