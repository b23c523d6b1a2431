//! Miscelleanous utilities related to random number generation and random sampling
//!
//! Relies on the [rand] and [rand_distr] crates

use glam::Vec3A;
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

/// Generates a random [Vec3A] on the unit sphere (radius 1).
///
/// wrapper function around [UnitSphere]'s `sample` method
pub fn rand_vec3_on_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    Vec3A::from_array(UnitSphere.sample(rng))
}

/// Generates a random [Vec3A] within the same unit hemisphere as the given normal.
///
/// Uniform over the hemisphere, not cosine-weighted.
pub fn rand_vec3_on_unit_hemisphere(rng: &mut impl Rng, normal: Vec3A) -> Vec3A {
    let mut unit_v = rand_vec3_on_unit_sphere(rng);
    if unit_v.dot(normal) < 0.0 {
        unit_v = -unit_v;
    }

    unit_v
}
