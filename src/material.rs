//! Implementation of the surface material model

use glam::Vec3A;
use rand::Rng;

use crate::{color::Color, utils::random::rand_vec3_on_unit_hemisphere};

/// A stable index into a [`Scene`](crate::scene::Scene)'s append-only
/// material list.
///
/// Primitives hold one of these instead of a reference so that growing the
/// material list can never invalidate them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialId(pub u32);

/// Surface appearance parameters.
///
/// `metalness` is a direct interpolation weight between a diffuse
/// (hemisphere-sampled) bounce at 0 and a mirror bounce at 1; it is not a
/// physically based metallic parameter.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub color: Color,
    pub emission_color: Color,
    pub emission_strength: f32,
    pub metalness: f32,
}

impl Material {
    /// Creates a non-emissive material with the given base color and metalness.
    pub fn new(color: Color, metalness: f32) -> Self {
        Self {
            color,
            emission_color: Vec3A::ZERO,
            emission_strength: 0.0,
            metalness,
        }
    }

    /// A pure light source: black base color, emitting the given color.
    pub fn light(emission_color: Color, emission_strength: f32) -> Self {
        Self {
            color: Vec3A::ZERO,
            emission_color,
            emission_strength,
            metalness: 0.0,
        }
    }

    /// Light emitted at a surface interaction, `emission_color * emission_strength`.
    pub fn emitted(&self) -> Color {
        self.emission_color * self.emission_strength
    }

    /// Picks the direction of the next ray leaving a surface with this material.
    ///
    /// Lerps between a uniform hemisphere sample around `normal` and the
    /// mirror reflection of `incoming`, weighted by metalness, then
    /// re-normalizes.
    pub fn scatter_direction(
        &self,
        incoming: Vec3A,
        normal: Vec3A,
        rng: &mut impl Rng,
    ) -> Vec3A {
        let diffuse = rand_vec3_on_unit_hemisphere(rng, normal);
        let specular = reflect(incoming, normal);
        diffuse.lerp(specular, self.metalness).normalize()
    }
}

/// Returns a reflected ray direction based on the given normal
///
/// Performs the following computation: `v - 2 * v.dot(n) * n`
#[inline]
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - n * v.dot(n) * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_off_ground() {
        let incoming = Vec3A::new(1.0, -1.0, 0.0).normalize();
        let reflected = reflect(incoming, Vec3A::Y);
        let expected = Vec3A::new(1.0, 1.0, 0.0).normalize();
        assert!((reflected - expected).length() < 1e-6);
    }

    #[test]
    fn full_metal_scatters_as_mirror() {
        use rand::SeedableRng;

        let mat = Material::new(Vec3A::ONE, 1.0);
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0);
        let incoming = Vec3A::new(0.0, -1.0, 1.0).normalize();
        let out = mat.scatter_direction(incoming, Vec3A::Y, &mut rng);
        let expected = reflect(incoming, Vec3A::Y).normalize();
        assert!((out - expected).length() < 1e-5);
    }
}
