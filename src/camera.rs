//! Pinhole camera and per-pixel ray generation

use glam::Vec3A;

use crate::{color::Color, ray::Ray};

/// A pinhole camera with an orthonormal basis built from its forward direction
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3A,
    forward: Vec3A,
    right: Vec3A,
    up: Vec3A,
    /// Radiance returned when a traced path escapes the scene
    pub bg_color: Color,
}

impl Camera {
    /// Creates a camera at `position` looking along `forward`.
    ///
    /// The basis is built against world up (+Y); `forward` must not be
    /// parallel to it.
    pub fn new(position: Vec3A, forward: Vec3A, bg_color: Color) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(Vec3A::Y).normalize();
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
            bg_color,
        }
    }

    /// Generates the ray through pixel (`x`, `y`) of a `width` x `height` image.
    ///
    /// Pixel coordinates map to normalized device coordinates scaled by the
    /// aspect ratio, with Y flipped so the image origin is top-left; the
    /// direction is `normalize(right * u + up * v + forward)`.
    pub fn get_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let aspect_ratio = width as f32 / height as f32;
        let u = ((x as f32 / width as f32) * 2.0 - 1.0) * aspect_ratio;
        let v = ((y as f32 / height as f32) * 2.0 - 1.0) * -1.0;

        let direction = (self.right * u + self.up * v + self.forward).normalize();
        Ray::new(self.position, direction)
    }
}
