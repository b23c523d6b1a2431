//! Render an image given a [Camera] and a [Scene].

use glam::Vec3A;
use indicatif::ProgressIterator;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    camera::Camera, color::Color, color::VecExt, ray::Ray, scene::Scene,
    utils::progress::get_progressbar,
};

/// Surface offset applied to a bounced ray's origin to dodge shadow acne
const SELF_INTERSECT_OFFSET: f32 = 1e-3;

/// A rendered frame: raw, unclamped radiance per pixel, row-major, top-left origin
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Frame {
    /// Converts the radiance buffer to an 8-bit image for non-PPM outputs.
    pub fn to_image(&self) -> image::RgbImage {
        let mut img_buf = image::ImageBuffer::new(self.width, self.height);
        for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
            *pixel = self.pixels[(y * self.width + x) as usize].to_pixel();
        }
        img_buf
    }
}

/// Image Renderer storing scene context values such as image dimensions and bounce budget
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    image_width: u32,
    image_height: u32,
    bounce_depth: u32,
    seed: u64,
}

impl Renderer {
    /// Creates a new [Renderer].
    pub fn new(image_width: u32, image_height: u32, bounce_depth: u32, seed: u64) -> Self {
        Self {
            image_width,
            image_height,
            bounce_depth,
            seed,
        }
    }

    /// Accumulates radiance along one path through the scene.
    ///
    /// Up to `bounce_depth` segments. A miss adds the attenuated background
    /// and ends the path; a hit adds the material's emission and attenuates
    /// the running throughput by `albedo * max(0, cos)`. The cosine is not
    /// divided by a sampling pdf; rendered output depends on this exact
    /// energy formula, so it stays.
    pub fn trace(&self, scene: &Scene, mut ray: Ray, bg_color: Color, rng: &mut impl Rng) -> Color {
        let mut radiance = Vec3A::ZERO;
        let mut throughput = Vec3A::ONE;

        for _ in 0..self.bounce_depth {
            match scene.closest_hit(&ray) {
                Some(hit) => {
                    let material = scene.material(hit.material);
                    ray.origin = hit.position + hit.normal * SELF_INTERSECT_OFFSET;
                    ray.direction = material.scatter_direction(ray.direction, hit.normal, rng);

                    radiance += throughput * material.emitted();
                    throughput *= material.color * hit.normal.dot(ray.direction).max(0.0);
                }
                None => {
                    // functions like a miss shader
                    radiance += throughput * bg_color;
                    break;
                }
            }
        }

        radiance
    }

    /// Derives the deterministic per-pixel RNG.
    ///
    /// Every pixel draws from its own stream, seeded from the frame seed and
    /// the pixel index, so output never depends on pixel evaluation order.
    fn pixel_rng(&self, x: u32, y: u32) -> SmallRng {
        let pixel_index = (y * self.image_width + x) as u64;
        SmallRng::seed_from_u64(self.seed.wrapping_add(pixel_index.wrapping_mul(0x9E3779B97F4A7C15)))
    }

    /// Generates a frame of the given scene.
    ///
    /// A scene consists of a [Camera] and a [Scene].
    /// This function outputs its progress to the commandline.
    pub fn render_scene(&self, (cam, scene): (Camera, &Scene)) -> Frame {
        let progress_bar = get_progressbar((self.image_height * self.image_width) as u64)
            .with_prefix("Generating pixels");

        let pixels = (0..self.image_height * self.image_width)
            .progress_with(progress_bar)
            .map(|i| {
                let (x, y) = (i % self.image_width, i / self.image_width);
                let ray = cam.get_ray(x, y, self.image_width, self.image_height);
                self.trace(scene, ray, cam.bg_color, &mut self.pixel_rng(x, y))
            })
            .collect();

        Frame {
            width: self.image_width,
            height: self.image_height,
            pixels,
        }
    }
}
