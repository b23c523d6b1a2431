//! Color and pixel output

use glam::Vec3A;

pub use glam::Vec3A as Color;

/// Maps one radiance channel to an output integer: `floor(255.99 * channel)`.
///
/// Deliberately unclamped; radiance above 1.0 or below 0.0 yields integers
/// outside `0..=255`. The P3 writer emits them as-is.
#[inline]
pub fn quantize_channel(channel: f32) -> i32 {
    (255.99 * channel).floor() as i32
}

/// Quantizes all three channels of a radiance value.
#[inline]
pub fn quantize(color: Color) -> [i32; 3] {
    color.to_array().map(quantize_channel)
}

// conversion for sdr pixels, used for non-PPM output paths
pub trait VecExt<P: image::Pixel> {
    fn to_pixel(self) -> P;
}

impl VecExt<image::Rgb<u8>> for Vec3A {
    fn to_pixel(self) -> image::Rgb<u8> {
        // same quantization as the P3 path; the `as` cast saturates
        image::Rgb::<u8>(self.to_array().map(|channel| (255.99 * channel).floor() as u8))
    }
}
