//! Plain-text P3 image output
//!
//! This is the golden-output format: header `P3`, dimensions, `255`, then one
//! `r g b` line per pixel, row-major from the top-left. Channels are
//! quantized with the unclamped `floor(255.99 * channel)` rule, so
//! out-of-range radiance produces out-of-range integers on purpose.

use std::io;

use crate::{color::quantize, render::Frame};

/// Writes the frame in P3 format.
pub fn write_ppm<W: io::Write>(mut writer: W, frame: &Frame) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width, frame.height)?;
    writeln!(writer, "255")?;

    for pixel in &frame.pixels {
        let [r, g, b] = quantize(*pixel);
        writeln!(writer, "{r} {g} {b}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    #[test]
    fn golden_two_by_one() {
        let frame = Frame {
            width: 2,
            height: 1,
            pixels: vec![Vec3A::new(0.0, 0.5, 1.0), Vec3A::new(2.0, -1.0, 0.25)],
        };

        let mut out = Vec::new();
        write_ppm(&mut out, &frame).unwrap();

        // unclamped quantization is part of the format
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n0 127 255\n511 -256 63\n"
        );
    }
}
