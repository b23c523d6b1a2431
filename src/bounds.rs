//! Implementation of bounding volumes

use glam::Vec3A;

use crate::ray::Ray;

/// An axis aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl BoundingBox {
    /// Creates a new axis aligned bounding box enclosing the two points.
    pub fn new(p0: Vec3A, p1: Vec3A) -> Self {
        Self {
            min: p0.min(p1),
            max: p0.max(p1),
        }
    }

    /// A zero-volume box containing only the given point.
    pub fn point(p: Vec3A) -> Self {
        Self { min: p, max: p }
    }

    /// Extends this box, in place, to contain the given point.
    pub fn grow(&mut self, point: Vec3A) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns a bounding box enclosing this and the other box.
    ///
    /// In other words, combines the two boxes by taking:
    /// * the minimums of the two boxes' min members
    /// * the maximums of the two boxes' max members
    pub fn union(&self, other: BoundingBox) -> BoundingBox {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn diagonal(&self) -> Vec3A {
        self.max - self.min
    }

    pub fn centroid(&self) -> Vec3A {
        0.5 * (self.min + self.max)
    }

    /// Index of the axis with the greatest extent, ties broken X over Y over Z.
    pub fn longest_axis(&self) -> usize {
        let d = self.diagonal();
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// Whether the point lies within the box, componentwise inclusive.
    pub fn contains(&self, point: Vec3A) -> bool {
        self.max.cmpge(point).all() && self.min.cmple(point).all()
    }

    /// Returns whether or not the ray hits this bounding box.
    ///
    /// Checks for slab intersection in each of the 3 dimensions.
    pub fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> bool {
        let inverse_dir = ray.direction.recip();
        let diff0 = self.min - ray.origin;
        let diff1 = self.max - ray.origin;

        // Check for slab intersection in each dimension
        for axis_idx in 0..3 {
            let inverse_dir = inverse_dir[axis_idx];
            let t0 = diff0[axis_idx] * inverse_dir;
            let t1 = diff1[axis_idx] * inverse_dir;

            // swap if inverted
            let (t0, t1) = if inverse_dir < 0.0 {
                (t1, t0)
            } else {
                (t0, t1)
            };

            let t_near = t0.max(t_min);
            let t_far = t1.min(t_max);
            if t_far <= t_near {
                return false;
            }
        }

        true
    }
}

impl Default for BoundingBox {
    /// The inverted "grown from nothing" sentinel: min at +inf, max at -inf.
    fn default() -> Self {
        Self {
            min: Vec3A::splat(f32::INFINITY),
            max: Vec3A::splat(f32::NEG_INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_from_sentinel() {
        let mut bbox = BoundingBox::default();
        bbox.grow(Vec3A::ONE);
        bbox.grow(-Vec3A::ONE);
        assert_eq!(bbox.min, -Vec3A::ONE);
        assert_eq!(bbox.max, Vec3A::ONE);
    }

    #[test]
    fn longest_axis_tie_prefers_x() {
        let bbox = BoundingBox::new(Vec3A::ZERO, Vec3A::ONE);
        assert_eq!(bbox.longest_axis(), 0);
    }

    #[test]
    fn slab_hit_and_miss() {
        let bbox = BoundingBox::new(-Vec3A::ONE, Vec3A::ONE);
        let toward = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z);
        let away = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::Z);
        assert!(bbox.hit(&toward, 0.0, f32::INFINITY));
        assert!(!bbox.hit(&away, 0.0, f32::INFINITY));
    }
}
