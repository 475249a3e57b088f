//! Seeded lattice of unit gradients used by the fractal generator.
//!
//! This is classic 2D gradient (Perlin) noise: a shuffled 256 entry
//! permutation picks one of eight unit gradients for every integer lattice
//! point, and the four corner contributions are blended with the improved
//! quintic fade curve.

use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};

use glam::Vec2;
use rand::seq::SliceRandom;

use crate::seed::NoiseSeed;

const TABLE_SIZE: usize = 256;
const TABLE_MASK: i32 = TABLE_SIZE as i32 - 1;

/// Unit gradients at 45 degree steps.
const GRADIENTS: [Vec2; 8] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(0.0, 1.0),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(0.0, -1.0),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Permutation table built for one generation call.
pub(crate) struct GradientTable {
    // Doubled so `perm[perm[x] + y]` never needs to wrap.
    perm: [u8; TABLE_SIZE * 2],
}

impl GradientTable {
    pub(crate) fn new(seed: NoiseSeed) -> Self {
        let mut rng = seed.rng();
        let mut base: Vec<u8> = (0..=u8::MAX).collect();
        base.shuffle(&mut rng);

        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = base[i % TABLE_SIZE];
        }

        Self { perm }
    }

    fn gradient(&self, xi: i32, yi: i32) -> Vec2 {
        let x = (xi & TABLE_MASK) as usize;
        let y = (yi & TABLE_MASK) as usize;
        let hash = self.perm[self.perm[x] as usize + y];
        GRADIENTS[(hash & 7) as usize]
    }

    /// Gradient noise at a continuous coordinate, in `[-1, 1]`.
    ///
    /// The value is exactly zero on integer lattice points.
    pub(crate) fn sample(&self, point: Vec2) -> f32 {
        let cell = point.floor();
        let xi = cell.x as i32;
        let yi = cell.y as i32;
        let offset = point - cell;

        let n00 = self.gradient(xi, yi).dot(offset);
        let n10 = self.gradient(xi.wrapping_add(1), yi).dot(offset - Vec2::X);
        let n01 = self.gradient(xi, yi.wrapping_add(1)).dot(offset - Vec2::Y);
        let n11 = self
            .gradient(xi.wrapping_add(1), yi.wrapping_add(1))
            .dot(offset - Vec2::ONE);

        let u = fade(offset.x);
        let v = fade(offset.y);
        let n = lerp(lerp(n00, n10, u), lerp(n01, n11, u), v);

        // Unit gradients bound 2D noise by sqrt(1/2).
        (n * SQRT_2).clamp(-1.0, 1.0)
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
