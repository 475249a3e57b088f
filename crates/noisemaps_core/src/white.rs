use rand::distributions::{Distribution, Uniform};

use crate::error::{NoiseError, Result};
use crate::field::ScalarField;
use crate::seed::NoiseSeed;

/// Reject non-positive map dimensions.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(usize, usize)> {
    if width == 0 || height == 0 {
        return Err(NoiseError::InvalidDimension {
            width: width as usize,
            height: height as usize,
        });
    }
    Ok((width as usize, height as usize))
}

/// Generate white noise: every cell is an independent uniform sample in `[0, 1]`.
///
/// Cells are drawn row by row with `x` innermost, so a fixed seed always
/// reproduces the same map for the same dimensions.
pub fn generate_white(width: u32, height: u32, seed: impl Into<NoiseSeed>) -> Result<ScalarField> {
    let (width, height) = check_dimensions(width, height)?;
    let seed = seed.into();

    let mut rng = seed.rng();
    let dist = Uniform::new_inclusive(0.0f32, 1.0);

    let mut values = Vec::with_capacity(width * height);
    for _y in 0..height {
        for _x in 0..width {
            values.push(dist.sample(&mut rng));
        }
    }

    log::debug!("Generated white noise {}x{} ({:?})", width, height, seed);

    Ok(ScalarField::from_generated(width, height, values))
}
