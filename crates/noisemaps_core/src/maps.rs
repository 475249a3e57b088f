use std::io;

use crate::error::Result;
use crate::field::ScalarField;
use crate::fractal::{generate_fractal, GenerationParams};
use crate::output::{OutputDispatcher, OutputMode};
use crate::seed::NoiseSeed;
use crate::white::generate_white;

/// Generate white noise, hand it to `dispatcher` and return it.
///
/// Previews are printed to stdout. The map is only dispatched once it is
/// complete and is returned unchanged.
pub fn create_noise(
    width: u32,
    height: u32,
    seed: impl Into<NoiseSeed>,
    mode: &OutputMode,
    dispatcher: &OutputDispatcher,
) -> Result<ScalarField> {
    let field = generate_white(width, height, seed)?;
    dispatcher.dispatch(&field, mode, &mut io::stdout().lock())?;
    Ok(field)
}

/// Fractal noise counterpart of [`create_noise`].
pub fn create_fractal_noise(
    width: u32,
    height: u32,
    params: &GenerationParams,
    mode: &OutputMode,
    dispatcher: &OutputDispatcher,
) -> Result<ScalarField> {
    let field = generate_fractal(width, height, params)?;
    dispatcher.dispatch(&field, mode, &mut io::stdout().lock())?;
    Ok(field)
}
