//! Procedural 2D noise maps for heightmaps and textures.
//!
//! Two noise families are provided, uniform white noise and multi-octave
//! fractal gradient noise. Both produce a [`ScalarField`] with every value in
//! `[0, 1]`, which an [`OutputDispatcher`] can preview in a terminal or save
//! as an 8-bit grayscale image.

pub mod error;
pub mod field;
mod gradient;
pub mod fractal;
pub mod maps;
pub mod output;
pub mod seed;
pub mod white;

// Re-export commonly used items
pub use error::{NoiseError, Result};
pub use field::ScalarField;
pub use fractal::{generate_fractal, GenerationParams};
pub use maps::{create_fractal_noise, create_noise};
pub use output::{GrayImageEncoder, OutputDispatcher, OutputMode, PngImageEncoder, DEFAULT_IMAGE_DIR};
pub use seed::NoiseSeed;
pub use white::generate_white;
