//! Multi-octave fractal (fBm) gradient noise.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result};
use crate::field::ScalarField;
use crate::gradient::GradientTable;
use crate::seed::NoiseSeed;
use crate::white::check_dimensions;

/// Parameters for fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Spatial zoom: cell `(x, y)` samples the lattice at `(x / scale, y / scale)`.
    pub scale: f32,
    /// Number of summed noise layers (at least 1).
    pub octaves: u32,
    /// Base lattice frequency multiplier.
    pub frequency: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Constant offset added before normalization.
    pub base: f32,
    /// Random seed; negative values request a non-deterministic seed.
    pub seed: i64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            scale: 40.0,
            octaves: 4,
            frequency: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
            base: 0.0,
            seed: NoiseSeed::ENTROPY_SENTINEL,
        }
    }
}

impl GenerationParams {
    /// Creates default parameters with the given seed.
    pub fn with_seed(seed: i64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Gentle rolling hills, the preset used for terrain meshes.
    pub fn terrain(seed: i64) -> Self {
        Self {
            scale: 40.0,
            octaves: 2,
            frequency: 0.7,
            persistence: 0.5,
            lacunarity: 1.7,
            base: 0.0,
            seed,
        }
    }

    pub fn noise_seed(&self) -> NoiseSeed {
        NoiseSeed::from(self.seed)
    }

    /// Check every parameter that would make the output undefined.
    pub fn validate(&self) -> Result<()> {
        if self.octaves < 1 {
            return Err(NoiseError::invalid_parameter("octaves", "must be at least 1"));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(NoiseError::invalid_parameter(
                "scale",
                format!("must be a positive number, got {}", self.scale),
            ));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(NoiseError::invalid_parameter(
                "frequency",
                format!("must be a positive number, got {}", self.frequency),
            ));
        }
        for (name, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("base", self.base),
        ] {
            if !value.is_finite() {
                return Err(NoiseError::invalid_parameter(
                    name,
                    format!("must be finite, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

/// Fractal Brownian motion at one world-space point.
///
/// Returns the amplitude-weighted octave sum together with the accumulated
/// `Σ|amplitude|` it should be normalised by. Octaves stop once the sample
/// point, amplitude or running totals stop being finite.
pub(crate) fn fbm(table: &GradientTable, point: Vec2, params: &GenerationParams) -> (f32, f32) {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = params.frequency;
    let mut max_amplitude = 0.0f32;

    for _ in 0..params.octaves {
        let sample_point = point * frequency;
        if !(sample_point.is_finite() && amplitude.is_finite()) {
            break;
        }

        let next_total = total + table.sample(sample_point) * amplitude;
        let next_max = max_amplitude + amplitude.abs();
        if !(next_total.is_finite() && next_max.is_finite()) {
            break;
        }
        total = next_total;
        max_amplitude = next_max;

        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    (total, max_amplitude)
}

/// Offset the octave sum by `base`, normalise and map into `[0, 1]`.
fn to_unit_range(total: f32, max_amplitude: f32, base: f32) -> f32 {
    let raw = if max_amplitude > 0.0 {
        (total + base) / max_amplitude
    } else {
        base
    };
    let value = (raw + 1.0) * 0.5;
    if value.is_nan() {
        0.5
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Generate a smooth fractal noise map with every value in `[0, 1]`.
///
/// One gradient table is built from `params.seed` and reused for every
/// cell; it is dropped when the call returns.
pub fn generate_fractal(width: u32, height: u32, params: &GenerationParams) -> Result<ScalarField> {
    let (width, height) = check_dimensions(width, height)?;
    params.validate()?;

    let table = GradientTable::new(params.noise_seed());

    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let point = Vec2::new(x as f32 / params.scale, y as f32 / params.scale);
            let (total, max_amplitude) = fbm(&table, point, params);
            values.push(to_unit_range(total, max_amplitude, params.base));
        }
    }

    let field = ScalarField::from_generated(width, height, values);
    if let Some((min, max)) = field.min_max() {
        log::debug!(
            "Generated fractal noise {}x{} ({} octaves): min {:.3}, max {:.3}",
            width,
            height,
            params.octaves,
            min,
            max
        );
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(scale: f32, octaves: u32, seed: i64) -> GenerationParams {
        GenerationParams {
            scale,
            octaves,
            frequency: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
            base: 0.0,
            seed,
        }
    }

    fn mean_step(field: &ScalarField) -> f32 {
        let mut total = 0.0;
        let mut count = 0;
        for row in field.rows() {
            for pair in row.windows(2) {
                total += (pair[1] - pair[0]).abs();
                count += 1;
            }
        }
        total / count as f32
    }

    #[test]
    fn test_default_params() {
        let params = GenerationParams::default();
        assert_eq!(params.octaves, 4);
        assert_eq!(params.lacunarity, 2.0);
        assert_eq!(params.persistence, 0.5);
        assert_eq!(params.noise_seed(), NoiseSeed::Entropy);
    }

    #[test]
    fn test_small_map_reproducible() {
        let params = params(1.0, 1, 42);
        let a = generate_fractal(4, 4, &params).unwrap();
        let b = generate_fractal(4, 4, &params).unwrap();

        assert_eq!(a, b, "Same parameters should produce the same map");
        assert_eq!(a.width(), 4);
        assert_eq!(a.height(), 4);
        // Every cell lands on a lattice point at scale 1, where the noise is zero
        assert!(a.values().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_reproducible_across_all_parameters() {
        let params = GenerationParams {
            scale: 13.5,
            octaves: 5,
            frequency: 0.8,
            persistence: 0.6,
            lacunarity: 2.3,
            base: 0.1,
            seed: 777,
        };
        let a = generate_fractal(48, 24, &params).unwrap();
        let b = generate_fractal(48, 24, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_octaves_never_leave_unit_range() {
        for octaves in 1..=10 {
            for persistence in [0.25, 0.5, 1.0, 1.5] {
                let params = GenerationParams {
                    persistence,
                    ..params(7.0, octaves, 5)
                };
                let field = generate_fractal(32, 32, &params).unwrap();
                assert!(
                    field.values().iter().all(|v| (0.0..=1.0).contains(v)),
                    "octaves {} persistence {} left [0, 1]",
                    octaves,
                    persistence
                );
            }
        }
    }

    #[test]
    fn test_many_octaves_stay_finite() {
        let params = GenerationParams {
            lacunarity: 2.0,
            ..params(7.0, 140, 5)
        };
        let field = generate_fractal(4, 4, &params).unwrap();
        assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));

        // Same leading octaves as a shorter run once the frequency overflows
        let shorter = generate_fractal(4, 4, &GenerationParams { octaves: 120, ..params }).unwrap();
        for (a, b) in field.values().iter().zip(shorter.values()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_huge_persistence_stays_finite() {
        for persistence in [1.0e30, f32::MAX, -f32::MAX] {
            let params = GenerationParams {
                persistence,
                ..params(7.0, 6, 5)
            };
            let field = generate_fractal(8, 8, &params).unwrap();
            assert!(
                field.values().iter().all(|v| (0.0..=1.0).contains(v)),
                "persistence {} left [0, 1]",
                persistence
            );
        }
    }

    #[test]
    fn test_base_added_before_normalisation() {
        // 3 octaves at persistence 0.5: Σ|amplitude| = 1.75
        let plain = params(7.3, 3, 5);
        let offset = GenerationParams {
            base: 0.2,
            ..plain.clone()
        };
        let a = generate_fractal(16, 16, &plain).unwrap();
        let b = generate_fractal(16, 16, &offset).unwrap();

        let expected = 0.2 / 1.75 * 0.5;
        let mut checked = 0;
        for (&without, &with) in a.values().iter().zip(b.values()) {
            if with < 1.0 {
                assert!(
                    (with - without - expected).abs() < 1e-5,
                    "base shifted {} by {}, expected {}",
                    without,
                    with - without,
                    expected
                );
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_base_offset_is_clamped() {
        let high = GenerationParams {
            base: 5.0,
            ..params(9.0, 3, 11)
        };
        let field = generate_fractal(16, 16, &high).unwrap();
        assert!(field.values().iter().all(|&v| v == 1.0));

        let low = GenerationParams {
            base: -5.0,
            ..params(9.0, 3, 11)
        };
        let field = generate_fractal(16, 16, &low).unwrap();
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_larger_scale_is_smoother() {
        let rough = generate_fractal(64, 64, &params(4.0, 1, 21)).unwrap();
        let smooth = generate_fractal(64, 64, &params(64.0, 1, 21)).unwrap();

        assert!(
            mean_step(&smooth) < mean_step(&rough),
            "Mean neighbour difference should shrink as scale grows"
        );

        let max_step = smooth
            .rows()
            .flat_map(|row| row.windows(2).map(|p| (p[1] - p[0]).abs()))
            .fold(0.0f32, f32::max);
        assert!(max_step < 0.1, "Adjacent cells differ by {}", max_step);
    }

    #[test]
    fn test_different_seeds_produce_different_maps() {
        let a = generate_fractal(32, 32, &params(6.5, 3, 1)).unwrap();
        let b = generate_fractal(32, 32, &params(6.5, 3, 2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let result = generate_fractal(8, 8, &params(4.0, 0, 1));
        assert!(matches!(
            result,
            Err(NoiseError::InvalidParameter { name: "octaves", .. })
        ));
    }

    #[test]
    fn test_invalid_scale_and_frequency_rejected() {
        for scale in [0.0, -1.0, f32::NAN] {
            let result = generate_fractal(8, 8, &params(scale, 1, 1));
            assert!(matches!(
                result,
                Err(NoiseError::InvalidParameter { name: "scale", .. })
            ));
        }

        let params = GenerationParams {
            frequency: 0.0,
            ..params(4.0, 1, 1)
        };
        assert!(matches!(
            generate_fractal(8, 8, &params),
            Err(NoiseError::InvalidParameter { name: "frequency", .. })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let params = params(4.0, 1, 1);
        assert!(matches!(
            generate_fractal(0, 8, &params),
            Err(NoiseError::InvalidDimension { .. })
        ));
        assert!(matches!(
            generate_fractal(8, 0, &params),
            Err(NoiseError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_params_from_json() {
        let params: GenerationParams =
            serde_json::from_str(r#"{ "scale": 12.0, "octaves": 3, "seed": 23 }"#).unwrap();

        assert_eq!(params.scale, 12.0);
        assert_eq!(params.octaves, 3);
        assert_eq!(params.seed, 23);
        // Missing fields fall back to defaults
        assert_eq!(params.lacunarity, 2.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_terrain_preset_is_valid() {
        let params = GenerationParams::terrain(23);
        assert!(params.validate().is_ok());
        assert_eq!(params.octaves, 2);
        assert_eq!(params.lacunarity, 1.7);
    }
}
