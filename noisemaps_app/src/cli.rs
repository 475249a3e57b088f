use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use noisemaps_core::{
    create_fractal_noise, create_noise, GenerationParams, NoiseError, OutputDispatcher, OutputMode,
    DEFAULT_IMAGE_DIR,
};
use noisemaps_mesh::{MeshError, MeshOptions, TerrainMesh};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Noise(#[from] NoiseError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("failed to read parameter file {}: {source}", .path.display())]
    ParamsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid parameter file {}: {source}", .path.display())]
    ParamsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Procedural noise map generator.
#[derive(Debug, Parser)]
#[command(name = "noisemaps")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory that relative image file names are written into.
    #[arg(long, global = true, default_value = DEFAULT_IMAGE_DIR)]
    image_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a uniform white noise map.
    White {
        #[command(flatten)]
        map: MapArgs,
    },

    /// Generate a fractal (Perlin-style) noise map.
    Fractal {
        #[command(flatten)]
        map: MapArgs,

        #[command(flatten)]
        noise: NoiseArgs,
    },

    /// Generate a fractal heightmap and export it as an OBJ terrain mesh.
    Terrain {
        #[command(flatten)]
        map: MapArgs,

        #[command(flatten)]
        noise: NoiseArgs,

        /// Mesh height of a cell with noise value 1.0.
        #[arg(long, default_value = "55.0")]
        height_scale: f32,

        /// Spacing between grid points.
        #[arg(long, default_value = "1.3")]
        cell_size: f32,

        /// Output OBJ file.
        #[arg(long, default_value = "output/terrain_perlin.obj")]
        obj: PathBuf,
    },
}

#[derive(Debug, Args)]
struct MapArgs {
    /// Map width in cells.
    #[arg(long, default_value = "512")]
    width: u32,

    /// Map height in cells.
    #[arg(long, default_value = "512")]
    height: u32,

    /// Random seed; -1 picks a random one.
    #[arg(short, long, default_value = "-1", allow_hyphen_values = true)]
    seed: i64,

    /// What to do with the map: none, preview (or map), image.
    #[arg(long, default_value = "none")]
    show: String,

    /// Image file name, relative to the image directory.
    #[arg(short, long, default_value = "noise.png")]
    file: PathBuf,
}

/// Fractal parameters; flags that are given override the parameter file.
#[derive(Debug, Args)]
struct NoiseArgs {
    /// JSON file with generation parameters.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Spatial zoom of the noise.
    #[arg(long)]
    scale: Option<f32>,

    /// Number of noise octaves.
    #[arg(long)]
    octaves: Option<u32>,

    /// Base lattice frequency.
    #[arg(long)]
    frequency: Option<f32>,

    /// Amplitude decay per octave.
    #[arg(long)]
    persistence: Option<f32>,

    /// Frequency multiplier per octave.
    #[arg(long)]
    lacunarity: Option<f32>,

    /// Constant offset added before normalization.
    #[arg(long, allow_hyphen_values = true)]
    base: Option<f32>,
}

impl NoiseArgs {
    /// Resolve parameters: preset, then file, then individual flags.
    fn resolve(&self, preset: GenerationParams, seed: i64) -> Result<GenerationParams, AppError> {
        let mut params = match &self.params {
            Some(path) => load_params(path)?,
            None => preset,
        };
        params.seed = seed;

        if let Some(scale) = self.scale {
            params.scale = scale;
        }
        if let Some(octaves) = self.octaves {
            params.octaves = octaves;
        }
        if let Some(frequency) = self.frequency {
            params.frequency = frequency;
        }
        if let Some(persistence) = self.persistence {
            params.persistence = persistence;
        }
        if let Some(lacunarity) = self.lacunarity {
            params.lacunarity = lacunarity;
        }
        if let Some(base) = self.base {
            params.base = base;
        }
        Ok(params)
    }
}

fn load_params(path: &Path) -> Result<GenerationParams, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ParamsRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::ParamsParse {
        path: path.to_path_buf(),
        source,
    })
}

impl MapArgs {
    fn output_mode(&self) -> Result<OutputMode, AppError> {
        Ok(OutputMode::parse(&self.show, &self.file)?)
    }
}

impl Cli {
    pub fn run(self) -> Result<(), AppError> {
        let dispatcher = OutputDispatcher::new(&self.image_dir);

        match self.command {
            Commands::White { map } => {
                let mode = map.output_mode()?;
                log::info!("Generating {}x{} white noise map...", map.width, map.height);
                create_noise(map.width, map.height, map.seed, &mode, &dispatcher)?;
            }
            Commands::Fractal { map, noise } => {
                let mode = map.output_mode()?;
                let params = noise.resolve(GenerationParams::default(), map.seed)?;
                log::info!("Generating {}x{} fractal noise map...", map.width, map.height);
                create_fractal_noise(map.width, map.height, &params, &mode, &dispatcher)?;
            }
            Commands::Terrain {
                map,
                noise,
                height_scale,
                cell_size,
                obj,
            } => {
                let mode = map.output_mode()?;
                let params = noise.resolve(GenerationParams::terrain(map.seed), map.seed)?;
                log::info!("Generating {}x{} heightmap...", map.width, map.height);
                let heightmap = create_fractal_noise(map.width, map.height, &params, &mode, &dispatcher)?;

                log::info!("Heightmap generated. Exporting to OBJ...");
                let options = MeshOptions {
                    height_scale,
                    cell_size,
                };
                TerrainMesh::from_field(&heightmap, &options)?.write_obj(&obj)?;
            }
        }
        Ok(())
    }
}
