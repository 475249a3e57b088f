//! Post-generation handling of noise maps: terminal previews and image export.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageResult};

use crate::error::{NoiseError, Result};
use crate::field::ScalarField;

/// Directory name the command line tool writes images into by default.
pub const DEFAULT_IMAGE_DIR: &str = "ImageOutput";

pub const PREVIEW_ROWS: usize = 10;
pub const PREVIEW_COLUMNS: usize = 20;
pub const PREVIEW_THRESHOLD: f32 = 0.5;
pub const PREVIEW_HEADER: &str = "[Preview of noise map]";
pub const PREVIEW_TRUNCATED: &str = "[...] (Preview truncated)";

/// What to do with a map once it has been generated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    None,
    /// Print a small text rendering of the top-left corner.
    Preview,
    /// Write an 8-bit grayscale image to this path.
    Image(PathBuf),
}

impl OutputMode {
    /// Translate a free-form mode name (`none`, `preview`/`map`, `image`).
    ///
    /// `destination` is only used by `image`.
    pub fn parse(mode: &str, destination: impl Into<PathBuf>) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(OutputMode::None),
            "preview" | "map" => Ok(OutputMode::Preview),
            "image" => Ok(OutputMode::Image(destination.into())),
            other => Err(NoiseError::invalid_parameter(
                "mode",
                format!("unknown output mode `{}`, use 'none', 'preview' or 'image'", other),
            )),
        }
    }
}

/// Encodes single channel 8-bit images.
pub trait GrayImageEncoder {
    fn encode_gray8(&self, path: &Path, width: u32, height: u32, bytes: &[u8]) -> ImageResult<()>;
}

/// PNG encoder backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageEncoder;

impl GrayImageEncoder for PngImageEncoder {
    fn encode_gray8(&self, path: &Path, width: u32, height: u32, bytes: &[u8]) -> ImageResult<()> {
        let mut encoded = Vec::new();
        PngEncoder::new(&mut encoded).write_image(bytes, width, height, ColorType::L8)?;

        // Encode fully before touching the filesystem so a failed write
        // never leaves a truncated file behind.
        if let Err(err) = fs::write(path, &encoded) {
            let _ = fs::remove_file(path);
            return Err(err.into());
        }
        Ok(())
    }
}

/// Quantize every value to an 8-bit sample with `round(v * 255)`.
pub fn quantize(field: &ScalarField) -> Vec<u8> {
    field
        .values()
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Write the preview of `field` to `out`.
pub fn write_preview<W: Write + ?Sized>(field: &ScalarField, out: &mut W) -> Result<()> {
    if field.is_empty() {
        return Err(NoiseError::EmptyField);
    }

    let io_err = |source| NoiseError::IoFailure {
        target: "preview output".to_string(),
        source,
    };

    writeln!(out, "{}", PREVIEW_HEADER).map_err(io_err)?;
    for row in field.rows().take(PREVIEW_ROWS) {
        let line: String = row
            .iter()
            .take(PREVIEW_COLUMNS)
            .map(|&v| if v > PREVIEW_THRESHOLD { '#' } else { '.' })
            .collect();
        writeln!(out, "{}", line).map_err(io_err)?;
    }

    if field.height() > PREVIEW_ROWS || field.width() > PREVIEW_COLUMNS {
        writeln!(out, "{}", PREVIEW_TRUNCATED).map_err(io_err)?;
    }
    Ok(())
}

/// Previews or exports generated maps.
pub struct OutputDispatcher {
    image_dir: PathBuf,
    encoder: Box<dyn GrayImageEncoder>,
}

impl OutputDispatcher {
    /// Dispatcher writing PNG files; relative image paths resolve against `image_dir`.
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self::with_encoder(image_dir, PngImageEncoder)
    }

    pub fn with_encoder(image_dir: impl Into<PathBuf>, encoder: impl GrayImageEncoder + 'static) -> Self {
        Self {
            image_dir: image_dir.into(),
            encoder: Box::new(encoder),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Resolve an image destination: absolute paths are kept, relative ones
    /// are placed under the image directory.
    pub fn resolve(&self, destination: &Path) -> PathBuf {
        if destination.is_absolute() {
            destination.to_path_buf()
        } else {
            self.image_dir.join(destination)
        }
    }

    /// Handle `field` according to `mode`. Previews go to `preview_out`.
    ///
    /// Returns the path of the written image for [`OutputMode::Image`].
    pub fn dispatch<W: Write + ?Sized>(
        &self,
        field: &ScalarField,
        mode: &OutputMode,
        preview_out: &mut W,
    ) -> Result<Option<PathBuf>> {
        match mode {
            OutputMode::None => Ok(None),
            OutputMode::Preview => {
                write_preview(field, preview_out)?;
                Ok(None)
            }
            OutputMode::Image(destination) => self.save_image(field, destination).map(Some),
        }
    }

    fn save_image(&self, field: &ScalarField, destination: &Path) -> Result<PathBuf> {
        if field.is_empty() {
            return Err(NoiseError::EmptyField);
        }

        let path = self.resolve(destination);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| NoiseError::IoFailure {
                target: parent.display().to_string(),
                source,
            })?;
        }

        let bytes = quantize(field);
        self.encoder
            .encode_gray8(&path, field.width() as u32, field.height() as u32, &bytes)
            .map_err(|source| NoiseError::EncodingFailure {
                path: path.clone(),
                source,
            })?;

        log::info!("Noise image saved at: {}", path.display());
        Ok(path)
    }
}
