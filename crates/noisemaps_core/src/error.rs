use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while generating or outputting noise maps.
#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("cannot output an empty noise map")]
    EmptyField,

    #[error("I/O failure on {target}: {source}")]
    IoFailure {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image file {}: {source}", .path.display())]
    EncodingFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl NoiseError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NoiseError>;
