use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or exporting a terrain mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("heightmap has zero width or height")]
    EmptyField,

    #[error("invalid mesh option `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
