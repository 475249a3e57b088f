pub mod error;
pub mod mesh_gen;
pub mod obj;

// Re-export commonly used items
pub use error::MeshError;
pub use mesh_gen::{MeshOptions, TerrainMesh};
