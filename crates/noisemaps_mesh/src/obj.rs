//! Wavefront OBJ export for terrain meshes.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::MeshError;
use crate::mesh_gen::TerrainMesh;

impl TerrainMesh {
    /// Write the mesh as `v`, `vn` and `f` records.
    ///
    /// OBJ indices are 1-based; each face references the vertex and normal
    /// with the same index (`f a//a b//b c//c`).
    pub fn write_obj_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "# {} vertices, {} triangles", self.vertex_count(), self.triangle_count())?;

        for [x, y, z] in &self.positions {
            writeln!(out, "v {} {} {}", x, y, z)?;
        }
        for [x, y, z] in &self.normals {
            writeln!(out, "vn {} {} {}", x, y, z)?;
        }
        for triangle in self.indices.chunks(3) {
            let a = triangle[0] + 1;
            let b = triangle[1] + 1;
            let c = triangle[2] + 1;
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        Ok(())
    }

    /// Write the mesh to an OBJ file, creating the parent directory if needed.
    pub fn write_obj(&self, path: &Path) -> Result<(), MeshError> {
        let io_err = |source| MeshError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.write_obj_to(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(io_err)?;

        log::info!("OBJ mesh written to: {}", path.display());
        Ok(())
    }
}
