use glam::Vec3;
use noisemaps_core::ScalarField;

use crate::error::MeshError;

/// World-space scaling applied when turning a heightmap into a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Height of a cell whose noise value is 1.0.
    pub height_scale: f32,
    /// Spacing between neighbouring grid points.
    pub cell_size: f32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            height_scale: 55.0,
            cell_size: 1.3,
        }
    }
}

impl MeshOptions {
    fn validate(&self) -> Result<(), MeshError> {
        for (name, value) in [("height_scale", self.height_scale), ("cell_size", self.cell_size)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MeshError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Regular grid mesh built from a heightmap.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Triangle list, zero-based.
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// One vertex per heightmap cell, two triangles per grid quad.
    ///
    /// Cell `(x, y)` becomes vertex `(x * cell, v * height_scale, y * cell)`
    /// with the grid centred on the origin in the XZ plane.
    pub fn from_field(field: &ScalarField, options: &MeshOptions) -> Result<Self, MeshError> {
        if field.is_empty() {
            return Err(MeshError::EmptyField);
        }
        options.validate()?;

        let width = field.width();
        let height = field.height();
        let half_width = (width - 1) as f32 * options.cell_size * 0.5;
        let half_height = (height - 1) as f32 * options.cell_size * 0.5;

        let mut positions = Vec::with_capacity(width * height);
        for (iy, row) in field.rows().enumerate() {
            for (ix, &value) in row.iter().enumerate() {
                let world_x = ix as f32 * options.cell_size - half_width;
                let world_z = iy as f32 * options.cell_size - half_height;
                positions.push([world_x, value * options.height_scale, world_z]);
            }
        }

        let grid_width = width as u32;
        let quads = (width - 1) * (height - 1);
        let mut indices = Vec::with_capacity(quads * 6);

        for z in 0..height as u32 - 1 {
            for x in 0..grid_width - 1 {
                let top_left = z * grid_width + x;
                let top_right = top_left + 1;
                let bottom_left = (z + 1) * grid_width + x;
                let bottom_right = bottom_left + 1;

                indices.push(top_left);
                indices.push(bottom_left);
                indices.push(top_right);

                indices.push(top_right);
                indices.push(bottom_left);
                indices.push(bottom_right);
            }
        }

        let normals = calculate_smooth_normals(&positions, &indices);

        log::debug!(
            "Built terrain mesh: {} vertices, {} triangles",
            positions.len(),
            indices.len() / 3
        );

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Calculate smooth vertex normals by averaging face normals.
///
/// Vertices that belong to no triangle point straight up.
fn calculate_smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let p0 = Vec3::from_array(positions[i0]);
        let p1 = Vec3::from_array(positions[i1]);
        let p2 = Vec3::from_array(positions[i2]);

        let face_normal = (p1 - p0).cross(p2 - p0);

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}
