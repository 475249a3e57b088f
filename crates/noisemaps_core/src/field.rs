use std::ops::Index;

use crate::error::{NoiseError, Result};

/// A generated 2D noise map with every value in `[0, 1]`.
///
/// Values are stored row-major: `field[y][x]` is row `y`, column `x`.
/// Fields are immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl ScalarField {
    /// Builds a field from data produced by a generator.
    pub(crate) fn from_generated(width: usize, height: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            values,
        }
    }

    /// Builds a field from nested rows (`rows[y][x]`).
    ///
    /// Rows must all have the same length and every value must be a
    /// normalized float. An empty row list or empty rows yield a degenerate
    /// field, which output handling rejects.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(NoiseError::InvalidDimension {
                width: bad.len(),
                height,
            });
        }

        let values: Vec<f32> = rows.into_iter().flatten().collect();
        if let Some(v) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(NoiseError::invalid_parameter(
                "field",
                format!("value {} is outside [0, 1]", v),
            ));
        }

        Ok(Self::from_generated(width, height, values))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the field has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.values[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.values[start..start + self.width])
        } else {
            None
        }
    }

    /// Iterate over rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.height).map(move |y| &self.values[y * self.width..(y + 1) * self.width])
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(<[f32]>::to_vec).collect()
    }

    /// Smallest and largest value, or `None` for a degenerate field.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl Index<usize> for ScalarField {
    type Output = [f32];

    fn index(&self, y: usize) -> &[f32] {
        let start = y * self.width;
        &self.values[start..start + self.width]
    }
}
