/// Grid cell coordinate construction around a query point.
use crate::error::{RasterError, Result};
use ndarray::Array2;

/// Cell-center coordinates of one square grid. The grid lies in the
/// horizontal plane: `x`/`y` hold per-axis cell centers and `z` is constant
/// for every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCoordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: f64,
    pub cell_size: f64,
}

impl GridCoordinates {
    pub fn resolution(&self) -> usize {
        self.x.len()
    }

    /// Flatten all cell centers into an `N×3` query matrix, x-index outer
    /// and y-index inner, so row `i * resolution + j` is cell `(i, j)`.
    pub fn flatten(&self) -> Array2<f64> {
        let resolution = self.x.len();
        let mut queries = Array2::zeros((resolution * resolution, 3));
        for (i, &x) in self.x.iter().enumerate() {
            for (j, &y) in self.y.iter().enumerate() {
                let row = i * resolution + j;
                queries[[row, 0]] = x;
                queries[[row, 1]] = y;
                queries[[row, 2]] = self.z;
            }
        }
        queries
    }
}

/// Compute the cell-center coordinates of a square grid of the given
/// resolution whose bounding box is exactly `window_size` wide and tall,
/// centered on `center`. The elevation is carried through unchanged.
///
/// Cell `k` along an axis sits at `center - (resolution/2 - 0.5 - k) *
/// cell_size`. This single half-offset convention is used on every code path;
/// the formula is evaluated per index, never accumulated, so repeated calls
/// are bit-identical.
pub fn compute_grid_coordinates(
    center: [f64; 3],
    window_size: f64,
    resolution: usize,
) -> Result<GridCoordinates> {
    if resolution == 0 {
        return Err(RasterError::InvalidResolution);
    }
    if !window_size.is_finite() || window_size <= 0.0 {
        return Err(RasterError::InvalidWindowSize(window_size));
    }

    let cell_size = window_size / resolution as f64;
    let half_resolution_minus_half = resolution as f64 / 2.0 - 0.5;

    let x = (0..resolution)
        .map(|k| center[0] - (half_resolution_minus_half - k as f64) * cell_size)
        .collect();
    let y = (0..resolution)
        .map(|k| center[1] - (half_resolution_minus_half - k as f64) * cell_size)
        .collect();

    Ok(GridCoordinates {
        x,
        y,
        z: center[2],
        cell_size,
    })
}
