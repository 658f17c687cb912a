/// Planar point cloud extent tracking and window containment checks.
use ndarray::parallel::prelude::*;
use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

const BOUNDS_CHUNK_SIZE: usize = 25_000;

/// Planar (x/y) extent of a point cloud. Computed once per dataset and
/// treated as read-only context for all masking decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlanarBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    /// Update bounds with a new point
    pub fn update(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
        self
    }

    /// True when no point has been folded in yet.
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Get planar dimensions in world units
    pub fn dimensions(&self) -> (f64, f64) {
        (self.x_max - self.x_min, self.y_max - self.y_min)
    }

    /// Whether a square window of the given side length, centered at (x, y),
    /// lies fully inside the bounds. The window needs a half-window margin to
    /// the extent on every side.
    pub fn contains_window(&self, x: f64, y: f64, window_size: f64) -> bool {
        let half = window_size / 2.0;
        x - half >= self.x_min
            && x + half <= self.x_max
            && y - half >= self.y_min
            && y + half <= self.y_max
    }
}

impl Default for PlanarBounds {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate planar bounds over the x/y columns of a point table with
/// chunked parallel reduction.
pub fn compute_bounds(points: ArrayView2<'_, f64>) -> PlanarBounds {
    points
        .axis_chunks_iter(Axis(0), BOUNDS_CHUNK_SIZE)
        .into_par_iter()
        .map(|chunk| {
            let mut local = PlanarBounds::new();
            for row in chunk.rows() {
                local.update(row[0], row[1]);
            }
            local
        })
        .reduce(PlanarBounds::new, PlanarBounds::merge)
}
