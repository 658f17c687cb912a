/// Run configuration consumed by the engine. Values only; how they are
/// sourced (flags, files, defaults) is the caller's concern.
use crate::error::{RasterError, Result};
use crate::scales::WindowSizeSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default tolerance for coordinate-based subset matching.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Ordered (scale name, window size) pairs, e.g. `[["small", 2.5],
    /// ["medium", 5.0], ["large", 10.0]]`.
    pub window_sizes: Vec<(String, f64)>,
    /// Cells per grid side, shared by all scales.
    pub grid_resolution: usize,
    /// Feature columns to rasterize, by name.
    pub features_to_use: Vec<String>,
    /// Tolerance for coordinate matching against the subset file.
    #[serde(default = "default_tolerance")]
    pub coordinate_tolerance: f64,
    /// Optional CSV of x/y/z triples restricting candidate centers.
    #[serde(default)]
    pub subset_file: Option<PathBuf>,
    /// Feature names sidecar, required for `.npy` input.
    #[serde(default)]
    pub features_file: Option<PathBuf>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl RasterConfig {
    /// Load and validate a configuration file (JSON).
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration errors are fatal and reported here, at setup, never
    /// mid-batch.
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution == 0 {
            return Err(RasterError::InvalidResolution);
        }
        if self.features_to_use.is_empty() {
            return Err(RasterError::EmptyFeatureSelection);
        }
        self.window_size_set()?;
        Ok(())
    }

    pub fn window_size_set(&self) -> Result<WindowSizeSet> {
        WindowSizeSet::from_named(&self.window_sizes)
    }
}
