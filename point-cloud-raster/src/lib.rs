//! Multiscale rasterization of 3D point clouds into 2D feature grids.
//!
//! The engine converts a point cloud with per-point features into
//! fixed-resolution square grids centered on chosen query points, one grid
//! per named scale, by assigning each grid cell the feature vector of its
//! nearest point. Candidate centers are filtered once per dataset so every
//! produced sample has a full window inside the cloud's planar extent at
//! every requested scale.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use point_cloud_raster::{GridDataset, PointCloud, WindowSizeSet, WindowSpec, Scale};
//!
//! // x, y, z, intensity, label
//! let data = array![
//!     [0.0, 0.0, 0.0, 10.0, 1.0],
//!     [2.0, 0.0, 0.0, 20.0, 2.0],
//!     [1.0, 1.0, 0.0, 30.0, 1.0],
//!     [0.0, 2.0, 0.0, 40.0, 2.0],
//!     [2.0, 2.0, 0.0, 50.0, 1.0],
//! ];
//! let names = ["x", "y", "z", "intensity", "label"]
//!     .iter()
//!     .map(|n| n.to_string())
//!     .collect();
//! let cloud = PointCloud::new(data, names).unwrap();
//!
//! let windows = WindowSizeSet::new(vec![WindowSpec {
//!     scale: Scale::Small,
//!     size: 1.0,
//! }])
//! .unwrap();
//! let dataset = GridDataset::new(
//!     cloud,
//!     windows,
//!     8,
//!     &["intensity".to_string()],
//!     None,
//!     1e-8,
//! )
//! .unwrap();
//! assert!(dataset.len() > 0);
//! ```

mod bounds;
mod cloud;
mod config;
mod dataset;
mod error;
mod grid;
mod index;
mod loader;
mod mask;
mod multiscale;
mod predictions;
mod raster;
mod scales;

pub use bounds::{PlanarBounds, compute_bounds};
pub use cloud::{LabelRemap, PointCloud};
pub use config::{DEFAULT_TOLERANCE, RasterConfig};
pub use dataset::{GridDataset, GridSample, SkipStats};
pub use error::{RasterError, Result};
pub use grid::{GridCoordinates, compute_grid_coordinates};
pub use index::SpatialIndex;
pub use loader::{
    read_csv, read_feature_names, read_las, read_npy, read_point_cloud, read_subset_csv,
};
pub use mask::{Selection, select_valid_centers};
pub use multiscale::{MultiscaleGrids, generate_multiscale_grids};
pub use predictions::{UNCLASSIFIED, scatter_predictions, write_label_pairs};
pub use raster::{assign_features, assign_features_per_cell};
pub use scales::{Scale, WindowSizeSet, WindowSpec};
