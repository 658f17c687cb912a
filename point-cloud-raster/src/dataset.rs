/// Streaming dataset: masking once per dataset, then per-point samples.
use crate::bounds::{PlanarBounds, compute_bounds};
use crate::cloud::PointCloud;
use crate::error::{RasterError, Result};
use crate::index::SpatialIndex;
use crate::mask::{Selection, select_valid_centers};
use crate::multiscale::{MultiscaleGrids, generate_multiscale_grids};
use crate::scales::WindowSizeSet;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

/// One unit of downstream consumption: the complete set of per-scale grids
/// for a center point, its remapped label, and its row in the original
/// (unmasked) point cloud.
pub struct GridSample {
    pub grids: MultiscaleGrids,
    pub label: i64,
    pub original_index: usize,
}

/// Aggregate outcome of a batch generation pass. Skips are expected and
/// observable, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipStats {
    pub generated: usize,
    pub skipped: usize,
}

/// Owns everything a dataset pass needs: the sanitised point table, the
/// spatial index and planar bounds (both built exactly once), and the
/// candidate selection. All query methods take `&self`, so one dataset can
/// be shared read-only across worker threads.
pub struct GridDataset {
    cloud: PointCloud,
    index: SpatialIndex,
    bounds: PlanarBounds,
    window_sizes: WindowSizeSet,
    resolution: usize,
    feature_indices: Vec<usize>,
    selection: Selection,
}

impl GridDataset {
    pub fn new(
        cloud: PointCloud,
        window_sizes: WindowSizeSet,
        resolution: usize,
        features_to_use: &[String],
        subset: Option<&[[f64; 3]]>,
        tol: f64,
    ) -> Result<Self> {
        if resolution == 0 {
            return Err(RasterError::InvalidResolution);
        }
        let feature_indices = cloud.feature_indices(features_to_use)?;
        // The index covers the full cloud, not the selection: feature
        // assignment draws neighbors from every point.
        let index = SpatialIndex::new(cloud.coords())?;
        let bounds = compute_bounds(cloud.coords());
        let selection =
            select_valid_centers(cloud.data(), &window_sizes, &bounds, subset, tol)?;

        Ok(Self {
            cloud,
            index,
            bounds,
            window_sizes,
            resolution,
            feature_indices,
            selection,
        })
    }

    /// Number of selected candidate centers. Zero is a valid, if pointless,
    /// state and must be handled by callers.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn bounds(&self) -> &PlanarBounds {
        &self.bounds
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Generate the multiscale grids for the `idx`-th selected center
    /// (`idx < self.len()`). `Ok(None)` means the point was skipped.
    pub fn sample(&self, idx: usize) -> Result<Option<GridSample>> {
        let original_index = self.selection.original_indices[idx];
        let center = self.cloud.point(original_index);
        let grids = generate_multiscale_grids(
            center,
            self.cloud.data(),
            &self.window_sizes,
            self.resolution,
            &self.feature_indices,
            &self.index,
            &self.bounds,
        )?;
        Ok(grids.map(|grids| GridSample {
            grids,
            label: self.cloud.label(original_index) as i64,
            original_index,
        }))
    }

    /// Generate samples for every selected center in parallel. The progress
    /// bar is advisory; results are identical to a sequential pass.
    pub fn generate_all(&self) -> Result<(Vec<GridSample>, SkipStats)> {
        let pb = ProgressBar::new(self.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} points ({percent}%) {msg}")
                .unwrap()
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Generating multiscale grids");

        let outcomes = (0..self.len())
            .into_par_iter()
            .map(|idx| {
                let outcome = self.sample(idx);
                pb.inc(1);
                outcome
            })
            .collect::<Result<Vec<_>>>()?;
        pb.finish_with_message("Grids generated");

        let mut samples = Vec::with_capacity(outcomes.len());
        let mut stats = SkipStats::default();
        for outcome in outcomes {
            match outcome {
                Some(sample) => {
                    stats.generated += 1;
                    samples.push(sample);
                }
                None => stats.skipped += 1,
            }
        }
        println!(
            "Generated {} grid samples ({} skipped)",
            stats.generated, stats.skipped
        );
        Ok((samples, stats))
    }
}
