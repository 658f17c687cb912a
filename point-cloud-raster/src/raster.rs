/// Nearest-neighbor feature assignment into dense feature grids.
///
/// Output grids are channels-first: `grid[[c, i, j]]` holds feature channel
/// `c` of the point nearest to cell center `(x[i], y[j], z)`.
use crate::error::{RasterError, Result};
use crate::grid::GridCoordinates;
use crate::index::SpatialIndex;
use ndarray::{Array3, ArrayView2};

fn check_feature_indices(data: ArrayView2<'_, f64>, feature_indices: &[usize]) -> Result<()> {
    if feature_indices.is_empty() {
        return Err(RasterError::EmptyFeatureSelection);
    }
    for &index in feature_indices {
        if index >= data.ncols() {
            return Err(RasterError::FeatureIndexOutOfRange {
                index,
                columns: data.ncols(),
            });
        }
    }
    Ok(())
}

/// Assign each grid cell the selected feature columns of its nearest point.
///
/// All cells of the grid are flattened into one batched nearest-neighbor
/// query; this is the primary code path. Every cell receives the features of
/// a real point, so a non-degenerate table never yields an unassigned cell.
pub fn assign_features(
    index: &SpatialIndex,
    data: ArrayView2<'_, f64>,
    coords: &GridCoordinates,
    feature_indices: &[usize],
) -> Result<Array3<f64>> {
    check_feature_indices(data, feature_indices)?;
    let resolution = coords.resolution();

    let queries = coords.flatten();
    let (_, nearest) = index.query_nearest(queries.view())?;

    let mut grid = Array3::zeros((feature_indices.len(), resolution, resolution));
    for (cell, &point) in nearest.iter().enumerate() {
        let (i, j) = (cell / resolution, cell % resolution);
        for (channel, &feature) in feature_indices.iter().enumerate() {
            grid[[channel, i, j]] = data[[point, feature]];
        }
    }
    Ok(grid)
}

/// Reference implementation: one nearest-neighbor query per cell.
///
/// Asymptotically worse than [`assign_features`] and kept only as the oracle
/// the batched path is validated against; both must produce identical grids.
pub fn assign_features_per_cell(
    index: &SpatialIndex,
    data: ArrayView2<'_, f64>,
    coords: &GridCoordinates,
    feature_indices: &[usize],
) -> Result<Array3<f64>> {
    check_feature_indices(data, feature_indices)?;
    let resolution = coords.resolution();

    let mut grid = Array3::zeros((feature_indices.len(), resolution, resolution));
    for (i, &x) in coords.x.iter().enumerate() {
        for (j, &y) in coords.y.iter().enumerate() {
            let (_, point) = index.query_nearest_one(&[x, y, coords.z])?;
            for (channel, &feature) in feature_indices.iter().enumerate() {
                grid[[channel, i, j]] = data[[point, feature]];
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::compute_grid_coordinates;
    use ndarray::array;

    #[test]
    fn empty_feature_selection_is_rejected() {
        let data = array![[0.0, 0.0, 0.0, 1.0]];
        let index = SpatialIndex::new(data.slice(ndarray::s![.., ..3])).unwrap();
        let coords = compute_grid_coordinates([0.0; 3], 1.0, 2).unwrap();
        assert!(matches!(
            assign_features(&index, data.view(), &coords, &[]),
            Err(RasterError::EmptyFeatureSelection)
        ));
    }

    #[test]
    fn out_of_range_feature_column_is_rejected() {
        let data = array![[0.0, 0.0, 0.0, 1.0]];
        let index = SpatialIndex::new(data.slice(ndarray::s![.., ..3])).unwrap();
        let coords = compute_grid_coordinates([0.0; 3], 1.0, 2).unwrap();
        assert!(matches!(
            assign_features(&index, data.view(), &coords, &[4]),
            Err(RasterError::FeatureIndexOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn grid_shape_is_channels_first() {
        let data = array![
            [0.0, 0.0, 0.0, 1.0, 10.0],
            [1.0, 1.0, 0.0, 2.0, 20.0],
        ];
        let index = SpatialIndex::new(data.slice(ndarray::s![.., ..3])).unwrap();
        let coords = compute_grid_coordinates([0.5, 0.5, 0.0], 2.0, 4).unwrap();
        let grid = assign_features(&index, data.view(), &coords, &[3, 4]).unwrap();
        assert_eq!(grid.shape(), &[2, 4, 4]);
    }

    #[test]
    fn single_point_cloud_fills_every_cell() {
        // A k-d tree always returns some nearest neighbor for a non-empty
        // set, so even a one-point table covers the whole grid.
        let data = array![[0.0, 0.0, 0.0, 7.5]];
        let index = SpatialIndex::new(data.slice(ndarray::s![.., ..3])).unwrap();
        let coords = compute_grid_coordinates([100.0, 100.0, 0.0], 4.0, 3).unwrap();
        let grid = assign_features(&index, data.view(), &coords, &[3]).unwrap();
        assert!(grid.iter().all(|&v| v == 7.5));
    }
}
