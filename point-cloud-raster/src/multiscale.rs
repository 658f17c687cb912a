/// Multi-scale grid orchestration with the all-scale-or-nothing skip policy.
use crate::bounds::PlanarBounds;
use crate::error::Result;
use crate::grid::compute_grid_coordinates;
use crate::index::SpatialIndex;
use crate::raster::assign_features;
use crate::scales::{Scale, WindowSizeSet};
use ndarray::{Array3, ArrayView2};

/// One grid per requested scale, in window-set order.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiscaleGrids {
    entries: Vec<(Scale, Array3<f64>)>,
}

impl MultiscaleGrids {
    pub fn get(&self, scale: Scale) -> Option<&Array3<f64>> {
        self.entries
            .iter()
            .find(|(entry_scale, _)| *entry_scale == scale)
            .map(|(_, grid)| grid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scale, &Array3<f64>)> {
        self.entries.iter().map(|(scale, grid)| (*scale, grid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generate one feature grid per requested scale around `center`.
///
/// Returns `Ok(None)` when the window at any scale falls outside `bounds`:
/// a point usable at some scales but not all of them is skipped outright, so
/// every produced sample carries a complete set of scales. Takes everything
/// by shared reference and keeps no state, so it can be invoked concurrently
/// by worker threads against one shared index and point table.
pub fn generate_multiscale_grids(
    center: [f64; 3],
    data: ArrayView2<'_, f64>,
    window_sizes: &WindowSizeSet,
    resolution: usize,
    feature_indices: &[usize],
    index: &SpatialIndex,
    bounds: &PlanarBounds,
) -> Result<Option<MultiscaleGrids>> {
    for spec in window_sizes.iter() {
        if !bounds.contains_window(center[0], center[1], spec.size) {
            return Ok(None);
        }
    }

    let mut entries = Vec::with_capacity(window_sizes.len());
    for spec in window_sizes.iter() {
        let coords = compute_grid_coordinates(center, spec.size, resolution)?;
        let grid = assign_features(index, data, &coords, feature_indices)?;
        entries.push((spec.scale, grid));
    }
    Ok(Some(MultiscaleGrids { entries }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::WindowSizeSet;
    use ndarray::array;

    fn window_set(pairs: &[(&str, f64)]) -> WindowSizeSet {
        let named: Vec<(String, f64)> =
            pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect();
        WindowSizeSet::from_named(&named).unwrap()
    }

    #[test]
    fn center_failing_one_scale_is_skipped_entirely() {
        let data = array![[5.0, 5.0, 0.0, 1.0], [6.0, 6.0, 0.0, 2.0]];
        let index = SpatialIndex::new(data.slice(ndarray::s![.., ..3])).unwrap();
        let bounds = PlanarBounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        // Half-window 6 of the large scale exceeds the margin of 5.
        let windows = window_set(&[("small", 4.0), ("large", 12.0)]);
        let result = generate_multiscale_grids(
            [5.0, 5.0, 0.0],
            data.view(),
            &windows,
            4,
            &[3],
            &index,
            &bounds,
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn valid_center_gets_one_grid_per_scale() {
        let data = array![[5.0, 5.0, 0.0, 1.0], [6.0, 6.0, 0.0, 2.0]];
        let index = SpatialIndex::new(data.slice(ndarray::s![.., ..3])).unwrap();
        let bounds = PlanarBounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        let windows = window_set(&[("small", 4.0), ("medium", 8.0)]);
        let grids = generate_multiscale_grids(
            [5.0, 5.0, 0.0],
            data.view(),
            &windows,
            4,
            &[3],
            &index,
            &bounds,
        )
        .unwrap()
        .expect("center fits at every scale");
        assert_eq!(grids.len(), 2);
        let order: Vec<Scale> = grids.iter().map(|(scale, _)| scale).collect();
        assert_eq!(order, vec![Scale::Small, Scale::Medium]);
        assert_eq!(grids.get(Scale::Small).unwrap().shape(), &[1, 4, 4]);
        assert!(grids.get(Scale::Large).is_none());
    }
}
