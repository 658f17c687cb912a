/// Candidate center selection: bounds inset plus optional subset matching.
use crate::bounds::PlanarBounds;
use crate::error::Result;
use crate::index::SpatialIndex;
use crate::scales::WindowSizeSet;
use ndarray::{Array2, ArrayView2, Axis};

/// Boolean mask over the full point cloud plus the original-index map for the
/// retained points, so per-point results can be scattered back into
/// whole-dataset outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub mask: Vec<bool>,
    pub original_indices: Vec<usize>,
}

impl Selection {
    /// Number of selected points.
    pub fn len(&self) -> usize {
        self.original_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original_indices.is_empty()
    }

    /// Gather the selected rows out of the full table, in mask order.
    pub fn gather(&self, points: ArrayView2<'_, f64>) -> Array2<f64> {
        points.select(Axis(0), &self.original_indices)
    }
}

/// Tolerance-based membership test against an externally supplied list of
/// coordinate triples. Matching goes through a k-d tree over the subset: a
/// candidate matches when its nearest subset entry agrees within `tol` on
/// every axis, absorbing float re-serialization error from intermediate file
/// formats.
struct SubsetMatcher<'a> {
    entries: &'a [[f64; 3]],
    index: Option<SpatialIndex>,
    tol: f64,
}

impl<'a> SubsetMatcher<'a> {
    fn new(entries: &'a [[f64; 3]], tol: f64) -> Result<Self> {
        let index = if entries.is_empty() {
            None
        } else {
            let coords =
                Array2::from_shape_fn((entries.len(), 3), |(row, axis)| entries[row][axis]);
            Some(SpatialIndex::new(coords.view())?)
        };
        Ok(Self {
            entries,
            index,
            tol,
        })
    }

    fn matches(&self, point: [f64; 3]) -> Result<bool> {
        let Some(index) = &self.index else {
            return Ok(false);
        };
        let (_, nearest) = index.query_nearest_one(&point)?;
        let entry = self.entries[nearest];
        Ok((0..3).all(|axis| (point[axis] - entry[axis]).abs() <= self.tol))
    }
}

/// Select the candidate centers that are valid at every requested scale.
///
/// A point is valid iff its square window at the *largest* requested size
/// lies fully inside `bounds` (half-window margin on every side) and, when
/// `subset` is supplied, its coordinates match a subset entry within `tol`.
/// An empty selection is a valid outcome, not an error.
pub fn select_valid_centers(
    points: ArrayView2<'_, f64>,
    window_sizes: &WindowSizeSet,
    bounds: &PlanarBounds,
    subset: Option<&[[f64; 3]]>,
    tol: f64,
) -> Result<Selection> {
    let largest = window_sizes.largest();
    let matcher = match subset {
        Some(entries) => Some(SubsetMatcher::new(entries, tol)?),
        None => None,
    };

    let mut mask = Vec::with_capacity(points.nrows());
    let mut original_indices = Vec::new();
    for (index, row) in points.outer_iter().enumerate() {
        let mut valid = bounds.contains_window(row[0], row[1], largest);
        if valid {
            if let Some(matcher) = &matcher {
                valid = matcher.matches([row[0], row[1], row[2]])?;
            }
        }
        mask.push(valid);
        if valid {
            original_indices.push(index);
        }
    }

    Ok(Selection {
        mask,
        original_indices,
    })
}
