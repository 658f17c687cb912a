/// Read-only nearest-neighbor index over point coordinates.
use crate::error::{RasterError, Result};
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use ndarray::ArrayView2;

enum TreeImpl {
    Planar(ImmutableKdTree<f64, 2>),
    Volumetric(ImmutableKdTree<f64, 3>),
}

/// k-d tree over an `N×2` or `N×3` coordinate table. Built once per dataset;
/// owns no mutable state after construction, so it can be shared by reference
/// across worker threads. Queries return indices into the indexed table, with
/// ties broken by the tree's own deterministic traversal order.
pub struct SpatialIndex {
    tree: TreeImpl,
    dims: usize,
    len: usize,
}

impl SpatialIndex {
    pub fn new(coords: ArrayView2<'_, f64>) -> Result<Self> {
        if coords.nrows() == 0 {
            return Err(RasterError::EmptyPointCloud);
        }
        let dims = coords.ncols();
        let tree = match dims {
            2 => {
                let entries: Vec<[f64; 2]> =
                    coords.outer_iter().map(|row| [row[0], row[1]]).collect();
                TreeImpl::Planar(ImmutableKdTree::new_from_slice(&entries))
            }
            3 => {
                let entries: Vec<[f64; 3]> = coords
                    .outer_iter()
                    .map(|row| [row[0], row[1], row[2]])
                    .collect();
                TreeImpl::Volumetric(ImmutableKdTree::new_from_slice(&entries))
            }
            other => return Err(RasterError::UnsupportedDimensionality(other)),
        };
        Ok(Self {
            tree,
            dims,
            len: coords.nrows(),
        })
    }

    /// Number of indexed points. Never zero.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Nearest neighbor for a batch of query coordinates. Results are in
    /// input order; distances are Euclidean.
    pub fn query_nearest(
        &self,
        queries: ArrayView2<'_, f64>,
    ) -> Result<(Vec<f64>, Vec<usize>)> {
        if queries.ncols() != self.dims {
            return Err(RasterError::DimensionMismatch {
                expected: self.dims,
                got: queries.ncols(),
            });
        }
        let mut distances = Vec::with_capacity(queries.nrows());
        let mut indices = Vec::with_capacity(queries.nrows());
        match &self.tree {
            TreeImpl::Planar(tree) => {
                for row in queries.outer_iter() {
                    let hit = tree.nearest_one::<SquaredEuclidean>(&[row[0], row[1]]);
                    distances.push(hit.distance.sqrt());
                    indices.push(hit.item as usize);
                }
            }
            TreeImpl::Volumetric(tree) => {
                for row in queries.outer_iter() {
                    let hit = tree.nearest_one::<SquaredEuclidean>(&[row[0], row[1], row[2]]);
                    distances.push(hit.distance.sqrt());
                    indices.push(hit.item as usize);
                }
            }
        }
        Ok((distances, indices))
    }

    /// Nearest neighbor for a single query coordinate.
    pub fn query_nearest_one(&self, query: &[f64]) -> Result<(f64, usize)> {
        if query.len() != self.dims {
            return Err(RasterError::DimensionMismatch {
                expected: self.dims,
                got: query.len(),
            });
        }
        let (distance, item) = match &self.tree {
            TreeImpl::Planar(tree) => {
                let hit = tree.nearest_one::<SquaredEuclidean>(&[query[0], query[1]]);
                (hit.distance, hit.item)
            }
            TreeImpl::Volumetric(tree) => {
                let hit = tree.nearest_one::<SquaredEuclidean>(&[query[0], query[1], query[2]]);
                (hit.distance, hit.item)
            }
        };
        Ok((distance.sqrt(), item as usize))
    }
}
