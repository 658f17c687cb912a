/// In-memory point table with named feature columns and label utilities.
use crate::error::{RasterError, Result};
use ndarray::{Array2, ArrayView2, s};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A point cloud as a dense numeric table. Rows are points, columns are
/// `x, y, z, feature…, label`. The column name list is established at load
/// time and immutable for the lifetime of the dataset.
pub struct PointCloud {
    data: Array2<f64>,
    known_features: Vec<String>,
    name_to_column: HashMap<String, usize>,
}

impl PointCloud {
    pub fn new(data: Array2<f64>, known_features: Vec<String>) -> Result<Self> {
        if data.ncols() != known_features.len() {
            return Err(RasterError::FeatureNameMismatch {
                columns: data.ncols(),
                names: known_features.len(),
            });
        }
        if data.ncols() < 4 {
            return Err(RasterError::TooFewColumns(data.ncols()));
        }
        let mut name_to_column = HashMap::new();
        for (column, name) in known_features.iter().enumerate() {
            name_to_column.entry(name.clone()).or_insert(column);
        }
        Ok(Self {
            data,
            known_features,
            name_to_column,
        })
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn num_columns(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn known_features(&self) -> &[String] {
        &self.known_features
    }

    /// The x/y/z columns of every point.
    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., ..3])
    }

    pub fn point(&self, idx: usize) -> [f64; 3] {
        [
            self.data[[idx, 0]],
            self.data[[idx, 1]],
            self.data[[idx, 2]],
        ]
    }

    /// The label of a point (last column).
    pub fn label(&self, idx: usize) -> f64 {
        self.data[[idx, self.data.ncols() - 1]]
    }

    /// Resolve selected feature names to column indices. Unknown names and
    /// empty selections are configuration errors reported before any batch
    /// work starts.
    pub fn feature_indices(&self, features_to_use: &[String]) -> Result<Vec<usize>> {
        if features_to_use.is_empty() {
            return Err(RasterError::EmptyFeatureSelection);
        }
        features_to_use
            .iter()
            .map(|name| {
                self.name_to_column
                    .get(name)
                    .copied()
                    .ok_or_else(|| RasterError::UnknownFeature {
                        name: name.clone(),
                        known: self.known_features.clone(),
                    })
            })
            .collect()
    }

    /// Remap labels in place to the contiguous range `[0, num_classes)` and
    /// return the mapping so it can be persisted alongside derived artifacts.
    pub fn remap_labels(&mut self) -> LabelRemap {
        let column = self.data.ncols() - 1;
        let mut originals: Vec<f64> = self.data.column(column).iter().copied().collect();
        originals.sort_by(f64::total_cmp);
        originals.dedup_by(|a, b| a.total_cmp(b).is_eq());

        let remap = LabelRemap { originals };
        for value in self.data.column_mut(column).iter_mut() {
            if let Some(contiguous) = remap.to_contiguous(*value) {
                *value = contiguous as f64;
            }
        }
        remap
    }

    /// Number of distinct label values currently present.
    pub fn num_classes(&self) -> usize {
        let column = self.data.ncols() - 1;
        let mut labels: Vec<f64> = self.data.column(column).iter().copied().collect();
        labels.sort_by(f64::total_cmp);
        labels.dedup_by(|a, b| a.total_cmp(b).is_eq());
        labels.len()
    }

    /// Replace NaN and infinite values with 0.0, returning how many cells
    /// were touched. Rasterization assumes a sanitised table; an all-zero
    /// grid downstream points back here.
    pub fn clean_non_finite(&mut self) -> usize {
        let mut replaced = 0;
        for value in self.data.iter_mut() {
            if !value.is_finite() {
                *value = 0.0;
                replaced += 1;
            }
        }
        replaced
    }
}

/// Injective mapping from original label values to contiguous class ids.
/// `originals` is sorted; the contiguous id of a label is its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRemap {
    originals: Vec<f64>,
}

impl LabelRemap {
    pub fn num_classes(&self) -> usize {
        self.originals.len()
    }

    pub fn to_contiguous(&self, original: f64) -> Option<usize> {
        self.originals
            .binary_search_by(|probe| probe.total_cmp(&original))
            .ok()
    }

    pub fn to_original(&self, contiguous: usize) -> Option<f64> {
        self.originals.get(contiguous).copied()
    }

    /// Persist the mapping as JSON next to whatever artifacts were derived
    /// from the remapped labels.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn sample_cloud() -> PointCloud {
        let data = array![
            [0.0, 0.0, 0.0, 10.0, 200.0, 5.0],
            [1.0, 0.0, 0.0, 20.0, 210.0, 2.0],
            [0.0, 1.0, 0.0, 30.0, 220.0, 5.0],
            [1.0, 1.0, 0.0, 40.0, 230.0, 9.0],
        ];
        PointCloud::new(data, names(&["x", "y", "z", "intensity", "red", "label"])).unwrap()
    }

    #[test]
    fn rejects_mismatched_name_count() {
        let data = Array2::<f64>::zeros((2, 4));
        assert!(matches!(
            PointCloud::new(data, names(&["x", "y", "z"])),
            Err(RasterError::FeatureNameMismatch { .. })
        ));
    }

    #[test]
    fn rejects_too_few_columns() {
        let data = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            PointCloud::new(data, names(&["x", "y", "z"])),
            Err(RasterError::TooFewColumns(3))
        ));
    }

    #[test]
    fn resolves_feature_indices_by_name() {
        let cloud = sample_cloud();
        let indices = cloud
            .feature_indices(&names(&["intensity", "red"]))
            .unwrap();
        assert_eq!(indices, vec![3, 4]);
    }

    #[test]
    fn unknown_feature_is_a_configuration_error() {
        let cloud = sample_cloud();
        assert!(matches!(
            cloud.feature_indices(&names(&["nir"])),
            Err(RasterError::UnknownFeature { .. })
        ));
        assert!(matches!(
            cloud.feature_indices(&[]),
            Err(RasterError::EmptyFeatureSelection)
        ));
    }

    #[test]
    fn remap_produces_contiguous_labels() {
        let mut cloud = sample_cloud();
        let remap = cloud.remap_labels();
        assert_eq!(remap.num_classes(), 3);
        let labels: Vec<f64> = (0..cloud.len()).map(|i| cloud.label(i)).collect();
        assert_eq!(labels, vec![1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn remap_round_trips_exactly() {
        let mut cloud = sample_cloud();
        let before: Vec<f64> = (0..cloud.len()).map(|i| cloud.label(i)).collect();
        let remap = cloud.remap_labels();
        for (i, original) in before.iter().enumerate() {
            let contiguous = cloud.label(i) as usize;
            assert_eq!(remap.to_original(contiguous), Some(*original));
        }
    }

    #[test]
    fn clean_non_finite_replaces_and_counts() {
        let data = array![
            [0.0, 0.0, 0.0, f64::NAN, 1.0],
            [1.0, 0.0, 0.0, f64::INFINITY, 2.0],
        ];
        let mut cloud =
            PointCloud::new(data, names(&["x", "y", "z", "intensity", "label"])).unwrap();
        assert_eq!(cloud.clean_non_finite(), 2);
        assert!(cloud.data().iter().all(|v| v.is_finite()));
        assert_eq!(cloud.clean_non_finite(), 0);
    }
}
