/// Scattering per-point predictions back into whole-dataset outputs.
use crate::error::{RasterError, Result};
use std::path::Path;

/// Reserved label for points that never received a prediction.
pub const UNCLASSIFIED: i64 = -1;

/// Scatter predicted labels back into a vector shaped like the original
/// point cloud. Entries for points that were masked out or skipped keep the
/// [`UNCLASSIFIED`] sentinel, so the result mirrors the input file row for
/// row.
pub fn scatter_predictions(
    total_points: usize,
    original_indices: &[usize],
    labels: &[i64],
) -> Result<Vec<i64>> {
    if original_indices.len() != labels.len() {
        return Err(RasterError::PredictionLengthMismatch {
            indices: original_indices.len(),
            labels: labels.len(),
        });
    }
    let mut scattered = vec![UNCLASSIFIED; total_points];
    for (&index, &label) in original_indices.iter().zip(labels.iter()) {
        if index >= total_points {
            return Err(RasterError::OriginalIndexOutOfRange {
                index,
                total: total_points,
            });
        }
        scattered[index] = label;
    }
    Ok(scattered)
}

/// Write true/predicted label pairs as CSV for offline evaluation.
pub fn write_label_pairs(path: &Path, pairs: &[(i64, i64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["true_label", "predicted_label"])?;
    for (true_label, predicted_label) in pairs {
        writer.write_record([true_label.to_string(), predicted_label.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
