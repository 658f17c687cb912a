/// Point cloud loaders: LAS/LAZ, CSV, and NPY with a feature-names sidecar.
///
/// Format specifics end here; the engine only ever sees the numeric table
/// and its column name map.
use crate::cloud::PointCloud;
use crate::error::{RasterError, Result};
use las::Reader;
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sample size for colour detection
const COLOUR_DETECTION_SAMPLE_SIZE: usize = 100;

/// Load a point cloud, dispatching on the file extension. `features_file`
/// is only consulted for `.npy` input, which carries no column names of its
/// own.
pub fn read_point_cloud(path: &Path, features_file: Option<&Path>) -> Result<PointCloud> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "las" | "laz" => read_las(path),
        "csv" => read_csv(path),
        "npy" => {
            let features_file = features_file.ok_or(RasterError::MissingFeatureNames)?;
            read_npy(path, features_file)
        }
        other => Err(RasterError::UnsupportedFormat(other.to_string())),
    }
}

/// Create LAS file reader for point cloud access.
/// Handles both .las and .laz compressed formats.
fn create_reader(path: &Path) -> Result<Reader> {
    let file = File::open(path)?;
    let buf_reader = BufReader::new(file);
    Ok(Reader::new(buf_reader)?)
}

/// Detect if colour data exists in the point cloud.
/// Samples initial points to determine RGB availability.
fn detect_colour_data(path: &Path) -> Result<bool> {
    let mut reader = create_reader(path)?;
    let mut colour_count = 0;
    for point in reader.points().take(COLOUR_DETECTION_SAMPLE_SIZE) {
        if point?.color.is_some() {
            colour_count += 1;
        }
    }
    Ok(colour_count > 0)
}

/// Read a LAS/LAZ file into a point table. Columns are x/y/z, intensity and
/// return counts, RGB when the file carries colour data, and the
/// classification code as the label.
pub fn read_las(path: &Path) -> Result<PointCloud> {
    let has_colour = detect_colour_data(path)?;

    let mut reader = create_reader(path)?;
    let total_points = reader.header().number_of_points() as usize;

    let mut known_features: Vec<String> =
        ["x", "y", "z", "intensity", "return_number", "number_of_returns"]
            .iter()
            .map(|n| n.to_string())
            .collect();
    if has_colour {
        known_features.extend(["red", "green", "blue"].iter().map(|n| n.to_string()));
    }
    known_features.push("label".to_string());
    let columns = known_features.len();

    let mut values = Vec::with_capacity(total_points * columns);
    for point in reader.points() {
        let point = point?;
        values.push(point.x);
        values.push(point.y);
        values.push(point.z);
        values.push(point.intensity as f64);
        values.push(point.return_number as f64);
        values.push(point.number_of_returns as f64);
        if has_colour {
            let (red, green, blue) = point
                .color
                .map(|c| (c.red, c.green, c.blue))
                .unwrap_or((0, 0, 0));
            values.push(red as f64);
            values.push(green as f64);
            values.push(blue as f64);
        }
        values.push(u8::from(point.classification) as f64);
    }

    let rows = values.len() / columns;
    let data = Array2::from_shape_vec((rows, columns), values)?;
    PointCloud::new(data, known_features)
}

/// Read a CSV point table. The header row is the feature name list; the
/// required x/y/z columns are reordered to the front and every other column
/// is carried through in header order.
pub fn read_csv(path: &Path) -> Result<PointCloud> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let coordinate_columns = ["x", "y", "z"]
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| RasterError::MalformedInput {
                    path: path.display().to_string(),
                    message: format!("missing required column '{name}'"),
                })
        })
        .collect::<Result<Vec<usize>>>()?;
    let other_columns: Vec<usize> = (0..headers.len())
        .filter(|column| !coordinate_columns.contains(column))
        .collect();

    let mut known_features: Vec<String> =
        ["x", "y", "z"].iter().map(|n| n.to_string()).collect();
    known_features.extend(other_columns.iter().map(|&column| headers[column].clone()));
    let columns = known_features.len();

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for &column in coordinate_columns.iter().chain(other_columns.iter()) {
            let field = record.get(column).ok_or_else(|| RasterError::MalformedInput {
                path: path.display().to_string(),
                message: format!("row {} is missing column '{}'", row + 1, headers[column]),
            })?;
            let value: f64 =
                field
                    .trim()
                    .parse()
                    .map_err(|_| RasterError::MalformedInput {
                        path: path.display().to_string(),
                        message: format!(
                            "non-numeric value {:?} in column '{}' (row {})",
                            field,
                            headers[column],
                            row + 1
                        ),
                    })?;
            values.push(value);
        }
    }

    let rows = values.len() / columns;
    let data = Array2::from_shape_vec((rows, columns), values)?;
    PointCloud::new(data, known_features)
}

/// Read a raw NPY table plus its sidecar feature-names file (first CSV row).
pub fn read_npy(path: &Path, features_file: &Path) -> Result<PointCloud> {
    let known_features = read_feature_names(features_file)?;
    let file = File::open(path)?;
    let data = Array2::<f64>::read_npy(file)?;
    PointCloud::new(data, known_features)
}

/// Load the feature name list for `.npy` data from the first row of a CSV
/// file.
pub fn read_feature_names(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if names.is_empty() {
        return Err(RasterError::MalformedInput {
            path: path.display().to_string(),
            message: "feature names file is empty".to_string(),
        });
    }
    Ok(names)
}

/// Read the coordinate triples of a subset file (CSV with x/y/z columns)
/// used to restrict candidate centers.
pub fn read_subset_csv(path: &Path) -> Result<Vec<[f64; 3]>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let coordinate_columns = ["x", "y", "z"]
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| RasterError::MalformedInput {
                    path: path.display().to_string(),
                    message: format!("missing required column '{name}'"),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut triples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let mut triple = [0.0; 3];
        for (axis, &column) in coordinate_columns.iter().enumerate() {
            let field = record.get(column).ok_or_else(|| RasterError::MalformedInput {
                path: path.display().to_string(),
                message: format!("row {} is missing column '{}'", row + 1, headers[column]),
            })?;
            triple[axis] =
                field
                    .trim()
                    .parse()
                    .map_err(|_| RasterError::MalformedInput {
                        path: path.display().to_string(),
                        message: format!(
                            "non-numeric value {:?} in column '{}' (row {})",
                            field,
                            headers[column],
                            row + 1
                        ),
                    })?;
        }
        triples.push(triple);
    }
    Ok(triples)
}
