/// Error types for the rasterization engine.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RasterError>;

/// All failure modes of the engine. Configuration problems are reported at
/// setup before any batch work starts; per-point skips are values, not errors.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("grid resolution must be a positive integer")]
    InvalidResolution,

    #[error("window size must be positive and finite, got {0}")]
    InvalidWindowSize(f64),

    #[error("window size set must contain at least one scale")]
    EmptyWindowSizes,

    #[error("scale '{0}' appears more than once in the window size set")]
    DuplicateScale(String),

    #[error("unknown scale name '{0}' (expected one of: small, medium, large)")]
    UnknownScale(String),

    #[error("feature '{name}' is not present in the point cloud (known features: {known:?})")]
    UnknownFeature { name: String, known: Vec<String> },

    #[error("at least one feature must be selected for rasterization")]
    EmptyFeatureSelection,

    #[error("feature column {index} is out of range for a table with {columns} columns")]
    FeatureIndexOutOfRange { index: usize, columns: usize },

    #[error("spatial index cannot be built from an empty point set")]
    EmptyPointCloud,

    #[error("point table needs at least 4 columns (x, y, z, label), got {0}")]
    TooFewColumns(usize),

    #[error("point table has {columns} columns but {names} feature names")]
    FeatureNameMismatch { columns: usize, names: usize },

    #[error("spatial index supports 2 or 3 dimensions, got {0}")]
    UnsupportedDimensionality(usize),

    #[error("query dimensionality {got} does not match index dimensionality {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("unsupported point cloud format '{0}' (expected .las, .laz, .csv or .npy)")]
    UnsupportedFormat(String),

    #[error("loading .npy point data requires a feature names file")]
    MissingFeatureNames,

    #[error("{path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("{indices} original indices do not match {labels} predicted labels")]
    PredictionLengthMismatch { indices: usize, labels: usize },

    #[error("original index {index} is out of range for a point cloud of {total} points")]
    OriginalIndexOutOfRange { index: usize, total: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Las(#[from] las::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Npy(#[from] ndarray_npy::ReadNpyError),
}
