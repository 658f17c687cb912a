//! Shared synthetic point clouds for integration tests.

use ndarray::Array2;
use point_cloud_raster::PointCloud;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn feature_names() -> Vec<String> {
    ["x", "y", "z", "intensity", "red", "label"]
        .iter()
        .map(|n| n.to_string())
        .collect()
}

/// An `n×n` point grid with unit spacing at z = 0. Point `(col, row)` is row
/// `row * n + col` of the table; its intensity is `10 * (row * n + col)` and
/// its red channel mirrors the intensity shifted by one.
pub fn unit_grid_cloud(n: usize) -> PointCloud {
    let mut values = Vec::with_capacity(n * n * 6);
    for row in 0..n {
        for col in 0..n {
            let index = row * n + col;
            values.push(col as f64);
            values.push(row as f64);
            values.push(0.0);
            values.push((index * 10) as f64);
            values.push((index * 10 + 1) as f64);
            values.push((index % 3) as f64 * 2.0 + 1.0);
        }
    }
    let data = Array2::from_shape_vec((n * n, 6), values).expect("table shape");
    PointCloud::new(data, feature_names()).expect("valid cloud")
}

/// Uniformly random points over `[0, extent)²` with random positive features
/// and small integer labels.
pub fn random_cloud(count: usize, extent: f64, seed: u64) -> PointCloud {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut values = Vec::with_capacity(count * 6);
    for _ in 0..count {
        values.push(rng.gen_range(0.0..extent));
        values.push(rng.gen_range(0.0..extent));
        values.push(rng.gen_range(0.0..5.0));
        values.push(rng.gen_range(1.0..100.0));
        values.push(rng.gen_range(1.0..100.0));
        values.push(rng.gen_range(0..4) as f64);
    }
    let data = Array2::from_shape_vec((count, 6), values).expect("table shape");
    PointCloud::new(data, feature_names()).expect("valid cloud")
}
