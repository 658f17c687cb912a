/// Point cloud to multiscale feature grid converter entry point
use ndarray_npy::WriteNpyExt;
use point_cloud_raster::{GridDataset, RasterConfig, read_point_cloud, read_subset_csv};
use std::env;
use std::fs::{self, File};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <config.json> <input cloud> <output dir>", args[0]);
        std::process::exit(1);
    }

    let config = RasterConfig::from_file(Path::new(&args[1]))?;
    let input_path = Path::new(&args[2]);
    let output_dir = Path::new(&args[3]);
    fs::create_dir_all(output_dir)?;

    println!("Loading point cloud from {}...", input_path.display());
    let mut cloud = read_point_cloud(input_path, config.features_file.as_deref())?;
    println!(
        "Loaded {} points with features: {:?}",
        cloud.len(),
        cloud.known_features()
    );

    let replaced = cloud.clean_non_finite();
    if replaced > 0 {
        println!("Replaced {} non-finite feature values with 0.0", replaced);
    }

    // Remap labels to a contiguous range and persist the mapping so
    // downstream consumers can interpret class ids.
    let remap = cloud.remap_labels();
    let remap_path = output_dir.join("label_remap.json");
    remap.to_file(&remap_path)?;
    println!(
        "Remapped {} classes, mapping saved to {}",
        remap.num_classes(),
        remap_path.display()
    );

    let subset = match &config.subset_file {
        Some(path) => {
            let triples = read_subset_csv(path)?;
            println!(
                "Restricting candidates to {} subset coordinates from {}",
                triples.len(),
                path.display()
            );
            Some(triples)
        }
        None => None,
    };

    let total_points = cloud.len();
    let dataset = GridDataset::new(
        cloud,
        config.window_size_set()?,
        config.grid_resolution,
        &config.features_to_use,
        subset.as_deref(),
        config.coordinate_tolerance,
    )?;
    println!(
        "Selected {} of {} points as grid centers",
        dataset.len(),
        total_points
    );
    print_bounds(dataset.bounds());

    let (samples, stats) = dataset.generate_all()?;

    // One directory per scale, one .npy grid per (sample, scale).
    for (name, _) in &config.window_sizes {
        fs::create_dir_all(output_dir.join(name))?;
    }
    for sample in &samples {
        for (scale, grid) in sample.grids.iter() {
            let grid_path = output_dir.join(scale.as_str()).join(format!(
                "grid_{}_{}_class_{}.npy",
                sample.original_index,
                scale.as_str(),
                sample.label
            ));
            grid.write_npy(File::create(grid_path)?)?;
        }
    }
    println!("Saved {} grid samples to {}", samples.len(), output_dir.display());

    let metadata = serde_json::json!({
        "input": input_path.display().to_string(),
        "total_points": total_points,
        "selected_points": dataset.len(),
        "generated_samples": stats.generated,
        "skipped_points": stats.skipped,
        "grid_resolution": config.grid_resolution,
        "window_sizes": &config.window_sizes,
        "features_to_use": &config.features_to_use,
        "num_classes": remap.num_classes(),
        "bounds": dataset.bounds(),
    });
    let metadata_path = output_dir.join("metadata.json");
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;
    println!("Saved {}", metadata_path.display());

    println!("Conversion complete!");
    Ok(())
}

/// Print planar bounds information for validation.
fn print_bounds(bounds: &point_cloud_raster::PlanarBounds) {
    println!("Point cloud bounds:");
    println!("  X: {:.2} to {:.2}", bounds.x_min, bounds.x_max);
    println!("  Y: {:.2} to {:.2}", bounds.y_min, bounds.y_max);
}
