//! Integration test: heatmap rendering

use ndarray::{array, Array2};
use tempfile::tempdir;
use weather_predict::prelude::*;

fn grid() -> Array2<f64> {
    Array2::from_shape_fn((12, 20), |(i, j)| 15.0 + (i as f64 * 0.4).sin() * 5.0 - j as f64 * 0.2)
}

#[test]
fn test_png_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("temperature.png");

    visualize_data(&grid(), "Temperature", &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn test_svg_contains_title_and_labels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("humidity.svg");

    visualize_data(&grid(), "Relative Humidity", &path).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Relative Humidity"));
    assert!(svg.contains("Longitude"));
    assert!(svg.contains("Latitude"));
}

#[test]
fn test_repeated_calls_do_not_share_state() {
    let dir = tempdir().unwrap();
    let titles = ["Temperature", "Humidity", "Wind Speed"];

    for title in titles {
        let path = dir.path().join(format!("{}.svg", title.replace(' ', "_")));
        visualize_data(&grid(), title, &path).unwrap();
    }

    let last = std::fs::read_to_string(dir.path().join("Wind_Speed.svg")).unwrap();
    assert!(last.contains("Wind Speed"));
    assert!(!last.contains("Temperature"));
    assert!(!last.contains("Humidity"));
}

#[test]
fn test_other_raster_formats() {
    let dir = tempdir().unwrap();
    for name in ["map.jpg", "map.bmp"] {
        let path = dir.path().join(name);
        visualize_data(&grid(), "Map", &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn test_non_finite_cells_and_constant_grid() {
    let dir = tempdir().unwrap();

    let holes = array![[1.0, f64::NAN], [f64::INFINITY, 4.0]];
    visualize_data(&holes, "Holes", dir.path().join("holes.png")).unwrap();

    let flat = Array2::from_elem((3, 3), 7.0);
    visualize_data(&flat, "Flat", dir.path().join("flat.png")).unwrap();
}

#[test]
fn test_custom_labels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.svg");
    let config = HeatmapConfig::default().with_labels("Easting", "Northing").with_size(8.0, 4.0);

    visualize_data_with_config(&grid(), "Projected", &path, &config).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Easting"));
    assert!(!svg.contains("Longitude"));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.gifx");

    let result = visualize_data(&grid(), "Map", &path);
    assert!(matches!(result, Err(WeatherError::InvalidParameter { .. })));
    assert!(!path.exists());
}

#[test]
fn test_missing_directory_is_render_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("map.png");

    let result = visualize_data(&grid(), "Map", &path);
    assert!(matches!(result, Err(WeatherError::RenderError(_))));
}
