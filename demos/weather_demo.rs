//! End-to-end demo: synthetic weather grids → model → forecast → heatmaps
//!
//! Run with `RUST_LOG=weather_predict=debug` for split sizes and grid-search details.

use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use weather_predict::prelude::*;

const GRID_SHAPE: (usize, usize) = (10, 10);

fn synthetic_grids(rng: &mut ChaCha8Rng) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let temperature = Array2::from_shape_fn(GRID_SHAPE, |(i, j)| {
        18.0 + 6.0 * (i as f64 / 3.0).sin() - 0.4 * j as f64 + rng.gen_range(-1.0..1.0)
    });
    let humidity = Array2::from_shape_fn(GRID_SHAPE, |_| rng.gen_range(40.0..95.0));
    let wind_speed = Array2::from_shape_fn(GRID_SHAPE, |_| rng.gen_range(0.0..15.0));
    (temperature, humidity, wind_speed)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_predict=info".into()),
        )
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (temperature, humidity, wind_speed) = synthetic_grids(&mut rng);

    let x = prepare_data(&temperature, &humidity, &wind_speed)?;
    let y: Array1<f64> = x
        .rows()
        .into_iter()
        .map(|r| 0.85 * r[0] - 0.03 * r[1] - 0.15 * r[2] + 4.0 + rng.gen_range(-0.5..0.5))
        .collect();

    let linear = train_model(&x, &y, "linear")?;
    let forest = train_model(&x, &y, "random_forest")?;
    if let TrainedModel::RandomForest(search) = &forest {
        println!("Best forest: {} (cv R² {:.3})", search.best_params(), search.best_score());
    }

    let (t_now, h_now, w_now) = synthetic_grids(&mut rng);
    let current = prepare_data(&t_now, &h_now, &w_now)?;
    let linear_forecast = predict_future(&linear, &current)?;
    let forest_forecast = predict_future(&forest, &current)?;

    let to_grid = |values: Array1<f64>| values.into_shape_with_order(GRID_SHAPE);
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    std::fs::create_dir_all(&out_dir)?;

    visualize_data(&temperature, "Temperature", out_dir.join("temperature.png"))?;
    visualize_data(&humidity, "Humidity", out_dir.join("humidity.png"))?;
    visualize_data(&wind_speed, "Wind Speed", out_dir.join("wind_speed.png"))?;
    visualize_data(&to_grid(linear_forecast)?, "Forecast (linear)", out_dir.join("forecast_linear.svg"))?;
    visualize_data(&to_grid(forest_forecast)?, "Forecast (random forest)", out_dir.join("forecast_forest.svg"))?;

    println!("Heatmaps written to {}", out_dir.display());
    Ok(())
}
