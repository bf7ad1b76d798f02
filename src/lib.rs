//! Weather Predict - regression on gridded weather data
//!
//! This crate turns co-registered weather grids into a feature table, trains
//! a regression model on it, predicts from current conditions and renders
//! grids as heatmaps.
//!
//! # Modules
//!
//! - [`preprocessing`] - Feature table assembly and standardization
//! - [`training`] - Linear and random-forest models, cross-validation, grid search
//! - [`inference`] - Prediction from current conditions
//! - [`visualization`] - Heatmap rendering (PNG, JPEG, BMP, SVG)
//!
//! # Example
//!
//! ```no_run
//! use weather_predict::prelude::*;
//! use ndarray::Array2;
//!
//! # fn main() -> weather_predict::Result<()> {
//! let temperature = Array2::from_shape_fn((10, 10), |(i, j)| 15.0 + i as f64 - j as f64 * 0.5);
//! let humidity = Array2::from_shape_fn((10, 10), |(i, j)| 60.0 + (i * j) as f64 * 0.1);
//! let wind_speed = Array2::from_shape_fn((10, 10), |(i, j)| 3.0 + (i + j) as f64 * 0.2);
//!
//! let x = prepare_data(&temperature, &humidity, &wind_speed)?;
//! let y = x.column(0).mapv(|t| t + 1.0);
//!
//! let model = train_model(&x, &y, "linear")?;
//! let forecast = predict_future(&model, &x)?;
//! visualize_data(&temperature, "Temperature", "temperature.png")?;
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Core ML modules
pub mod preprocessing;
pub mod training;
pub mod inference;

// Rendering
pub mod visualization;

pub use error::{Result, WeatherError};
pub use inference::predict_future;
pub use preprocessing::prepare_data;
pub use training::{train_model, train_model_with_config, TrainedModel};
pub use visualization::{visualize_data, visualize_data_with_config};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, WeatherError};

    // Preprocessing
    pub use crate::preprocessing::{prepare_data, StandardScaler, FEATURE_NAMES, N_FEATURES};

    // Training
    pub use crate::training::{
        train_model, train_model_with_config, CVStrategy, CrossValidator, DecisionTreeRegressor, ForestParamGrid,
        ForestParams, GridSearchCv, LinearRegression, MaxFeatures, ModelType, Pipeline, RandomForestRegressor,
        RegressionMetrics, Regressor, TrainedModel, TrainingConfig,
    };

    // Inference
    pub use crate::inference::predict_future;

    // Visualization
    pub use crate::visualization::{visualize_data, visualize_data_with_config, ColorMap, HeatmapConfig, ImageFormat};
}
