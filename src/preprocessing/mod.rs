//! Data preprocessing module
//!
//! Provides:
//! - Feature table assembly from temperature / humidity / wind speed grids
//! - Feature standardization (StandardScaler)

pub mod features;
mod scaler;

pub use features::{prepare_data, FEATURE_NAMES, N_FEATURES};
pub use scaler::StandardScaler;
