//! Visualization module: heatmaps of gridded weather fields.

mod colormap;
mod heatmap;

pub use colormap::ColorMap;
pub use heatmap::{visualize_data, visualize_data_with_config, HeatmapConfig, ImageFormat};
