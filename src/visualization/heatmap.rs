//! Heatmap rendering of 2-D weather grids

use super::colormap::ColorMap;
use crate::error::{Result, WeatherError};
use ndarray::{ArrayBase, Data, Ix2};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";
const COLORBAR_WIDTH_PX: u32 = 110;
const COLORBAR_STEPS: usize = 256;
const CHART_MARGIN_PX: u32 = 10;
const X_LABEL_AREA_PX: u32 = 45;
const Y_LABEL_AREA_PX: u32 = 60;

/// Output format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Case-insensitive lookup of `png`, `jpg`/`jpeg`, `bmp` or `svg`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            Some("bmp") => Ok(ImageFormat::Bmp),
            Some("svg") => Ok(ImageFormat::Svg),
            _ => Err(WeatherError::InvalidParameter {
                name: "output_file".to_string(),
                value: path.display().to_string(),
                reason: "unsupported image format, use png, jpg, bmp or svg".to_string(),
            }),
        }
    }
}

/// Canvas and styling of a heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Canvas width in inches
    pub width_in: f64,
    /// Canvas height in inches
    pub height_in: f64,
    pub dpi: u32,
    pub x_label: String,
    pub y_label: String,
    pub colormap: ColorMap,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 5.0,
            dpi: 100,
            x_label: "Longitude".to_string(),
            y_label: "Latitude".to_string(),
            colormap: ColorMap::coolwarm(),
        }
    }
}

impl HeatmapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_colormap(mut self, colormap: ColorMap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Canvas size in pixels
    pub fn pixel_size(&self) -> Result<(u32, u32)> {
        let width = (self.width_in * self.dpi as f64).round();
        let height = (self.height_in * self.dpi as f64).round();
        let min_width = (COLORBAR_WIDTH_PX * 2) as f64;

        if !(width >= min_width && height >= 1.0 && width <= u32::MAX as f64 && height <= u32::MAX as f64) {
            return Err(WeatherError::InvalidParameter {
                name: "canvas".to_string(),
                value: format!("{}x{} in at {} dpi", self.width_in, self.height_in, self.dpi),
                reason: format!("canvas must be at least {} px wide and 1 px tall", min_width),
            });
        }
        Ok((width as u32, height as u32))
    }
}

/// Render `data` as a heatmap into `output_file` with the default styling.
///
/// Row 0 is drawn at the top, column 0 on the left.
pub fn visualize_data<S, P>(data: &ArrayBase<S, Ix2>, title: &str, output_file: P) -> Result<()>
where
    S: Data<Elem = f64>,
    P: AsRef<Path>,
{
    visualize_data_with_config(data, title, output_file, &HeatmapConfig::default())
}

/// Render `data` as a heatmap into `output_file`.
///
/// The format follows the extension. Non-finite cells stay blank and colours
/// are normalised to the range of the finite cells.
pub fn visualize_data_with_config<S, P>(
    data: &ArrayBase<S, Ix2>,
    title: &str,
    output_file: P,
    config: &HeatmapConfig,
) -> Result<()>
where
    S: Data<Elem = f64>,
    P: AsRef<Path>,
{
    let path = output_file.as_ref();
    let format = ImageFormat::from_path(path)?;
    if data.is_empty() {
        return Err(WeatherError::ShapeError {
            expected: "non-empty 2-D grid".to_string(),
            actual: format!("{:?}", data.shape()),
        });
    }
    let size = config.pixel_size()?;

    match format {
        ImageFormat::Svg => draw_heatmap(SVGBackend::new(path, size).into_drawing_area(), data, title, config)?,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => {
            draw_heatmap(BitMapBackend::new(path, size).into_drawing_area(), data, title, config)?
        }
    }

    debug!(path = %path.display(), width = size.0, height = size.1, "Wrote heatmap");
    Ok(())
}

fn render_err<E>(err: DrawingAreaErrorKind<E>) -> WeatherError
where
    E: std::error::Error + Send + Sync,
{
    WeatherError::RenderError(err.to_string())
}

/// Finite min/max, widened when degenerate so every value sits inside
fn value_range<S: Data<Elem = f64>>(data: &ArrayBase<S, Ix2>) -> (f64, f64) {
    let (lo, hi) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Tick label for a grid index, blank between cells
fn index_label(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-9 && rounded >= 0.0 {
        format!("{}", rounded as i64)
    } else {
        String::new()
    }
}

fn draw_heatmap<DB, S>(root: DrawingArea<DB, Shift>, data: &ArrayBase<S, Ix2>, title: &str, config: &HeatmapConfig) -> Result<()>
where
    DB: DrawingBackend,
    S: Data<Elem = f64>,
{
    let (nrows, ncols) = data.dim();
    let (vmin, vmax) = value_range(data);
    let cmap = &config.colormap;

    root.fill(&WHITE).map_err(render_err)?;
    let body = root.titled(title, (FONT, 24)).map_err(render_err)?;
    let (body_width, _) = body.dim_in_pixel();
    let (map_area, bar_area) = body.split_horizontally(body_width.saturating_sub(COLORBAR_WIDTH_PX));

    // Row r is centred on y = -r so that row 0 is on top
    let mut chart = ChartBuilder::on(&map_area)
        .margin(CHART_MARGIN_PX)
        .x_label_area_size(X_LABEL_AREA_PX)
        .y_label_area_size(Y_LABEL_AREA_PX)
        .build_cartesian_2d(-0.5..ncols as f64 - 0.5, -(nrows as f64 - 0.5)..0.5)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .axis_desc_style((FONT, 16))
        .x_label_formatter(&|v| index_label(*v))
        .y_label_formatter(&|v| index_label(-*v))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            data.indexed_iter()
                .filter(|(_, v)| v.is_finite())
                .map(|((r, c), &v)| {
                    let (x, y) = (c as f64, -(r as f64));
                    Rectangle::new(
                        [(x - 0.5, y + 0.5), (x + 0.5, y - 0.5)],
                        cmap.color_normalized(v, vmin, vmax).filled(),
                    )
                }),
        )
        .map_err(render_err)?;

    let mut colorbar = ChartBuilder::on(&bar_area)
        .margin_top(CHART_MARGIN_PX)
        .margin_bottom(CHART_MARGIN_PX + X_LABEL_AREA_PX)
        .margin_left(CHART_MARGIN_PX)
        .margin_right(CHART_MARGIN_PX)
        .right_y_label_area_size(Y_LABEL_AREA_PX)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)
        .map_err(render_err)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()
        .map_err(render_err)?;

    let step = (vmax - vmin) / COLORBAR_STEPS as f64;
    colorbar
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            let lo = vmin + step * i as f64;
            Rectangle::new(
                [(0.0, lo), (1.0, lo + step)],
                cmap.color_normalized(lo + step / 2.0, vmin, vmax).filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.JPEG")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("dir/a.svg")).unwrap(), ImageFormat::Svg);
        assert!(matches!(
            ImageFormat::from_path(Path::new("a.tiff")),
            Err(WeatherError::InvalidParameter { .. })
        ));
        assert!(ImageFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_default_canvas() {
        let config = HeatmapConfig::default();
        assert_eq!(config.pixel_size().unwrap(), (1000, 500));
        assert_eq!(config.x_label, "Longitude");
        assert_eq!(config.y_label, "Latitude");
        assert_eq!(config.colormap.name(), "coolwarm");
    }

    #[test]
    fn test_invalid_canvas() {
        let config = HeatmapConfig::default().with_size(0.0, 5.0);
        assert!(config.pixel_size().is_err());
        let config = HeatmapConfig::default().with_size(f64::NAN, 5.0);
        assert!(config.pixel_size().is_err());
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(&array![[1.0, f64::NAN], [-2.0, 4.0]]), (-2.0, 4.0));
        assert_eq!(value_range(&array![[3.0, 3.0]]), (2.5, 3.5));
        assert_eq!(value_range(&array![[f64::NAN]]), (0.0, 1.0));
    }

    #[test]
    fn test_index_labels() {
        assert_eq!(index_label(3.0), "3");
        assert_eq!(index_label(-0.0), "0");
        assert_eq!(index_label(2.5), "");
        assert_eq!(index_label(-1.0), "");
    }

    #[test]
    fn test_empty_grid_rejected() {
        let data = ndarray::Array2::<f64>::zeros((0, 4));
        let result = visualize_data(&data, "empty", "unused.png");
        assert!(matches!(result, Err(WeatherError::ShapeError { .. })));
    }

    #[test]
    fn test_config_with_invalid_colormap_is_rejected() {
        let mut value = serde_json::to_value(HeatmapConfig::default()).unwrap();
        value["colormap"]["stops"] = serde_json::json!([[1, 2, 3]]);
        assert!(serde_json::from_value::<HeatmapConfig>(value).is_err());

        let json = serde_json::to_string(&HeatmapConfig::default().with_labels("x", "y")).unwrap();
        let config: HeatmapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.colormap, ColorMap::coolwarm());
        assert_eq!(config.x_label, "x");
    }
}
