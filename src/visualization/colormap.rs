//! Continuous colour maps for heatmaps

use crate::error::{Result, WeatherError};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Moreland's diverging blue-white-red table, 33 evenly spaced stops
const COOLWARM: [[u8; 3]; 33] = [
    [59, 76, 192],
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221],
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47],
    [180, 4, 38],
];

/// Piecewise-linear colour map over evenly spaced RGB stops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColorMap")]
pub struct ColorMap {
    name: String,
    stops: Vec<[u8; 3]>,
}

/// Unvalidated wire form; deserialization goes through [`ColorMap::new`]
#[derive(Deserialize)]
struct RawColorMap {
    name: String,
    stops: Vec<[u8; 3]>,
}

impl TryFrom<RawColorMap> for ColorMap {
    type Error = WeatherError;

    fn try_from(raw: RawColorMap) -> Result<Self> {
        ColorMap::new(raw.name, raw.stops)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::coolwarm()
    }
}

impl ColorMap {
    /// Build a map from at least two stops, spread evenly over `[0, 1]`
    pub fn new(name: impl Into<String>, stops: Vec<[u8; 3]>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(WeatherError::InvalidParameter {
                name: "stops".to_string(),
                value: stops.len().to_string(),
                reason: "a colour map needs at least two stops".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// Diverging blue to red map, light grey at the midpoint
    pub fn coolwarm() -> Self {
        Self {
            name: "coolwarm".to_string(),
            stops: COOLWARM.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colour at position `t`, clamped to `[0, 1]`. NaN maps to the low end.
    pub fn color(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.stops.len() - 1;
        let pos = t * last as f64;
        let lower = (pos.floor() as usize).min(last - 1);
        let frac = pos - lower as f64;

        let a = self.stops[lower];
        let b = self.stops[lower + 1];
        let mix = |i: usize| (a[i] as f64 + (b[i] as f64 - a[i] as f64) * frac).round() as u8;
        RGBColor(mix(0), mix(1), mix(2))
    }

    /// Colour of `value` on the scale `[min, max]`
    pub fn color_normalized(&self, value: f64, min: f64, max: f64) -> RGBColor {
        let span = max - min;
        if span > 0.0 {
            self.color((value - min) / span)
        } else {
            self.color(0.5)
        }
    }
}
