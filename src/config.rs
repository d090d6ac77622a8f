//! Chart configuration for the offline driver and embedders.
//!
//! Deserialized from JSON; every field has a sensible default so a config
//! file only needs to name what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ChartError;

/// Default retained-sample capacity.
fn default_capacity() -> usize {
    512
}

/// Default sliding window length in milliseconds.
fn default_window_ms() -> f64 {
    10_000.0
}

/// Default Y auto-scale padding fraction.
fn default_auto_scale_padding() -> f64 {
    0.1
}

/// Default canvas width.
fn default_width() -> u32 {
    800
}

/// Default canvas height.
fn default_height() -> u32 {
    600
}

/// Default plot padding in pixels (all sides).
fn default_plot_padding() -> f64 {
    20.0
}

/// Default line color (RGBA).
fn default_color() -> [f32; 4] {
    [0.0, 1.0, 0.8, 1.0]
}

/// Full configuration for a streaming line chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Maximum number of retained samples.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Initial X domain. Overwritten every frame when a time window drives
    /// the chart.
    #[serde(default)]
    pub x_domain: Option<[f64; 2]>,

    /// Initial Y domain. Overwritten by auto-scaling when enabled.
    #[serde(default)]
    pub y_domain: Option<[f64; 2]>,

    /// Sliding window length in milliseconds.
    #[serde(default = "default_window_ms")]
    pub window_ms: f64,

    /// Y auto-scale padding as a fraction of the value spread.
    #[serde(default = "default_auto_scale_padding")]
    pub auto_scale_padding: f64,

    /// Plot padding in pixels, applied to all four sides.
    #[serde(default = "default_plot_padding")]
    pub plot_padding: f64,

    /// Line color as RGBA in `[0, 1]`.
    #[serde(default = "default_color")]
    pub color: [f32; 4],

    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            x_domain: None,
            y_domain: None,
            window_ms: default_window_ms(),
            auto_scale_padding: default_auto_scale_padding(),
            plot_padding: default_plot_padding(),
            color: default_color(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ChartConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ChartError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChartError::InvalidConfig(format!("cannot read {:?}: {}", path, e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ChartError::InvalidConfig(format!("cannot parse {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.capacity == 0 {
            return Err(ChartError::InvalidCapacity);
        }
        if self.window_ms <= 0.0 || !self.window_ms.is_finite() {
            return Err(ChartError::InvalidConfig(
                "windowMs must be positive and finite".to_string(),
            ));
        }
        if self.auto_scale_padding < 0.0 || !self.auto_scale_padding.is_finite() {
            return Err(ChartError::InvalidConfig(
                "autoScalePadding must be non-negative and finite".to_string(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidConfig(
                "width and height must be positive".to_string(),
            ));
        }
        for domain in [self.x_domain, self.y_domain].into_iter().flatten() {
            if !domain[0].is_finite() || !domain[1].is_finite() {
                return Err(ChartError::InvalidConfig(
                    "domain bounds must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}
