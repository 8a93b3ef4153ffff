//! Engine configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! usable configuration:
//!
//! ```toml
//! fallback_units_per_pixel = 0.01
//!
//! [camera]
//! distance = 10.0
//! fov_degrees = 75.0
//!
//! [depth]
//! base = 0.0
//! step = 0.001
//!
//! [list]
//! item_spacing = 8.0
//! min_item_height = 12.0
//! marker_offset = 16.0
//! marker_size = 6.0
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{LayoutError, Result};

/// Scale used when the render surface has not been sized yet.
pub const FALLBACK_UNITS_PER_PIXEL: f32 = 0.01;

/// Camera placement used to derive the viewport extent in render units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the camera to the layout plane, in render units.
    pub distance: f32,
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 10.0,
            fov_degrees: 75.0,
        }
    }
}

/// Depth slot allocation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    /// Depth of the first slot.
    pub base: f32,
    /// Distance between consecutive slots.
    pub step: f32,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            base: 0.0,
            step: 0.001,
        }
    }
}

/// List auto-layout constants, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Spacing between items when the list sets no `itemSpacing`.
    pub item_spacing: f32,
    /// Lower bound for item heights (the 10% rule may raise it further).
    pub min_item_height: f32,
    /// Distance from an item's left edge to its marker's center.
    pub marker_offset: f32,
    /// Marker edge length.
    pub marker_size: f32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_spacing: 8.0,
            min_item_height: 12.0,
            marker_offset: 16.0,
            marker_size: 6.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub camera: CameraConfig,
    pub depth: DepthConfig,
    pub list: ListConfig,
    /// Units-per-logical-pixel reported while the surface is zero-sized.
    pub fallback_units_per_pixel: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            depth: DepthConfig::default(),
            list: ListConfig::default(),
            fallback_units_per_pixel: FALLBACK_UNITS_PER_PIXEL,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML configuration string.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading engine config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Reject values that would make the coordinate space degenerate.
    pub fn validate(&self) -> Result<()> {
        if !(self.camera.distance.is_finite() && self.camera.distance > 0.0) {
            return Err(LayoutError::Config(format!(
                "camera.distance must be positive, got {}",
                self.camera.distance
            )));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(LayoutError::Config(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                self.camera.fov_degrees
            )));
        }
        if !(self.depth.step.is_finite() && self.depth.step > 0.0) {
            return Err(LayoutError::Config(format!(
                "depth.step must be positive, got {}",
                self.depth.step
            )));
        }
        if !(self.fallback_units_per_pixel.is_finite() && self.fallback_units_per_pixel > 0.0) {
            return Err(LayoutError::Config(format!(
                "fallback_units_per_pixel must be positive, got {}",
                self.fallback_units_per_pixel
            )));
        }
        let list = &self.list;
        if [
            list.item_spacing,
            list.min_item_height,
            list.marker_offset,
            list.marker_size,
        ]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(LayoutError::Config(
                "list values must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
