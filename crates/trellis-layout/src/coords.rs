//! Logical pixels to render units.
//!
//! The camera looks at the layout plane from `distance` units away with a
//! vertical field of view of `fov_degrees`. The visible plane is
//! `2 * distance * tan(fov / 2)` units tall, and that height maps onto the
//! surface's logical (DPR-normalized) height. One scale factor,
//! `units_per_pixel`, is used for the whole pass.

use trellis_types::config::CameraConfig;
use trellis_types::{LayoutError, Result};

use crate::layout::box_model::{LayoutBox, Rect};

/// Camera placement relative to the layout plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub fov_degrees: f32,
}

impl Camera {
    pub fn new(distance: f32, fov_degrees: f32) -> Self {
        Self {
            distance,
            fov_degrees,
        }
    }

    /// Height of the visible plane, in render units.
    pub fn viewport_height_units(&self) -> f32 {
        2.0 * self.distance * (self.fov_degrees.to_radians() / 2.0).tan()
    }
}

impl From<CameraConfig> for Camera {
    fn from(cfg: CameraConfig) -> Self {
        Self::new(cfg.distance, cfg.fov_degrees)
    }
}

/// Render surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width_px: f32,
    pub height_px: f32,
    pub device_pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width_px: f32, height_px: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width_px,
            height_px,
            device_pixel_ratio,
        }
    }

    /// The device pixel ratio, with non-finite or non-positive values
    /// treated as 1.
    pub fn dpr(&self) -> f32 {
        let dpr = self.device_pixel_ratio;
        if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
    }

    pub fn logical_width(&self) -> f32 {
        self.width_px.max(0.0) / self.dpr()
    }

    pub fn logical_height(&self) -> f32 {
        self.height_px.max(0.0) / self.dpr()
    }

    fn is_empty(&self) -> bool {
        !(self.width_px > 0.0 && self.height_px > 0.0)
    }
}

/// The scale and extent of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpace {
    pub viewport_width_units: f32,
    pub viewport_height_units: f32,
    pub units_per_pixel: f32,
    pub device_pixel_ratio: f32,
    /// Surface width in logical pixels.
    pub logical_width: f32,
    /// Surface height in logical pixels.
    pub logical_height: f32,
}

impl CoordinateSpace {
    /// Derive the coordinate space for a camera and surface.
    ///
    /// A zero-sized surface yields `fallback_units_per_pixel` and a 0 x 0
    /// viewport.
    pub fn derive(
        camera: Option<&Camera>,
        surface: SurfaceSize,
        fallback_units_per_pixel: f32,
    ) -> Result<Self> {
        let camera = camera.ok_or(LayoutError::CameraNotInitialized)?;
        let dpr = surface.dpr();

        if surface.is_empty() {
            log::debug!(
                "surface is {}x{}, using fallback scale {fallback_units_per_pixel}",
                surface.width_px,
                surface.height_px
            );
            return Ok(Self {
                viewport_width_units: 0.0,
                viewport_height_units: 0.0,
                units_per_pixel: fallback_units_per_pixel,
                device_pixel_ratio: dpr,
                logical_width: 0.0,
                logical_height: 0.0,
            });
        }

        let viewport_height_units = camera.viewport_height_units();
        let viewport_width_units = viewport_height_units * (surface.width_px / surface.height_px);
        let units_per_pixel = viewport_height_units / surface.logical_height();

        Ok(Self {
            viewport_width_units,
            viewport_height_units,
            units_per_pixel,
            device_pixel_ratio: dpr,
            logical_width: surface.logical_width(),
            logical_height: surface.logical_height(),
        })
    }

    /// Logical pixels to render units.
    pub fn to_units(&self, px: f32) -> f32 {
        px * self.units_per_pixel
    }

    /// Round a render-unit value to the nearest logical pixel.
    pub fn snap(&self, units: f32) -> f32 {
        (units / self.units_per_pixel).round() * self.units_per_pixel
    }

    /// Border width in logical pixels to snapped render units. Positive
    /// widths never snap below one pixel.
    pub fn snap_border_width(&self, px: f32) -> f32 {
        if px > 0.0 {
            px.round().max(1.0) * self.units_per_pixel
        } else {
            0.0
        }
    }

    /// Render rect of `layout`, relative to the parent's box center.
    /// `content_offset` is the parent's content-box offset in logical
    /// pixels. The center is snapped; the size is only scaled.
    pub fn to_render_rect(&self, layout: &LayoutBox, content_offset: (f32, f32)) -> Rect {
        Rect::new(
            self.snap(self.to_units(layout.x + content_offset.0)),
            self.snap(self.to_units(layout.y + content_offset.1)),
            self.to_units(layout.width),
            self.to_units(layout.height),
        )
    }

    /// The root's parent box: the logical surface.
    pub fn viewport_box(&self) -> LayoutBox {
        LayoutBox::viewport(self.logical_width, self.logical_height)
    }
}
