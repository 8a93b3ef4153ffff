//! Shared builders for unit tests across the crate.

use trellis_types::EngineConfig;

use crate::coords::{Camera, CoordinateSpace, SurfaceSize};
use crate::css::declarations::Declarations;
use crate::css::rule::StyleRule;
use crate::css::values::ComputedStyle;
use crate::engine::LayoutEngine;

/// A computed style holding exactly `pairs`.
pub fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
    ComputedStyle::new(pairs.iter().copied().collect::<Declarations>())
}

/// A style rule; panics on a bad selector.
pub fn rule(selector: &str, pairs: &[(&str, &str)]) -> StyleRule {
    StyleRule::new(selector, pairs.iter().copied()).expect("valid selector")
}

/// One render unit per logical pixel, on an 800 x 600 surface.
pub fn unit_space() -> CoordinateSpace {
    CoordinateSpace {
        viewport_width_units: 800.0,
        viewport_height_units: 600.0,
        units_per_pixel: 1.0,
        device_pixel_ratio: 1.0,
        logical_width: 800.0,
        logical_height: 600.0,
    }
}

/// An engine whose camera maps `height` logical pixels onto `height` render
/// units (90 degree FOV at distance `height / 2`).
pub fn engine(width: f32, height: f32) -> LayoutEngine {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    engine.set_camera(Camera::new(height / 2.0, 90.0));
    engine.set_surface(SurfaceSize::new(width, height, 1.0));
    engine
}
