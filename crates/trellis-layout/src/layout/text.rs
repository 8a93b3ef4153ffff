//! Text metrics supplied by the host.
//!
//! The engine never shapes text. Baseline alignment asks a [`TextMetrics`]
//! provider for an element's ascent and descent; without one, baseline
//! alignment falls back to `flex-start`.

use crate::css::values::{ComputedStyle, parse_length};
use crate::dom::Node;

/// Ascent and descent of an element's first line, in logical pixels,
/// measured from the top of its border box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselineMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl BaselineMetrics {
    pub fn new(ascent: f32, descent: f32) -> Self {
        Self { ascent, descent }
    }

    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Baseline provider.
pub trait TextMetrics {
    /// Metrics of `node`, or `None` when it has no baseline.
    fn baseline(&self, node: &Node, style: &ComputedStyle) -> Option<BaselineMetrics>;
}

/// Provides no baselines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextMetrics;

impl TextMetrics for NoTextMetrics {
    fn baseline(&self, _node: &Node, _style: &ComputedStyle) -> Option<BaselineMetrics> {
        None
    }
}

/// Approximates metrics from the element's `fontSize` (in px), for
/// elements with text content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizeMetrics {
    pub default_font_size: f32,
    /// Fraction of the font size above the baseline.
    pub ascent_ratio: f32,
}

impl Default for FontSizeMetrics {
    fn default() -> Self {
        Self {
            default_font_size: 16.0,
            ascent_ratio: 0.8,
        }
    }
}

impl TextMetrics for FontSizeMetrics {
    fn baseline(&self, node: &Node, style: &ComputedStyle) -> Option<BaselineMetrics> {
        let text = node.text_content.as_deref()?;
        if text.trim().is_empty() {
            return None;
        }
        let size = style
            .get("fontSize")
            .and_then(|v| parse_length("fontSize", v).ok())
            .and_then(|l| l.resolve(self.default_font_size))
            .unwrap_or(self.default_font_size)
            .max(0.0);
        Some(BaselineMetrics::new(
            size * self.ascent_ratio,
            size * (1.0 - self.ascent_ratio),
        ))
    }
}
