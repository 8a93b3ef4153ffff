//! RGBA colors and CSS color parsing.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Multiply the alpha channel by `factor`, clamped to `[0.0, 1.0]`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        let f = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.with_alpha((self.a as f32 * f).round() as u8)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Parse a CSS `<color>`: named colors, `#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`,
/// and the functional `rgb()`, `rgba()`, `hsl()` notations.
pub fn parse_color(input: &str) -> Option<Color> {
    let parsed = csscolorparser::parse(input.trim()).ok()?;
    let [r, g, b, a] = parsed.to_rgba8();
    Some(Color::rgba(r, g, b, a))
}
