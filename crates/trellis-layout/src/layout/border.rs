//! Border strips and drop shadows in render units.
//!
//! Borders are four independent strips that grow inward from the box
//! edges. The top and bottom strips are `w - b` wide and the side strips
//! `h - 2b` tall, so corners never double up.

use trellis_types::color::parse_color;
use trellis_types::{Color, ParseError};

use super::box_model::Rect;
use crate::coords::CoordinateSpace;
use crate::css::values::{ComputedStyle, Length, parse_length};

/// Width used when a visible border style is given without a width.
const MEDIUM_BORDER_PX: f32 = 3.0;

// -----------------------------------------------------------------------
// Border
// -----------------------------------------------------------------------

/// `border-style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Hidden,
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    fn parse(value: &str) -> Option<Self> {
        Some(match value.to_ascii_lowercase().as_str() {
            "none" => BorderStyle::None,
            "hidden" => BorderStyle::Hidden,
            "solid" | "groove" | "ridge" | "inset" | "outset" => BorderStyle::Solid,
            "dashed" => BorderStyle::Dashed,
            "dotted" => BorderStyle::Dotted,
            "double" => BorderStyle::Double,
            _ => return None,
        })
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, BorderStyle::None | BorderStyle::Hidden)
    }
}

/// A resolved border declaration in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSpec {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

/// Read the border of an element. Returns `None` when the border is not
/// drawn (no width, zero width, or `none`/`hidden`).
pub fn parse_border(style: &ComputedStyle) -> Result<Option<BorderSpec>, ParseError> {
    let mut width: Option<f32> = None;
    let mut border_style: Option<BorderStyle> = None;
    let mut color: Option<Color> = None;

    if let Some(value) = style.get("border") {
        for token in split_top_level(value, char::is_whitespace) {
            if let Some(s) = BorderStyle::parse(token) {
                border_style = Some(s);
            } else if let Ok(len) = parse_length("border", token) {
                width = Some(border_width(len, value)?);
            } else if let Some(c) = parse_color(token) {
                color = Some(c);
            } else {
                return Err(ParseError::InvalidKeyword {
                    property: "border".to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    if let Some(len) = style.length("borderWidth")? {
        width = Some(border_width(len, style.get("borderWidth").unwrap_or_default())?);
    }
    if let Some(value) = style.get("borderStyle") {
        border_style = Some(BorderStyle::parse(value).ok_or_else(|| {
            ParseError::InvalidKeyword {
                property: "borderStyle".to_string(),
                value: value.to_string(),
            }
        })?);
    }
    if let Some(c) = style.color("borderColor")? {
        color = Some(c);
    }

    let width = match (width, border_style) {
        (Some(w), _) => w,
        (None, Some(s)) if s.is_visible() => MEDIUM_BORDER_PX,
        (None, _) => 0.0,
    };
    let border_style = border_style.unwrap_or(BorderStyle::Solid);
    if width <= 0.0 || !border_style.is_visible() {
        return Ok(None);
    }
    Ok(Some(BorderSpec {
        width,
        style: border_style,
        color: color.unwrap_or(Color::BLACK),
    }))
}

fn border_width(len: Length, raw: &str) -> Result<f32, ParseError> {
    match len {
        Length::Px(px) => Ok(px.max(0.0)),
        _ => Err(ParseError::InvalidLength {
            property: "borderWidth".to_string(),
            value: raw.to_string(),
        }),
    }
}

/// The four border strips of one element, in render units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderGeometry {
    pub top: Rect,
    pub right: Rect,
    pub bottom: Rect,
    pub left: Rect,
    /// Snapped strip thickness.
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

/// Build the strips for an element whose render rect is `rect`.
pub fn border_geometry(
    rect: &Rect,
    spec: &BorderSpec,
    space: &CoordinateSpace,
) -> Option<BorderGeometry> {
    let b = space.snap_border_width(spec.width);
    if b <= 0.0 {
        return None;
    }
    let horizontal = (rect.width - b).max(0.0);
    let vertical = (rect.height - 2.0 * b).max(0.0);
    let half = b / 2.0;

    Some(BorderGeometry {
        top: Rect::new(rect.x, rect.top() - half, horizontal, b),
        bottom: Rect::new(rect.x, rect.bottom() + half, horizontal, b),
        left: Rect::new(rect.left() + half, rect.y, b, vertical),
        right: Rect::new(rect.right() - half, rect.y, b, vertical),
        width: b,
        style: spec.style,
        color: spec.color,
    })
}

// -----------------------------------------------------------------------
// Shadow
// -----------------------------------------------------------------------

/// A parsed `boxShadow`, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

/// Split on whitespace and commas that are not inside parentheses.
fn split_top_level(value: &str, sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && sep(c) => {
                if start < i {
                    parts.push(&value[start..i]);
                }
                start = i + c.len_utf8();
            },
            _ => {},
        }
    }
    if start < value.len() {
        parts.push(&value[start..]);
    }
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parse `offsetX offsetY [blur [spread]] [color]`. `none` yields `None`.
/// Only the first of several comma-separated shadows is used.
pub fn parse_box_shadow(value: &str) -> Result<Option<ShadowSpec>, ParseError> {
    let invalid = || ParseError::InvalidShadow(value.to_string());
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let layers = split_top_level(value, |c| c == ',');
    let first = layers.first().copied().ok_or_else(invalid)?;
    if layers.len() > 1 {
        log::warn!("box-shadow: {} layers given, only the first is used", layers.len());
    }

    let mut lengths = Vec::with_capacity(4);
    let mut color = None;
    // Lengths must be contiguous: a color after them ends the run.
    let mut lengths_closed = false;
    for token in split_top_level(first, char::is_whitespace) {
        match parse_length("boxShadow", token) {
            Ok(Length::Px(px)) if !lengths_closed => lengths.push(px),
            Ok(_) => return Err(invalid()),
            Err(_) => {
                if color.is_some() {
                    return Err(invalid());
                }
                color = Some(parse_color(token).ok_or_else(invalid)?);
                lengths_closed = !lengths.is_empty();
            },
        }
    }

    let [offset_x, offset_y, rest @ ..] = lengths.as_slice() else {
        return Err(invalid());
    };
    let (blur, spread) = match rest {
        [] => (0.0, 0.0),
        [blur] => (*blur, 0.0),
        [blur, spread] => (*blur, *spread),
        _ => return Err(invalid()),
    };
    if blur < 0.0 {
        return Err(invalid());
    }
    Ok(Some(ShadowSpec {
        offset_x: *offset_x,
        offset_y: *offset_y,
        blur,
        spread,
        color: color.unwrap_or(Color::BLACK),
    }))
}

/// A shadow in render units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowGeometry {
    pub rect: Rect,
    pub blur: f32,
    pub color: Color,
}

/// Place a shadow behind an element whose render rect is `rect`. The
/// shadow's alpha is scaled by the element's `opacity`.
pub fn shadow_geometry(
    rect: &Rect,
    spec: &ShadowSpec,
    opacity: f32,
    space: &CoordinateSpace,
) -> ShadowGeometry {
    let spread = space.to_units(spec.spread);
    ShadowGeometry {
        rect: Rect::new(
            space.snap(rect.x + space.to_units(spec.offset_x)),
            space.snap(rect.y - space.to_units(spec.offset_y)),
            (rect.width + 2.0 * spread).max(0.0),
            (rect.height + 2.0 * spread).max(0.0),
        ),
        blur: space.to_units(spec.blur),
        color: spec.color.scale_alpha(opacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{style, unit_space};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn border_longhands() {
        let s = style(&[("borderWidth", "2px"), ("borderColor", "red")]);
        let b = parse_border(&s).unwrap().unwrap();
        assert_eq!(b.width, 2.0);
        assert_eq!(b.style, BorderStyle::Solid);
        assert_eq!(b.color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn border_shorthand_any_order_and_longhands_win() {
        let s = style(&[("border", "blue 4px dashed"), ("borderWidth", "1px")]);
        let b = parse_border(&s).unwrap().unwrap();
        assert_eq!(b.width, 1.0);
        assert_eq!(b.style, BorderStyle::Dashed);
        assert_eq!(b.color, Color::rgb(0, 0, 255));
    }

    #[test]
    fn hidden_or_zero_borders_are_skipped() {
        assert_eq!(parse_border(&style(&[])).unwrap(), None);
        assert_eq!(
            parse_border(&style(&[("border", "2px none")])).unwrap(),
            None
        );
        assert_eq!(
            parse_border(&style(&[("borderWidth", "0")])).unwrap(),
            None
        );
        assert_eq!(
            parse_border(&style(&[("borderWidth", "2px"), ("borderStyle", "hidden")])).unwrap(),
            None
        );
    }

    #[test]
    fn style_without_width_is_medium() {
        let b = parse_border(&style(&[("border", "solid")])).unwrap().unwrap();
        assert_eq!(b.width, MEDIUM_BORDER_PX);
    }

    #[test]
    fn malformed_border_errors() {
        assert!(parse_border(&style(&[("border", "2px wavy")])).is_err());
        assert!(parse_border(&style(&[("borderWidth", "10%")])).is_err());
        assert!(parse_border(&style(&[("borderStyle", "zigzag")])).is_err());
    }

    #[test]
    fn strips_grow_inward() {
        let space = unit_space();
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let spec = BorderSpec {
            width: 4.0,
            style: BorderStyle::Solid,
            color: Color::BLACK,
        };
        let g = border_geometry(&rect, &spec, &space).unwrap();
        assert!(approx(g.top.width, 96.0));
        assert!(approx(g.top.height, 4.0));
        assert!(approx(g.top.y, 23.0));
        assert!(approx(g.bottom.y, -23.0));
        assert!(approx(g.left.height, 42.0));
        assert!(approx(g.left.x, -48.0));
        assert!(approx(g.right.x, 48.0));
        // Outer edges align with the box edges.
        assert!(approx(g.top.top(), rect.top()));
        assert!(approx(g.left.left(), rect.left()));
    }

    #[test]
    fn thin_borders_snap_to_one_pixel() {
        let space = unit_space();
        let spec = BorderSpec {
            width: 0.3,
            style: BorderStyle::Solid,
            color: Color::BLACK,
        };
        let g = border_geometry(&Rect::new(0.0, 0.0, 10.0, 10.0), &spec, &space).unwrap();
        assert!(approx(g.width, 1.0));
    }

    #[test]
    fn strips_clamp_at_zero() {
        let space = unit_space();
        let spec = BorderSpec {
            width: 10.0,
            style: BorderStyle::Solid,
            color: Color::BLACK,
        };
        let g = border_geometry(&Rect::new(0.0, 0.0, 8.0, 8.0), &spec, &space).unwrap();
        assert_eq!(g.top.width, 0.0);
        assert_eq!(g.left.height, 0.0);
    }

    #[test]
    fn shadow_forms() {
        let s = parse_box_shadow("2px 3px").unwrap().unwrap();
        assert_eq!((s.offset_x, s.offset_y, s.blur, s.spread), (2.0, 3.0, 0.0, 0.0));
        assert_eq!(s.color, Color::BLACK);

        let s = parse_box_shadow("1px -1px 4px 2px rgba(0, 0, 255, 0.5)")
            .unwrap()
            .unwrap();
        assert_eq!((s.blur, s.spread), (4.0, 2.0));
        assert_eq!(s.color.b, 255);
        assert_eq!(s.color.a, 128);

        let s = parse_box_shadow("red 1px 1px").unwrap().unwrap();
        assert_eq!(s.color, Color::rgb(255, 0, 0));

        assert_eq!(parse_box_shadow("none").unwrap(), None);
    }

    #[test]
    fn malformed_shadows() {
        for bad in ["", "1px", "1px 2px 3px 4px 5px", "1px 2px notacolor", "10% 2px"] {
            assert!(
                matches!(parse_box_shadow(bad), Err(ParseError::InvalidShadow(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn shadow_offsets_flip_y_and_scale_alpha() {
        let space = unit_space();
        let spec = parse_box_shadow("4px 6px 2px 3px black").unwrap().unwrap();
        let g = shadow_geometry(&Rect::new(10.0, 10.0, 20.0, 10.0), &spec, 0.5, &space);
        assert!(approx(g.rect.x, 14.0));
        assert!(approx(g.rect.y, 4.0));
        assert!(approx(g.rect.width, 26.0));
        assert!(approx(g.rect.height, 16.0));
        assert!(approx(g.blur, 2.0));
        assert_eq!(g.color.a, 128);
    }
}
