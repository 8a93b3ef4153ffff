//! Box model types and the box model calculator.
//!
//! All boxes are center-origin with Y up: a box's `x, y` is the offset of
//! its center from the center of its parent's content box. Widths and
//! heights are border-box sizes; the content box is the box minus its
//! padding.

use trellis_types::ParseError;

use crate::css::declarations::BoxProperty;
use crate::css::values::{ComputedStyle, EdgeLengths, Length};

/// A center-origin rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Center X.
    pub x: f32,
    /// Center Y.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.height / 2.0
    }
}

/// Edge sizes (top, right, bottom, left) used for margin and padding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeSizes {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Resolve lengths against `reference`; `auto` becomes 0.
    pub fn from_lengths(lengths: &EdgeLengths, reference: f32) -> Self {
        Self {
            top: lengths.top.resolve_or_zero(reference),
            right: lengths.right.resolve_or_zero(reference),
            bottom: lengths.bottom.resolve_or_zero(reference),
            left: lengths.left.resolve_or_zero(reference),
        }
    }

    /// Total horizontal size (left + right).
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical size (top + bottom).
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// The logical-pixel box of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutBox {
    pub width: f32,
    pub height: f32,
    /// Center X relative to the parent's content-box center.
    pub x: f32,
    /// Center Y relative to the parent's content-box center (Y up).
    pub y: f32,
    pub padding: EdgeSizes,
    pub margin: EdgeSizes,
}

impl LayoutBox {
    /// The box of the logical surface, used as the root's parent.
    pub fn viewport(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ..Self::default()
        }
    }

    pub fn content_width(&self) -> f32 {
        (self.width - self.padding.horizontal()).max(0.0)
    }

    pub fn content_height(&self) -> f32 {
        (self.height - self.padding.vertical()).max(0.0)
    }

    /// Offset of the content-box center from the box center.
    pub fn content_offset(&self) -> (f32, f32) {
        (
            (self.padding.left - self.padding.right) / 2.0,
            (self.padding.bottom - self.padding.top) / 2.0,
        )
    }
}

// -----------------------------------------------------------------------
// Size resolution
// -----------------------------------------------------------------------

/// A physical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn size_property(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }

    fn min_property(self) -> &'static str {
        match self {
            Axis::Horizontal => "minWidth",
            Axis::Vertical => "minHeight",
        }
    }

    fn max_property(self) -> &'static str {
        match self {
            Axis::Horizontal => "maxWidth",
            Axis::Vertical => "maxHeight",
        }
    }
}

/// Padding or margin resolved against `reference` (the parent's content
/// width, for both axes).
pub fn resolve_edges(
    style: &ComputedStyle,
    kind: BoxProperty,
    reference: f32,
) -> Result<EdgeSizes, ParseError> {
    Ok(EdgeSizes::from_lengths(&style.edges(kind)?, reference))
}

/// The declared size on `axis`, or `None` when absent or `auto`.
pub fn explicit_size(
    style: &ComputedStyle,
    axis: Axis,
    reference: f32,
) -> Result<Option<f32>, ParseError> {
    Ok(style
        .length(axis.size_property())?
        .and_then(|l| l.resolve(reference)))
}

/// `(min, max)` constraints on `axis`. Missing values are `0` and infinity.
pub fn size_limits(
    style: &ComputedStyle,
    axis: Axis,
    reference: f32,
) -> Result<(f32, f32), ParseError> {
    let min = style
        .length(axis.min_property())?
        .and_then(|l| l.resolve(reference))
        .unwrap_or(0.0);
    let max = match style.get(axis.max_property()) {
        Some(v) if v.eq_ignore_ascii_case("none") => f32::INFINITY,
        _ => style
            .length(axis.max_property())?
            .and_then(|l| l.resolve(reference))
            .unwrap_or(f32::INFINITY),
    };
    Ok((min, max))
}

/// Apply `(min, max)` the CSS way (max first, then min), never below 0.
pub fn clamp_size(value: f32, (min, max): (f32, f32)) -> f32 {
    value.min(max).max(min).max(0.0)
}

fn offset(style: &ComputedStyle, name: &str, reference: f32) -> Result<Option<f32>, ParseError> {
    Ok(style.length(name)?.and_then(|l: Length| l.resolve(reference)))
}

/// Compute the box of an element from its style and its parent's stored
/// box.
pub fn compute_box(style: &ComputedStyle, parent: &LayoutBox) -> Result<LayoutBox, ParseError> {
    let cw = parent.content_width();
    let ch = parent.content_height();

    let padding = resolve_edges(style, BoxProperty::Padding, cw)?;
    let margin = resolve_edges(style, BoxProperty::Margin, cw)?;

    let width = explicit_size(style, Axis::Horizontal, cw)?.unwrap_or(cw - margin.horizontal());
    let width = clamp_size(width, size_limits(style, Axis::Horizontal, cw)?);
    let height = explicit_size(style, Axis::Vertical, ch)?.unwrap_or(ch - margin.vertical());
    let height = clamp_size(height, size_limits(style, Axis::Vertical, ch)?);

    let x = match (
        offset(style, "left", cw)?,
        offset(style, "right", cw)?,
    ) {
        (Some(left), _) => -cw / 2.0 + left + margin.left + width / 2.0,
        (None, Some(right)) => cw / 2.0 - right - margin.right - width / 2.0,
        (None, None) => 0.0,
    };

    let y = match (
        offset(style, "top", ch)?,
        offset(style, "bottom", ch)?,
    ) {
        (Some(top), _) => ch / 2.0 - top - margin.top - height / 2.0,
        (None, Some(bottom)) => -ch / 2.0 + bottom + margin.bottom + height / 2.0,
        (None, None) if style.display()?.is_block_level() => {
            ch / 2.0 - margin.top - height / 2.0
        },
        (None, None) => 0.0,
    };

    Ok(LayoutBox {
        width,
        height,
        x,
        y,
        padding,
        margin,
    })
}
