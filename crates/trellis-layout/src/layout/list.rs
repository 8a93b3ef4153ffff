//! List auto-layout: even vertical stacking of `ul`/`ol` items with a
//! marker to the left of each item.

use trellis_types::ParseError;
use trellis_types::config::ListConfig;

use super::box_model::{LayoutBox, Rect, compute_box};
use crate::coords::CoordinateSpace;
use crate::css::values::{ComputedStyle, ListStyleType};

/// Marker drawn next to a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Disc,
    Circle,
    Square,
    /// One-based ordinal.
    Ordinal(usize),
}

impl MarkerKind {
    /// Marker for item `index` (zero-based) of a list with `style_type`.
    pub fn for_item(style_type: ListStyleType, index: usize) -> Option<Self> {
        match style_type {
            ListStyleType::None => None,
            ListStyleType::Disc => Some(MarkerKind::Disc),
            ListStyleType::Circle => Some(MarkerKind::Circle),
            ListStyleType::Square => Some(MarkerKind::Square),
            ListStyleType::Decimal => Some(MarkerKind::Ordinal(index + 1)),
        }
    }
}

/// A marker in logical pixels, center-origin in the list's content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListMarker {
    pub kind: MarkerKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl ListMarker {
    /// Convert to render units relative to the list's box center, given the
    /// list's content offset in logical pixels.
    pub fn to_render(&self, space: &CoordinateSpace, content_offset: (f32, f32)) -> MarkerGeometry {
        let size = space.to_units(self.size);
        MarkerGeometry {
            kind: self.kind,
            rect: Rect::new(
                space.snap(space.to_units(self.x + content_offset.0)),
                space.snap(space.to_units(self.y + content_offset.1)),
                size,
                size,
            ),
        }
    }
}

/// A marker in render units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub kind: MarkerKind,
    pub rect: Rect,
}

/// Shared sizing for all items of one list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListMetrics {
    pub item_height: f32,
    pub spacing: f32,
    pub style_type: ListStyleType,
}

impl ListMetrics {
    /// Item height and spacing for `count` items in `container`.
    pub fn new(
        list_style: &ComputedStyle,
        container: &LayoutBox,
        count: usize,
        config: &ListConfig,
    ) -> Result<Self, ParseError> {
        let spacing = list_style
            .length("itemSpacing")?
            .and_then(|l| l.resolve(container.content_height()))
            .unwrap_or(config.item_spacing)
            .max(0.0);
        Ok(Self {
            item_height: item_height(
                container.content_height(),
                count,
                spacing,
                config.min_item_height,
            ),
            spacing,
            style_type: list_style.list_style_type()?,
        })
    }

    /// Offset of item `index`'s top edge from the content-box top.
    pub fn item_top(&self, index: usize) -> f32 {
        index as f32 * (self.item_height + self.spacing)
    }
}

/// `max(raw, max(10% of avail, floor))` where `raw` splits the available
/// height evenly after spacing.
pub fn item_height(available: f32, count: usize, spacing: f32, floor: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f32;
    let raw = (available - spacing * (n - 1.0)) / n;
    raw.max((0.1 * available).max(floor))
}

/// Box of list item `index` and its marker.
pub fn layout_list_item(
    item_style: &ComputedStyle,
    container: &LayoutBox,
    metrics: &ListMetrics,
    index: usize,
    config: &ListConfig,
) -> Result<(LayoutBox, Option<ListMarker>), ParseError> {
    let natural = compute_box(item_style, container)?;
    let cw = container.content_width();
    let ch = container.content_height();

    let height = metrics.item_height;
    let left = -cw / 2.0 + natural.margin.left;
    let y = ch / 2.0 - metrics.item_top(index) - height / 2.0;
    let layout = LayoutBox {
        width: natural.width,
        height,
        x: left + natural.width / 2.0,
        y,
        padding: natural.padding,
        margin: natural.margin,
    };

    let marker = MarkerKind::for_item(metrics.style_type, index).map(|kind| ListMarker {
        kind,
        x: left - config.marker_offset,
        y,
        size: config.marker_size,
    });
    log::trace!("list item {index}: {layout:?}");
    Ok((layout, marker))
}
