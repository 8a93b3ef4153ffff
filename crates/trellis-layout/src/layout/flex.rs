//! Flex layout.
//!
//! One call lays out the direct children of one flex container; nothing
//! persists between calls. Items are placed in "flow" coordinates (main
//! and cross offsets from the container's physical top-left corner) and
//! converted to center-origin, Y-up boxes relative to the container's
//! content box at the end.
//!
//! Reversal is expressed by reversing the item sequence. The sequence is
//! always laid out along the physical axis, and `flex-start` packs toward
//! the physical end in `*-reverse` directions. `wrap-reverse` does the same
//! on the cross axis with lines.

use trellis_types::ParseError;

use super::box_model::{
    Axis, EdgeSizes, LayoutBox, clamp_size, compute_box, explicit_size, size_limits,
};
use super::text::BaselineMetrics;
use crate::css::values::{
    AlignContent, AlignItems, ComputedStyle, FlexBasis, FlexDirection, FlexWrap, JustifyContent,
};

/// Tolerance for the line-break comparison.
const LINE_EPSILON: f32 = 0.01;

// -----------------------------------------------------------------------
// Inputs
// -----------------------------------------------------------------------

/// A flex container's properties and content-box size.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexContainer {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    /// Gap between items on a line.
    pub main_gap: f32,
    /// Gap between lines.
    pub cross_gap: f32,
    /// Content-box width.
    pub width: f32,
    /// Content-box height.
    pub height: f32,
}

impl FlexContainer {
    /// A `row nowrap` container with default alignment.
    pub fn row(width: f32, height: f32) -> Self {
        Self {
            direction: FlexDirection::Row,
            wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::Stretch,
            main_gap: 0.0,
            cross_gap: 0.0,
            width,
            height,
        }
    }

    pub fn column(width: f32, height: f32) -> Self {
        Self {
            direction: FlexDirection::Column,
            ..Self::row(width, height)
        }
    }

    pub fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_wrap(mut self, wrap: FlexWrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    pub fn with_align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    pub fn with_align_content(mut self, align: AlignContent) -> Self {
        self.align_content = align;
        self
    }

    pub fn with_gaps(mut self, main_gap: f32, cross_gap: f32) -> Self {
        self.main_gap = main_gap;
        self.cross_gap = cross_gap;
        self
    }

    /// Read a container from its style and stored box.
    pub fn from_style(style: &ComputedStyle, layout: &LayoutBox) -> Result<Self, ParseError> {
        let width = layout.content_width();
        let height = layout.content_height();
        let direction = style.flex_direction()?;
        let (row_gap, column_gap) = style.gaps()?;
        let column_gap = column_gap.resolve_or_zero(width).max(0.0);
        let row_gap = row_gap.resolve_or_zero(height).max(0.0);
        let (main_gap, cross_gap) = if direction.is_row() {
            (column_gap, row_gap)
        } else {
            (row_gap, column_gap)
        };
        Ok(Self {
            direction,
            wrap: style.flex_wrap()?,
            justify_content: style.justify_content()?,
            align_items: style.align_items()?,
            align_content: style.align_content()?,
            main_gap,
            cross_gap,
            width,
            height,
        })
    }

    pub fn is_row(&self) -> bool {
        self.direction.is_row()
    }

    pub fn main_size(&self) -> f32 {
        if self.is_row() { self.width } else { self.height }
    }

    pub fn cross_size(&self) -> f32 {
        if self.is_row() { self.height } else { self.width }
    }

    fn main_axis(&self) -> Axis {
        if self.is_row() { Axis::Horizontal } else { Axis::Vertical }
    }

    fn cross_axis(&self) -> Axis {
        if self.is_row() { Axis::Vertical } else { Axis::Horizontal }
    }

    /// The container's content box as a parent box for its items.
    fn content_box(&self) -> LayoutBox {
        LayoutBox::viewport(self.width, self.height)
    }
}

/// One flex item.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexItem {
    pub order: i32,
    pub grow: f32,
    pub shrink: f32,
    pub basis: FlexBasis,
    /// Main size used for an `auto` basis: the explicit size or the fill
    /// size.
    pub natural_main: f32,
    /// Explicit cross size, if any.
    pub cross: Option<f32>,
    pub min_main: f32,
    pub max_main: f32,
    pub min_cross: f32,
    pub max_cross: f32,
    pub margin: EdgeSizes,
    /// `None` means `auto`.
    pub align_self: Option<AlignItems>,
    pub baseline: Option<BaselineMetrics>,
}

impl FlexItem {
    pub fn new(natural_main: f32) -> Self {
        Self {
            order: 0,
            grow: 0.0,
            shrink: 1.0,
            basis: FlexBasis::Auto,
            natural_main,
            cross: None,
            min_main: 0.0,
            max_main: f32::INFINITY,
            min_cross: 0.0,
            max_cross: f32::INFINITY,
            margin: EdgeSizes::default(),
            align_self: None,
            baseline: None,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_grow(mut self, grow: f32) -> Self {
        self.grow = grow;
        self
    }

    pub fn with_shrink(mut self, shrink: f32) -> Self {
        self.shrink = shrink;
        self
    }

    pub fn with_basis(mut self, basis: FlexBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn with_cross(mut self, cross: f32) -> Self {
        self.cross = Some(cross);
        self
    }

    pub fn with_main_limits(mut self, min: f32, max: f32) -> Self {
        self.min_main = min;
        self.max_main = max;
        self
    }

    pub fn with_margin(mut self, margin: EdgeSizes) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_align_self(mut self, align: AlignItems) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn with_baseline(mut self, baseline: BaselineMetrics) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Read an item from its style. The natural sizes come from the box
    /// model with the container's content box as parent.
    pub fn from_style(style: &ComputedStyle, container: &FlexContainer) -> Result<Self, ParseError> {
        let parent = container.content_box();
        let natural = compute_box(style, &parent)?;
        let main_axis = container.main_axis();
        let cross_axis = container.cross_axis();
        let main_ref = container.main_size();
        let cross_ref = container.cross_size();

        let factors = style.flex_factors()?;
        let (min_main, max_main) = size_limits(style, main_axis, main_ref)?;
        let (min_cross, max_cross) = size_limits(style, cross_axis, cross_ref)?;
        let cross = explicit_size(style, cross_axis, cross_ref)?
            .map(|c| clamp_size(c, (min_cross, max_cross)));

        Ok(Self {
            order: style.order()?,
            grow: factors.grow,
            shrink: factors.shrink,
            basis: factors.basis,
            natural_main: if container.is_row() {
                natural.width
            } else {
                natural.height
            },
            cross,
            min_main,
            max_main,
            min_cross,
            max_cross,
            margin: natural.margin,
            align_self: style.align_self()?,
            baseline: None,
        })
    }

    fn main_margins(&self, row: bool) -> f32 {
        if row {
            self.margin.horizontal()
        } else {
            self.margin.vertical()
        }
    }

    fn cross_margins(&self, row: bool) -> f32 {
        if row {
            self.margin.vertical()
        } else {
            self.margin.horizontal()
        }
    }

    fn main_margin_start(&self, row: bool) -> f32 {
        if row { self.margin.left } else { self.margin.top }
    }

    fn cross_margin_start(&self, row: bool) -> f32 {
        if row { self.margin.top } else { self.margin.left }
    }

    /// Flex base size for a container main size.
    fn base_size(&self, container_main: f32) -> f32 {
        let base = match self.basis {
            FlexBasis::Auto => self.natural_main,
            FlexBasis::Px(px) => px,
            FlexBasis::Percent(pct) => container_main * pct / 100.0,
        };
        base.max(0.0)
    }

    fn hypothetical_main(&self, container_main: f32) -> f32 {
        clamp_size(self.base_size(container_main), (self.min_main, self.max_main))
    }
}

// -----------------------------------------------------------------------
// Outputs
// -----------------------------------------------------------------------

/// Final box of one item, center-origin relative to the container content
/// box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlexPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One line of items.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexLine {
    /// Item indices (into the input slice) in placement order.
    pub items: Vec<usize>,
    /// Offset of the line from the physical cross start.
    pub cross_offset: f32,
    pub cross_size: f32,
}

/// Result of one flex pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexLayout {
    /// Placements in the input (child) order.
    pub placements: Vec<FlexPlacement>,
    /// Lines in placement order.
    pub lines: Vec<FlexLine>,
}

// -----------------------------------------------------------------------
// Algorithm
// -----------------------------------------------------------------------

/// Lay out `items` inside `container`.
pub fn layout_flex(container: &FlexContainer, items: &[FlexItem]) -> FlexLayout {
    let row = container.is_row();
    let main = container.main_size();
    let cross = container.cross_size();

    let sequence = order_items(items, container.direction.is_reverse());
    let mut lines = break_lines(container, items, &sequence);
    if container.wrap == FlexWrap::WrapReverse {
        lines.reverse();
    }
    log::debug!(
        "flex: {} items, {} lines, main={main:.2} cross={cross:.2} {:?}/{:?}",
        items.len(),
        lines.len(),
        container.direction,
        container.wrap
    );

    // Main sizes and main offsets per item.
    let mut main_sizes = vec![0.0f32; items.len()];
    let mut main_offsets = vec![0.0f32; items.len()];
    for line in &lines {
        let sizes = resolve_flexible_lengths(container, items, line);
        let outer_total: f32 = line
            .iter()
            .zip(&sizes)
            .map(|(&i, size)| size + items[i].main_margins(row))
            .sum();
        let gaps = container.main_gap * line.len().saturating_sub(1) as f32;
        let leftover = main - outer_total - gaps;
        let (start, between) = distribute(
            justify_mode(container.justify_content),
            leftover,
            line.len(),
            container.direction.is_reverse(),
        );

        let mut cursor = start;
        for (&i, &size) in line.iter().zip(&sizes) {
            main_sizes[i] = size;
            main_offsets[i] = cursor + items[i].main_margin_start(row);
            cursor += size + items[i].main_margins(row) + container.main_gap + between;
        }
    }

    // Line cross sizes.
    let baseline_ok = |i: usize| row && items[i].baseline.is_some();
    let mut line_crosses: Vec<f32> = if lines.len() == 1 {
        vec![cross]
    } else {
        lines
            .iter()
            .map(|line| line_cross_extent(container, items, line, baseline_ok))
            .collect()
    };
    let reverse_cross = container.wrap == FlexWrap::WrapReverse;
    let lines_total: f32 = line_crosses.iter().sum();
    let line_gaps = container.cross_gap * lines.len().saturating_sub(1) as f32;
    let leftover = cross - lines_total - line_gaps;
    let (cross_start, cross_between) = match container.align_content {
        AlignContent::Stretch => {
            if leftover > 0.0 && !lines.is_empty() {
                let extra = leftover / lines.len() as f32;
                for c in &mut line_crosses {
                    *c += extra;
                }
            }
            (0.0, 0.0)
        },
        other => distribute(
            content_mode(other),
            leftover,
            lines.len(),
            reverse_cross,
        ),
    };

    // Cross sizes and offsets per item.
    let mut cross_sizes = vec![0.0f32; items.len()];
    let mut cross_offsets = vec![0.0f32; items.len()];
    let mut flex_lines = Vec::with_capacity(lines.len());
    let mut line_cursor = cross_start;
    for (line, &line_cross) in lines.iter().zip(&line_crosses) {
        place_line_cross(
            container,
            items,
            line,
            line_cross,
            line_cursor,
            &mut cross_sizes,
            &mut cross_offsets,
        );
        flex_lines.push(FlexLine {
            items: line.clone(),
            cross_offset: line_cursor,
            cross_size: line_cross,
        });
        line_cursor += line_cross + container.cross_gap + cross_between;
    }

    let placements = (0..items.len())
        .map(|i| {
            let (w, h, left, top) = if row {
                (main_sizes[i], cross_sizes[i], main_offsets[i], cross_offsets[i])
            } else {
                (cross_sizes[i], main_sizes[i], cross_offsets[i], main_offsets[i])
            };
            let placement = FlexPlacement {
                x: -container.width / 2.0 + left + w / 2.0,
                y: container.height / 2.0 - top - h / 2.0,
                width: w,
                height: h,
            };
            log::trace!("flex item {i}: {placement:?}");
            placement
        })
        .collect();

    FlexLayout {
        placements,
        lines: flex_lines,
    }
}

/// Stable sort by `order`, reversed for `*-reverse` directions.
pub fn order_items(items: &[FlexItem], reverse: bool) -> Vec<usize> {
    let mut sequence: Vec<usize> = (0..items.len()).collect();
    sequence.sort_by_key(|&i| items[i].order);
    if reverse {
        sequence.reverse();
    }
    sequence
}

/// Partition `sequence` into lines by hypothetical outer main size.
pub fn break_lines(container: &FlexContainer, items: &[FlexItem], sequence: &[usize]) -> Vec<Vec<usize>> {
    if sequence.is_empty() {
        return Vec::new();
    }
    if container.wrap == FlexWrap::NoWrap {
        return vec![sequence.to_vec()];
    }

    let row = container.is_row();
    let main = container.main_size();
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0.0f32;
    for &i in sequence {
        let outer = items[i].hypothetical_main(main) + items[i].main_margins(row);
        let gap = if current.is_empty() { 0.0 } else { container.main_gap };
        if !current.is_empty() && used + gap + outer > main + LINE_EPSILON {
            log::debug!("flex: line break before item {i} (used={used:.2})");
            lines.push(std::mem::take(&mut current));
            used = outer;
        } else {
            used += gap + outer;
        }
        current.push(i);
    }
    lines.push(current);
    lines
}

/// Grow or shrink the items of one line. Items that violate their min/max
/// constraints are frozen at the limit and the free space is redistributed
/// among the rest.
fn resolve_flexible_lengths(container: &FlexContainer, items: &[FlexItem], line: &[usize]) -> Vec<f32> {
    let row = container.is_row();
    let main = container.main_size();
    let n = line.len();
    let gaps = container.main_gap * n.saturating_sub(1) as f32;

    let bases: Vec<f32> = line.iter().map(|&i| items[i].base_size(main)).collect();
    let margins: Vec<f32> = line.iter().map(|&i| items[i].main_margins(row)).collect();
    let limits: Vec<(f32, f32)> = line
        .iter()
        .map(|&i| (items[i].min_main, items[i].max_main))
        .collect();

    let initial_free = main - gaps - bases.iter().zip(&margins).map(|(b, m)| b + m).sum::<f32>();
    let growing = initial_free > 0.0;
    let weight = |k: usize| {
        let item = &items[line[k]];
        if growing {
            item.grow
        } else {
            item.shrink * bases[k]
        }
    };

    let mut sizes: Vec<f32> = (0..n).map(|k| clamp_size(bases[k], limits[k])).collect();
    let mut frozen: Vec<bool> = (0..n)
        .map(|k| {
            let item = &items[line[k]];
            let factor = if growing { item.grow } else { item.shrink };
            factor <= 0.0
                || (growing && bases[k] > sizes[k])
                || (!growing && bases[k] < sizes[k])
        })
        .collect();

    for _ in 0..=n {
        if frozen.iter().all(|f| *f) {
            break;
        }
        let used: f32 = (0..n)
            .map(|k| margins[k] + if frozen[k] { sizes[k] } else { bases[k] })
            .sum();
        let free = main - gaps - used;
        let total_weight: f32 = (0..n).filter(|&k| !frozen[k]).map(weight).sum();

        let mut violations = vec![0.0f32; n];
        let mut total_violation = 0.0f32;
        for k in (0..n).filter(|&k| !frozen[k]) {
            let share = if total_weight > 0.0 {
                free * weight(k) / total_weight
            } else {
                0.0
            };
            let target = (bases[k] + share).max(0.0);
            let clamped = clamp_size(target, limits[k]);
            violations[k] = clamped - target;
            total_violation += violations[k];
            sizes[k] = clamped;
        }

        for k in 0..n {
            if frozen[k] {
                continue;
            }
            frozen[k] = if total_violation.abs() < f32::EPSILON {
                true
            } else if total_violation > 0.0 {
                violations[k] > 0.0
            } else {
                violations[k] < 0.0
            };
        }
    }
    sizes
}

/// Justification mode shared by `justify-content` and `align-content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Distribution {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

fn justify_mode(justify: JustifyContent) -> Distribution {
    match justify {
        JustifyContent::FlexStart => Distribution::Start,
        JustifyContent::FlexEnd => Distribution::End,
        JustifyContent::Center => Distribution::Center,
        JustifyContent::SpaceBetween => Distribution::SpaceBetween,
        JustifyContent::SpaceAround => Distribution::SpaceAround,
        JustifyContent::SpaceEvenly => Distribution::SpaceEvenly,
    }
}

fn content_mode(align: AlignContent) -> Distribution {
    match align {
        AlignContent::FlexStart | AlignContent::Stretch => Distribution::Start,
        AlignContent::FlexEnd => Distribution::End,
        AlignContent::Center => Distribution::Center,
        AlignContent::SpaceBetween => Distribution::SpaceBetween,
        AlignContent::SpaceAround => Distribution::SpaceAround,
        AlignContent::SpaceEvenly => Distribution::SpaceEvenly,
    }
}

/// Start offset and extra spacing between `count` boxes for `leftover`
/// free space. `reversed` swaps start and end.
fn distribute(mode: Distribution, leftover: f32, count: usize, reversed: bool) -> (f32, f32) {
    let mode = match mode {
        Distribution::SpaceBetween if leftover < 0.0 => Distribution::Start,
        Distribution::SpaceAround | Distribution::SpaceEvenly if leftover < 0.0 => {
            Distribution::Center
        },
        other => other,
    };
    let mode = match (mode, reversed) {
        (Distribution::Start, true) => Distribution::End,
        (Distribution::End, true) => Distribution::Start,
        (other, _) => other,
    };
    let n = count as f32;
    match mode {
        Distribution::Start => (0.0, 0.0),
        Distribution::End => (leftover, 0.0),
        Distribution::Center => (leftover / 2.0, 0.0),
        Distribution::SpaceBetween if count > 1 => (0.0, leftover / (n - 1.0)),
        Distribution::SpaceBetween => (0.0, 0.0),
        Distribution::SpaceAround if count > 0 => (leftover / (2.0 * n), leftover / n),
        Distribution::SpaceEvenly if count > 0 => (leftover / (n + 1.0), leftover / (n + 1.0)),
        Distribution::SpaceAround | Distribution::SpaceEvenly => (0.0, 0.0),
    }
}

fn effective_align(container: &FlexContainer, item: &FlexItem) -> AlignItems {
    item.align_self.unwrap_or(container.align_items)
}

/// Cross extent of one line of a multi-line container.
fn line_cross_extent(
    container: &FlexContainer,
    items: &[FlexItem],
    line: &[usize],
    baseline_ok: impl Fn(usize) -> bool,
) -> f32 {
    let row = container.is_row();
    let mut extent = 0.0f32;
    let mut max_ascent = 0.0f32;
    let mut max_descent = 0.0f32;
    for &i in line {
        let item = &items[i];
        let align = effective_align(container, item);
        if align == AlignItems::Baseline && baseline_ok(i) {
            if let Some(b) = item.baseline {
                let size = item.cross.unwrap_or(b.height());
                max_ascent = max_ascent.max(item.margin.top + b.ascent);
                max_descent = max_descent.max(size - b.ascent + item.margin.bottom);
            }
            continue;
        }
        extent = extent.max(item.cross.unwrap_or(0.0) + item.cross_margins(row));
    }
    extent.max(max_ascent + max_descent)
}

/// Cross size and cross offset of every item on one line.
fn place_line_cross(
    container: &FlexContainer,
    items: &[FlexItem],
    line: &[usize],
    line_cross: f32,
    line_offset: f32,
    cross_sizes: &mut [f32],
    cross_offsets: &mut [f32],
) {
    let row = container.is_row();
    let reverse = container.wrap == FlexWrap::WrapReverse;

    let baseline_items: Vec<usize> = line
        .iter()
        .copied()
        .filter(|&i| effective_align(container, &items[i]) == AlignItems::Baseline)
        .collect();
    let baselines_usable =
        row && baseline_items.iter().all(|&i| items[i].baseline.is_some());
    if !baseline_items.is_empty() && !baselines_usable {
        log::warn!(
            "flex: baseline alignment without baselines for {} item(s), using flex-start",
            baseline_items.len()
        );
    }
    let max_ascent = if baselines_usable {
        baseline_items
            .iter()
            .filter_map(|&i| items[i].baseline.map(|b| items[i].margin.top + b.ascent))
            .fold(0.0f32, f32::max)
    } else {
        0.0
    };

    for &i in line {
        let item = &items[i];
        let margins = item.cross_margins(row);
        let mut align = effective_align(container, item);
        if align == AlignItems::Baseline && !baselines_usable {
            align = AlignItems::FlexStart;
        }

        let size = match (item.cross, align, item.baseline) {
            (Some(explicit), _, _) => explicit,
            (None, AlignItems::Baseline, Some(b)) => b.height(),
            (None, _, _) => clamp_size(line_cross - margins, (item.min_cross, item.max_cross)),
        };
        let free = line_cross - size - margins;
        let align = match (align, reverse) {
            (AlignItems::FlexStart, true) => AlignItems::FlexEnd,
            (AlignItems::FlexEnd, true) => AlignItems::FlexStart,
            (other, _) => other,
        };
        let offset = match align {
            AlignItems::FlexStart | AlignItems::Stretch => 0.0,
            AlignItems::FlexEnd => free,
            AlignItems::Center => free / 2.0,
            AlignItems::Baseline => item
                .baseline
                .map_or(0.0, |b| max_ascent - (item.margin.top + b.ascent)),
        };

        cross_sizes[i] = size.max(0.0);
        cross_offsets[i] = line_offset + offset + item.cross_margin_start(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    /// Left edge of a placement in a container of width `w`.
    fn left(p: &FlexPlacement, w: f32) -> f32 {
        p.x - p.width / 2.0 + w / 2.0
    }

    /// Top edge of a placement in a container of height `h`.
    fn top(p: &FlexPlacement, h: f32) -> f32 {
        h / 2.0 - (p.y + p.height / 2.0)
    }

    #[test]
    fn grow_shares_remaining_space() {
        let c = FlexContainer::row(300.0, 50.0);
        let items = [
            FlexItem::new(0.0).with_basis(FlexBasis::Px(100.0)).with_grow(1.0),
            FlexItem::new(0.0).with_basis(FlexBasis::Px(100.0)).with_grow(3.0),
        ];
        let out = layout_flex(&c, &items);
        assert!(approx(out.placements[0].width, 125.0));
        assert!(approx(out.placements[1].width, 175.0));
        assert!(approx(left(&out.placements[1], 300.0), 125.0));
    }

    #[test]
    fn wrap_breaks_lines() {
        let c = FlexContainer::row(100.0, 100.0).with_wrap(FlexWrap::Wrap);
        let items: Vec<FlexItem> = (0..3).map(|_| FlexItem::new(40.0)).collect();
        let out = layout_flex(&c, &items);
        let counts: Vec<usize> = out.lines.iter().map(|l| l.items.len()).collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        let c = FlexContainer::row(100.0, 10.0)
            .with_wrap(FlexWrap::Wrap)
            .with_gaps(10.0, 0.0);
        let items: Vec<FlexItem> = (0..2).map(|_| FlexItem::new(45.0)).collect();
        assert_eq!(layout_flex(&c, &items).lines.len(), 1);
    }

    #[test]
    fn nowrap_keeps_a_single_line() {
        let c = FlexContainer::row(100.0, 10.0);
        let items: Vec<FlexItem> = (0..5).map(|_| FlexItem::new(40.0)).collect();
        assert_eq!(layout_flex(&c, &items).lines.len(), 1);
    }

    #[test]
    fn shrink_is_weighted_by_basis() {
        let c = FlexContainer::row(200.0, 10.0);
        let items = [
            FlexItem::new(0.0).with_basis(FlexBasis::Px(100.0)),
            FlexItem::new(0.0).with_basis(FlexBasis::Px(200.0)),
        ];
        let out = layout_flex(&c, &items);
        // 100 px overflow split 1:2.
        assert!(approx(out.placements[0].width, 100.0 - 100.0 / 3.0));
        assert!(approx(out.placements[1].width, 200.0 - 200.0 / 3.0));
    }

    #[test]
    fn shrink_zero_keeps_size() {
        let c = FlexContainer::row(100.0, 10.0);
        let items = [
            FlexItem::new(80.0).with_shrink(0.0),
            FlexItem::new(80.0),
        ];
        let out = layout_flex(&c, &items);
        assert!(approx(out.placements[0].width, 80.0));
        assert!(approx(out.placements[1].width, 20.0));
    }

    #[test]
    fn max_main_freezes_and_redistributes() {
        let c = FlexContainer::row(300.0, 10.0);
        let items = [
            FlexItem::new(0.0)
                .with_basis(FlexBasis::Px(0.0))
                .with_grow(1.0)
                .with_main_limits(0.0, 50.0),
            FlexItem::new(0.0).with_basis(FlexBasis::Px(0.0)).with_grow(1.0),
        ];
        let out = layout_flex(&c, &items);
        assert!(approx(out.placements[0].width, 50.0));
        assert!(approx(out.placements[1].width, 250.0));
    }

    #[test]
    fn percent_basis_resolves_against_main() {
        let c = FlexContainer::row(400.0, 10.0);
        let items = [FlexItem::new(0.0).with_basis(FlexBasis::Percent(25.0))];
        assert!(approx(layout_flex(&c, &items).placements[0].width, 100.0));
    }

    fn justified(justify: JustifyContent) -> Vec<f32> {
        let c = FlexContainer::row(100.0, 10.0)
            .with_justify(justify)
            .with_gaps(10.0, 0.0);
        let items: Vec<FlexItem> = (0..2).map(|_| FlexItem::new(20.0)).collect();
        layout_flex(&c, &items)
            .placements
            .iter()
            .map(|p| left(p, 100.0))
            .collect()
    }

    #[test]
    fn justify_modes() {
        // 100 - 2*20 - 10 gap = 50 leftover.
        assert_eq!(justified(JustifyContent::FlexStart), vec![0.0, 30.0]);
        assert_eq!(justified(JustifyContent::FlexEnd), vec![50.0, 80.0]);
        assert_eq!(justified(JustifyContent::Center), vec![25.0, 55.0]);
        assert_eq!(justified(JustifyContent::SpaceBetween), vec![0.0, 80.0]);
        assert_eq!(justified(JustifyContent::SpaceAround), vec![12.5, 67.5]);
        let evenly = justified(JustifyContent::SpaceEvenly);
        assert!(approx(evenly[0], 50.0 / 3.0));
        assert!(approx(evenly[1], 2.0 * 50.0 / 3.0 + 30.0));
    }

    #[test]
    fn negative_leftover_fallbacks() {
        let c = FlexContainer::row(50.0, 10.0).with_justify(JustifyContent::SpaceAround);
        let items: Vec<FlexItem> = (0..2).map(|_| FlexItem::new(40.0).with_shrink(0.0)).collect();
        let out = layout_flex(&c, &items);
        // Centered overflow: leftover -30 gives a start of -15.
        assert!(approx(left(&out.placements[0], 50.0), -15.0));

        let c = c.with_justify(JustifyContent::SpaceBetween);
        let out = layout_flex(&c, &items);
        assert!(approx(left(&out.placements[0], 50.0), 0.0));
        assert!(approx(left(&out.placements[1], 50.0), 40.0));
    }

    #[test]
    fn order_is_stable_and_results_keep_child_order() {
        let c = FlexContainer::row(100.0, 10.0);
        let items = [
            FlexItem::new(10.0).with_order(1),
            FlexItem::new(20.0),
            FlexItem::new(30.0),
        ];
        let out = layout_flex(&c, &items);
        assert_eq!(out.lines[0].items, vec![1, 2, 0]);
        assert!(approx(left(&out.placements[1], 100.0), 0.0));
        assert!(approx(left(&out.placements[2], 100.0), 20.0));
        assert!(approx(left(&out.placements[0], 100.0), 50.0));
        assert!(approx(out.placements[0].width, 10.0));
    }

    #[test]
    fn row_reverse_packs_from_the_right() {
        let c = FlexContainer::row(100.0, 10.0).with_direction(FlexDirection::RowReverse);
        let items = [FlexItem::new(10.0), FlexItem::new(20.0)];
        let out = layout_flex(&c, &items);
        // Sequence [1, 0] packed against the right edge.
        assert!(approx(left(&out.placements[1], 100.0), 70.0));
        assert!(approx(left(&out.placements[0], 100.0), 90.0));

        let c = c.with_justify(JustifyContent::FlexEnd);
        let out = layout_flex(&c, &items);
        assert!(approx(left(&out.placements[1], 100.0), 0.0));
        assert!(approx(left(&out.placements[0], 100.0), 20.0));
    }

    #[test]
    fn column_direction_uses_vertical_main_axis() {
        let c = FlexContainer::column(50.0, 200.0);
        let items = [
            FlexItem::new(30.0),
            FlexItem::new(40.0).with_grow(1.0),
        ];
        let out = layout_flex(&c, &items);
        assert!(approx(out.placements[0].height, 30.0));
        assert!(approx(out.placements[1].height, 170.0));
        assert!(approx(top(&out.placements[1], 200.0), 30.0));
        // Stretched across the cross axis.
        assert!(approx(out.placements[0].width, 50.0));
        assert!(approx(out.placements[0].x, 0.0));
    }

    #[test]
    fn align_items_on_a_single_line() {
        let items = [FlexItem::new(10.0).with_cross(20.0)];
        let placed = |align| {
            let c = FlexContainer::row(100.0, 100.0).with_align_items(align);
            top(&layout_flex(&c, &items).placements[0], 100.0)
        };
        assert!(approx(placed(AlignItems::FlexStart), 0.0));
        assert!(approx(placed(AlignItems::FlexEnd), 80.0));
        assert!(approx(placed(AlignItems::Center), 40.0));
        // Explicit cross size is not stretched.
        let c = FlexContainer::row(100.0, 100.0);
        assert!(approx(layout_flex(&c, &items).placements[0].height, 20.0));
    }

    #[test]
    fn align_self_overrides_align_items() {
        let c = FlexContainer::row(100.0, 100.0).with_align_items(AlignItems::FlexStart);
        let items = [
            FlexItem::new(10.0).with_cross(20.0),
            FlexItem::new(10.0)
                .with_cross(20.0)
                .with_align_self(AlignItems::FlexEnd),
        ];
        let out = layout_flex(&c, &items);
        assert!(approx(top(&out.placements[0], 100.0), 0.0));
        assert!(approx(top(&out.placements[1], 100.0), 80.0));
    }

    #[test]
    fn multi_line_cross_sizes_and_stretch() {
        let c = FlexContainer::row(100.0, 100.0).with_wrap(FlexWrap::Wrap);
        let items = [
            FlexItem::new(60.0).with_cross(20.0),
            FlexItem::new(60.0).with_cross(30.0),
        ];
        let out = layout_flex(&c, &items);
        // Lines 20 and 30, stretched by 25 each.
        assert!(approx(out.lines[0].cross_size, 45.0));
        assert!(approx(out.lines[1].cross_size, 55.0));
        assert!(approx(out.lines[1].cross_offset, 45.0));
        assert!(approx(top(&out.placements[1], 100.0), 45.0));
    }

    #[test]
    fn align_content_center_and_wrap_reverse() {
        let items = [
            FlexItem::new(60.0).with_cross(20.0),
            FlexItem::new(60.0).with_cross(20.0),
        ];
        let c = FlexContainer::row(100.0, 100.0)
            .with_wrap(FlexWrap::Wrap)
            .with_align_content(AlignContent::Center)
            .with_align_items(AlignItems::FlexStart);
        let out = layout_flex(&c, &items);
        assert!(approx(top(&out.placements[0], 100.0), 30.0));
        assert!(approx(top(&out.placements[1], 100.0), 50.0));

        let c = c
            .with_wrap(FlexWrap::WrapReverse)
            .with_align_content(AlignContent::FlexStart);
        let out = layout_flex(&c, &items);
        // First line ends up at the bottom, lines packed toward it.
        assert!(approx(top(&out.placements[0], 100.0), 80.0));
        assert!(approx(top(&out.placements[1], 100.0), 60.0));
    }

    #[test]
    fn baseline_alignment_with_metrics() {
        let c = FlexContainer::row(100.0, 100.0).with_align_items(AlignItems::Baseline);
        let items = [
            FlexItem::new(10.0).with_baseline(BaselineMetrics::new(16.0, 4.0)),
            FlexItem::new(10.0).with_baseline(BaselineMetrics::new(8.0, 2.0)),
        ];
        let out = layout_flex(&c, &items);
        assert!(approx(top(&out.placements[0], 100.0), 0.0));
        assert!(approx(top(&out.placements[1], 100.0), 8.0));
        assert!(approx(out.placements[1].height, 10.0));
    }

    #[test]
    fn baseline_without_metrics_falls_back_to_flex_start() {
        let c = FlexContainer::row(100.0, 100.0).with_align_items(AlignItems::Baseline);
        let items = [FlexItem::new(10.0).with_cross(20.0)];
        let out = layout_flex(&c, &items);
        assert!(approx(top(&out.placements[0], 100.0), 0.0));
    }

    #[test]
    fn margins_offset_items() {
        let c = FlexContainer::row(100.0, 50.0).with_align_items(AlignItems::FlexStart);
        let items = [FlexItem::new(20.0)
            .with_cross(10.0)
            .with_margin(EdgeSizes::new(5.0, 0.0, 0.0, 7.0))];
        let p = layout_flex(&c, &items).placements[0];
        assert!(approx(left(&p, 100.0), 7.0));
        assert!(approx(top(&p, 50.0), 5.0));
    }

    #[test]
    fn empty_container() {
        let out = layout_flex(&FlexContainer::row(10.0, 10.0), &[]);
        assert!(out.placements.is_empty());
        assert!(out.lines.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_item() -> impl Strategy<Value = FlexItem> {
            (0.0f32..200.0, 0.0f32..4.0, 0.0f32..4.0, 0.0f32..20.0).prop_map(
                |(basis, grow, shrink, margin)| {
                    FlexItem::new(basis)
                        .with_grow(grow)
                        .with_shrink(shrink)
                        .with_margin(EdgeSizes::uniform(margin))
                },
            )
        }

        proptest! {
            #[test]
            fn sizes_are_never_negative(
                items in prop::collection::vec(arb_item(), 0..8),
                w in 0.0f32..500.0,
                h in 0.0f32..500.0,
                wrap in any::<bool>(),
            ) {
                let wrap = if wrap { FlexWrap::Wrap } else { FlexWrap::NoWrap };
                let c = FlexContainer::row(w, h).with_wrap(wrap);
                let out = layout_flex(&c, &items);
                prop_assert_eq!(out.placements.len(), items.len());
                for p in &out.placements {
                    prop_assert!(p.width >= 0.0);
                    prop_assert!(p.height >= 0.0);
                }
            }

            #[test]
            fn growing_fills_the_line(
                bases in prop::collection::vec(0.0f32..50.0, 1..6),
                grow in 0.1f32..5.0,
                extra in 1.0f32..300.0,
            ) {
                let total: f32 = bases.iter().sum();
                let main = total + extra;
                let items: Vec<FlexItem> = bases
                    .iter()
                    .map(|b| FlexItem::new(*b).with_grow(grow))
                    .collect();
                let out = layout_flex(&FlexContainer::row(main, 10.0), &items);
                let used: f32 = out.placements.iter().map(|p| p.width).sum();
                prop_assert!((used - main).abs() < 1e-2 * main.max(1.0));
            }
        }
    }
}
