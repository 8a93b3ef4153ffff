//! Typed style values.
//!
//! [`ComputedStyle`] is the effective declaration set of one element in one
//! state. Its accessors parse on demand and report malformed values as
//! [`ParseError`]s instead of defaulting them; a property that is simply
//! absent falls back to its initial value.

use trellis_types::color::parse_color;
use trellis_types::{Color, ParseError};

use super::declarations::{BoxProperty, Declarations, Side};

// -----------------------------------------------------------------------
// Lengths and numbers
// -----------------------------------------------------------------------

/// A length that may be `auto`, logical pixels, or a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Auto,
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Resolve against `reference` (used for percentages). `Auto` has no
    /// resolved value.
    pub fn resolve(self, reference: f32) -> Option<f32> {
        match self {
            Length::Auto => None,
            Length::Px(px) => Some(px),
            Length::Percent(pct) => Some(reference * pct / 100.0),
        }
    }

    /// Like [`Length::resolve`], with `auto` treated as zero.
    pub fn resolve_or_zero(self, reference: f32) -> f32 {
        self.resolve(reference).unwrap_or(0.0)
    }

    pub fn is_auto(self) -> bool {
        self == Length::Auto
    }
}

fn parse_f32(s: &str) -> Option<f32> {
    let n: f32 = s.trim().parse().ok()?;
    n.is_finite().then_some(n)
}

/// Parse `auto`, `12px`, `50%`, or a unitless number (pixels).
pub fn parse_length(property: &str, value: &str) -> Result<Length, ParseError> {
    let v = value.trim();
    let invalid = || ParseError::InvalidLength {
        property: property.to_string(),
        value: value.to_string(),
    };

    if v.eq_ignore_ascii_case("auto") {
        return Ok(Length::Auto);
    }
    if let Some(num) = v.strip_suffix('%') {
        return parse_f32(num).map(Length::Percent).ok_or_else(invalid);
    }
    if let Some(num) = v.strip_suffix("px") {
        return parse_f32(num).map(Length::Px).ok_or_else(invalid);
    }
    if let Some(px) = parse_f32(v) {
        return Ok(Length::Px(px));
    }
    // A number followed by some other unit (em, vh, ...).
    if let Some(idx) = v.find(|c: char| c.is_ascii_alphabetic()) {
        if idx > 0 && parse_f32(&v[..idx]).is_some() {
            return Err(ParseError::UnsupportedUnit {
                property: property.to_string(),
                value: value.to_string(),
            });
        }
    }
    Err(invalid())
}

/// Parse a plain number.
pub fn parse_number(property: &str, value: &str) -> Result<f32, ParseError> {
    parse_f32(value).ok_or_else(|| ParseError::InvalidNumber {
        property: property.to_string(),
        value: value.to_string(),
    })
}

/// Parse an integer (`3`, `-1`, `2.0`).
pub fn parse_integer(property: &str, value: &str) -> Result<i32, ParseError> {
    let n = parse_number(property, value)?;
    if n.fract() != 0.0 || n < i32::MIN as f32 || n >= i32::MAX as f32 {
        return Err(ParseError::InvalidNumber {
            property: property.to_string(),
            value: value.to_string(),
        });
    }
    Ok(n as i32)
}

fn parse_keyword<T: Copy>(property: &str, value: &str, table: &[(&str, T)]) -> Result<T, ParseError> {
    let v = value.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(v))
        .map(|(_, kw)| *kw)
        .ok_or_else(|| ParseError::InvalidKeyword {
            property: property.to_string(),
            value: value.to_string(),
        })
}

// -----------------------------------------------------------------------
// Box edges
// -----------------------------------------------------------------------

/// Unresolved lengths for the four sides of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLengths {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl EdgeLengths {
    pub const ZERO: Self = Self {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    fn side_mut(&mut self, side: Side) -> &mut Length {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }
}

/// Expand a 1-4 value box shorthand the way CSS does.
pub fn parse_box_shorthand(property: &str, value: &str) -> Result<EdgeLengths, ParseError> {
    let parts = value
        .split_whitespace()
        .map(|token| parse_length(property, token))
        .collect::<Result<Vec<_>, _>>()?;
    let (top, right, bottom, left) = match parts.as_slice() {
        [all] => (*all, *all, *all, *all),
        [v, h] => (*v, *h, *v, *h),
        [t, h, b] => (*t, *h, *b, *h),
        [t, r, b, l] => (*t, *r, *b, *l),
        _ => {
            return Err(ParseError::InvalidLength {
                property: property.to_string(),
                value: value.to_string(),
            });
        },
    };
    Ok(EdgeLengths {
        top,
        right,
        bottom,
        left,
    })
}

// -----------------------------------------------------------------------
// Keyword enums
// -----------------------------------------------------------------------

/// `display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    Flex,
    InlineFlex,
    Table,
    TableHeaderGroup,
    TableRowGroup,
    TableFooterGroup,
    TableRow,
    TableCell,
    None,
}

impl Display {
    /// Block and table-group boxes are top-aligned in their parent when no
    /// vertical offset is given; everything else is vertically centered.
    pub fn is_block_level(self) -> bool {
        matches!(
            self,
            Display::Block
                | Display::Table
                | Display::TableHeaderGroup
                | Display::TableRowGroup
                | Display::TableFooterGroup
        )
    }

    pub fn is_flex_container(self) -> bool {
        matches!(self, Display::Flex | Display::InlineFlex)
    }
}

/// `flex-direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

/// `flex-wrap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexWrap {
    NoWrap,
    Wrap,
    WrapReverse,
}

/// `justify-content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JustifyContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// `align-items`, and `align-self` values other than `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
    Baseline,
}

/// `align-content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
}

/// `list-style-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyleType {
    None,
    Disc,
    Circle,
    Square,
    Decimal,
}

const DISPLAY_KEYWORDS: &[(&str, Display)] = &[
    ("block", Display::Block),
    ("inline", Display::Inline),
    ("inline-block", Display::InlineBlock),
    ("list-item", Display::ListItem),
    ("flex", Display::Flex),
    ("inline-flex", Display::InlineFlex),
    ("table", Display::Table),
    ("table-header-group", Display::TableHeaderGroup),
    ("table-row-group", Display::TableRowGroup),
    ("table-footer-group", Display::TableFooterGroup),
    ("table-row", Display::TableRow),
    ("table-cell", Display::TableCell),
    ("none", Display::None),
];

const DIRECTION_KEYWORDS: &[(&str, FlexDirection)] = &[
    ("row", FlexDirection::Row),
    ("row-reverse", FlexDirection::RowReverse),
    ("column", FlexDirection::Column),
    ("column-reverse", FlexDirection::ColumnReverse),
];

const WRAP_KEYWORDS: &[(&str, FlexWrap)] = &[
    ("nowrap", FlexWrap::NoWrap),
    ("wrap", FlexWrap::Wrap),
    ("wrap-reverse", FlexWrap::WrapReverse),
];

const JUSTIFY_KEYWORDS: &[(&str, JustifyContent)] = &[
    ("flex-start", JustifyContent::FlexStart),
    ("start", JustifyContent::FlexStart),
    ("left", JustifyContent::FlexStart),
    ("normal", JustifyContent::FlexStart),
    ("flex-end", JustifyContent::FlexEnd),
    ("end", JustifyContent::FlexEnd),
    ("right", JustifyContent::FlexEnd),
    ("center", JustifyContent::Center),
    ("space-between", JustifyContent::SpaceBetween),
    ("space-around", JustifyContent::SpaceAround),
    ("space-evenly", JustifyContent::SpaceEvenly),
];

const ALIGN_KEYWORDS: &[(&str, AlignItems)] = &[
    ("flex-start", AlignItems::FlexStart),
    ("start", AlignItems::FlexStart),
    ("self-start", AlignItems::FlexStart),
    ("flex-end", AlignItems::FlexEnd),
    ("end", AlignItems::FlexEnd),
    ("self-end", AlignItems::FlexEnd),
    ("center", AlignItems::Center),
    ("stretch", AlignItems::Stretch),
    ("normal", AlignItems::Stretch),
    ("baseline", AlignItems::Baseline),
];

const ALIGN_CONTENT_KEYWORDS: &[(&str, AlignContent)] = &[
    ("flex-start", AlignContent::FlexStart),
    ("start", AlignContent::FlexStart),
    ("flex-end", AlignContent::FlexEnd),
    ("end", AlignContent::FlexEnd),
    ("center", AlignContent::Center),
    ("space-between", AlignContent::SpaceBetween),
    ("space-around", AlignContent::SpaceAround),
    ("space-evenly", AlignContent::SpaceEvenly),
    ("stretch", AlignContent::Stretch),
    ("normal", AlignContent::Stretch),
];

const LIST_STYLE_KEYWORDS: &[(&str, ListStyleType)] = &[
    ("none", ListStyleType::None),
    ("disc", ListStyleType::Disc),
    ("circle", ListStyleType::Circle),
    ("square", ListStyleType::Square),
    ("decimal", ListStyleType::Decimal),
];

// -----------------------------------------------------------------------
// Flex factors
// -----------------------------------------------------------------------

/// `flex-basis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlexBasis {
    /// Use the item's own main size.
    Auto,
    Px(f32),
    Percent(f32),
}

/// Parse `auto`, a unitless number, `px`, or `%`. Anything else (including
/// `content`) is an error.
pub fn parse_flex_basis(value: &str) -> Result<FlexBasis, ParseError> {
    let invalid = || ParseError::InvalidFlexBasis(value.to_string());
    match parse_length("flexBasis", value).map_err(|_| invalid())? {
        Length::Auto => Ok(FlexBasis::Auto),
        Length::Px(px) => Ok(FlexBasis::Px(px)),
        Length::Percent(pct) => Ok(FlexBasis::Percent(pct)),
    }
}

/// Grow, shrink, and basis of a flex item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexFactors {
    pub grow: f32,
    pub shrink: f32,
    pub basis: FlexBasis,
}

impl Default for FlexFactors {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: FlexBasis::Auto,
        }
    }
}

/// Parse the `flex` shorthand.
pub fn parse_flex_shorthand(value: &str) -> Result<FlexFactors, ParseError> {
    let v = value.trim();
    match v.to_ascii_lowercase().as_str() {
        "none" => {
            return Ok(FlexFactors {
                grow: 0.0,
                shrink: 0.0,
                basis: FlexBasis::Auto,
            });
        },
        "auto" => {
            return Ok(FlexFactors {
                grow: 1.0,
                shrink: 1.0,
                basis: FlexBasis::Auto,
            });
        },
        "initial" => return Ok(FlexFactors::default()),
        _ => {},
    }

    let tokens: Vec<&str> = v.split_whitespace().collect();
    let zero = FlexBasis::Percent(0.0);
    let factors = match tokens.as_slice() {
        [one] => match parse_f32(one) {
            Some(grow) => FlexFactors {
                grow,
                shrink: 1.0,
                basis: zero,
            },
            None => FlexFactors {
                grow: 1.0,
                shrink: 1.0,
                basis: parse_flex_basis(one)?,
            },
        },
        [grow, second] => {
            let grow = parse_number("flex", grow)?;
            match parse_f32(second) {
                Some(shrink) => FlexFactors {
                    grow,
                    shrink,
                    basis: zero,
                },
                None => FlexFactors {
                    grow,
                    shrink: 1.0,
                    basis: parse_flex_basis(second)?,
                },
            }
        },
        [grow, shrink, basis] => FlexFactors {
            grow: parse_number("flex", grow)?,
            shrink: parse_number("flex", shrink)?,
            basis: parse_flex_basis(basis)?,
        },
        _ => {
            return Err(ParseError::InvalidKeyword {
                property: "flex".to_string(),
                value: value.to_string(),
            });
        },
    };
    Ok(factors)
}

// -----------------------------------------------------------------------
// ComputedStyle
// -----------------------------------------------------------------------

/// The effective declarations of one element in one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    decls: Declarations,
}

impl ComputedStyle {
    pub fn new(decls: Declarations) -> Self {
        Self { decls }
    }

    pub fn declarations(&self) -> &Declarations {
        &self.decls
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.decls.get(name)
    }

    /// A length property, or `None` when it is not declared.
    pub fn length(&self, name: &str) -> Result<Option<Length>, ParseError> {
        self.get(name).map(|v| parse_length(name, v)).transpose()
    }

    /// A numeric property, or `default` when it is not declared.
    pub fn number_or(&self, name: &str, default: f32) -> Result<f32, ParseError> {
        self.get(name)
            .map_or(Ok(default), |v| parse_number(name, v))
    }

    pub fn color(&self, name: &str) -> Result<Option<Color>, ParseError> {
        self.get(name)
            .map(|v| {
                parse_color(v).ok_or_else(|| ParseError::InvalidColor {
                    property: name.to_string(),
                    value: v.to_string(),
                })
            })
            .transpose()
    }

    pub fn display(&self) -> Result<Display, ParseError> {
        self.keyword_or("display", DISPLAY_KEYWORDS, Display::Block)
    }

    /// Padding or margin edges: the shorthand expanded, then overridden by
    /// every longhand that is present.
    pub fn edges(&self, kind: BoxProperty) -> Result<EdgeLengths, ParseError> {
        let mut edges = match self.get(kind.shorthand()) {
            Some(v) => parse_box_shorthand(kind.shorthand(), v)?,
            None => EdgeLengths::ZERO,
        };
        for side in Side::ALL {
            let name = kind.longhand(side);
            if let Some(v) = self.get(name) {
                *edges.side_mut(side) = parse_length(name, v)?;
            }
        }
        Ok(edges)
    }

    /// `opacity` as a number or percentage, clamped to `[0, 1]`.
    pub fn opacity(&self) -> Result<f32, ParseError> {
        let Some(v) = self.get("opacity") else {
            return Ok(1.0);
        };
        let value = match v.trim().strip_suffix('%') {
            Some(pct) => parse_number("opacity", pct)? / 100.0,
            None => parse_number("opacity", v)?,
        };
        Ok(value.clamp(0.0, 1.0))
    }

    /// `zIndex`, with `auto` meaning 0.
    pub fn z_index(&self) -> Result<i32, ParseError> {
        match self.get("zIndex") {
            None => Ok(0),
            Some(v) if v.eq_ignore_ascii_case("auto") => Ok(0),
            Some(v) => parse_integer("zIndex", v),
        }
    }

    pub fn order(&self) -> Result<i32, ParseError> {
        self.get("order")
            .map_or(Ok(0), |v| parse_integer("order", v))
    }

    pub fn flex_direction(&self) -> Result<FlexDirection, ParseError> {
        self.keyword_or("flexDirection", DIRECTION_KEYWORDS, FlexDirection::Row)
    }

    pub fn flex_wrap(&self) -> Result<FlexWrap, ParseError> {
        self.keyword_or("flexWrap", WRAP_KEYWORDS, FlexWrap::NoWrap)
    }

    pub fn justify_content(&self) -> Result<JustifyContent, ParseError> {
        self.keyword_or("justifyContent", JUSTIFY_KEYWORDS, JustifyContent::FlexStart)
    }

    pub fn align_items(&self) -> Result<AlignItems, ParseError> {
        self.keyword_or("alignItems", ALIGN_KEYWORDS, AlignItems::Stretch)
    }

    /// `alignSelf`, with `None` meaning `auto`.
    pub fn align_self(&self) -> Result<Option<AlignItems>, ParseError> {
        match self.get("alignSelf") {
            None => Ok(None),
            Some(v) if v.eq_ignore_ascii_case("auto") => Ok(None),
            Some(v) => parse_keyword("alignSelf", v, ALIGN_KEYWORDS).map(Some),
        }
    }

    pub fn align_content(&self) -> Result<AlignContent, ParseError> {
        self.keyword_or("alignContent", ALIGN_CONTENT_KEYWORDS, AlignContent::Stretch)
    }

    pub fn list_style_type(&self) -> Result<ListStyleType, ParseError> {
        self.keyword_or("listStyleType", LIST_STYLE_KEYWORDS, ListStyleType::Disc)
    }

    /// Grow, shrink, and basis from the `flex` shorthand, overridden by the
    /// `flexGrow`, `flexShrink`, and `flexBasis` longhands.
    pub fn flex_factors(&self) -> Result<FlexFactors, ParseError> {
        let mut factors = match self.get("flex") {
            Some(v) => parse_flex_shorthand(v)?,
            None => FlexFactors::default(),
        };
        if let Some(v) = self.get("flexGrow") {
            factors.grow = parse_number("flexGrow", v)?.max(0.0);
        }
        if let Some(v) = self.get("flexShrink") {
            factors.shrink = parse_number("flexShrink", v)?.max(0.0);
        }
        if let Some(v) = self.get("flexBasis") {
            factors.basis = parse_flex_basis(v)?;
        }
        Ok(factors)
    }

    /// `(row_gap, column_gap)` from `gap`, overridden by `rowGap` and
    /// `columnGap`.
    pub fn gaps(&self) -> Result<(Length, Length), ParseError> {
        let zero = Length::Px(0.0);
        let (mut row, mut column) = match self.get("gap") {
            None => (zero, zero),
            Some(v) => {
                let parts = v
                    .split_whitespace()
                    .map(|t| parse_length("gap", t))
                    .collect::<Result<Vec<_>, _>>()?;
                match parts.as_slice() {
                    [both] => (*both, *both),
                    [r, c] => (*r, *c),
                    _ => {
                        return Err(ParseError::InvalidLength {
                            property: "gap".to_string(),
                            value: v.to_string(),
                        });
                    },
                }
            },
        };
        if let Some(r) = self.length("rowGap")? {
            row = r;
        }
        if let Some(c) = self.length("columnGap")? {
            column = c;
        }
        Ok((row, column))
    }

    fn keyword_or<T: Copy>(
        &self,
        name: &str,
        table: &[(&str, T)],
        default: T,
    ) -> Result<T, ParseError> {
        self.get(name)
            .map_or(Ok(default), |v| parse_keyword(name, v, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
        ComputedStyle::new(pairs.iter().copied().collect())
    }

    #[test]
    fn length_forms() {
        assert_eq!(parse_length("w", "12px").unwrap(), Length::Px(12.0));
        assert_eq!(parse_length("w", " 50% ").unwrap(), Length::Percent(50.0));
        assert_eq!(parse_length("w", "7").unwrap(), Length::Px(7.0));
        assert_eq!(parse_length("w", "-3.5px").unwrap(), Length::Px(-3.5));
        assert_eq!(parse_length("w", "AUTO").unwrap(), Length::Auto);
    }

    #[test]
    fn length_errors_are_reported() {
        assert!(matches!(
            parse_length("width", "2em"),
            Err(ParseError::UnsupportedUnit { .. })
        ));
        assert!(matches!(
            parse_length("width", "wide"),
            Err(ParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            parse_length("width", "%"),
            Err(ParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            parse_length("width", "inf"),
            Err(ParseError::InvalidLength { .. })
        ));
    }

    #[test]
    fn length_resolution() {
        assert_eq!(Length::Percent(25.0).resolve(200.0), Some(50.0));
        assert_eq!(Length::Px(3.0).resolve(200.0), Some(3.0));
        assert_eq!(Length::Auto.resolve(200.0), None);
        assert_eq!(Length::Auto.resolve_or_zero(200.0), 0.0);
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(parse_integer("order", "-2").unwrap(), -2);
        assert_eq!(parse_integer("order", "3.0").unwrap(), 3);
        assert!(parse_integer("order", "1.5").is_err());
        assert!(parse_integer("zIndex", "2147483648").is_err());
        assert_eq!(parse_integer("zIndex", "-2147483648").unwrap(), i32::MIN);
    }

    #[test]
    fn box_shorthand_expansion() {
        let e = parse_box_shorthand("padding", "1px 2px 3px").unwrap();
        assert_eq!(e.top, Length::Px(1.0));
        assert_eq!(e.right, Length::Px(2.0));
        assert_eq!(e.bottom, Length::Px(3.0));
        assert_eq!(e.left, Length::Px(2.0));
        assert!(parse_box_shorthand("padding", "1px 2px 3px 4px 5px").is_err());
        assert!(parse_box_shorthand("padding", "").is_err());
    }

    #[test]
    fn longhands_override_shorthand_when_read() {
        let s = style(&[("margin", "10px"), ("marginLeft", "5px")]);
        let e = s.edges(BoxProperty::Margin).unwrap();
        assert_eq!(e.left, Length::Px(5.0));
        assert_eq!(e.top, Length::Px(10.0));
        assert_eq!(e.right, Length::Px(10.0));
        assert_eq!(e.bottom, Length::Px(10.0));
    }

    #[test]
    fn keywords_and_defaults() {
        let s = style(&[("display", "flex"), ("flexDirection", "column-reverse")]);
        assert_eq!(s.display().unwrap(), Display::Flex);
        assert_eq!(s.flex_direction().unwrap(), FlexDirection::ColumnReverse);
        assert_eq!(s.flex_wrap().unwrap(), FlexWrap::NoWrap);
        assert_eq!(s.align_items().unwrap(), AlignItems::Stretch);
        assert_eq!(s.align_self().unwrap(), None);
        assert_eq!(s.align_content().unwrap(), AlignContent::Stretch);

        let bad = style(&[("justifyContent", "sideways")]);
        assert!(matches!(
            bad.justify_content(),
            Err(ParseError::InvalidKeyword { .. })
        ));
    }

    #[test]
    fn block_level_displays() {
        assert!(Display::Block.is_block_level());
        assert!(Display::TableFooterGroup.is_block_level());
        assert!(!Display::Inline.is_block_level());
        assert!(!Display::TableCell.is_block_level());
        assert!(!Display::Flex.is_block_level());
        assert!(!Display::ListItem.is_block_level());
    }

    #[test]
    fn opacity_and_z_index() {
        assert_eq!(style(&[]).opacity().unwrap(), 1.0);
        assert_eq!(style(&[("opacity", "50%")]).opacity().unwrap(), 0.5);
        assert_eq!(style(&[("opacity", "2")]).opacity().unwrap(), 1.0);
        assert_eq!(style(&[("zIndex", "auto")]).z_index().unwrap(), 0);
        assert_eq!(style(&[("zIndex", "4")]).z_index().unwrap(), 4);
        assert!(style(&[("opacity", "half")]).opacity().is_err());
    }

    #[test]
    fn flex_basis_forms() {
        assert_eq!(parse_flex_basis("auto").unwrap(), FlexBasis::Auto);
        assert_eq!(parse_flex_basis("100").unwrap(), FlexBasis::Px(100.0));
        assert_eq!(parse_flex_basis("30%").unwrap(), FlexBasis::Percent(30.0));
        assert!(matches!(
            parse_flex_basis("content"),
            Err(ParseError::InvalidFlexBasis(_))
        ));
        assert!(matches!(
            parse_flex_basis("3em"),
            Err(ParseError::InvalidFlexBasis(_))
        ));
    }

    #[test]
    fn flex_shorthand_forms() {
        let f = parse_flex_shorthand("2").unwrap();
        assert_eq!((f.grow, f.shrink, f.basis), (2.0, 1.0, FlexBasis::Percent(0.0)));
        let f = parse_flex_shorthand("none").unwrap();
        assert_eq!((f.grow, f.shrink, f.basis), (0.0, 0.0, FlexBasis::Auto));
        let f = parse_flex_shorthand("1 0 50px").unwrap();
        assert_eq!((f.grow, f.shrink, f.basis), (1.0, 0.0, FlexBasis::Px(50.0)));
        let f = parse_flex_shorthand("3 20%").unwrap();
        assert_eq!((f.grow, f.shrink, f.basis), (3.0, 1.0, FlexBasis::Percent(20.0)));
        assert!(parse_flex_shorthand("1 2 3 4").is_err());
    }

    #[test]
    fn flex_longhands_win_over_shorthand() {
        let s = style(&[("flex", "1"), ("flexBasis", "100"), ("flexGrow", "3")]);
        let f = s.flex_factors().unwrap();
        assert_eq!(f.grow, 3.0);
        assert_eq!(f.shrink, 1.0);
        assert_eq!(f.basis, FlexBasis::Px(100.0));
    }

    #[test]
    fn gap_shorthand_and_longhands() {
        let s = style(&[("gap", "4px 8px"), ("columnGap", "10px")]);
        assert_eq!(s.gaps().unwrap(), (Length::Px(4.0), Length::Px(10.0)));
        assert_eq!(style(&[]).gaps().unwrap(), (Length::Px(0.0), Length::Px(0.0)));
    }

    #[test]
    fn colors_parse_or_error() {
        let s = style(&[("borderColor", "#00ff00"), ("color", "nope")]);
        assert_eq!(s.color("borderColor").unwrap(), Some(Color::rgb(0, 255, 0)));
        assert_eq!(s.color("backgroundColor").unwrap(), None);
        assert!(matches!(
            s.color("color"),
            Err(ParseError::InvalidColor { .. })
        ));
    }
}
