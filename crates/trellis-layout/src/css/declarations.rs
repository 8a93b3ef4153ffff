//! Declaration sets and the single merge function used by the cascade.
//!
//! Properties fall into three categories. Scalars simply overwrite. The
//! `padding`/`margin` shorthands discard every lower-priority per-side value
//! of the same kind before they are written, so a longhand from a weaker
//! layer can never leak through a stronger shorthand. Longhands overwrite
//! their own side and, when the edges are read back, always win over the
//! shorthand stored next to them.

use std::collections::BTreeMap;

/// A box-spacing property that has a four-sided shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxProperty {
    Padding,
    Margin,
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

impl BoxProperty {
    pub const ALL: [BoxProperty; 2] = [BoxProperty::Padding, BoxProperty::Margin];

    /// Name of the four-sided shorthand.
    pub fn shorthand(self) -> &'static str {
        match self {
            BoxProperty::Padding => "padding",
            BoxProperty::Margin => "margin",
        }
    }

    /// Name of the longhand for `side`.
    pub fn longhand(self, side: Side) -> &'static str {
        match (self, side) {
            (BoxProperty::Padding, Side::Top) => "paddingTop",
            (BoxProperty::Padding, Side::Right) => "paddingRight",
            (BoxProperty::Padding, Side::Bottom) => "paddingBottom",
            (BoxProperty::Padding, Side::Left) => "paddingLeft",
            (BoxProperty::Margin, Side::Top) => "marginTop",
            (BoxProperty::Margin, Side::Right) => "marginRight",
            (BoxProperty::Margin, Side::Bottom) => "marginBottom",
            (BoxProperty::Margin, Side::Left) => "marginLeft",
        }
    }
}

/// Merge category of a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Scalar,
    BoxShorthand(BoxProperty),
    BoxLonghand(BoxProperty, Side),
}

/// Classify a (normalized, camelCase) property name.
pub fn classify(name: &str) -> PropertyKind {
    for kind in BoxProperty::ALL {
        if name == kind.shorthand() {
            return PropertyKind::BoxShorthand(kind);
        }
        for side in Side::ALL {
            if name == kind.longhand(side) {
                return PropertyKind::BoxLonghand(kind, side);
            }
        }
    }
    PropertyKind::Scalar
}

/// Convert `padding-left` style names to `paddingLeft`. Names without
/// hyphens are returned unchanged.
pub fn normalize_property_name(name: &str) -> String {
    let name = name.trim();
    if !name.contains('-') {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// An ordered set of `property -> value` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    map: BTreeMap<String, String>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration. The name is normalized to camelCase and the value
    /// trimmed.
    pub fn set(&mut self, name: &str, value: &str) {
        self.map
            .insert(normalize_property_name(name), value.trim().to_string());
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply a higher-priority `layer` on top of `self`.
    pub fn overlay(&mut self, layer: &Declarations) {
        for name in layer.map.keys() {
            if let PropertyKind::BoxShorthand(kind) = classify(name) {
                for side in Side::ALL {
                    self.map.remove(kind.longhand(side));
                }
            }
        }
        for (name, value) in &layer.map {
            self.map.insert(name.clone(), value.clone());
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut decls = Declarations::new();
        for (k, v) in iter {
            decls.set(k.as_ref(), v.as_ref());
        }
        decls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_categories() {
        assert_eq!(classify("width"), PropertyKind::Scalar);
        assert_eq!(
            classify("padding"),
            PropertyKind::BoxShorthand(BoxProperty::Padding)
        );
        assert_eq!(
            classify("marginLeft"),
            PropertyKind::BoxLonghand(BoxProperty::Margin, Side::Left)
        );
    }

    #[test]
    fn kebab_names_are_normalized() {
        assert_eq!(normalize_property_name("padding-left"), "paddingLeft");
        assert_eq!(normalize_property_name("flex-basis"), "flexBasis");
        assert_eq!(normalize_property_name("zIndex"), "zIndex");
        assert_eq!(normalize_property_name("-webkit-thing"), "webkitThing");

        let d = Declarations::new().with("margin-top", " 4px ");
        assert_eq!(d.get("marginTop"), Some("4px"));
    }

    #[test]
    fn scalars_overwrite() {
        let mut base = Declarations::new().with("width", "10px").with("height", "5px");
        base.overlay(&Declarations::new().with("width", "20px"));
        assert_eq!(base.get("width"), Some("20px"));
        assert_eq!(base.get("height"), Some("5px"));
    }

    #[test]
    fn higher_shorthand_discards_lower_longhands() {
        let mut base = Declarations::new().with("marginLeft", "2px");
        base.overlay(&Declarations::new().with("margin", "10px"));
        assert_eq!(base.get("margin"), Some("10px"));
        assert!(!base.contains("marginLeft"));
    }

    #[test]
    fn same_layer_longhand_survives_its_shorthand() {
        let mut base = Declarations::new().with("marginLeft", "2px");
        base.overlay(
            &Declarations::new()
                .with("margin", "10px")
                .with("marginLeft", "5px"),
        );
        assert_eq!(base.get("marginLeft"), Some("5px"));
    }

    #[test]
    fn higher_longhand_keeps_lower_shorthand() {
        let mut base = Declarations::new().with("padding", "10px");
        base.overlay(&Declarations::new().with("paddingTop", "1px"));
        assert_eq!(base.get("padding"), Some("10px"));
        assert_eq!(base.get("paddingTop"), Some("1px"));
    }

    #[test]
    fn shorthand_only_clears_its_own_kind() {
        let mut base = Declarations::new()
            .with("paddingLeft", "3px")
            .with("marginLeft", "2px");
        base.overlay(&Declarations::new().with("margin", "0"));
        assert_eq!(base.get("paddingLeft"), Some("3px"));
        assert!(!base.contains("marginLeft"));
    }
}
