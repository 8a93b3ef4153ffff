//! Style cascade.
//!
//! Each element's effective declarations are built from ordered layers,
//! lowest priority first:
//!
//! 1. global defaults, built-in type defaults, then type rules
//! 2. class rules (normal variant) in class-list order
//! 3. the id rule (normal variant)
//! 4. when hovered: class hover variants in class order, then the id hover
//!    variant
//!
//! Every layer goes through [`Declarations::overlay`], so the result is a
//! pure function of the matched rules and the hover flag.

use trellis_types::{LayoutError, Result};

use super::declarations::Declarations;
use super::default::builtin_defaults_for;
use super::rule::{RuleVariants, StyleTable};
use super::values::ComputedStyle;
use crate::dom::{Document, Node, NodeId};

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Defaults for an element type: global and built-in defaults overlaid
/// with the table's rules for `tag`.
pub fn type_defaults(tag: &str, table: &StyleTable) -> Declarations {
    let mut decls = builtin_defaults_for(tag);
    if let Some(rule) = table.type_rule(tag) {
        decls.overlay(&rule.normal);
    }
    decls
}

/// Resolve the effective style of `node` in the given hover state.
pub fn resolve_style(node: &Node, table: &StyleTable, hovered: bool) -> ComputedStyle {
    let mut decls = type_defaults(&node.tag, table);
    let matched = matched_rules(node, table);

    for rule in &matched {
        decls.overlay(&rule.normal);
    }
    if hovered {
        for hover in matched.iter().filter_map(|r| r.hover.as_ref()) {
            decls.overlay(hover);
        }
    }
    ComputedStyle::new(decls)
}

/// Class rules in class-list order, followed by the id rule.
fn matched_rules<'a>(node: &Node, table: &'a StyleTable) -> Vec<&'a RuleVariants> {
    let mut matched: Vec<&RuleVariants> = node
        .classes
        .iter()
        .filter_map(|class| table.class_rule(class))
        .collect();
    if let Some(rule) = node.id.as_deref().and_then(|id| table.id_rule(id)) {
        matched.push(rule);
    }
    matched
}

/// Normal and (optional) hover style of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyleVariant {
    pub normal: ComputedStyle,
    /// Present only when a matched class or id rule has a hover variant.
    pub hover: Option<ComputedStyle>,
}

impl ComputedStyleVariant {
    /// The style for the given hover state. Falls back to the normal style
    /// when the element has no hover variant.
    pub fn get(&self, hovered: bool) -> &ComputedStyle {
        match (&self.hover, hovered) {
            (Some(hover), true) => hover,
            _ => &self.normal,
        }
    }

    pub fn has_hover(&self) -> bool {
        self.hover.is_some()
    }
}

/// Compute both variants of `node`.
pub fn compute_variants(node: &Node, table: &StyleTable) -> ComputedStyleVariant {
    let has_hover = matched_rules(node, table)
        .iter()
        .any(|r| r.hover.is_some());
    ComputedStyleVariant {
        normal: resolve_style(node, table, false),
        hover: has_hover.then(|| resolve_style(node, table, true)),
    }
}

/// Style variants for every node of a document, indexed by `NodeId`.
///
/// Rebuilt wholesale on every full layout pass.
#[derive(Debug, Clone, Default)]
pub struct StyleVariantTable {
    variants: Vec<ComputedStyleVariant>,
}

impl StyleVariantTable {
    pub fn build(doc: &Document, table: &StyleTable) -> Self {
        let variants = doc
            .nodes
            .iter()
            .map(|node| compute_variants(node, table))
            .collect::<Vec<_>>();
        log::debug!(
            "cascade: {} nodes, {} rules, {} with hover",
            variants.len(),
            table.rule_count(),
            variants.iter().filter(|v| v.has_hover()).count()
        );
        Self { variants }
    }

    pub fn get(&self, id: NodeId) -> Option<&ComputedStyleVariant> {
        self.variants.get(id)
    }

    /// The style of `id` in the given hover state.
    pub fn style(&self, id: NodeId, hovered: bool) -> Result<&ComputedStyle> {
        self.get(id)
            .map(|v| v.get(hovered))
            .ok_or(LayoutError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
