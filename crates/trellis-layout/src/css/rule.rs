//! Selectors, style rules, and the style table.
//!
//! Only four selector shapes exist: an element type (`div`), an id
//! (`#main`), a class (`.card`), and the `:hover` state on an id or class
//! (`#main:hover`, `.card:hover`). Anything else is rejected when the rule
//! is built.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use trellis_types::ParseError;

use super::declarations::Declarations;

/// What a selector matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorTarget {
    Type(String),
    Id(String),
    Class(String),
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub target: SelectorTarget,
    /// Whether the rule applies only while the element is hovered.
    pub hover: bool,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidSelector(input.to_string());
        let text = input.trim();

        let (base, hover) = match text.split_once(':') {
            Some((base, "hover")) => (base, true),
            Some(_) => return Err(invalid()),
            None => (text, false),
        };

        let target = if let Some(id) = base.strip_prefix('#') {
            SelectorTarget::Id(valid_ident(id).ok_or_else(invalid)?.to_string())
        } else if let Some(class) = base.strip_prefix('.') {
            SelectorTarget::Class(valid_ident(class).ok_or_else(invalid)?.to_string())
        } else {
            if hover {
                // Hover overlays exist only for id and class rules.
                return Err(invalid());
            }
            SelectorTarget::Type(valid_ident(base).ok_or_else(invalid)?.to_ascii_lowercase())
        };

        Ok(Self { target, hover })
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            SelectorTarget::Type(t) => write!(f, "{t}")?,
            SelectorTarget::Id(id) => write!(f, "#{id}")?,
            SelectorTarget::Class(c) => write!(f, ".{c}")?,
        }
        if self.hover {
            write!(f, ":hover")?;
        }
        Ok(())
    }
}

fn valid_ident(s: &str) -> Option<&str> {
    let ok = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    ok.then_some(s)
}

/// A selector plus its declarations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawStyleRule")]
pub struct StyleRule {
    pub selector: Selector,
    pub declarations: Declarations,
}

impl StyleRule {
    /// Build a rule from a selector string and `(property, value)` pairs.
    pub fn new<K, V>(
        selector: &str,
        declarations: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ParseError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Ok(Self {
            selector: Selector::parse(selector)?,
            declarations: declarations.into_iter().collect(),
        })
    }
}

/// Wire form: `{ "selector": "#a", "width": "50%", "flexGrow": 1 }`.
#[derive(Deserialize)]
struct RawStyleRule {
    selector: String,
    #[serde(flatten)]
    properties: BTreeMap<String, RawValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(f64),
}

impl TryFrom<RawStyleRule> for StyleRule {
    type Error = ParseError;

    fn try_from(raw: RawStyleRule) -> Result<Self, Self::Error> {
        let pairs = raw.properties.into_iter().map(|(k, v)| {
            let value = match v {
                RawValue::Text(s) => s,
                RawValue::Number(n) => n.to_string(),
            };
            (k, value)
        });
        StyleRule::new(&raw.selector, pairs)
    }
}

/// The normal and (optional) hover declarations collected for one target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleVariants {
    pub normal: Declarations,
    pub hover: Option<Declarations>,
}

impl RuleVariants {
    fn absorb(&mut self, rule: &StyleRule) {
        if rule.selector.hover {
            self.hover
                .get_or_insert_with(Declarations::new)
                .overlay(&rule.declarations);
        } else {
            self.normal.overlay(&rule.declarations);
        }
    }
}

/// All rules of a document, grouped by target.
///
/// Rules with the same target are merged in declaration order, so a later
/// rule wins over an earlier one exactly as a later cascade layer would.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    types: HashMap<String, RuleVariants>,
    ids: HashMap<String, RuleVariants>,
    classes: HashMap<String, RuleVariants>,
    rule_count: usize,
}

impl StyleTable {
    pub fn new(rules: impl IntoIterator<Item = StyleRule>) -> Self {
        let mut table = Self::default();
        for rule in rules {
            table.push(&rule);
        }
        table
    }

    pub fn push(&mut self, rule: &StyleRule) {
        let bucket = match &rule.selector.target {
            SelectorTarget::Type(t) => self.types.entry(t.clone()),
            SelectorTarget::Id(id) => self.ids.entry(id.clone()),
            SelectorTarget::Class(c) => self.classes.entry(c.clone()),
        };
        bucket.or_default().absorb(rule);
        self.rule_count += 1;
    }

    pub fn type_rule(&self, tag: &str) -> Option<&RuleVariants> {
        self.types.get(tag)
    }

    pub fn id_rule(&self, id: &str) -> Option<&RuleVariants> {
        self.ids.get(id)
    }

    pub fn class_rule(&self, class: &str) -> Option<&RuleVariants> {
        self.classes.get(class)
    }

    /// Number of rules pushed so far.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }
}
