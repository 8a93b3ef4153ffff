//! Built-in per-type defaults, the bottom layer of every cascade.

use super::declarations::Declarations;

/// Declarations every element starts from.
pub fn global_defaults() -> Declarations {
    Declarations::new()
        .with("display", "block")
        .with("opacity", "1")
}

/// Built-in overrides for `tag`, applied over [`global_defaults`].
pub fn builtin_type_defaults(tag: &str) -> Declarations {
    let d = Declarations::new();
    match tag {
        "ul" => d
            .with("display", "block")
            .with("paddingLeft", "40px")
            .with("listStyleType", "disc"),
        "ol" => d
            .with("display", "block")
            .with("paddingLeft", "40px")
            .with("listStyleType", "decimal"),
        "li" => d.with("display", "list-item"),
        "span" | "a" | "label" | "strong" | "em" | "b" | "i" | "small" => {
            d.with("display", "inline")
        },
        "button" | "img" | "input" | "select" | "textarea" => d.with("display", "inline-block"),
        "table" => d.with("display", "table"),
        "thead" => d.with("display", "table-header-group"),
        "tbody" => d.with("display", "table-row-group"),
        "tfoot" => d.with("display", "table-footer-group"),
        "tr" => d.with("display", "table-row"),
        "td" | "th" => d.with("display", "table-cell"),
        "head" | "script" | "style" | "meta" | "link" | "title" => d.with("display", "none"),
        _ => d,
    }
}

/// Global defaults merged with the built-in overrides for `tag`.
pub fn builtin_defaults_for(tag: &str) -> Declarations {
    let mut decls = global_defaults();
    decls.overlay(&builtin_type_defaults(tag));
    decls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_indented_blocks() {
        let ul = builtin_defaults_for("ul");
        assert_eq!(ul.get("display"), Some("block"));
        assert_eq!(ul.get("paddingLeft"), Some("40px"));
        assert_eq!(builtin_defaults_for("ol").get("listStyleType"), Some("decimal"));
    }

    #[test]
    fn unknown_tags_get_global_defaults() {
        assert_eq!(builtin_defaults_for("section"), global_defaults());
    }

    #[test]
    fn inline_and_table_types() {
        assert_eq!(builtin_defaults_for("span").get("display"), Some("inline"));
        assert_eq!(
            builtin_defaults_for("tbody").get("display"),
            Some("table-row-group")
        );
        assert_eq!(builtin_defaults_for("script").get("display"), Some("none"));
        assert_eq!(builtin_defaults_for("span").get("opacity"), Some("1"));
    }
}
