//! Text rendering of a laid-out document.

use std::fmt::Write;

use trellis_layout::layout::list::MarkerKind;
use trellis_layout::{Document, LayoutContext, NodeId, Rect};

/// One line per displayed element, indented by tree depth, in document
/// order.
pub fn dump(doc: &Document, ctx: &LayoutContext) -> String {
    let mut out = String::new();
    if let Some(space) = ctx.coordinate_space() {
        let _ = writeln!(
            out,
            "viewport {:.3}x{:.3} units, {:.5} units/px, dpr {}",
            space.viewport_width_units,
            space.viewport_height_units,
            space.units_per_pixel,
            space.device_pixel_ratio
        );
    }
    for element in ctx.elements() {
        let indent = "  ".repeat(depth(doc, element.node));
        let _ = write!(
            out,
            "{indent}{} {} px={:.1}x{:.1}@({:.1},{:.1}) z={:.4}",
            label(doc, element.node),
            rect(&element.rect),
            element.layout.width,
            element.layout.height,
            element.layout.x,
            element.layout.y,
            element.depth.element,
        );
        if element.opacity < 1.0 {
            let _ = write!(out, " opacity={:.2}", element.opacity);
        }
        if let Some(border) = &element.border {
            let _ = write!(out, " border={:.4}", border.width);
        }
        if let Some(shadow) = &element.shadow {
            let _ = write!(out, " shadow={}", rect(&shadow.rect));
        }
        if let Some(marker) = &element.marker {
            let kind = match marker.kind {
                MarkerKind::Disc => "disc".to_string(),
                MarkerKind::Circle => "circle".to_string(),
                MarkerKind::Square => "square".to_string(),
                MarkerKind::Ordinal(n) => format!("{n}."),
            };
            let _ = write!(out, " marker={kind}");
        }
        out.push('\n');
    }
    out
}

fn depth(doc: &Document, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = doc.nodes.get(id).and_then(|n| n.parent);
    while let Some(parent) = current {
        depth += 1;
        current = doc.nodes.get(parent).and_then(|n| n.parent);
    }
    depth
}

fn label(doc: &Document, id: NodeId) -> String {
    let Some(node) = doc.nodes.get(id) else {
        return format!("#{id}");
    };
    let mut label = node.tag.clone();
    if let Some(element_id) = &node.id {
        label.push('#');
        label.push_str(element_id);
    }
    for class in &node.classes {
        label.push('.');
        label.push_str(class);
    }
    label
}

fn rect(r: &Rect) -> String {
    format!("[{:.3},{:.3} {:.3}x{:.3}]", r.x, r.y, r.width, r.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_layout::{
        Camera, ElementNode, EngineConfig, LayoutEngine, StyleRule, StyleTable, SurfaceSize,
    };

    #[test]
    fn lists_elements_with_indentation() {
        let doc = Document::from_tree(
            &ElementNode::new("ol")
                .with_id("steps")
                .with_child(ElementNode::new("li").with_class("first")),
        );
        let table = StyleTable::new([
            StyleRule::new("#steps", [("height", "100px")]).unwrap(),
            StyleRule::new(".first", [("border", "1px solid black")]).unwrap(),
        ]);
        let mut engine = LayoutEngine::new(EngineConfig::default());
        engine.set_camera(Camera::new(10.0, 75.0));
        engine.set_surface(SurfaceSize::new(800.0, 600.0, 1.0));
        let mut ctx = LayoutContext::new();
        engine.layout(&doc, &table, &mut ctx).unwrap();

        let text = dump(&doc, &ctx);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("viewport "));
        assert!(lines[1].starts_with("ol#steps "));
        assert!(lines[2].starts_with("  li.first "));
        assert!(lines[2].contains("marker=1."));
        assert!(lines[2].contains("border="));
    }
}
