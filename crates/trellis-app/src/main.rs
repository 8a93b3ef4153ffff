//! `trellis-dump`: lay out a JSON document against a JSON style table and
//! print the resulting geometry.
//!
//! ```text
//! trellis-dump page.json styles.json --size 1920x1080 --dpr 2 --hover cta
//! ```
//!
//! Set `RUST_LOG=debug` to see pass summaries and flex line decisions.

mod args;
mod dump;

use std::fs;

use anyhow::{Context, Result};

use trellis_layout::{
    Camera, Document, ElementNode, FontSizeMetrics, LayoutContext, LayoutEngine, StyleRule,
    StyleTable, SurfaceSize,
};
use trellis_types::EngineConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = args::parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let tree: ElementNode = serde_json::from_str(
        &fs::read_to_string(&args.document)
            .with_context(|| format!("reading {}", args.document.display()))?,
    )
    .with_context(|| format!("parsing {}", args.document.display()))?;
    let rules: Vec<StyleRule> = serde_json::from_str(
        &fs::read_to_string(&args.styles)
            .with_context(|| format!("reading {}", args.styles.display()))?,
    )
    .with_context(|| format!("parsing {}", args.styles.display()))?;

    let doc = Document::from_tree(&tree);
    let table = StyleTable::new(rules);
    log::info!(
        "Laying out {} nodes with {} rules at {}x{} (dpr {})",
        doc.len(),
        table.rule_count(),
        args.width,
        args.height,
        args.dpr
    );

    let camera = Camera::from(config.camera);
    let mut engine = LayoutEngine::new(config);
    engine.set_camera(camera);
    engine.set_surface(SurfaceSize::new(args.width, args.height, args.dpr));
    if args.metrics {
        engine.set_text_metrics(Box::new(FontSizeMetrics::default()));
    }

    let mut ctx = LayoutContext::new();
    engine.layout(&doc, &table, &mut ctx)?;

    if let Some(element_id) = &args.hover {
        let node = doc
            .find_by_id(element_id)
            .with_context(|| format!("no element with id {element_id:?}"))?;
        engine.set_hover(&doc, &mut ctx, node, true)?;
        log::info!("Hovered #{element_id} (node {node})");
    }

    print!("{}", dump::dump(&doc, &ctx));
    Ok(())
}
