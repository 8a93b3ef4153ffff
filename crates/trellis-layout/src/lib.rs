//! Trellis layout engine.
//!
//! Turns a declarative element tree plus a style table into render-ready
//! geometry for a 3D scene that emulates a 2D page:
//!
//! - [`css`] resolves each element's effective style (type defaults, class
//!   rules, the id rule and an optional hover overlay).
//! - [`layout`] computes boxes with the CSS box model, flexbox and list
//!   auto-layout, plus border strips, shadows and depth slots.
//! - [`coords`] maps logical pixels onto render units for a camera and a
//!   DPR-scaled surface, snapping to whole pixels.
//! - [`engine`] drives the pre-order traversal and owns hover refreshes.
//!
//! ```no_run
//! use trellis_layout::{
//!     Camera, Document, ElementNode, EngineConfig, LayoutContext, LayoutEngine, StyleTable,
//!     SurfaceSize,
//! };
//!
//! let doc = Document::from_tree(&ElementNode::new("div"));
//! let mut engine = LayoutEngine::new(EngineConfig::default());
//! engine.set_camera(Camera::new(10.0, 75.0));
//! engine.set_surface(SurfaceSize::new(1600.0, 1200.0, 2.0));
//!
//! let mut ctx = LayoutContext::new();
//! engine.layout(&doc, &StyleTable::default(), &mut ctx)?;
//! # Ok::<(), trellis_layout::LayoutError>(())
//! ```

pub mod coords;
pub mod css;
pub mod dom;
pub mod engine;
pub mod layout;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use coords::{Camera, CoordinateSpace, SurfaceSize};
pub use css::cascade::{ComputedStyleVariant, StyleVariantTable};
pub use css::rule::{Selector, StyleRule, StyleTable};
pub use css::values::ComputedStyle;
pub use dom::{Document, ElementNode, Node, NodeId};
pub use engine::{ElementLayout, LayoutContext, LayoutEngine};
pub use layout::box_model::{LayoutBox, Rect};
pub use layout::text::{BaselineMetrics, FontSizeMetrics, NoTextMetrics, TextMetrics};
pub use trellis_types::{Color, EngineConfig, LayoutError, ParseError, Result};
