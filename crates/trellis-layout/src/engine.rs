//! Layout traversal.
//!
//! [`LayoutEngine`] walks a [`Document`] depth-first in pre-order. For each
//! node it resolves the effective style, places the node's children (flex,
//! list or plain box model, depending on the parent), converts the result
//! to render units, derives border and shadow geometry, and hands out depth
//! slots. All per-pass state lives in a caller-owned [`LayoutContext`].
//!
//! A pass either completes or returns the first error; nothing in the
//! context is meaningful after a failed pass.

use std::collections::HashSet;

use trellis_types::{Color, EngineConfig, LayoutError, Result};

use crate::coords::{Camera, CoordinateSpace, SurfaceSize};
use crate::css::cascade::StyleVariantTable;
use crate::css::declarations::BoxProperty;
use crate::css::rule::StyleTable;
use crate::css::values::{ComputedStyle, Display};
use crate::dom::{Document, Node, NodeId};
use crate::layout::border::{
    BorderGeometry, ShadowGeometry, border_geometry, parse_border, parse_box_shadow,
    shadow_geometry,
};
use crate::layout::box_model::{LayoutBox, Rect, compute_box, resolve_edges};
use crate::layout::depth::{DepthAssigner, DepthSlots, SLOTS_PER_ELEMENT, stacking_order};
use crate::layout::flex::{FlexContainer, FlexItem, layout_flex};
use crate::layout::list::{ListMarker, ListMetrics, MarkerGeometry, layout_list_item};
use crate::layout::text::{NoTextMetrics, TextMetrics};

// -----------------------------------------------------------------------
// Output
// -----------------------------------------------------------------------

/// Everything the renderer needs to draw one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementLayout {
    pub node: NodeId,
    /// Box in logical pixels, relative to the parent's content-box center.
    pub layout: LayoutBox,
    /// Render-unit rect, relative to the parent's render center.
    pub rect: Rect,
    pub opacity: f32,
    /// `backgroundColor` with its alpha scaled by `opacity`.
    pub background: Option<Color>,
    pub border: Option<BorderGeometry>,
    pub shadow: Option<ShadowGeometry>,
    /// List marker, in the same frame as `rect`.
    pub marker: Option<MarkerGeometry>,
    pub depth: DepthSlots,
}

/// Per-document layout state, owned by the caller and threaded through
/// every pass.
#[derive(Debug, Default)]
pub struct LayoutContext {
    variants: StyleVariantTable,
    boxes: Vec<Option<LayoutBox>>,
    elements: Vec<Option<ElementLayout>>,
    first_slots: Vec<Option<usize>>,
    /// Nodes inside a `display: none` subtree in the last pass.
    hidden: Vec<bool>,
    hovered: HashSet<NodeId>,
    space: Option<CoordinateSpace>,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored box of `id`, or `None` when it is not displayed.
    pub fn layout_box(&self, id: NodeId) -> Option<&LayoutBox> {
        self.boxes.get(id).and_then(Option::as_ref)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementLayout> {
        self.elements.get(id).and_then(Option::as_ref)
    }

    /// Laid-out elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &ElementLayout> {
        self.elements.iter().flatten()
    }

    pub fn is_hovered(&self, id: NodeId) -> bool {
        self.hovered.contains(&id)
    }

    /// The coordinate space of the last pass.
    pub fn coordinate_space(&self) -> Option<&CoordinateSpace> {
        self.space.as_ref()
    }

    /// Effective style of `id` in its current hover state.
    pub fn style(&self, id: NodeId) -> Result<&ComputedStyle> {
        self.variants.style(id, self.is_hovered(id))
    }

    fn reset(&mut self, len: usize) {
        self.boxes = vec![None; len];
        self.elements = vec![None; len];
        self.first_slots = vec![None; len];
        self.hidden = vec![false; len];
        self.hovered.retain(|&id| id < len);
    }

    fn first_slot(&self, id: NodeId) -> Option<usize> {
        self.first_slots.get(id).copied().flatten()
    }

    /// Whether `id` was skipped as part of a `display: none` subtree.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.hidden.get(id).copied().unwrap_or(false)
    }

    /// Drop stored geometry for `id..id + len` and mark it hidden. Only `id`
    /// keeps its slot.
    fn clear_subtree(&mut self, id: NodeId, len: usize) {
        let end = (id + len).min(self.boxes.len());
        for i in id..end {
            self.boxes[i] = None;
            self.elements[i] = None;
            self.hidden[i] = true;
        }
        for slot in self.first_slots.iter_mut().take(end).skip(id + 1) {
            *slot = None;
        }
    }
}

/// A child's box before it is converted and stored.
#[derive(Debug, Clone, Copy)]
struct Placed {
    layout: LayoutBox,
    marker: Option<ListMarker>,
}

// -----------------------------------------------------------------------
// Engine
// -----------------------------------------------------------------------

/// Lays out documents against a camera and render surface.
pub struct LayoutEngine {
    config: EngineConfig,
    camera: Option<Camera>,
    surface: SurfaceSize,
    text_metrics: Box<dyn TextMetrics>,
}

impl LayoutEngine {
    /// An engine with no camera. Passes fail with
    /// [`LayoutError::CameraNotInitialized`] until [`set_camera`] is called.
    ///
    /// [`set_camera`]: LayoutEngine::set_camera
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            camera: None,
            surface: SurfaceSize::new(0.0, 0.0, 1.0),
            text_metrics: Box::new(NoTextMetrics),
        }
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn set_surface(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    pub fn set_text_metrics(&mut self, metrics: Box<dyn TextMetrics>) {
        self.text_metrics = metrics;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The coordinate space for the current camera and surface.
    pub fn coordinate_space(&self) -> Result<CoordinateSpace> {
        CoordinateSpace::derive(
            self.camera.as_ref(),
            self.surface,
            self.config.fallback_units_per_pixel,
        )
    }

    /// Full pass: rebuild the style variants and lay out every node.
    pub fn layout(&self, doc: &Document, table: &StyleTable, ctx: &mut LayoutContext) -> Result<()> {
        ctx.variants = StyleVariantTable::build(doc, table);
        self.relayout(doc, ctx)
    }

    /// Record a hover change for `node` and refresh what it affects.
    /// Nodes without hover rules only have their state recorded.
    pub fn set_hover(
        &self,
        doc: &Document,
        ctx: &mut LayoutContext,
        node: NodeId,
        hovered: bool,
    ) -> Result<()> {
        doc.node(node)?;
        let changed = if hovered {
            ctx.hovered.insert(node)
        } else {
            ctx.hovered.remove(&node)
        };
        let has_hover = ctx.variants.get(node).is_some_and(|v| v.has_hover());
        if !changed || !has_hover || ctx.space.is_none() {
            return Ok(());
        }
        log::debug!("hover {} on node {node}", if hovered { "enter" } else { "leave" });
        self.refresh(doc, ctx, node)
    }

    /// Recompute `node` and everything that depends on it, reusing the
    /// depth slots of the previous pass.
    ///
    /// When the parent is a flex or list container, or the node's `zIndex`
    /// differs between its hover states, all of the parent's children are
    /// redone. The root triggers a full pass.
    pub fn refresh(&self, doc: &Document, ctx: &mut LayoutContext, node: NodeId) -> Result<()> {
        let Some(parent) = doc.node(node)?.parent else {
            return self.relayout(doc, ctx);
        };
        let space = ctx.space.ok_or(LayoutError::CameraNotInitialized)?;
        let Some(parent_box) = ctx.layout_box(parent).copied() else {
            if ctx.is_hidden(parent) {
                log::debug!("node {node} is inside a hidden subtree, nothing to refresh");
                return Ok(());
            }
            return Err(LayoutError::ParentBoxNotResolved(node));
        };

        let parent_node = doc.node(parent)?;
        let parent_style = ctx.style(parent)?;
        let independent = !parent_style.display()?.is_flex_container()
            && !is_list_container(parent_node, parent_style)?
            && z_index_is_stable(ctx, node)?;

        if !independent {
            let first = ctx.first_slot(parent).ok_or(LayoutError::ParentBoxNotResolved(node))?;
            let mut depth =
                DepthAssigner::starting_at(&self.config.depth, first + SLOTS_PER_ELEMENT);
            log::debug!("refresh: children of node {parent}");
            return self.layout_children(doc, ctx, parent, &space, &mut depth);
        }

        let first = ctx.first_slot(node).ok_or(LayoutError::ParentBoxNotResolved(node))?;
        let index = parent_node
            .children
            .iter()
            .position(|&c| c == node)
            .ok_or(LayoutError::UnknownNode(node))?;
        let placed = self.place_children(doc, ctx, parent, &parent_box)?[index];
        let mut depth = DepthAssigner::starting_at(&self.config.depth, first);
        log::debug!("refresh: subtree of node {node}");
        self.visit(doc, ctx, node, placed, parent_box.content_offset(), &space, &mut depth)
    }

    // -- traversal ------------------------------------------------------

    fn relayout(&self, doc: &Document, ctx: &mut LayoutContext) -> Result<()> {
        let space = self.coordinate_space()?;
        ctx.reset(doc.len());
        ctx.space = Some(space);
        if doc.is_empty() {
            return Ok(());
        }

        let viewport = space.viewport_box();
        let root_style = ctx.style(doc.root)?;
        let placed = if root_style.display()? == Display::None {
            None
        } else {
            Some(Placed {
                layout: compute_box(root_style, &viewport)?,
                marker: None,
            })
        };

        let mut depth = DepthAssigner::new(&self.config.depth);
        self.visit(doc, ctx, doc.root, placed, viewport.content_offset(), &space, &mut depth)?;
        log::debug!(
            "layout: {} of {} nodes drawn, {} depth slots, {:.4} units/px",
            ctx.elements().count(),
            doc.len(),
            depth.next_slot(),
            space.units_per_pixel
        );
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn visit(
        &self,
        doc: &Document,
        ctx: &mut LayoutContext,
        id: NodeId,
        placed: Option<Placed>,
        parent_offset: (f32, f32),
        space: &CoordinateSpace,
        depth: &mut DepthAssigner,
    ) -> Result<()> {
        ctx.first_slots[id] = Some(depth.next_slot());
        let Some(placed) = placed else {
            let len = doc.subtree_len(id);
            depth.skip(len);
            ctx.clear_subtree(id, len);
            return Ok(());
        };

        let element = self.emit(ctx, id, &placed, parent_offset, space, depth)?;
        ctx.hidden[id] = false;
        ctx.boxes[id] = Some(placed.layout);
        ctx.elements[id] = Some(element);
        self.layout_children(doc, ctx, id, space, depth)
    }

    /// Place and visit the children of `id`, whose box must already be
    /// stored. Siblings are visited in stacking order.
    fn layout_children(
        &self,
        doc: &Document,
        ctx: &mut LayoutContext,
        id: NodeId,
        space: &CoordinateSpace,
        depth: &mut DepthAssigner,
    ) -> Result<()> {
        let node = doc.node(id)?;
        if node.children.is_empty() {
            return Ok(());
        }
        let parent = ctx
            .layout_box(id)
            .copied()
            .ok_or(LayoutError::ParentBoxNotResolved(node.children[0]))?;

        let placements = self.place_children(doc, ctx, id, &parent)?;
        let z_indices = node
            .children
            .iter()
            .map(|&c| -> Result<i32> { Ok(ctx.style(c)?.z_index()?) })
            .collect::<Result<Vec<_>>>()?;

        for i in stacking_order(&z_indices) {
            self.visit(
                doc,
                ctx,
                node.children[i],
                placements[i],
                parent.content_offset(),
                space,
                depth,
            )?;
        }
        Ok(())
    }

    /// Boxes for every child of `id`, in child order. `None` marks a child
    /// that is not displayed.
    fn place_children(
        &self,
        doc: &Document,
        ctx: &LayoutContext,
        id: NodeId,
        parent: &LayoutBox,
    ) -> Result<Vec<Option<Placed>>> {
        let node = doc.node(id)?;
        let parent_style = ctx.style(id)?;
        let styles = node
            .children
            .iter()
            .map(|&c| ctx.style(c))
            .collect::<Result<Vec<_>>>()?;
        let mut visible = Vec::with_capacity(styles.len());
        for (i, style) in styles.iter().enumerate() {
            if style.display()? != Display::None {
                visible.push(i);
            }
        }

        let mut out = vec![None; styles.len()];
        if parent_style.display()?.is_flex_container() {
            let container = FlexContainer::from_style(parent_style, parent)?;
            let mut items = Vec::with_capacity(visible.len());
            for &i in &visible {
                let mut item = FlexItem::from_style(styles[i], &container)?;
                let child = doc.node(node.children[i])?;
                if let Some(metrics) = self.text_metrics.baseline(child, styles[i]) {
                    item = item.with_baseline(metrics);
                }
                items.push(item);
            }
            let flex = layout_flex(&container, &items);
            for (k, &i) in visible.iter().enumerate() {
                let p = flex.placements[k];
                out[i] = Some(Placed {
                    layout: LayoutBox {
                        width: p.width,
                        height: p.height,
                        x: p.x,
                        y: p.y,
                        padding: resolve_edges(styles[i], BoxProperty::Padding, container.width)?,
                        margin: items[k].margin,
                    },
                    marker: None,
                });
            }
        } else if is_list_container(node, parent_style)? {
            let list = &self.config.list;
            let metrics = ListMetrics::new(parent_style, parent, visible.len(), list)?;
            for (index, &i) in visible.iter().enumerate() {
                let (layout, marker) = layout_list_item(styles[i], parent, &metrics, index, list)?;
                out[i] = Some(Placed { layout, marker });
            }
        } else {
            for &i in &visible {
                out[i] = Some(Placed {
                    layout: compute_box(styles[i], parent)?,
                    marker: None,
                });
            }
        }
        Ok(out)
    }

    /// Convert a placed box into render geometry and allocate its slots.
    fn emit(
        &self,
        ctx: &LayoutContext,
        id: NodeId,
        placed: &Placed,
        parent_offset: (f32, f32),
        space: &CoordinateSpace,
        depth: &mut DepthAssigner,
    ) -> Result<ElementLayout> {
        let style = ctx.style(id)?;
        let opacity = style.opacity()?;
        let rect = space.to_render_rect(&placed.layout, parent_offset);

        let border = parse_border(style)?.and_then(|spec| border_geometry(&rect, &spec, space));
        let shadow = match style.get("boxShadow") {
            Some(value) => {
                parse_box_shadow(value)?.map(|spec| shadow_geometry(&rect, &spec, opacity, space))
            },
            None => None,
        };

        let element = ElementLayout {
            node: id,
            layout: placed.layout,
            rect,
            opacity,
            background: style.color("backgroundColor")?.map(|c| c.scale_alpha(opacity)),
            border,
            shadow,
            marker: placed.marker.map(|m| m.to_render(space, parent_offset)),
            depth: depth.allocate(),
        };
        log::trace!("node {id}: {:?} depth {}", element.rect, element.depth.element);
        Ok(element)
    }
}

/// `ul`/`ol` elements lay out their children as list items unless they are
/// flex containers.
fn is_list_container(node: &Node, style: &ComputedStyle) -> Result<bool> {
    Ok(matches!(node.tag.as_str(), "ul" | "ol") && !style.display()?.is_flex_container())
}

fn z_index_is_stable(ctx: &LayoutContext, node: NodeId) -> Result<bool> {
    let variant = ctx.variants.get(node).ok_or(LayoutError::UnknownNode(node))?;
    match &variant.hover {
        Some(hover) => Ok(hover.z_index()? == variant.normal.z_index()?),
        None => Ok(true),
    }
}
