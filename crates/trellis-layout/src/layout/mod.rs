//! Geometry: the box model, flex and list placement, border and shadow
//! strips, and depth slots.
//!
//! Everything here works in logical pixels with a center origin and Y up,
//! relative to the parent's content box. Conversion to render units lives
//! in [`crate::coords`].

pub mod border;
pub mod box_model;
pub mod depth;
pub mod flex;
pub mod list;
pub mod text;
