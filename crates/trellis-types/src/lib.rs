//! Foundation types for Trellis.
//!
//! This crate contains the types shared by the layout engine and its host
//! tools: the error taxonomy, RGBA colors, and the engine configuration
//! loaded from TOML.

pub mod color;
pub mod config;
pub mod error;

pub use color::Color;
pub use config::EngineConfig;
pub use error::{LayoutError, ParseError, Result};
