//! Error types for Trellis.

use std::io;

/// A malformed style value, reported at the point where it is parsed.
///
/// Values are never silently defaulted: a declaration that cannot be
/// parsed aborts the layout of the element that reads it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid length for `{property}`: {value:?}")]
    InvalidLength { property: String, value: String },

    #[error("unsupported unit for `{property}`: {value:?}")]
    UnsupportedUnit { property: String, value: String },

    #[error("invalid number for `{property}`: {value:?}")]
    InvalidNumber { property: String, value: String },

    #[error("invalid flex-basis: {0:?}")]
    InvalidFlexBasis(String),

    #[error("invalid keyword for `{property}`: {value:?}")]
    InvalidKeyword { property: String, value: String },

    #[error("invalid color for `{property}`: {value:?}")]
    InvalidColor { property: String, value: String },

    #[error("invalid box-shadow: {0:?}")]
    InvalidShadow(String),

    #[error("invalid selector: {0:?}")]
    InvalidSelector(String),
}

/// Errors that abort a layout pass.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("camera not initialized")]
    CameraNotInitialized,

    /// An element was laid out before its parent's box was stored. This is
    /// a traversal ordering bug, never a data error.
    #[error("parent box not resolved for node {0}")]
    ParentBoxNotResolved(usize),

    #[error("unknown node {0}")]
    UnknownNode(usize),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LayoutError>;
