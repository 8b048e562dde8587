//! Error types.

use crate::view_tree::ViewId;
use thiserror::Error;

/// Errors that may occur when operating on views in a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ViewError {
    /// The view does not exist (anymore).
    #[error("no such view: {0}")]
    NoSuchView(ViewId),

    /// The view exists but is not part of the hierarchy under the root view.
    #[error("view {0} is not attached to the view hierarchy")]
    Detached(ViewId),

    /// The operation is not allowed on the root view.
    #[error("view {0} is the root view")]
    IsRoot(ViewId),

    /// Adding the view as a subview would make it its own ancestor.
    #[error("adding view {0} as a subview would create a cycle")]
    Cycle(ViewId),
}

/// Errors that may occur when loading a callout configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse callout config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {value} (must be finite and non-negative)")]
    InvalidValue { field: &'static str, value: f64 },
}
