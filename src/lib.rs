//! Callouts: content bubbles with an arrow that points at something.
//!
//! # Conceptual overview
//! A callout wraps a content view and shows a small arrow on its top or bottom edge. The arrow
//! points at an [`Anchor`]: a fixed x offset, a fraction of the callout’s width, or the horizontal
//! center of some other view anywhere in the hierarchy. Space for the arrow is reserved on the edge
//! it sits on, so the content moves out of the way.
//!
//! ## Placement
//! Offset and ratio anchors come with an explicit [`Placement`]. For target views, the arrow goes
//! on the edge facing the target: the bottom edge if the target’s center is lower than the
//! callout’s, the top edge otherwise. A target that is gone, detached from the hierarchy, or the
//! callout itself hides the arrow.
//!
//! ## Reconciliation
//! Setting an anchor only invalidates layout. After the callout has been laid out, it defers a
//! reconciliation pass to the next turn of the run loop, which moves the arrow. Moving the arrow to
//! another edge takes two passes: the first animates the padding, the second glides the arrow into
//! its final frame. See the `reconcile` module.
//!
//! ## Backends
//! Callouts only talk to their host UI framework through the [`Backend`] trait. [`ViewTree`] is an
//! in-process backend and [`Host`] drives a view tree and its callouts turn by turn.
//!
//! ## Coordinate System
//! The origin of the root coordinate system is at the top left corner of the root view. The y-axis
//! is oriented such that positive y points down.

pub mod anchor;
pub mod animation;
pub mod arrow;
pub mod backend;
mod callout;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
mod host;
pub mod layout;
pub mod placement;
mod rect;
mod reconcile;
mod run_loop;
mod view_tree;

pub use anchor::{Anchor, TargetRef};
pub use backend::Backend;
pub use callout::{arrow_padding, CalloutState, CalloutView};
pub use config::CalloutConfig;
pub use error::{ConfigError, ViewError};
pub use host::{Host, MAX_TURNS};
pub use placement::Placement;
pub use rect::{EdgeInsets, Rect};
pub use reconcile::ReconcileOutcome;
pub use run_loop::RunLoop;
pub use view_tree::{ViewId, ViewTree};
