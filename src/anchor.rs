//! What the arrow points at.

use crate::backend::Backend;
use crate::placement::Placement;
use crate::view_tree::ViewId;

/// A non-owning reference to a view elsewhere in the hierarchy.
///
/// Holding one never keeps the view alive; whether it still exists and is attached is checked
/// every time it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRef(Option<ViewId>);

impl TargetRef {
    pub fn new(view: ViewId) -> TargetRef {
        TargetRef(Some(view))
    }

    /// A reference to nothing.
    pub fn none() -> TargetRef {
        TargetRef(None)
    }

    /// Returns the view if it is alive and attached to the hierarchy.
    pub fn upgrade<B: Backend>(&self, backend: &B) -> Option<ViewId> {
        self.0
            .filter(|view| backend.is_alive(*view) && backend.is_attached(*view))
    }

    pub fn id(&self) -> Option<ViewId> {
        self.0
    }
}

impl From<ViewId> for TargetRef {
    fn from(view: ViewId) -> TargetRef {
        TargetRef::new(view)
    }
}

impl From<Option<ViewId>> for TargetRef {
    fn from(view: Option<ViewId>) -> TargetRef {
        TargetRef(view)
    }
}

/// The horizontal reference point the arrow points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// A fixed x offset from the callout’s left edge, in callout coordinates.
    Offset { x: f64, placement: Placement },

    /// A fraction (0..1) of the callout’s width.
    Ratio { ratio: f64, placement: Placement },

    /// The horizontal center of another view. Placement follows the target’s position: the arrow
    /// is put on the edge facing it, and hidden if the target goes away.
    Target(TargetRef),
}

impl Anchor {
    pub fn offset(x: f64, placement: Placement) -> Anchor {
        Anchor::Offset { x, placement }
    }

    pub fn ratio(ratio: f64, placement: Placement) -> Anchor {
        Anchor::Ratio { ratio, placement }
    }

    pub fn target<T: Into<TargetRef>>(target: T) -> Anchor {
        Anchor::Target(target.into())
    }

    /// The anchor of a callout without an arrow.
    pub fn none() -> Anchor {
        Anchor::Target(TargetRef::none())
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::none()
    }
}
