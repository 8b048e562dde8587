//! Layout delegates.

use crate::rect::{EdgeInsets, Rect};
use crate::view_tree::ViewId;
use core::any::Any;
use core::fmt;

/// A layout delegate for a view.
///
/// Layout is performed top-down: a view lays out its subviews in its own bounds, and subviews
/// whose size changed then lay out their own subviews.
pub trait Layout: Any + fmt::Debug + Send + Sync {
    /// Performs layout.
    ///
    /// - `bounds`: the view’s own bounds (origin is always zero).
    /// - `subviews`: the view’s subviews, in paint order.
    ///
    /// Returns new frames for any subviews that should be moved. Subviews not mentioned keep
    /// their frame.
    fn layout(&self, bounds: Rect, subviews: &[ViewId]) -> Vec<(ViewId, Rect)> {
        let _ = (bounds, subviews);
        Vec::new()
    }
}

/// Manual layout.
///
/// Subview frames are only ever changed by whoever owns them.
impl Layout for () {}

/// Pins a single subview to the view’s bounds, inset by some amount on every edge.
///
/// This stands in for the four edge constraints of a container: changing the insets (by replacing
/// the layout) invalidates the view’s layout, and the next layout pass moves the subview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinLayout {
    pub subview: ViewId,
    pub insets: EdgeInsets,
}

impl PinLayout {
    pub fn new(subview: ViewId, insets: EdgeInsets) -> PinLayout {
        PinLayout { subview, insets }
    }
}

impl Layout for PinLayout {
    fn layout(&self, bounds: Rect, subviews: &[ViewId]) -> Vec<(ViewId, Rect)> {
        if subviews.contains(&self.subview) {
            vec![(self.subview, bounds.inset_by(self.insets))]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_layout_insets_subview() {
        let pinned = ViewId::new();
        let other = ViewId::new();
        let layout = PinLayout::new(pinned, EdgeInsets::vertical(8., 0.));
        let frames = layout.layout(Rect::from_xywh(0., 0., 200., 60.), &[other, pinned]);
        assert_eq!(frames, vec![(pinned, Rect::from_xywh(0., 8., 200., 52.))]);
    }

    #[test]
    fn pin_layout_ignores_foreign_subview() {
        let layout = PinLayout::new(ViewId::new(), EdgeInsets::uniform(3.));
        assert!(layout
            .layout(Rect::from_xywh(0., 0., 10., 10.), &[ViewId::new()])
            .is_empty());
        assert!(().layout(Rect::zero(), &[ViewId::new()]).is_empty());
    }
}
