//! Arrow reconciliation.
//!
//! One reconciliation pass compares where the arrow should be with where it was last committed:
//!
//! - Same edge as before: the arrow glides to its new frame, and the padding stays as it is.
//! - Different edge: only the padding is changed in this pass. Because that invalidates the
//!   container’s layout, another pass follows once the padding has been applied, and that pass
//!   glides the arrow (now on the same edge) into place. Doing both at once would compute the arrow
//!   frame from geometry that is about to change.
//! - Hidden: the arrow disappears at once and the padding is removed.
//!
//! A pass never runs another pass itself; it only invalidates layout.

use crate::anchor::{Anchor, TargetRef};
use crate::arrow::arrow_transform;
use crate::backend::Backend;
use crate::callout::{hidden_arrow_frame, CalloutView};
use crate::error::ViewError;
use crate::geometry::arrow_frame;
use crate::placement::{resolve_placement, Placement};
use crate::rect::Rect;
use log::{debug, trace};

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconcileOutcome {
    /// The arrow already was where it should be.
    Unchanged,
    /// The arrow moved along the same edge to the given frame.
    Glided(Rect),
    /// The arrow moved to another edge; the padding was changed and the arrow follows next pass.
    Flipped(Placement),
    /// The arrow was hidden and its padding removed.
    Hidden,
}

impl CalloutView {
    /// Runs one reconciliation pass.
    ///
    /// Problems with a target view (gone, detached, or the callout itself) hide the arrow rather
    /// than fail; errors only come from the callout’s own views having been removed from the
    /// backend.
    pub fn reconcile<B: Backend>(&mut self, backend: &mut B) -> Result<ReconcileOutcome, ViewError> {
        let (frame, placement) = self.desired_arrow(backend)?;
        self.state.placement = placement;

        if placement == self.state.previous_placement {
            self.settle(backend, frame, placement)
        } else {
            // commit the placement now so the next pass takes the settle path
            self.state.previous_placement = placement;

            if placement == Placement::Hidden {
                backend.set_hidden(self.arrow_view(), true)?;
                // the glyph view keeps its frame, but a later reveal must never compare equal
                self.state.arrow_frame = hidden_arrow_frame();
                self.apply_arrow_padding(backend, Placement::Hidden, true)?;
                debug!("callout {}: arrow hidden", self.id());
                Ok(ReconcileOutcome::Hidden)
            } else {
                self.apply_arrow_padding(backend, placement, true)?;
                debug!("callout {}: arrow moved to {:?} edge", self.id(), placement);
                Ok(ReconcileOutcome::Flipped(placement))
            }
        }
    }

    fn settle<B: Backend>(
        &mut self,
        backend: &mut B,
        frame: Rect,
        placement: Placement,
    ) -> Result<ReconcileOutcome, ViewError> {
        let arrow = self.arrow_view();

        if placement == Placement::Hidden {
            // set_anchor may have shown the glyph for an anchor that turned out to be hidden
            if !backend.is_hidden(arrow)? {
                backend.set_hidden(arrow, true)?;
            }
            trace!("callout {}: settled hidden", self.id());
            return Ok(ReconcileOutcome::Unchanged);
        }

        let revealed = backend.is_hidden(arrow)?;
        if revealed {
            backend.set_hidden(arrow, false)?;
        }

        if frame == self.state.arrow_frame && !revealed {
            trace!("callout {}: settled at {:?}", self.id(), frame);
            return Ok(ReconcileOutcome::Unchanged);
        }

        backend.animate(self.animation_duration, |backend| {
            backend.set_frame(arrow, frame)?;
            // frame writes don’t keep the flip, so it is always applied with the frame
            backend.set_transform(arrow, arrow_transform(placement))
        })?;
        self.state.arrow_frame = frame;

        debug!("callout {}: arrow glides to {:?}", self.id(), frame);
        Ok(ReconcileOutcome::Glided(frame))
    }

    /// Where the arrow should be according to the current anchor.
    fn desired_arrow<B: Backend>(&self, backend: &mut B) -> Result<(Rect, Placement), ViewError> {
        let bounds = backend.bounds(self.id())?;

        Ok(match self.state.anchor {
            Anchor::Offset { x, placement } => (arrow_frame(bounds, x, placement), placement),
            Anchor::Ratio { ratio, placement } => {
                (arrow_frame(bounds, bounds.width() * ratio, placement), placement)
            }
            Anchor::Target(target) => match self.target_arrow(backend, target, bounds) {
                Some(desired) => desired,
                None => (self.state.arrow_frame, Placement::Hidden),
            },
        })
    }

    /// Arrow frame and placement pointing at a target view, if it can be pointed at.
    fn target_arrow<B: Backend>(
        &self,
        backend: &mut B,
        target: TargetRef,
        bounds: Rect,
    ) -> Option<(Rect, Placement)> {
        let target = target.upgrade(backend)?;
        if target == self.id() {
            return None;
        }

        let located = backend.layout_if_needed(target).and_then(|_| {
            let target_center = backend.bounds(target)?.center();
            let own_center_in_root = backend.convert_point(bounds.center(), self.id(), None)?;
            let target_center_in_root = backend.convert_point(target_center, target, None)?;
            let target_center_in_self =
                backend.convert_point(target_center, target, Some(self.id()))?;
            Ok((own_center_in_root, target_center_in_root, target_center_in_self))
        });

        match located {
            Ok((own_center, target_center, target_center_in_self)) => {
                let placement = resolve_placement(own_center, target_center);
                Some((arrow_frame(bounds, target_center_in_self.x, placement), placement))
            }
            Err(err) => {
                trace!("callout {}: can’t locate target {}: {}", self.id(), target, err);
                None
            }
        }
    }
}
