//! Implicit property animations.
//!
//! Writes to animatable properties inside an animation transaction take effect on the model
//! immediately; the animator only remembers where the on-screen (presentation) value came from so
//! it can interpolate towards the model value over the transaction’s duration. Nothing ever waits
//! for an animation to finish, and a newer transition on the same property simply replaces the
//! older one, starting from wherever the older one currently is.

use crate::rect::Rect;
use crate::view_tree::ViewId;
use cgmath::Matrix3;

/// An animatable view property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedProperty {
    Frame { from: Rect, to: Rect },
    Transform { from: Matrix3<f64>, to: Matrix3<f64> },
}

impl AnimatedProperty {
    fn same_kind(&self, other: &AnimatedProperty) -> bool {
        match (self, other) {
            (AnimatedProperty::Frame { .. }, AnimatedProperty::Frame { .. }) => true,
            (AnimatedProperty::Transform { .. }, AnimatedProperty::Transform { .. }) => true,
            _ => false,
        }
    }
}

/// A running interpolation of one property of one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub view: ViewId,
    pub property: AnimatedProperty,
    pub duration: f64,
    pub elapsed: f64,
}

impl Transition {
    /// Progress in 0..=1.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0. {
            1.
        } else {
            (self.elapsed / self.duration).min(1.)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.
    }
}

/// Keeps track of open animation transactions and running transitions.
#[derive(Debug, Default)]
pub struct Animator {
    /// Duration of the outermost open transaction, and the nesting depth.
    transaction: Option<(f64, usize)>,
    transitions: Vec<Transition>,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }

    /// Opens a transaction. Nested transactions use the outermost duration.
    pub fn begin(&mut self, duration: f64) {
        self.transaction = match self.transaction {
            Some((outer, depth)) => Some((outer, depth + 1)),
            None => Some((duration.max(0.), 1)),
        };
    }

    /// Closes the innermost open transaction.
    pub fn commit(&mut self) {
        self.transaction = match self.transaction {
            Some((duration, depth)) if depth > 1 => Some((duration, depth - 1)),
            _ => None,
        };
    }

    /// The duration of the open transaction, if any.
    pub fn current_duration(&self) -> Option<f64> {
        self.transaction.map(|(duration, _)| duration)
    }

    /// Records a frame change if a transaction is open.
    pub(crate) fn frame_changed(&mut self, view: ViewId, from: Rect, to: Rect) {
        let from = self.presentation_frame(view).unwrap_or(from);
        if from != to {
            self.record(view, AnimatedProperty::Frame { from, to });
        }
    }

    /// Records a transform change if a transaction is open.
    pub(crate) fn transform_changed(&mut self, view: ViewId, from: Matrix3<f64>, to: Matrix3<f64>) {
        let from = self.presentation_transform(view).unwrap_or(from);
        if from != to {
            self.record(view, AnimatedProperty::Transform { from, to });
        }
    }

    fn record(&mut self, view: ViewId, property: AnimatedProperty) {
        let duration = match self.current_duration() {
            Some(duration) => duration,
            None => {
                // not animated; whatever was running on this property is superseded
                self.transitions
                    .retain(|t| t.view != view || !t.property.same_kind(&property));
                return;
            }
        };

        self.transitions
            .retain(|t| t.view != view || !t.property.same_kind(&property));
        self.transitions.push(Transition {
            view,
            property,
            duration,
            elapsed: 0.,
        });
    }

    /// Advances all transitions by `dt` seconds and drops those that finished.
    pub fn advance(&mut self, dt: f64) {
        for transition in &mut self.transitions {
            transition.elapsed += dt;
        }
        self.transitions.retain(|t| !t.is_finished());
    }

    /// Forgets all transitions of a view (e.g. because it was removed).
    pub(crate) fn remove_view(&mut self, view: ViewId) {
        self.transitions.retain(|t| t.view != view);
    }

    /// Running transitions.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_animating(&self, view: ViewId) -> bool {
        self.transitions.iter().any(|t| t.view == view)
    }

    /// The interpolated frame of a view, if its frame is currently animating.
    pub fn presentation_frame(&self, view: ViewId) -> Option<Rect> {
        self.transitions.iter().find_map(|t| match t.property {
            AnimatedProperty::Frame { from, to } if t.view == view => {
                Some(from.lerp(to, t.progress()))
            }
            _ => None,
        })
    }

    /// The interpolated transform of a view, if its transform is currently animating.
    pub fn presentation_transform(&self, view: ViewId) -> Option<Matrix3<f64>> {
        self.transitions.iter().find_map(|t| match t.property {
            AnimatedProperty::Transform { from, to } if t.view == view => {
                let p = t.progress();
                Some(from * (1. - p) + to * p)
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_changes_outside_transaction_are_not_recorded() {
        let mut animator = Animator::new();
        let view = ViewId::new();
        animator.frame_changed(view, Rect::zero(), Rect::from_xywh(0., 0., 10., 10.));
        assert!(animator.transitions().is_empty());
    }

    #[test]
    fn frame_interpolates_over_duration() {
        let mut animator = Animator::new();
        let view = ViewId::new();
        animator.begin(0.2);
        animator.frame_changed(
            view,
            Rect::from_xywh(0., -8., 34., 8.),
            Rect::from_xywh(40., 52., 34., 8.),
        );
        animator.commit();
        assert_eq!(animator.current_duration(), None);

        animator.advance(0.05);
        let frame = animator.presentation_frame(view).unwrap();
        assert_relative_eq!(frame.origin.x, 10.);
        assert_relative_eq!(frame.origin.y, 7.);

        animator.advance(0.2);
        assert_eq!(animator.presentation_frame(view), None);
        assert!(!animator.is_animating(view));
    }

    #[test]
    fn newer_transition_starts_from_presentation_value() {
        let mut animator = Animator::new();
        let view = ViewId::new();
        animator.begin(1.);
        animator.frame_changed(view, Rect::zero(), Rect::from_xywh(100., 0., 0., 0.));
        animator.commit();
        animator.advance(0.5);

        animator.begin(1.);
        animator.frame_changed(
            view,
            Rect::from_xywh(100., 0., 0., 0.),
            Rect::from_xywh(0., 0., 0., 0.),
        );
        animator.commit();

        assert_eq!(animator.transitions().len(), 1);
        match animator.transitions()[0].property {
            AnimatedProperty::Frame { from, .. } => assert_relative_eq!(from.origin.x, 50.),
            _ => panic!("expected a frame transition"),
        }
    }

    #[test]
    fn nested_transactions_use_outer_duration() {
        let mut animator = Animator::new();
        animator.begin(0.15);
        animator.begin(2.);
        assert_eq!(animator.current_duration(), Some(0.15));
        animator.commit();
        assert_eq!(animator.current_duration(), Some(0.15));
        animator.commit();
        assert_eq!(animator.current_duration(), None);
    }
}
