//! The callout view: a content view in a bubble, with an arrow pointing at something.

use crate::anchor::Anchor;
use crate::arrow::{arrow_size, ArrowPath, ARROW_HEIGHT};
use crate::backend::Backend;
use crate::color::Color;
use crate::config::CalloutConfig;
use crate::error::ViewError;
use crate::layout::PinLayout;
use crate::placement::Placement;
use crate::rect::{EdgeInsets, Rect};
use crate::run_loop::RunLoop;
use crate::view_tree::ViewId;
use cgmath::{Point2, Vector2};

/// Arrow state of a callout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutState {
    /// What the arrow points at, as last set.
    pub(crate) anchor: Anchor,
    /// The placement computed by the latest reconciliation pass.
    pub(crate) placement: Placement,
    /// The placement padding was last committed for. Equal to `placement` after every pass.
    pub(crate) previous_placement: Placement,
    /// The arrow frame last committed, in callout coordinates.
    pub(crate) arrow_frame: Rect,
}

impl CalloutState {
    fn new() -> CalloutState {
        CalloutState {
            anchor: Anchor::none(),
            placement: Placement::Hidden,
            previous_placement: Placement::Hidden,
            arrow_frame: hidden_arrow_frame(),
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn previous_placement(&self) -> Placement {
        self.previous_placement
    }

    pub fn arrow_frame(&self) -> Rect {
        self.arrow_frame
    }
}

/// Where the arrow is while no placement is committed: just above the container.
pub(crate) fn hidden_arrow_frame() -> Rect {
    Rect::new(Point2::new(0., -ARROW_HEIGHT), arrow_size())
}

/// Space reserved for the arrow around the content.
pub fn arrow_padding(placement: Placement) -> EdgeInsets {
    match placement {
        Placement::Top => EdgeInsets::vertical(ARROW_HEIGHT, 0.),
        Placement::Bottom => EdgeInsets::vertical(0., ARROW_HEIGHT),
        Placement::Hidden => EdgeInsets::default(),
    }
}

/// A view that wraps a content view in a bubble and shows an arrow on its top or bottom edge,
/// pointing at an anchor.
///
/// View structure, back to front:
///
/// ```text
/// container (the callout itself; its frame is set by whoever owns it)
/// ├── arrow              (manually placed, masked to a chevron)
/// └── content container  (pinned to the container, with space for the arrow on one edge)
///     └── content        (pinned to the content container with the content insets)
/// ```
///
/// The callout doesn’t own a backend; every operation takes the backend it was installed in.
/// Arrow placement is reconciled lazily: operations only invalidate the container’s layout, and
/// whoever drives layout must call [`CalloutView::layout_subviews`] when the container is laid out
/// and [`CalloutView::reconcile`] when the deferred run comes up (see `Host`).
#[derive(Debug)]
pub struct CalloutView {
    container: ViewId,
    content_container: ViewId,
    content: ViewId,
    arrow: ViewId,
    content_insets: EdgeInsets,
    pub(crate) animation_duration: f64,
    pub(crate) state: CalloutState,
}

impl CalloutView {
    /// Builds a callout around an existing content view.
    ///
    /// The content view is moved into the callout. The callout container itself is not added to
    /// any superview.
    pub fn new<B: Backend>(
        backend: &mut B,
        content: ViewId,
        config: CalloutConfig,
    ) -> Result<CalloutView, ViewError> {
        let mut callout = CalloutView {
            container: backend.new_view(),
            content_container: backend.new_view(),
            content,
            arrow: backend.new_view(),
            content_insets: config.content_insets,
            animation_duration: config.animation_duration,
            state: CalloutState::new(),
        };
        callout.install(backend, config)?;
        Ok(callout)
    }

    /// Builds a callout around a new, empty content view.
    pub fn with_default_content<B: Backend>(
        backend: &mut B,
        config: CalloutConfig,
    ) -> Result<CalloutView, ViewError> {
        let content = backend.new_view();
        CalloutView::new(backend, content, config)
    }

    fn install<B: Backend>(&mut self, backend: &mut B, config: CalloutConfig) -> Result<(), ViewError> {
        backend.add_subview(self.container, self.content_container)?;
        self.apply_arrow_padding(backend, Placement::Hidden, false)?;

        backend.add_subview(self.content_container, self.content)?;
        self.apply_content_insets(backend)?;

        // the arrow goes behind the content so the bubble covers its base
        backend.add_subview(self.container, self.arrow)?;
        backend.send_subview_to_back(self.container, self.arrow)?;
        backend.set_frame(self.arrow, self.state.arrow_frame)?;
        backend.set_mask(self.arrow, Some(ArrowPath::chevron()))?;
        backend.set_clip_contents(self.arrow, true)?;
        backend.set_hidden(self.arrow, true)?;

        self.set_background_color(backend, config.background)?;
        backend.set_corner_radius(self.content_container, config.corner_radius)?;
        if config.corner_radius > 0. {
            backend.set_clip_contents(self.content_container, true)?;
        }
        Ok(())
    }

    /// The callout’s own view.
    pub fn id(&self) -> ViewId {
        self.container
    }

    pub fn content_view(&self) -> ViewId {
        self.content
    }

    pub fn content_container(&self) -> ViewId {
        self.content_container
    }

    pub fn arrow_view(&self) -> ViewId {
        self.arrow
    }

    pub fn state(&self) -> &CalloutState {
        &self.state
    }

    /// The committed arrow placement.
    pub fn placement(&self) -> Placement {
        self.state.previous_placement
    }

    pub fn content_insets(&self) -> EdgeInsets {
        self.content_insets
    }

    /// Points the arrow at a new anchor, replacing the previous one.
    ///
    /// The arrow moves in the following layout passes.
    pub fn set_anchor<B: Backend>(&mut self, backend: &mut B, anchor: Anchor) -> Result<(), ViewError> {
        self.state.anchor = anchor;

        let never_shown = match anchor {
            Anchor::Offset { placement, .. } | Anchor::Ratio { placement, .. } => {
                !placement.is_visible()
            }
            Anchor::Target(target) => target.id().is_none(),
        };
        if !never_shown {
            backend.set_hidden(self.arrow, false)?;
        }

        backend.set_needs_layout(self.container)
    }

    /// Hides the arrow and gives its space back to the content.
    pub fn hide_arrow<B: Backend>(&mut self, backend: &mut B) -> Result<(), ViewError> {
        self.set_anchor(backend, Anchor::none())
    }

    /// Re-aligns the arrow in the next layout pass.
    ///
    /// Use this when the target view moved or changed size in a way the callout can’t notice,
    /// e.g. its text changed.
    pub fn notify_content_may_have_moved<B: Backend>(&self, backend: &mut B) -> Result<(), ViewError> {
        backend.set_needs_layout(self.container)
    }

    /// Sets the padding between the bubble edges and the content view.
    pub fn set_content_insets<B: Backend>(
        &mut self,
        backend: &mut B,
        insets: EdgeInsets,
    ) -> Result<(), ViewError> {
        self.content_insets = insets;
        self.apply_content_insets(backend)
    }

    fn apply_content_insets<B: Backend>(&self, backend: &mut B) -> Result<(), ViewError> {
        backend.set_layout(
            self.content_container,
            Box::new(PinLayout::new(self.content, self.content_insets)),
        )
    }

    /// Rounds the corners of the bubble, clipping the content to them.
    pub fn set_corner_radius<B: Backend>(&self, backend: &mut B, radius: f64) -> Result<(), ViewError> {
        backend.set_corner_radius(self.content_container, radius)?;
        backend.set_clip_contents(self.content_container, true)
    }

    /// Sets the fill color of the bubble and the arrow. The container itself stays transparent.
    pub fn set_background_color<B: Backend>(&self, backend: &mut B, color: Color) -> Result<(), ViewError> {
        backend.set_background(self.container, Color::CLEAR)?;
        backend.set_background(self.content_container, color)?;
        backend.set_background(self.arrow, color)
    }

    /// Moves the content container to make room for an arrow with the given placement.
    ///
    /// Changing the padding invalidates the container’s layout, so another layout pass follows.
    pub(crate) fn apply_arrow_padding<B: Backend>(
        &self,
        backend: &mut B,
        placement: Placement,
        animated: bool,
    ) -> Result<(), ViewError> {
        let container = self.container;
        let layout = Box::new(PinLayout::new(
            self.content_container,
            arrow_padding(placement),
        ));

        if animated {
            backend.animate(self.animation_duration, |backend| {
                backend.set_layout(container, layout)?;
                backend.layout_if_needed(container)
            })
        } else {
            backend.set_layout(container, layout)
        }
    }

    /// Layout hook; call whenever the container has been laid out.
    ///
    /// Defers arrow reconciliation to the next turn of the run loop, so that it sees the finished
    /// layout of every view and never runs from inside a layout pass.
    pub fn layout_subviews(&self, run_loop: &RunLoop) {
        if run_loop.defer_reconcile(self.container) {
            log::trace!("callout {}: reconciliation deferred", self.container);
        }
    }

    /// The callout size that fits content of the given size, for the committed placement.
    pub fn fitting_size(&self, content_size: Vector2<f64>) -> Vector2<f64> {
        content_size + self.content_insets.total() + arrow_padding(self.placement()).total()
    }
}
