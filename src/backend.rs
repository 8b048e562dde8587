//! Traits for backends.

use crate::arrow::ArrowPath;
use crate::color::Color;
use crate::error::ViewError;
use crate::layout::Layout;
use crate::rect::Rect;
use crate::view_tree::ViewId;
use cgmath::{Matrix3, Point2};

/// A host UI framework, as seen by the views built on top of it.
///
/// All methods must be called from the thread that owns the backend. Views are referred to by
/// [`ViewId`]s, which never keep a view alive: every operation on a view that has been removed
/// returns [`ViewError::NoSuchView`].
pub trait Backend {
    /// Creates a new view that is not part of any hierarchy yet.
    fn new_view(&mut self) -> ViewId;

    /// Returns true if the view exists.
    fn is_alive(&self, view: ViewId) -> bool;

    /// Returns true if the view is in the hierarchy under the root view.
    fn is_attached(&self, view: ViewId) -> bool;

    /// Appends a subview, removing it from its previous superview first.
    fn add_subview(&mut self, superview: ViewId, subview: ViewId) -> Result<(), ViewError>;

    /// Moves a subview to the back of its superview’s paint order.
    fn send_subview_to_back(&mut self, superview: ViewId, subview: ViewId)
        -> Result<(), ViewError>;

    /// The view’s frame in its superview’s coordinate space.
    fn frame(&self, view: ViewId) -> Result<Rect, ViewError>;

    /// Sets the view’s frame. Animated if inside an animation transaction.
    fn set_frame(&mut self, view: ViewId, frame: Rect) -> Result<(), ViewError>;

    /// The view’s bounds in its own coordinate space.
    fn bounds(&self, view: ViewId) -> Result<Rect, ViewError> {
        self.frame(view).map(|frame| frame.bounds())
    }

    fn is_hidden(&self, view: ViewId) -> Result<bool, ViewError>;

    /// Shows or hides the view. Never animated.
    fn set_hidden(&mut self, view: ViewId, hidden: bool) -> Result<(), ViewError>;

    fn transform(&self, view: ViewId) -> Result<Matrix3<f64>, ViewError>;

    /// Sets the view’s 2D affine transform. Animated if inside an animation transaction.
    fn set_transform(&mut self, view: ViewId, transform: Matrix3<f64>) -> Result<(), ViewError>;

    fn set_background(&mut self, view: ViewId, color: Color) -> Result<(), ViewError>;

    fn set_corner_radius(&mut self, view: ViewId, radius: f64) -> Result<(), ViewError>;

    fn set_clip_contents(&mut self, view: ViewId, clip: bool) -> Result<(), ViewError>;

    /// Sets a shape that masks the view’s contents.
    fn set_mask(&mut self, view: ViewId, mask: Option<ArrowPath>) -> Result<(), ViewError>;

    /// Replaces the view’s layout delegate, which invalidates its layout.
    fn set_layout(&mut self, view: ViewId, layout: Box<dyn Layout>) -> Result<(), ViewError>;

    /// Converts a point from one view’s coordinate space to another’s.
    ///
    /// `to: None` is the root (window) coordinate space. Both views must be attached.
    fn convert_point(
        &self,
        point: Point2<f64>,
        from: ViewId,
        to: Option<ViewId>,
    ) -> Result<Point2<f64>, ViewError>;

    /// Requests a layout pass for the view in a future frame.
    fn set_needs_layout(&mut self, view: ViewId) -> Result<(), ViewError>;

    /// Synchronously performs any pending layout affecting the view.
    fn layout_if_needed(&mut self, view: ViewId) -> Result<(), ViewError>;

    /// Opens an animation transaction.
    fn begin_animation(&mut self, duration: f64);

    /// Closes the innermost animation transaction.
    fn commit_animation(&mut self);

    /// Runs `changes` inside an animation transaction.
    fn animate<F, T>(&mut self, duration: f64, changes: F) -> T
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> T,
    {
        self.begin_animation(duration);
        let result = changes(self);
        self.commit_animation();
        result
    }
}
