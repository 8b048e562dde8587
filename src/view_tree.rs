use crate::animation::Animator;
use crate::arrow::ArrowPath;
use crate::backend::Backend;
use crate::color::Color;
use crate::error::ViewError;
use crate::layout::Layout;
use crate::rect::Rect;
use cgmath::{EuclideanSpace, Matrix3, Point2, SquareMatrix, Vector2, Zero};
use core::fmt;
use std::collections::HashMap;
use uuid::Uuid;

/// A unique identifier for a view.
///
/// (this is just a UUID)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u32, u16, u16, [u8; 8]);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ViewId(a, b, c, *d)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let d = &self.3;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.0, self.1, self.2, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

/// A node in the view tree.
#[derive(Debug)]
struct TreeNode {
    /// Frame in the superview’s coordinate space (model value; see `Animator` for what’s on screen).
    frame: Rect,
    hidden: bool,
    transform: Matrix3<f64>,
    background: Color,
    corner_radius: f64,
    clip_contents: bool,
    mask: Option<ArrowPath>,
    /// Layout delegate for the subviews.
    layout: Box<dyn Layout>,
    /// If true, the layout delegate will run in the next layout pass.
    needs_layout: bool,
    /// The immediate superview.
    superview: Option<ViewId>,
    /// An ordered list of all subviews; back to front.
    subviews: Vec<ViewId>,
}

impl TreeNode {
    fn new(frame: Rect) -> TreeNode {
        TreeNode {
            frame,
            hidden: false,
            transform: Matrix3::identity(),
            background: Color::CLEAR,
            corner_radius: 0.,
            clip_contents: false,
            mask: None,
            layout: Box::new(()),
            needs_layout: false,
            superview: None,
            subviews: Vec::new(),
        }
    }
}

/// An in-process view hierarchy.
///
/// This is a complete [`Backend`]: it keeps view properties, resolves layout top-down through
/// each view’s [`Layout`] delegate whenever a view was invalidated, and records animations.
/// Every view that gets laid out produces a layout event, which the owner of the tree can use to
/// notify whatever manages that view (see `Host`). Events are kept until the owner calls
/// [`ViewTree::take_layout_events`], so an owner that doesn’t use them must still drain them.
#[derive(Debug)]
pub struct ViewTree {
    nodes: HashMap<ViewId, TreeNode>,
    root: ViewId,
    animator: Animator,
    layout_events: Vec<ViewId>,
}

impl ViewTree {
    /// Creates a tree with a root view (the window content) of the given size.
    pub fn new(size: Vector2<f64>) -> ViewTree {
        let root = ViewId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root, TreeNode::new(Rect::new(Point2::origin(), size)));

        ViewTree {
            nodes,
            root,
            animator: Animator::new(),
            layout_events: Vec::new(),
        }
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    fn node(&self, id: ViewId) -> Result<&TreeNode, ViewError> {
        self.nodes.get(&id).ok_or(ViewError::NoSuchView(id))
    }

    fn node_mut(&mut self, id: ViewId) -> Result<&mut TreeNode, ViewError> {
        self.nodes.get_mut(&id).ok_or(ViewError::NoSuchView(id))
    }

    /// Creates a new view with a frame, already added to a superview.
    pub fn new_subview(&mut self, superview: ViewId, frame: Rect) -> Result<ViewId, ViewError> {
        let id = self.new_view();
        self.add_subview(superview, id)?;
        self.set_frame(id, frame)?;
        Ok(id)
    }

    pub fn subviews(&self, id: ViewId) -> Result<&[ViewId], ViewError> {
        Ok(&self.node(id)?.subviews)
    }

    pub fn background(&self, id: ViewId) -> Result<Color, ViewError> {
        Ok(self.node(id)?.background)
    }

    pub fn corner_radius(&self, id: ViewId) -> Result<f64, ViewError> {
        Ok(self.node(id)?.corner_radius)
    }

    pub fn clips_contents(&self, id: ViewId) -> Result<bool, ViewError> {
        Ok(self.node(id)?.clip_contents)
    }

    pub fn mask(&self, id: ViewId) -> Result<Option<&ArrowPath>, ViewError> {
        Ok(self.node(id)?.mask.as_ref())
    }

    /// Removes a view from its superview. The view stays alive.
    pub fn remove_from_superview(&mut self, id: ViewId) -> Result<(), ViewError> {
        let superview = self.node_mut(id)?.superview.take();
        if let Some(superview) = superview {
            if let Some(node) = self.nodes.get_mut(&superview) {
                node.subviews.retain(|s| *s != id);
                node.needs_layout = true;
            }
        }
        Ok(())
    }

    /// Destroys a view and all of its subviews.
    ///
    /// The root view can’t be removed.
    pub fn remove_view(&mut self, id: ViewId) -> Result<(), ViewError> {
        if id == self.root {
            return Err(ViewError::IsRoot(id));
        }
        self.remove_from_superview(id)?;
        self.drop_subtree(id);
        Ok(())
    }

    fn drop_subtree(&mut self, id: ViewId) {
        if let Some(node) = self.nodes.remove(&id) {
            self.animator.remove_view(id);
            for subview in node.subviews {
                self.drop_subtree(subview);
            }
        }
    }

    /// Returns true if `ancestor` is `id` or one of its superviews.
    fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|node| node.superview);
        }
        false
    }

    /// Offset of the view’s coordinate space from the root coordinate space.
    fn offset_in_root(&self, id: ViewId) -> Result<Vector2<f64>, ViewError> {
        let mut offset = Vector2::zero();
        let mut cursor = id;
        while cursor != self.root {
            let node = self.node(cursor)?;
            offset += node.frame.origin.to_vec();
            cursor = node.superview.ok_or(ViewError::Detached(id))?;
        }
        Ok(offset)
    }

    /// Returns true if any attached view is waiting for layout.
    pub fn has_pending_layout(&self) -> bool {
        self.any_needs_layout(self.root)
    }

    fn any_needs_layout(&self, id: ViewId) -> bool {
        match self.nodes.get(&id) {
            Some(node) => {
                node.needs_layout || node.subviews.iter().any(|s| self.any_needs_layout(*s))
            }
            None => false,
        }
    }

    pub fn needs_layout(&self, id: ViewId) -> Result<bool, ViewError> {
        Ok(self.node(id)?.needs_layout)
    }

    /// Lays out every attached view that needs it, top-down.
    pub fn layout_pass(&mut self) {
        self.layout_subtree(self.root);
    }

    fn layout_subtree(&mut self, id: ViewId) {
        let frames = match self.nodes.get_mut(&id) {
            Some(node) if node.needs_layout => {
                node.needs_layout = false;
                Some(node.layout.layout(node.frame.bounds(), &node.subviews))
            }
            Some(_) => None,
            None => return,
        };

        if let Some(frames) = frames {
            for (subview, frame) in frames {
                // the delegate only returns current subviews, which exist
                let _ = self.set_frame(subview, frame);
            }
            self.layout_events.push(id);
        }

        let subviews = self.nodes[&id].subviews.clone();
        for subview in subviews {
            self.layout_subtree(subview);
        }
    }

    /// Takes all views laid out since the last call, in layout order.
    ///
    /// Events queued by `layout_if_needed` between two layout passes are included, so this is
    /// never cleared implicitly.
    pub fn take_layout_events(&mut self) -> Vec<ViewId> {
        std::mem::replace(&mut self.layout_events, Vec::new())
    }

    pub fn has_layout_events(&self) -> bool {
        !self.layout_events.is_empty()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Advances running animations by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.animator.advance(dt);
    }

    /// The frame currently on screen, which lags behind the model frame while animating.
    pub fn presentation_frame(&self, id: ViewId) -> Result<Rect, ViewError> {
        let frame = self.node(id)?.frame;
        Ok(self.animator.presentation_frame(id).unwrap_or(frame))
    }
}

impl Backend for ViewTree {
    fn new_view(&mut self) -> ViewId {
        let id = ViewId::new();
        self.nodes.insert(id, TreeNode::new(Rect::zero()));
        id
    }

    fn is_alive(&self, view: ViewId) -> bool {
        self.nodes.contains_key(&view)
    }

    fn is_attached(&self, view: ViewId) -> bool {
        self.nodes.contains_key(&view) && self.is_ancestor(self.root, view)
    }

    fn add_subview(&mut self, superview: ViewId, subview: ViewId) -> Result<(), ViewError> {
        self.node(superview)?;
        self.node(subview)?;
        if self.is_ancestor(subview, superview) {
            return Err(ViewError::Cycle(subview));
        }

        self.remove_from_superview(subview)?;
        self.node_mut(subview)?.superview = Some(superview);
        let node = self.node_mut(superview)?;
        node.subviews.push(subview);
        node.needs_layout = true;
        Ok(())
    }

    fn send_subview_to_back(
        &mut self,
        superview: ViewId,
        subview: ViewId,
    ) -> Result<(), ViewError> {
        let node = self.node_mut(superview)?;
        let index = node
            .subviews
            .iter()
            .position(|s| *s == subview)
            .ok_or(ViewError::NoSuchView(subview))?;
        let subview = node.subviews.remove(index);
        node.subviews.insert(0, subview);
        Ok(())
    }

    fn frame(&self, view: ViewId) -> Result<Rect, ViewError> {
        Ok(self.node(view)?.frame)
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) -> Result<(), ViewError> {
        let node = self.node_mut(view)?;
        let previous = node.frame;
        node.frame = frame;
        if previous.size != frame.size {
            node.needs_layout = true;
        }
        self.animator.frame_changed(view, previous, frame);
        Ok(())
    }

    fn is_hidden(&self, view: ViewId) -> Result<bool, ViewError> {
        Ok(self.node(view)?.hidden)
    }

    fn set_hidden(&mut self, view: ViewId, hidden: bool) -> Result<(), ViewError> {
        self.node_mut(view)?.hidden = hidden;
        Ok(())
    }

    fn transform(&self, view: ViewId) -> Result<Matrix3<f64>, ViewError> {
        Ok(self.node(view)?.transform)
    }

    fn set_transform(&mut self, view: ViewId, transform: Matrix3<f64>) -> Result<(), ViewError> {
        let node = self.node_mut(view)?;
        let previous = node.transform;
        node.transform = transform;
        self.animator.transform_changed(view, previous, transform);
        Ok(())
    }

    fn set_background(&mut self, view: ViewId, color: Color) -> Result<(), ViewError> {
        self.node_mut(view)?.background = color;
        Ok(())
    }

    fn set_corner_radius(&mut self, view: ViewId, radius: f64) -> Result<(), ViewError> {
        self.node_mut(view)?.corner_radius = radius;
        Ok(())
    }

    fn set_clip_contents(&mut self, view: ViewId, clip: bool) -> Result<(), ViewError> {
        self.node_mut(view)?.clip_contents = clip;
        Ok(())
    }

    fn set_mask(&mut self, view: ViewId, mask: Option<ArrowPath>) -> Result<(), ViewError> {
        self.node_mut(view)?.mask = mask;
        Ok(())
    }

    fn set_layout(&mut self, view: ViewId, layout: Box<dyn Layout>) -> Result<(), ViewError> {
        let node = self.node_mut(view)?;
        node.layout = layout;
        node.needs_layout = true;
        Ok(())
    }

    fn convert_point(
        &self,
        point: Point2<f64>,
        from: ViewId,
        to: Option<ViewId>,
    ) -> Result<Point2<f64>, ViewError> {
        let in_root = point + self.offset_in_root(from)?;
        match to {
            Some(to) => Ok(in_root - self.offset_in_root(to)?),
            None => Ok(in_root),
        }
    }

    fn set_needs_layout(&mut self, view: ViewId) -> Result<(), ViewError> {
        self.node_mut(view)?.needs_layout = true;
        Ok(())
    }

    fn layout_if_needed(&mut self, view: ViewId) -> Result<(), ViewError> {
        self.node(view)?;

        // start from the outermost invalidated ancestor, since its layout may move this view
        let mut start = view;
        let mut cursor = Some(view);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            if node.needs_layout {
                start = current;
            }
            cursor = node.superview;
        }

        self.layout_subtree(start);
        Ok(())
    }

    fn begin_animation(&mut self, duration: f64) {
        self.animator.begin(duration);
    }

    fn commit_animation(&mut self) {
        self.animator.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PinLayout;
    use crate::rect::EdgeInsets;
    use pretty_assertions::assert_eq;

    fn tree() -> ViewTree {
        ViewTree::new(Vector2::new(400., 800.))
    }

    #[test]
    fn attachment_follows_hierarchy() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.new_subview(root, Rect::from_xywh(0., 0., 10., 10.)).unwrap();
        let b = tree.new_subview(a, Rect::from_xywh(0., 0., 5., 5.)).unwrap();
        let loose = tree.new_view();

        assert!(tree.is_attached(root));
        assert!(tree.is_attached(b));
        assert!(tree.is_alive(loose));
        assert!(!tree.is_attached(loose));

        tree.remove_from_superview(a).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_attached(b));

        tree.remove_view(a).unwrap();
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert_eq!(tree.frame(b), Err(ViewError::NoSuchView(b)));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut tree = tree();
        let root = tree.root();
        assert_eq!(tree.remove_view(root), Err(ViewError::IsRoot(root)));
        assert!(tree.is_alive(root));
    }

    #[test]
    fn layout_events_wait_for_owner() {
        let mut tree = tree();
        let root = tree.root();
        let view = tree.new_subview(root, Rect::from_xywh(0., 0., 10., 10.)).unwrap();
        tree.layout_pass();
        tree.take_layout_events();

        tree.set_needs_layout(view).unwrap();
        tree.layout_if_needed(view).unwrap();
        tree.layout_pass();
        assert_eq!(tree.take_layout_events(), vec![view]);
        assert!(!tree.has_layout_events());
    }

    #[test]
    fn rejects_cycles() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.new_subview(root, Rect::zero()).unwrap();
        let b = tree.new_subview(a, Rect::zero()).unwrap();
        assert_eq!(tree.add_subview(b, a), Err(ViewError::Cycle(a)));
        assert_eq!(tree.add_subview(a, a), Err(ViewError::Cycle(a)));
    }

    #[test]
    fn subview_order() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.new_subview(root, Rect::zero()).unwrap();
        let b = tree.new_subview(root, Rect::zero()).unwrap();
        tree.send_subview_to_back(root, b).unwrap();
        assert_eq!(tree.subviews(root).unwrap(), &[b, a][..]);
    }

    #[test]
    fn convert_point_between_views() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.new_subview(root, Rect::from_xywh(16., 100., 300., 60.)).unwrap();
        let b = tree.new_subview(root, Rect::from_xywh(100., 300., 40., 10.)).unwrap();
        let c = tree.new_subview(a, Rect::from_xywh(5., 5., 10., 10.)).unwrap();

        assert_eq!(
            tree.convert_point(Point2::new(20., 5.), b, Some(a)),
            Ok(Point2::new(104., 205.))
        );
        assert_eq!(
            tree.convert_point(Point2::new(0., 0.), c, None),
            Ok(Point2::new(21., 105.))
        );

        let loose = tree.new_view();
        assert_eq!(
            tree.convert_point(Point2::new(0., 0.), loose, None),
            Err(ViewError::Detached(loose))
        );
    }

    #[test]
    fn layout_pass_runs_delegates_top_down() {
        let mut tree = tree();
        let root = tree.root();
        let outer = tree.new_subview(root, Rect::from_xywh(0., 0., 200., 100.)).unwrap();
        let inner = tree.new_subview(outer, Rect::zero()).unwrap();
        let leaf = tree.new_subview(inner, Rect::zero()).unwrap();
        tree.set_layout(outer, Box::new(PinLayout::new(inner, EdgeInsets::uniform(10.))))
            .unwrap();
        tree.set_layout(inner, Box::new(PinLayout::new(leaf, EdgeInsets::uniform(5.))))
            .unwrap();
        tree.take_layout_events();

        tree.layout_pass();
        assert_eq!(tree.frame(inner), Ok(Rect::from_xywh(10., 10., 180., 80.)));
        assert_eq!(tree.frame(leaf), Ok(Rect::from_xywh(5., 5., 170., 70.)));
        assert!(!tree.has_pending_layout());

        let events = tree.take_layout_events();
        let pos = |id| events.iter().position(|e| *e == id).unwrap();
        assert!(pos(outer) < pos(inner));
        assert!(tree.take_layout_events().is_empty());
    }

    #[test]
    fn resizing_invalidates_layout() {
        let mut tree = tree();
        let root = tree.root();
        let view = tree.new_subview(root, Rect::from_xywh(0., 0., 10., 10.)).unwrap();
        tree.layout_pass();
        assert_eq!(tree.needs_layout(view), Ok(false));

        tree.set_frame(view, Rect::from_xywh(5., 5., 10., 10.)).unwrap();
        assert_eq!(tree.needs_layout(view), Ok(false));
        tree.set_frame(view, Rect::from_xywh(5., 5., 20., 10.)).unwrap();
        assert_eq!(tree.needs_layout(view), Ok(true));
    }

    #[test]
    fn layout_if_needed_starts_at_invalid_ancestor() {
        let mut tree = tree();
        let root = tree.root();
        let outer = tree.new_subview(root, Rect::from_xywh(0., 0., 100., 100.)).unwrap();
        let inner = tree.new_subview(outer, Rect::zero()).unwrap();
        tree.layout_pass();

        tree.set_layout(outer, Box::new(PinLayout::new(inner, EdgeInsets::uniform(1.))))
            .unwrap();
        tree.layout_if_needed(inner).unwrap();
        assert_eq!(tree.frame(inner), Ok(Rect::from_xywh(1., 1., 98., 98.)));
        assert!(!tree.has_pending_layout());
    }

    #[test]
    fn frame_changes_in_transaction_animate() {
        let mut tree = tree();
        let root = tree.root();
        let view = tree.new_subview(root, Rect::from_xywh(0., 0., 10., 10.)).unwrap();
        tree.animate(0.15, |tree| {
            tree.set_frame(view, Rect::from_xywh(30., 0., 10., 10.)).unwrap();
        });

        assert_eq!(tree.frame(view), Ok(Rect::from_xywh(30., 0., 10., 10.)));
        assert_eq!(tree.presentation_frame(view), Ok(Rect::from_xywh(0., 0., 10., 10.)));
        assert_eq!(tree.animator().transitions()[0].duration, 0.15);

        tree.advance(1.);
        assert_eq!(tree.presentation_frame(view), Ok(Rect::from_xywh(30., 0., 10., 10.)));
    }
}
