use crate::backend::Backend;
use crate::callout::CalloutView;
use crate::config::CalloutConfig;
use crate::error::ViewError;
use crate::rect::Rect;
use crate::reconcile::ReconcileOutcome;
use crate::run_loop::RunLoop;
use crate::view_tree::{ViewId, ViewTree};
use cgmath::Vector2;
use log::{trace, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Default cap for [`Host::run_until_idle`].
pub const MAX_TURNS: usize = 64;

/// Connects callouts to a view tree and drives them.
///
/// Each call to [`Host::turn`] is one turn of the run loop:
///
/// 1. all invalidated layout is performed,
/// 2. every callout whose container was laid out (in this layout pass or since the last turn)
///    defers a reconciliation,
/// 3. the reconciliations deferred before this point run.
///
/// Anything those reconciliations invalidate is handled in a later turn.
pub struct Host {
    pub tree: ViewTree,
    callouts: HashMap<ViewId, CalloutView>,
    run_loop: Arc<RunLoop>,
}

impl Host {
    /// Creates a new Host with a root view of the given size.
    pub fn new(size: Vector2<f64>) -> Host {
        Host {
            tree: ViewTree::new(size),
            callouts: HashMap::new(),
            run_loop: Arc::new(RunLoop::new()),
        }
    }

    /// Builds a callout around `content` and adds it to `superview` with the given frame.
    ///
    /// Returns the callout’s id.
    pub fn add_callout(
        &mut self,
        superview: ViewId,
        frame: Rect,
        content: ViewId,
        config: CalloutConfig,
    ) -> Result<ViewId, ViewError> {
        let callout = CalloutView::new(&mut self.tree, content, config)?;
        let id = callout.id();
        self.tree.add_subview(superview, id)?;
        self.tree.set_frame(id, frame)?;
        self.callouts.insert(id, callout);
        Ok(id)
    }

    /// Stops driving a callout and destroys its views.
    pub fn remove_callout(&mut self, id: ViewId) -> Option<CalloutView> {
        let callout = self.callouts.remove(&id)?;
        // may already be gone with an ancestor
        let _ = self.tree.remove_view(id);
        Some(callout)
    }

    pub fn callout(&self, id: ViewId) -> Option<&CalloutView> {
        self.callouts.get(&id)
    }

    /// Runs `f` with a callout and the tree it lives in.
    ///
    /// This is how callout operations are called, e.g.
    /// `host.with_callout(id, |callout, tree| callout.hide_arrow(tree))`.
    pub fn with_callout<F, T>(&mut self, id: ViewId, f: F) -> Option<T>
    where
        F: FnOnce(&mut CalloutView, &mut ViewTree) -> T,
    {
        let callout = self.callouts.get_mut(&id)?;
        Some(f(callout, &mut self.tree))
    }

    /// A handle to the run loop, e.g. to defer reconciliation from elsewhere.
    pub fn run_loop(&self) -> Arc<RunLoop> {
        Arc::clone(&self.run_loop)
    }

    /// Runs one turn. Returns the outcome of every reconciliation that ran.
    pub fn turn(&mut self) -> Vec<(ViewId, ReconcileOutcome)> {
        self.tree.layout_pass();

        for id in self.tree.take_layout_events() {
            if let Some(callout) = self.callouts.get(&id) {
                callout.layout_subviews(&self.run_loop);
            }
        }

        let mut outcomes = Vec::new();
        for id in self.run_loop.take_batch() {
            let callout = match self.callouts.get_mut(&id) {
                Some(callout) => callout,
                None => continue,
            };

            match callout.reconcile(&mut self.tree) {
                Ok(outcome) => {
                    trace!("callout {}: {:?}", id, outcome);
                    outcomes.push((id, outcome));
                }
                Err(err) => warn!("callout {}: reconciliation failed: {}", id, err),
            }
        }
        outcomes
    }

    /// Returns true if no layout or reconciliation is outstanding.
    pub fn is_idle(&self) -> bool {
        !self.tree.has_pending_layout()
            && !self.tree.has_layout_events()
            && !self.run_loop.has_pending()
    }

    /// Runs turns until idle, but at most `max_turns`. Returns the number of turns run.
    ///
    /// Hitting the cap means something keeps invalidating layout every turn.
    pub fn run_until_idle(&mut self, max_turns: usize) -> usize {
        let mut turns = 0;
        while !self.is_idle() {
            if turns == max_turns {
                warn!("host still busy after {} turns; layout may be looping", turns);
                break;
            }
            self.turn();
            turns += 1;
        }
        turns
    }

    /// Advances animations by `dt` seconds and runs one turn.
    pub fn frame(&mut self, dt: f64) -> Vec<(ViewId, ReconcileOutcome)> {
        self.tree.advance(dt);
        self.turn()
    }
}
