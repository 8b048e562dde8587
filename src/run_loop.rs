//! Work deferred to the next turn of the run loop.

use crate::view_tree::ViewId;
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashSet;

/// A queue of callouts waiting to reconcile their arrow.
///
/// Each callout has a single slot: deferring again while a run is already pending does nothing,
/// and the pending run uses whatever state the callout has once it actually runs.
///
/// Safe to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct RunLoop {
    sender: Sender<ViewId>,
    receiver: Receiver<ViewId>,
    pending: Mutex<HashSet<ViewId>>,
}

impl Default for RunLoop {
    fn default() -> Self {
        RunLoop::new()
    }
}

impl RunLoop {
    pub fn new() -> RunLoop {
        let (sender, receiver) = channel::unbounded();
        RunLoop {
            sender,
            receiver,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Defers a reconciliation of the callout with the given container id.
    ///
    /// Returns false if one was already pending.
    pub fn defer_reconcile(&self, callout: ViewId) -> bool {
        let mut pending = self.pending.lock();
        if !pending.insert(callout) {
            return false;
        }
        // the receiver lives as long as self, so this can’t fail
        let _ = self.sender.send(callout);
        true
    }

    pub fn is_pending(&self, callout: ViewId) -> bool {
        self.pending.lock().contains(&callout)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.lock().is_empty()
    }

    /// Takes everything deferred so far, in order, and frees the slots.
    ///
    /// Anything deferred while the returned batch is being processed ends up in the next batch.
    pub fn take_batch(&self) -> Vec<ViewId> {
        let batch: Vec<_> = self.receiver.try_iter().collect();
        let mut pending = self.pending.lock();
        for callout in &batch {
            pending.remove(callout);
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deferring_twice_collapses() {
        let run_loop = RunLoop::new();
        let a = ViewId::new();
        let b = ViewId::new();
        assert!(run_loop.defer_reconcile(a));
        assert!(run_loop.defer_reconcile(b));
        assert!(!run_loop.defer_reconcile(a));
        assert!(run_loop.is_pending(a));

        assert_eq!(run_loop.take_batch(), vec![a, b]);
        assert!(!run_loop.has_pending());
        assert!(run_loop.take_batch().is_empty());
    }

    #[test]
    fn slot_frees_after_batch() {
        let run_loop = RunLoop::new();
        let a = ViewId::new();
        run_loop.defer_reconcile(a);
        run_loop.take_batch();
        assert!(run_loop.defer_reconcile(a));
        assert_eq!(run_loop.take_batch(), vec![a]);
    }
}
