//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes, and [`NodeCore`], the name and
//! status bookkeeping every node carries. The trait is generic over a
//! context type `C` and an elapsed-time type `T`.

use std::ops::Sub;

use crate::{NodeState, Status};

/// Elapsed time supplied with every tick.
///
/// The unit is up to the caller (frames, milliseconds, a
/// [`Duration`](std::time::Duration)) but must be consistent across a tree,
/// because [`Wait`](crate::Wait) nodes count it down verbatim. A negative
/// value counts as no time passing.
pub trait Elapsed: Copy + PartialOrd + Sub<Output = Self> + Send + Sync + 'static {}

impl<T: Copy + PartialOrd + Sub<Output = T> + Send + Sync + 'static> Elapsed for T {}

/// A behavior tree node that can be visited once per tick.
pub trait Behavior<C, T: Elapsed = i64>: Send + Sync {
    /// Evaluate this node for one tick.
    ///
    /// # Arguments
    ///
    /// * `elapsed` - Time since the previous tick, in the caller's unit.
    /// * `ctx` - Mutable reference to the caller-owned context. The engine
    ///   never inspects it; it is handed to every visited leaf.
    ///
    /// # Returns
    ///
    /// `Running` if the node needs further ticks, otherwise a terminal
    /// status. The same value is stored as the node's current status.
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status;

    /// Display name of the node.
    fn name(&self) -> &str;

    /// Status reported by the most recent visit, or `Ready`.
    fn status(&self) -> Status;

    /// Recursive snapshot of this node and its children.
    fn state(&self) -> NodeState;

    /// Return this node and all descendants to `Ready`, dropping any
    /// resumption state and restoring counters.
    fn reset(&mut self);
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C, T>>` to also implement `Behavior<C, T>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C, T: Elapsed> Behavior<C, T> for Box<dyn Behavior<C, T>> {
    #[inline]
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        (**self).visit(elapsed, ctx)
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn status(&self) -> Status {
        (**self).status()
    }

    #[inline]
    fn state(&self) -> NodeState {
        (**self).state()
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Name and current status shared by every node kind.
///
/// All outcomes go through [`NodeCore::settle`], so every node stores and
/// reports statuses under the same rules.
#[derive(Debug, Clone)]
pub struct NodeCore {
    name: String,
    status: Status,
}

impl NodeCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Ready,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Records `proposed` as the current status and returns it.
    ///
    /// `Ready` is not a valid visit outcome and is stored as `Error`.
    pub fn settle(&mut self, proposed: Status) -> Status {
        let status = proposed.settle();
        if proposed == Status::Ready {
            tracing::warn!("node '{}' reported ready from a visit", self.name);
        }
        tracing::trace!(node = %self.name, %status, "visited");
        self.status = status;
        status
    }

    /// Puts the status back to `Ready`.
    #[inline]
    pub fn reset(&mut self) {
        self.status = Status::Ready;
    }

    /// Snapshot of this node with the given child snapshots.
    pub fn snapshot(&self, children: Vec<NodeState>) -> NodeState {
        NodeState::with_children(self.name.clone(), self.status, children)
    }
}
