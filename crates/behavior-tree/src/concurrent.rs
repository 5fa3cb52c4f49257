//! Composites that poll several children per tick.
//!
//! [`Parallel`] and [`Race`] keep track of every child still `Running`.
//! Nothing executes concurrently: children are visited one after another in
//! child order within a single tick. While any child is pending, only the
//! pending children are visited; the others are revisited once a new cycle
//! starts.

use std::collections::BTreeSet;

use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Children visited this tick: the pending ones, or all of them when a
/// fresh cycle starts.
fn due_children(running: &BTreeSet<usize>, len: usize) -> Vec<usize> {
    if running.is_empty() {
        (0..len).collect()
    } else {
        running.iter().copied().collect()
    }
}

/// Succeeds once every child has succeeded.
///
/// # Semantics
///
/// - Children reporting `Running` are polled again on later ticks until
///   they finish
/// - If any child reports `Failure` this tick, pending children are
///   dropped and the parallel returns `Failure`
/// - A child `Error` stops the tick, drops pending children and returns
///   `Error`
/// - Otherwise returns `Running` while children are pending, then `Success`
///
/// Children dropped from the pending set are not reset. A dropped child
/// that was itself `Running` keeps its own resumption state until the
/// enclosing root resets the tree.
pub struct Parallel<C, T: Elapsed = i64> {
    core: NodeCore,
    children: Vec<Box<dyn Behavior<C, T>>>,
    running: BTreeSet<usize>,
}

impl<C, T: Elapsed> Parallel<C, T> {
    /// Creates an empty parallel.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_children(name, Vec::new())
    }

    /// Creates a new parallel with the given child behaviors.
    pub fn with_children(name: impl Into<String>, children: Vec<Box<dyn Behavior<C, T>>>) -> Self {
        Self {
            core: NodeCore::new(name),
            children,
            running: BTreeSet::new(),
        }
    }

    /// Appends a child.
    pub fn push(&mut self, child: Box<dyn Behavior<C, T>>) {
        self.children.push(child);
    }

    /// Indices of the children still `Running`, in child order.
    pub fn running_children(&self) -> impl Iterator<Item = usize> + '_ {
        self.running.iter().copied()
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Parallel<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let mut any_failed = false;

        for index in due_children(&self.running, self.children.len()) {
            match self.children[index].visit(elapsed, ctx) {
                Status::Running => {
                    self.running.insert(index);
                }
                Status::Success => {
                    self.running.remove(&index);
                }
                Status::Failure => {
                    self.running.remove(&index);
                    any_failed = true;
                }
                _ => {
                    self.running.clear();
                    return self.core.settle(Status::Error);
                }
            }
        }

        if any_failed {
            self.running.clear();
            return self.core.settle(Status::Failure);
        }
        if !self.running.is_empty() {
            return self.core.settle(Status::Running);
        }
        self.core.settle(Status::Success)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        let children = self.children.iter().map(|child| child.state()).collect();
        self.core.snapshot(children)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.running.clear();
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Succeeds as soon as any child succeeds.
///
/// # Semantics
///
/// - Children reporting `Running` are polled again on later ticks until
///   they finish
/// - If any child reports `Success` this tick, pending children are
///   dropped and the race returns `Success`
/// - A child `Error` stops the tick, drops pending children and returns
///   `Error`
/// - Otherwise returns `Running` while children are pending, then `Failure`
///
/// As with [`Parallel`], dropped children are not reset.
pub struct Race<C, T: Elapsed = i64> {
    core: NodeCore,
    children: Vec<Box<dyn Behavior<C, T>>>,
    running: BTreeSet<usize>,
}

impl<C, T: Elapsed> Race<C, T> {
    /// Creates an empty race.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_children(name, Vec::new())
    }

    /// Creates a new race with the given child behaviors.
    pub fn with_children(name: impl Into<String>, children: Vec<Box<dyn Behavior<C, T>>>) -> Self {
        Self {
            core: NodeCore::new(name),
            children,
            running: BTreeSet::new(),
        }
    }

    /// Appends a child.
    pub fn push(&mut self, child: Box<dyn Behavior<C, T>>) {
        self.children.push(child);
    }

    /// Indices of the children still `Running`, in child order.
    pub fn running_children(&self) -> impl Iterator<Item = usize> + '_ {
        self.running.iter().copied()
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Race<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let mut any_succeeded = false;

        for index in due_children(&self.running, self.children.len()) {
            match self.children[index].visit(elapsed, ctx) {
                Status::Running => {
                    self.running.insert(index);
                }
                Status::Success => {
                    self.running.remove(&index);
                    any_succeeded = true;
                }
                Status::Failure => {
                    self.running.remove(&index);
                }
                _ => {
                    self.running.clear();
                    return self.core.settle(Status::Error);
                }
            }
        }

        if any_succeeded {
            self.running.clear();
            return self.core.settle(Status::Success);
        }
        if !self.running.is_empty() {
            return self.core.settle(Status::Running);
        }
        self.core.settle(Status::Failure)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        let children = self.children.iter().map(|child| child.state()).collect();
        self.core.snapshot(children)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.running.clear();
        for child in &mut self.children {
            child.reset();
        }
    }
}
