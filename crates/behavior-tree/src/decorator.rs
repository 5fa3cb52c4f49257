//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`Succeed`] (failure
//! suppression) and [`Repeat`] (run the child N times).

use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` and `Error` pass through unchanged
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C, T: Elapsed = i64> {
    core: NodeCore,
    child: Box<dyn Behavior<C, T>>,
}

impl<C, T: Elapsed> Inverter<C, T> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(name: impl Into<String>, child: Box<dyn Behavior<C, T>>) -> Self {
        Self {
            core: NodeCore::new(name),
            child,
        }
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Inverter<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let status = self.child.visit(elapsed, ctx).invert();
        self.core.settle(status)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        self.core.snapshot(vec![self.child.state()])
    }

    fn reset(&mut self) {
        self.core.reset();
        self.child.reset();
    }
}

/// Turns a child's `Failure` into `Success`.
///
/// # Semantics
///
/// - If the child returns `Failure`, **returns `Success`**
/// - `Success`, `Running` and `Error` pass through unchanged
///
/// This is useful for optional behaviors that shouldn't cause a sequence
/// to fail.
pub struct Succeed<C, T: Elapsed = i64> {
    core: NodeCore,
    child: Box<dyn Behavior<C, T>>,
}

impl<C, T: Elapsed> Succeed<C, T> {
    /// Creates a new succeed wrapper around the given child behavior.
    pub fn new(name: impl Into<String>, child: Box<dyn Behavior<C, T>>) -> Self {
        Self {
            core: NodeCore::new(name),
            child,
        }
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Succeed<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let status = match self.child.visit(elapsed, ctx) {
            Status::Failure => Status::Success,
            other => other,
        };
        self.core.settle(status)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        self.core.snapshot(vec![self.child.state()])
    }

    fn reset(&mut self) {
        self.core.reset();
        self.child.reset();
    }
}

/// Requires its child to succeed a fixed number of times.
///
/// # Semantics
///
/// The child is visited once per tick:
/// - Each child `Success` counts down; the repeat reports `Running` until
///   the count reaches zero, then reports `Success` and starts over
/// - A child `Failure` or `Error` restarts the count and is reported as-is
/// - A child `Running` is reported as `Running` without counting
/// - A repeat constructed with a count of zero reports `Error` and never
///   visits its child
pub struct Repeat<C, T: Elapsed = i64> {
    core: NodeCore,
    child: Box<dyn Behavior<C, T>>,
    count: u32,
    remaining: u32,
}

impl<C, T: Elapsed> Repeat<C, T> {
    /// Creates a repeat that succeeds after `count` child successes.
    pub fn new(name: impl Into<String>, child: Box<dyn Behavior<C, T>>, count: u32) -> Self {
        Self {
            core: NodeCore::new(name),
            child,
            count,
            remaining: count,
        }
    }

    /// Child successes still needed before this node succeeds.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Repeat<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        if self.remaining == 0 {
            tracing::warn!("repeat '{}' has a count of zero", self.core.name());
            return self.core.settle(Status::Error);
        }

        let status = match self.child.visit(elapsed, ctx) {
            Status::Success => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.remaining = self.count;
                    Status::Success
                } else {
                    Status::Running
                }
            }
            Status::Running => Status::Running,
            other => {
                self.remaining = self.count;
                other
            }
        };
        self.core.settle(status)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        self.core.snapshot(vec![self.child.state()])
    }

    fn reset(&mut self) {
        self.core.reset();
        self.remaining = self.count;
        self.child.reset();
    }
}
