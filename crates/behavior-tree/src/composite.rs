//! Ordered composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic) and [`Selector`] (OR logic).
//!
//! Both remember which child reported `Running` and resume from it on the
//! next tick instead of starting over at the first child.

use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right, starting at
/// the child that was `Running` on the previous tick, if any:
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - Any other status **stops the sequence immediately** and is returned
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C, T: Elapsed = i64> {
    core: NodeCore,
    children: Vec<Box<dyn Behavior<C, T>>>,
    running: Option<usize>,
}

impl<C, T: Elapsed> Sequence<C, T> {
    /// Creates an empty sequence.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_children(name, Vec::new())
    }

    /// Creates a new sequence with the given child behaviors.
    pub fn with_children(name: impl Into<String>, children: Vec<Box<dyn Behavior<C, T>>>) -> Self {
        Self {
            core: NodeCore::new(name),
            children,
            running: None,
        }
    }

    /// Appends a child; children are evaluated in insertion order.
    pub fn push(&mut self, child: Box<dyn Behavior<C, T>>) {
        self.children.push(child);
    }

    /// Index of the child left `Running` by the previous visit.
    pub fn running_child(&self) -> Option<usize> {
        self.running
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Sequence<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let start = self.running.unwrap_or(0);
        for index in start..self.children.len() {
            let status = self.children[index].visit(elapsed, ctx);
            self.running = status.is_running().then_some(index);
            if status != Status::Success {
                return self.core.settle(status); // Short-circuit
            }
        }
        // All children succeeded
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
        self.running = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right, starting at
/// the child that was `Running` on the previous tick, if any:
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - `Success`, `Running` or `Error` **stops the selector immediately** and
///   is returned
/// - If all children return `Failure`, the selector returns `Failure`
///
/// Children before a resumed `Running` child are not re-evaluated on that
/// tick, even if they failed earlier.
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C, T: Elapsed = i64> {
    core: NodeCore,
    children: Vec<Box<dyn Behavior<C, T>>>,
    running: Option<usize>,
}

impl<C, T: Elapsed> Selector<C, T> {
    /// Creates an empty selector.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_children(name, Vec::new())
    }

    /// Creates a new selector with the given child behaviors.
    pub fn with_children(name: impl Into<String>, children: Vec<Box<dyn Behavior<C, T>>>) -> Self {
        Self {
            core: NodeCore::new(name),
            children,
            running: None,
        }
    }

    /// Appends a child; children are tried in insertion order.
    pub fn push(&mut self, child: Box<dyn Behavior<C, T>>) {
        self.children.push(child);
    }

    /// Index of the child left `Running` by the previous visit.
    pub fn running_child(&self) -> Option<usize> {
        self.running
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Selector<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let start = self.running.unwrap_or(0);
        for index in start..self.children.len() {
            let status = self.children[index].visit(elapsed, ctx);
            self.running = status.is_running().then_some(index);
            if status != Status::Failure {
                return self.core.settle(status); // Short-circuit
            }
        }
        // All children failed
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
        self.running = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;
    use crate::Status::{Error, Failure, Running, Success};

    #[derive(Default)]
    struct TestContext {
        value: i32,
        log: Vec<&'static str>,
    }

    fn increment(name: &'static str) -> Box<dyn Behavior<TestContext>> {
        Box::new(Action::new(name, move |_: i64, ctx: &mut TestContext| {
            ctx.value += 1;
            ctx.log.push(name);
            Success
        }))
    }

    fn fixed(name: &'static str, status: Status) -> Box<dyn Behavior<TestContext>> {
        Box::new(Action::new(name, move |_: i64, ctx: &mut TestContext| {
            ctx.log.push(name);
            status
        }))
    }

    /// Reports the scripted statuses in order, then repeats the last one.
    fn scripted(name: &'static str, script: Vec<Status>) -> Box<dyn Behavior<TestContext>> {
        let mut step = 0;
        Box::new(Action::new(name, move |_: i64, ctx: &mut TestContext| {
            ctx.log.push(name);
            let status = script[step.min(script.len() - 1)];
            step += 1;
            status
        }))
    }

    #[test]
    fn sequence_all_success() {
        let mut seq = Sequence::with_children("seq", vec![increment("a"), increment("b")]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.visit(1, &mut ctx), Success);
        assert_eq!(ctx.value, 2);
        assert_eq!(ctx.log, ["a", "b"]);
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let children = vec![
            increment("a"),
            fixed("fail", Failure),
            increment("c"), // Should not execute
        ];
        let mut seq = Sequence::with_children("seq", children);

        let mut ctx = TestContext::default();
        assert_eq!(seq.visit(1, &mut ctx), Failure);
        assert_eq!(ctx.value, 1); // Only first increment executed
        assert_eq!(seq.running_child(), None);
    }

    #[test]
    fn sequence_error_short_circuits() {
        let children = vec![fixed("err", Error), increment("b")];
        let mut seq = Sequence::with_children("seq", children);

        let mut ctx = TestContext::default();
        assert_eq!(seq.visit(1, &mut ctx), Error);
        assert_eq!(ctx.log, ["err"]);
    }

    #[test]
    fn sequence_resumes_running_child() {
        let children = vec![
            increment("a"),
            scripted("slow", vec![Running, Success]),
            increment("c"),
        ];
        let mut seq = Sequence::with_children("seq", children);

        let mut ctx = TestContext::default();
        assert_eq!(seq.visit(1, &mut ctx), Running);
        assert_eq!(seq.running_child(), Some(1));
        assert_eq!(seq.visit(1, &mut ctx), Success);
        assert_eq!(ctx.log, ["a", "slow", "slow", "c"]);
        assert_eq!(seq.running_child(), None);
    }

    #[test]
    fn empty_sequence_succeeds() {
        let mut seq: Sequence<TestContext> = Sequence::new("empty");

        let mut ctx = TestContext::default();
        assert_eq!(seq.visit(1, &mut ctx), Success);
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let children = vec![
            fixed("fail", Failure),
            increment("inc"),
            fixed("late", Success), // Should not execute
        ];
        let mut sel = Selector::with_children("sel", children);

        let mut ctx = TestContext::default();
        assert_eq!(sel.visit(1, &mut ctx), Success);
        assert_eq!(ctx.value, 1); // Only Increment executed
        assert_eq!(ctx.log, ["fail", "inc"]);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let children = vec![fixed("a", Failure), fixed("b", Failure)];
        let mut sel = Selector::with_children("sel", children);

        let mut ctx = TestContext::default();
        assert_eq!(sel.visit(1, &mut ctx), Failure);
        assert_eq!(sel.status(), Failure);
    }

    #[test]
    fn selector_error_short_circuits() {
        let children = vec![fixed("err", Error), fixed("b", Success)];
        let mut sel = Selector::with_children("sel", children);

        let mut ctx = TestContext::default();
        assert_eq!(sel.visit(1, &mut ctx), Error);
        assert_eq!(ctx.log, ["err"]);
    }

    #[test]
    fn selector_resumes_without_revisiting_failed_children() {
        let children = vec![
            fixed("first", Failure),
            scripted("middle", vec![Running, Success]),
            fixed("last", Failure),
        ];
        let mut sel = Selector::with_children("sel", children);

        let mut ctx = TestContext::default();
        assert_eq!(sel.visit(1, &mut ctx), Running);
        assert_eq!(sel.visit(1, &mut ctx), Success);
        assert_eq!(ctx.log, ["first", "middle", "middle"]);
    }

    #[test]
    fn reset_clears_resumption_and_children() {
        let children = vec![increment("a"), fixed("slow", Running)];
        let mut seq = Sequence::with_children("seq", children);

        let mut ctx = TestContext::default();
        seq.visit(1, &mut ctx);
        assert_eq!(seq.running_child(), Some(1));

        seq.reset();
        assert_eq!(seq.running_child(), None);
        let state = seq.state();
        assert_eq!(state.status(), Status::Ready);
        assert!(state.children().iter().all(|c| c.status() == Status::Ready));
    }
}
