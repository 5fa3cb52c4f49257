//! Random child selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Visits one child chosen uniformly at random.
///
/// # Semantics
///
/// - With no child pending, a child is picked at random and visited
/// - If it reports `Running`, the same child is visited on later ticks
///   until it finishes; no new pick happens in between
/// - The chosen child's status is returned as-is
/// - With no children, reports `Error`
///
/// The random source is owned by the node, so a seeded generator makes
/// evaluation fully deterministic.
pub struct Random<C, T: Elapsed = i64> {
    core: NodeCore,
    children: Vec<Box<dyn Behavior<C, T>>>,
    running: Option<usize>,
    rng: StdRng,
}

impl<C, T: Elapsed> Random<C, T> {
    /// Creates an empty random node drawing from `rng`.
    pub fn new(name: impl Into<String>, rng: StdRng) -> Self {
        Self {
            core: NodeCore::new(name),
            children: Vec::new(),
            running: None,
            rng,
        }
    }

    /// Creates an empty random node with a generator seeded from `seed`.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed))
    }

    /// Creates an empty random node with a generator seeded from OS entropy.
    pub fn from_entropy(name: impl Into<String>) -> Self {
        Self::new(name, StdRng::from_entropy())
    }

    /// Replaces the children with `children`.
    pub fn with_children(mut self, children: Vec<Box<dyn Behavior<C, T>>>) -> Self {
        self.children = children;
        self.running = None;
        self
    }

    /// Appends a child.
    pub fn push(&mut self, child: Box<dyn Behavior<C, T>>) {
        self.children.push(child);
    }

    /// Index of the child left `Running` by the previous visit.
    pub fn running_child(&self) -> Option<usize> {
        self.running
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Random<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        if self.children.is_empty() {
            tracing::warn!("random '{}' has no children", self.core.name());
            return self.core.settle(Status::Error);
        }

        let index = match self.running {
            Some(index) => index,
            None => {
                let index = self.rng.gen_range(0..self.children.len());
                tracing::debug!(
                    "random '{}' picked child {} of {}",
                    self.core.name(),
                    index,
                    self.children.len()
                );
                index
            }
        };

        let status = self.children[index].visit(elapsed, ctx);
        self.running = status.is_running().then_some(index);
        self.core.settle(status)
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
