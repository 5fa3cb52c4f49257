//! Builder utilities for ergonomic behavior tree construction.
//!
//! [`TreeBuilder`] assembles a tree with a fluent, stack-based API: opening a
//! composite pushes a new scope, leaves and decorators attach to the
//! innermost open scope, and [`TreeBuilder::end`] closes it. The free
//! functions at the bottom reduce boilerplate when building subtrees by
//! hand: instead of writing verbose
//! `Box::new(Sequence::with_children(name, vec![...]))`, you can use
//! `sequence(name, vec![...])`.
//!
//! # Example
//!
//! ```rust
//! use behavior_tree::{Behavior, Status, TreeBuilder};
//!
//! struct Guard {
//!     alerted: bool,
//! }
//!
//! let mut tree = TreeBuilder::<Guard, i64>::new("guard")
//!     .selector("react")
//!         .action("is_alerted", |_, g: &mut Guard| {
//!             if g.alerted { Status::Success } else { Status::Failure }
//!         })
//!         .wait("idle", 3)
//!     .end()
//!     .build()
//!     .expect("valid tree");
//!
//! let mut guard = Guard { alerted: false };
//! assert_eq!(tree.visit(1, &mut guard), Status::Running);
//! ```

use rand::rngs::StdRng;

use crate::error::{BuildError, Result};
use crate::{
    Action, Behavior, BehaviorTree, Elapsed, Inverter, Parallel, Race, Random, Repeat, Selector,
    Sequence, Status, Succeed, Wait, While,
};

/// A composite still accepting children.
enum Scope<C, T: Elapsed> {
    Sequence(Sequence<C, T>),
    Selector(Selector<C, T>),
    Parallel(Parallel<C, T>),
    Race(Race<C, T>),
    Random(Random<C, T>),
}

impl<C: 'static, T: Elapsed> Scope<C, T> {
    fn name(&self) -> &str {
        match self {
            Scope::Sequence(node) => node.name(),
            Scope::Selector(node) => node.name(),
            Scope::Parallel(node) => node.name(),
            Scope::Race(node) => node.name(),
            Scope::Random(node) => node.name(),
        }
    }

    fn push(&mut self, child: Box<dyn Behavior<C, T>>) {
        match self {
            Scope::Sequence(node) => node.push(child),
            Scope::Selector(node) => node.push(child),
            Scope::Parallel(node) => node.push(child),
            Scope::Race(node) => node.push(child),
            Scope::Random(node) => node.push(child),
        }
    }

    fn into_node(self) -> Box<dyn Behavior<C, T>> {
        match self {
            Scope::Sequence(node) => Box::new(node),
            Scope::Selector(node) => Box::new(node),
            Scope::Parallel(node) => Box::new(node),
            Scope::Race(node) => Box::new(node),
            Scope::Random(node) => Box::new(node),
        }
    }
}

/// Fluent, validating tree assembler.
///
/// Errors found while chaining (such as a second node directly under the
/// root) are recorded and reported by [`TreeBuilder::build`]; the first one
/// wins.
pub struct TreeBuilder<C, T: Elapsed = i64> {
    root: BehaviorTree<C, T>,
    scopes: Vec<Scope<C, T>>,
    root_closed: bool,
    error: Option<BuildError>,
}

impl<C: 'static, T: Elapsed> TreeBuilder<C, T> {
    /// Starts a tree whose root is named `root_name`.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: BehaviorTree::new(root_name),
            scopes: Vec::new(),
            root_closed: false,
            error: None,
        }
    }

    /// Adds a leaf bound to `function`.
    pub fn action<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
    {
        self.attach(Box::new(Action::new(name, function)))
    }

    /// Adds an action whose result is inverted.
    pub fn invert<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
    {
        let name = name.into();
        let child = Box::new(Action::new(name.clone(), function));
        self.attach(Box::new(Inverter::new(name, child)))
    }

    /// Adds an action that must succeed `count` times.
    pub fn repeat<F>(self, name: impl Into<String>, function: F, count: u32) -> Self
    where
        F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
    {
        let name = name.into();
        let child = Box::new(Action::new(name.clone(), function));
        self.attach(Box::new(Repeat::new(name, child, count)))
    }

    /// Adds an action whose failure is reported as success.
    pub fn succeed<F>(self, name: impl Into<String>, function: F) -> Self
    where
        F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
    {
        let name = name.into();
        let child = Box::new(Action::new(name.clone(), function));
        self.attach(Box::new(Succeed::new(name, child)))
    }

    /// Adds a loop running `action` while `condition` succeeds.
    pub fn while_do<F, G>(self, name: impl Into<String>, condition: F, action: G) -> Self
    where
        F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
        G: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
    {
        let name = name.into();
        let condition = Box::new(Action::new(name.clone(), condition));
        let action = Box::new(Action::new(name.clone(), action));
        self.attach(Box::new(While::new(name, condition, action)))
    }

    /// Adds a node that succeeds after `duration` has elapsed.
    pub fn wait(self, name: impl Into<String>, duration: T) -> Self {
        self.attach(Box::new(Wait::new(name, duration)))
    }

    /// Opens a [`Sequence`] scope.
    pub fn sequence(self, name: impl Into<String>) -> Self {
        self.open(Scope::Sequence(Sequence::new(name)))
    }

    /// Opens a [`Selector`] scope.
    pub fn selector(self, name: impl Into<String>) -> Self {
        self.open(Scope::Selector(Selector::new(name)))
    }

    /// Opens a [`Parallel`] scope.
    pub fn parallel(self, name: impl Into<String>) -> Self {
        self.open(Scope::Parallel(Parallel::new(name)))
    }

    /// Opens a [`Race`] scope.
    pub fn race(self, name: impl Into<String>) -> Self {
        self.open(Scope::Race(Race::new(name)))
    }

    /// Opens a [`Random`] scope seeded from OS entropy.
    pub fn random(self, name: impl Into<String>) -> Self {
        self.open(Scope::Random(Random::from_entropy(name)))
    }

    /// Opens a [`Random`] scope with a deterministic seed.
    pub fn random_seeded(self, name: impl Into<String>, seed: u64) -> Self {
        self.open(Scope::Random(Random::seeded(name, seed)))
    }

    /// Opens a [`Random`] scope drawing from `rng`.
    pub fn random_with(self, name: impl Into<String>, rng: StdRng) -> Self {
        self.open(Scope::Random(Random::new(name, rng)))
    }

    /// Attaches a pre-built subtree to the innermost open scope.
    pub fn splice<B>(self, subtree: B) -> Self
    where
        B: Behavior<C, T> + 'static,
    {
        self.attach(Box::new(subtree))
    }

    /// Closes the innermost open scope, or the root once every composite is
    /// closed.
    pub fn end(mut self) -> Self {
        match self.scopes.pop() {
            Some(scope) => self.attach(scope.into_node()),
            None if !self.root_closed => {
                self.root_closed = true;
                self
            }
            None => self.fail(BuildError::UnbalancedEnd),
        }
    }

    /// Validates the tree and returns its root.
    ///
    /// # Errors
    ///
    /// - [`BuildError::UnclosedScope`] if a composite was not closed
    /// - [`BuildError::EmptyTree`] if nothing was attached to the root
    /// - Any error recorded while chaining
    pub fn build(self) -> Result<BehaviorTree<C, T>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some(innermost) = self.scopes.last() {
            return Err(BuildError::UnclosedScope {
                name: innermost.name().to_owned(),
                depth: self.scopes.len(),
            });
        }
        if !self.root.has_child() {
            return Err(BuildError::EmptyTree {
                root: self.root.name().to_owned(),
            });
        }
        Ok(self.root)
    }

    fn open(mut self, scope: Scope<C, T>) -> Self {
        if self.scopes.is_empty()
            && let Some(err) = self.root_conflict()
        {
            return self.fail(err);
        }
        self.scopes.push(scope);
        self
    }

    fn attach(mut self, node: Box<dyn Behavior<C, T>>) -> Self {
        match self.scopes.last_mut() {
            Some(scope) => scope.push(node),
            None => match self.root_conflict() {
                Some(err) => return self.fail(err),
                None => self.root.set_child(node),
            },
        }
        self
    }

    /// Error for attaching another node directly under the root, if any.
    fn root_conflict(&self) -> Option<BuildError> {
        let root = self.root.name().to_owned();
        if self.root_closed {
            Some(BuildError::RootClosed { root })
        } else if self.root.has_child() {
            Some(BuildError::RootOccupied { root })
        } else {
            None
        }
    }

    fn fail(mut self, err: BuildError) -> Self {
        if self.error.is_none() {
            tracing::debug!("tree builder error: {err}");
            self.error = Some(err);
        }
        self
    }
}

/// Creates an action node.
///
/// Shorthand for `Box::new(Action::new(name, function))`.
#[inline]
pub fn action<C: 'static, T: Elapsed, F>(
    name: impl Into<String>,
    function: F,
) -> Box<dyn Behavior<C, T>>
where
    F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
{
    Box::new(Action::new(name, function))
}

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::with_children(name, children))`.
#[inline]
pub fn sequence<C: 'static, T: Elapsed>(
    name: impl Into<String>,
    children: Vec<Box<dyn Behavior<C, T>>>,
) -> Box<dyn Behavior<C, T>> {
    Box::new(Sequence::with_children(name, children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::with_children(name, children))`.
#[inline]
pub fn selector<C: 'static, T: Elapsed>(
    name: impl Into<String>,
    children: Vec<Box<dyn Behavior<C, T>>>,
) -> Box<dyn Behavior<C, T>> {
    Box::new(Selector::with_children(name, children))
}

/// Creates a parallel node.
///
/// Shorthand for `Box::new(Parallel::with_children(name, children))`.
#[inline]
pub fn parallel<C: 'static, T: Elapsed>(
    name: impl Into<String>,
    children: Vec<Box<dyn Behavior<C, T>>>,
) -> Box<dyn Behavior<C, T>> {
    Box::new(Parallel::with_children(name, children))
}

/// Creates a race node.
///
/// Shorthand for `Box::new(Race::with_children(name, children))`.
#[inline]
pub fn race<C: 'static, T: Elapsed>(
    name: impl Into<String>,
    children: Vec<Box<dyn Behavior<C, T>>>,
) -> Box<dyn Behavior<C, T>> {
    Box::new(Race::with_children(name, children))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(name, child))`.
#[inline]
pub fn inverter<C: 'static, T: Elapsed>(
    name: impl Into<String>,
    child: Box<dyn Behavior<C, T>>,
) -> Box<dyn Behavior<C, T>> {
    Box::new(Inverter::new(name, child))
}

/// Creates a succeed node.
///
/// Shorthand for `Box::new(Succeed::new(name, child))`.
#[inline]
pub fn succeed<C: 'static, T: Elapsed>(
    name: impl Into<String>,
    child: Box<dyn Behavior<C, T>>,
) -> Box<dyn Behavior<C, T>> {
    Box::new(Succeed::new(name, child))
}
