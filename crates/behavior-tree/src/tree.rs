//! Tree root, the per-tick entry point.

use crate::error::TreeError;
use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Root of a behavior tree.
///
/// The root owns exactly one child and forwards its status. Whenever the
/// previous run is not mid-flight (the root's own status is not `Running`),
/// the whole subtree is reset before the child is visited, so every run
/// starts from a clean slate.
pub struct BehaviorTree<C, T: Elapsed = i64> {
    core: NodeCore,
    child: Option<Box<dyn Behavior<C, T>>>,
}

impl<C, T: Elapsed> BehaviorTree<C, T> {
    /// Creates a root with no child. It must be given one before it is
    /// visited.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: NodeCore::new(name),
            child: None,
        }
    }

    /// Creates a root that owns `child`.
    pub fn with_child(name: impl Into<String>, child: Box<dyn Behavior<C, T>>) -> Self {
        Self {
            core: NodeCore::new(name),
            child: Some(child),
        }
    }

    /// Attaches `child`, replacing any previous one.
    pub fn set_child(&mut self, child: Box<dyn Behavior<C, T>>) {
        self.child = Some(child);
    }

    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }

    /// Visits the tree for one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingChild`] if no child is attached. Nothing
    /// is visited in that case.
    pub fn try_visit(&mut self, elapsed: T, ctx: &mut C) -> Result<Status, TreeError> {
        let Some(child) = self.child.as_mut() else {
            return Err(TreeError::MissingChild {
                root: self.core.name().to_owned(),
            });
        };

        if self.core.status() != Status::Running {
            tracing::debug!("resetting tree '{}' for a fresh run", self.core.name());
            self.core.reset();
            child.reset();
        }

        let status = child.visit(elapsed, ctx);
        Ok(self.core.settle(status))
    }
}

impl<C, T: Elapsed> Behavior<C, T> for BehaviorTree<C, T> {
    /// # Panics
    ///
    /// Panics if no child is attached. Use [`BehaviorTree::try_visit`] to
    /// handle that case as an error instead.
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        match self.try_visit(elapsed, ctx) {
            Ok(status) => status,
            Err(err) => panic!("{err}"),
        }
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        let children = self.child.iter().map(|child| child.state()).collect();
        self.core.snapshot(children)
    }

    fn reset(&mut self) {
        self.core.reset();
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Sequence, Wait};

    #[derive(Default)]
    struct TestContext {
        visits: u32,
    }

    fn counting(status: Status) -> Box<dyn Behavior<TestContext>> {
        Box::new(Action::new("count", move |_: i64, ctx: &mut TestContext| {
            ctx.visits += 1;
            status
        }))
    }

    #[test]
    fn forwards_child_status() {
        let mut tree = BehaviorTree::with_child("tree", counting(Status::Failure));

        let mut ctx = TestContext::default();
        assert_eq!(tree.visit(1, &mut ctx), Status::Failure);
        assert_eq!(tree.status(), Status::Failure);
        assert_eq!(ctx.visits, 1);
    }

    #[test]
    fn missing_child_is_an_error() {
        let mut tree: BehaviorTree<TestContext> = BehaviorTree::new("tree");

        let mut ctx = TestContext::default();
        let expected = TreeError::MissingChild { root: "tree".into() };
        assert_eq!(tree.try_visit(1, &mut ctx), Err(expected));
    }

    #[test]
    #[should_panic(expected = "cannot be visited without a child")]
    fn visiting_missing_child_panics() {
        let mut tree: BehaviorTree<TestContext> = BehaviorTree::new("tree");

        let mut ctx = TestContext::default();
        tree.visit(1, &mut ctx);
    }

    #[test]
    fn finished_run_is_reset_before_next_visit() {
        // A wait left half-way through is restarted once the run completes.
        let mut seq = Sequence::new("seq");
        seq.push(counting(Status::Success));
        seq.push(Box::new(Wait::new("wait", 2_i64)));
        let mut tree = BehaviorTree::with_child("tree", Box::new(seq));

        let mut ctx = TestContext::default();
        assert_eq!(tree.visit(1, &mut ctx), Status::Running);
        assert_eq!(tree.visit(1, &mut ctx), Status::Success);
        assert_eq!(ctx.visits, 1); // Resumed at the wait

        assert_eq!(tree.visit(1, &mut ctx), Status::Running);
        assert_eq!(ctx.visits, 2); // Fresh run starts at the first child
    }

    #[test]
    fn running_tree_is_not_reset() {
        let mut tree = BehaviorTree::with_child("tree", Box::new(Wait::new("wait", 3_i64)));

        let mut ctx = TestContext::default();
        assert_eq!(tree.visit(1, &mut ctx), Status::Running);
        assert_eq!(tree.visit(1, &mut ctx), Status::Running);
        assert_eq!(tree.visit(1, &mut ctx), Status::Success);
    }

    #[test]
    fn state_includes_child() {
        let mut tree = BehaviorTree::with_child("tree", counting(Status::Success));

        let mut ctx = TestContext::default();
        tree.visit(1, &mut ctx);
        let state = tree.state();
        assert_eq!(state.name(), "tree");
        assert_eq!(state.children()[0].status(), Status::Success);

        tree.reset();
        let leaf = NodeState::new("count", Status::Ready);
        let expected = NodeState::with_children("tree", Status::Ready, vec![leaf]);
        assert_eq!(tree.state(), expected);
    }
}
