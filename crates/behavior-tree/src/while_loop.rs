//! Condition-guarded loop.

use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Which child of a [`While`] was left `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhileBranch {
    Condition,
    Action,
}

/// Runs its action for as long as its condition succeeds.
///
/// # Semantics
///
/// Within a single tick the node loops:
/// 1. A `Running` action is resumed directly, without checking the condition
/// 2. Otherwise the condition is visited: `Success` moves on to the action in
///    the same tick, `Running` ends the tick, `Failure` or `Error` ends the loop
/// 3. The action is visited: `Running` ends the tick, `Success` records that
///    the action succeeded and goes back to step 2, anything else clears
///    that record and ends the loop
///
/// The node reports `Running` while either child is pending, otherwise
/// `Success` if the last action run succeeded, otherwise `Failure`.
///
/// A condition and action that both always succeed never leave the loop;
/// one of them must eventually report `Running`, `Failure` or `Error`.
pub struct While<C, T: Elapsed = i64> {
    core: NodeCore,
    condition: Box<dyn Behavior<C, T>>,
    action: Box<dyn Behavior<C, T>>,
    running: Option<WhileBranch>,
    action_succeeded: bool,
}

impl<C, T: Elapsed> While<C, T> {
    pub fn new(
        name: impl Into<String>,
        condition: Box<dyn Behavior<C, T>>,
        action: Box<dyn Behavior<C, T>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name),
            condition,
            action,
            running: None,
            action_succeeded: false,
        }
    }

    /// Child left `Running` by the previous visit.
    pub fn running_branch(&self) -> Option<WhileBranch> {
        self.running
    }
}

impl<C, T: Elapsed> Behavior<C, T> for While<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        // The outcome record survives only while a child is pending.
        if self.running.is_none() {
            self.action_succeeded = false;
        }

        loop {
            if self.running != Some(WhileBranch::Action) {
                match self.condition.visit(elapsed, ctx) {
                    Status::Success => {}
                    Status::Running => {
                        self.running = Some(WhileBranch::Condition);
                        break;
                    }
                    _ => {
                        self.running = None;
                        break;
                    }
                }
            }

            match self.action.visit(elapsed, ctx) {
                Status::Running => {
                    self.running = Some(WhileBranch::Action);
                    break;
                }
                Status::Success => {
                    self.action_succeeded = true;
                    self.running = None;
                }
                _ => {
                    self.action_succeeded = false;
                    self.running = None;
                    break;
                }
            }
        }

        let status = if self.running.is_some() {
            Status::Running
        } else if self.action_succeeded {
            Status::Success
        } else {
            Status::Failure
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
        let children = vec![self.condition.state(), self.action.state()];
        self.core.snapshot(children)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.running = None;
        self.action_succeeded = false;
        self.condition.reset();
        self.action.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;
    use crate::Status::{Error, Failure, Running, Success};

    #[derive(Default)]
    struct Counters {
        condition: u32,
        action: u32,
    }

    fn condition<F>(decide: F) -> Box<dyn Behavior<Counters>>
    where
        F: Fn(u32) -> Status + Send + Sync + 'static,
    {
        Box::new(Action::new("condition", move |_: i64, ctx: &mut Counters| {
            ctx.condition += 1;
            decide(ctx.condition)
        }))
    }

    fn action<F>(decide: F) -> Box<dyn Behavior<Counters>>
    where
        F: Fn(u32) -> Status + Send + Sync + 'static,
    {
        Box::new(Action::new("action", move |_: i64, ctx: &mut Counters| {
            ctx.action += 1;
            decide(ctx.action)
        }))
    }

    fn visit_n(node: &mut While<Counters>, ctx: &mut Counters, times: usize) -> Status {
        let mut status = Status::Ready;
        for _ in 0..times {
            status = node.visit(1, ctx);
        }
        status
    }

    #[test]
    fn loops_within_one_tick_until_condition_fails() {
        let mut node = While::new(
            "while",
            condition(|n| if n > 3 { Failure } else { Success }),
            action(|_| Success),
        );

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Success);
        assert_eq!(node.status(), Success);
        assert_eq!(ctx.action, 3);
        assert_eq!(ctx.condition, 4);
    }

    #[test]
    fn failed_condition_skips_action() {
        let mut node = While::new("while", condition(|_| Failure), action(|_| Success));

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Failure);
        assert_eq!(ctx.action, 0);
        assert_eq!(ctx.condition, 1);
    }

    #[test]
    fn action_failure_on_first_try_fails() {
        let mut node = While::new("while", condition(|_| Success), action(|_| Failure));

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Failure);
        assert_eq!((ctx.condition, ctx.action), (1, 1));
    }

    #[test]
    fn action_failure_after_success_fails() {
        let mut node = While::new(
            "while",
            condition(|_| Success),
            action(|n| if n > 1 { Failure } else { Success }),
        );

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Failure);
        assert_eq!((ctx.condition, ctx.action), (2, 2));
    }

    #[test]
    fn running_condition_is_rechecked_on_later_ticks() {
        let mut node = While::new(
            "while",
            condition(|n| match n {
                3 | 7 => Success,
                n if n > 7 => Failure,
                _ => Running,
            }),
            action(|_| Success),
        );

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Running);
        assert_eq!(node.running_branch(), Some(WhileBranch::Condition));

        assert_eq!(visit_n(&mut node, &mut ctx, 5), Success);
        assert_eq!(ctx.action, 2);
        assert_eq!(ctx.condition, 8);
    }

    #[test]
    fn running_action_resumes_without_condition() {
        let mut node = While::new(
            "while",
            condition(|n| match n {
                3 => Success,
                n if n > 3 => Failure,
                _ => Running,
            }),
            action(|n| if n == 3 { Success } else { Running }),
        );

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Running);
        assert_eq!(visit_n(&mut node, &mut ctx, 3), Running);
        assert_eq!(node.running_branch(), Some(WhileBranch::Action));

        assert_eq!(node.visit(1, &mut ctx), Success);
        assert_eq!(ctx.action, 3);
        assert_eq!(ctx.condition, 4);
    }

    #[test]
    fn running_action_that_fails_reports_failure() {
        let mut node = While::new(
            "while",
            condition(|n| match n {
                3 | 7 => Success,
                n if n > 7 => Failure,
                _ => Running,
            }),
            action(|n| if n == 3 { Failure } else { Running }),
        );

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Running);
        assert_eq!(visit_n(&mut node, &mut ctx, 4), Failure);
        assert_eq!(ctx.action, 3);
        assert_eq!(ctx.condition, 3);
    }

    #[test]
    fn condition_error_ends_loop_with_recorded_outcome() {
        let mut node = While::new(
            "while",
            condition(|n| if n > 1 { Error } else { Success }),
            action(|_| Success),
        );

        let mut ctx = Counters::default();
        assert_eq!(node.visit(1, &mut ctx), Success);
        assert_eq!((ctx.condition, ctx.action), (2, 1));
    }

    #[test]
    fn snapshot_lists_condition_then_action() {
        let mut node = While::new("while", condition(|_| Failure), action(|_| Success));

        let mut ctx = Counters::default();
        node.visit(1, &mut ctx);
        let state = node.state();
        assert_eq!(state.children()[0].name(), "condition");
        assert_eq!(state.children()[0].status(), Failure);
        assert_eq!(state.children()[1].name(), "action");
        assert_eq!(state.children()[1].status(), Status::Ready);

        node.reset();
        assert_eq!(node.state().status(), Status::Ready);
        assert_eq!(node.state().children()[0].status(), Status::Ready);
        assert_eq!(node.running_branch(), None);
    }
}
