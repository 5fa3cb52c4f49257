//! Leaf behavior nodes.
//!
//! Leaves have no children. [`Action`] forwards to a caller-supplied
//! function; [`Wait`] counts elapsed time down and succeeds when it runs out.

use crate::{Behavior, Elapsed, NodeCore, NodeState, Status};

/// Caller-supplied decision or work function.
///
/// Receives the elapsed time of the tick and the context, and returns the
/// outcome of the work. `Ready` is not a valid outcome and is recorded as
/// `Error`.
pub type ActionFn<C, T> = Box<dyn FnMut(T, &mut C) -> Status + Send + Sync>;

/// Runs a bound function each time it is visited.
///
/// # Semantics
///
/// - The function's result becomes the node's status
/// - An action with no bound function reports `Error`
pub struct Action<C, T: Elapsed = i64> {
    core: NodeCore,
    function: Option<ActionFn<C, T>>,
}

impl<C, T: Elapsed> Action<C, T> {
    /// Creates an action bound to `function`.
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: FnMut(T, &mut C) -> Status + Send + Sync + 'static,
    {
        Self {
            core: NodeCore::new(name),
            function: Some(Box::new(function)),
        }
    }

    /// Creates an action with no function. Visiting it reports `Error`.
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            core: NodeCore::new(name),
            function: None,
        }
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Action<C, T> {
    fn visit(&mut self, elapsed: T, ctx: &mut C) -> Status {
        let outcome = match self.function.as_mut() {
            Some(function) => function(elapsed, ctx),
            None => {
                tracing::warn!("action '{}' has no bound function", self.core.name());
                Status::Error
            }
        };
        self.core.settle(outcome)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        self.core.snapshot(Vec::new())
    }

    fn reset(&mut self) {
        self.core.reset();
    }
}

/// Reports `Running` until a fixed amount of elapsed time has accumulated.
///
/// # Semantics
///
/// - Every visit subtracts the tick's elapsed time from the remaining time;
///   a negative elapsed time counts as none
/// - While time remains, reports `Running`
/// - Once the remaining time is used up, reports `Success` and restarts the
///   countdown, so the node can be reused without an explicit reset
pub struct Wait<T: Elapsed = i64> {
    core: NodeCore,
    duration: T,
    remaining: T,
}

impl<T: Elapsed> Wait<T> {
    /// Creates a wait node that succeeds after `duration` has elapsed.
    pub fn new(name: impl Into<String>, duration: T) -> Self {
        Self {
            core: NodeCore::new(name),
            duration,
            remaining: duration,
        }
    }

    /// Time left before the next `Success`.
    pub fn remaining(&self) -> T {
        self.remaining
    }
}

impl<C, T: Elapsed> Behavior<C, T> for Wait<T> {
    fn visit(&mut self, elapsed: T, _ctx: &mut C) -> Status {
        // Time never runs backwards: a negative tick counts as no time.
        let no_time = elapsed - elapsed;
        let elapsed = if elapsed < no_time { no_time } else { elapsed };

        if elapsed >= self.remaining {
            self.remaining = self.duration;
            return self.core.settle(Status::Success);
        }
        self.remaining = self.remaining - elapsed;
        self.core.settle(Status::Running)
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn status(&self) -> Status {
        self.core.status()
    }

    fn state(&self) -> NodeState {
        self.core.snapshot(Vec::new())
    }

    fn reset(&mut self) {
        self.core.reset();
        self.remaining = self.duration;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    struct TestContext {
        calls: u32,
    }

    fn tick<T: Elapsed>(wait: &mut Wait<T>, elapsed: T) -> Status {
        Behavior::<(), T>::visit(wait, elapsed, &mut ())
    }

    #[test]
    fn action_forwards_function_result() {
        let mut action = Action::new("count", |_: i64, ctx: &mut TestContext| {
            ctx.calls += 1;
            Status::Running
        });

        let mut ctx = TestContext { calls: 0 };
        assert_eq!(action.visit(1, &mut ctx), Status::Running);
        assert_eq!(action.status(), Status::Running);
        assert_eq!(ctx.calls, 1);
    }

    #[test]
    fn action_receives_elapsed_time() {
        let mut action = Action::new("elapsed", |dt: i64, _ctx: &mut TestContext| {
            if dt == 42 {
                Status::Success
            } else {
                Status::Failure
            }
        });

        let mut ctx = TestContext { calls: 0 };
        assert_eq!(action.visit(42, &mut ctx), Status::Success);
        assert_eq!(action.visit(7, &mut ctx), Status::Failure);
    }

    #[test]
    fn unbound_action_reports_error() {
        let mut action: Action<TestContext> = Action::unbound("nothing");

        let mut ctx = TestContext { calls: 0 };
        assert_eq!(action.visit(1, &mut ctx), Status::Error);
        assert_eq!(action.status(), Status::Error);
    }

    #[test]
    fn action_returning_ready_is_an_error() {
        let mut action = Action::new("confused", |_: i64, _ctx: &mut TestContext| Status::Ready);

        let mut ctx = TestContext { calls: 0 };
        assert_eq!(action.visit(1, &mut ctx), Status::Error);
    }

    #[test]
    fn action_reset_returns_to_ready() {
        let mut action = Action::new("ok", |_: i64, _ctx: &mut TestContext| Status::Success);

        let mut ctx = TestContext { calls: 0 };
        action.visit(1, &mut ctx);
        action.reset();
        assert_eq!(action.status(), Status::Ready);
        assert!(action.state().children().is_empty());
    }

    #[test]
    fn wait_runs_until_duration_reached() {
        let mut wait = Wait::new("wait", 10_i64);

        assert_eq!(tick(&mut wait, 4), Status::Running);
        assert_eq!(tick(&mut wait, 4), Status::Running);
        assert_eq!(wait.remaining(), 2);
        assert_eq!(tick(&mut wait, 4), Status::Success);
    }

    #[test]
    fn wait_restarts_after_success() {
        let mut wait = Wait::new("wait", 2_i64);

        assert_eq!(tick(&mut wait, 1), Status::Running);
        assert_eq!(tick(&mut wait, 1), Status::Success);
        assert_eq!(wait.remaining(), 2);
        assert_eq!(tick(&mut wait, 1), Status::Running);
    }

    #[test]
    fn wait_reset_restores_countdown() {
        let mut wait = Wait::new("wait", 5_i64);

        tick(&mut wait, 3);
        Behavior::<(), i64>::reset(&mut wait);
        assert_eq!(wait.remaining(), 5);
        assert_eq!(Behavior::<(), i64>::status(&wait), Status::Ready);
    }

    #[test]
    fn wait_treats_negative_elapsed_as_no_time() {
        let mut wait = Wait::new("wait", 5_i64);

        assert_eq!(tick(&mut wait, i64::MIN), Status::Running);
        assert_eq!(wait.remaining(), 5);
        assert_eq!(tick(&mut wait, -3), Status::Running);
        assert_eq!(tick(&mut wait, 5), Status::Success);
    }

    #[test]
    fn wait_counts_down_durations() {
        let mut wait = Wait::new("cooldown", Duration::from_millis(50));

        let step = Duration::from_millis(20);
        assert_eq!(tick(&mut wait, step), Status::Running);
        assert_eq!(tick(&mut wait, step), Status::Running);
        assert_eq!(wait.remaining(), Duration::from_millis(10));
        assert_eq!(tick(&mut wait, step), Status::Success);
    }
}
