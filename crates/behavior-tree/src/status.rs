//! Status returned by behavior nodes.

/// The completion state of a behavior node.
///
/// # Tick-based Semantics
///
/// A tree is evaluated once per tick. Work that cannot finish within a
/// single tick reports `Running`, and the node resumes from where it left
/// off on the next visit instead of restarting.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// The node has not been visited since it was created or last reset.
    #[default]
    Ready,

    /// The node is mid-evaluation and must be visited again.
    Running,

    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action finished its work.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action could not be carried out.
    Failure,

    /// The node could not be evaluated, either because one of its own
    /// invariants does not hold or because a child reported `Error`.
    Error,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` for `Success`, `Failure` and `Error`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Success | Status::Failure | Status::Error)
    }

    /// Swaps `Success` and `Failure`; every other status is returned as-is.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            other => other,
        }
    }

    /// Normalizes a proposed outcome into a status a node may report.
    ///
    /// `Success`, `Failure`, `Running` and `Error` are kept. `Ready` is not a
    /// valid outcome of a visit and becomes `Error`.
    #[inline]
    pub fn settle(self) -> Self {
        match self {
            Status::Success | Status::Failure | Status::Running | Status::Error => self,
            Status::Ready => Status::Error,
        }
    }
}
