//! Construction and precondition errors.
//!
//! Tick outcomes are always reported through [`Status`](crate::Status).
//! These types cover the faults that are not tick results: assembling an
//! invalid tree, or visiting a root that has nothing attached.

use thiserror::Error;

/// Errors reported by [`TreeBuilder::build`](crate::TreeBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("composite '{name}' was never closed with end() ({depth} scope(s) still open)")]
    UnclosedScope { name: String, depth: usize },

    #[error("root node '{root}' has no child")]
    EmptyTree { root: String },

    #[error("root node '{root}' already has a child; wrap multiple nodes in a composite")]
    RootOccupied { root: String },

    #[error("root node '{root}' was closed before all nodes were added")]
    RootClosed { root: String },

    #[error("end() called with no open scope")]
    UnbalancedEnd,
}

/// Errors raised when visiting a [`BehaviorTree`](crate::BehaviorTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("root node '{root}' cannot be visited without a child")]
    MissingChild { root: String },
}

pub type Result<T> = std::result::Result<T, BuildError>;
