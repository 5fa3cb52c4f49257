//! Tick-driven behavior tree engine with resumable nodes.
//!
//! This library composes small decision and action units into a tree and
//! evaluates it once per tick against an elapsed-time value and a
//! caller-owned context. Work that spans several ticks reports
//! [`Status::Running`], and every composite remembers where it stopped so the
//! next tick continues from there instead of restarting.
//!
//! - **Synchronous**: each visit runs to completion; nothing blocks or spawns
//! - **Deterministic**: children are polled in insertion order, and random
//!   choices draw from an injected, seedable generator
//! - **Inspectable**: [`NodeState`] snapshots mirror the live tree for
//!   logging and assertions
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Ready, Running, Success, Failure or Error
//! - Leaf nodes: [`Action`], [`Wait`]
//! - Decorator nodes: [`Inverter`], [`Succeed`], [`Repeat`]
//! - Composite nodes: [`Sequence`], [`Selector`], [`Parallel`], [`Race`],
//!   [`Random`], [`While`]
//! - [`BehaviorTree`]: Root and per-tick entry point
//! - [`TreeBuilder`]: Fluent, validating construction

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod concurrent;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod random;
pub mod state;
pub mod status;
pub mod tree;
pub mod while_loop;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Elapsed, NodeCore};
pub use builder::TreeBuilder;
pub use composite::{Selector, Sequence};
pub use concurrent::{Parallel, Race};
pub use decorator::{Inverter, Repeat, Succeed};
pub use error::{BuildError, TreeError};
pub use leaf::{Action, ActionFn, Wait};
pub use random::Random;
pub use state::NodeState;
pub use status::Status;
pub use tree::BehaviorTree;
pub use while_loop::{While, WhileBranch};
