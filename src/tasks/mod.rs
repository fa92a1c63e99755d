//! TaskWarrior integration.
//!
//! The task tracker is reached through the `task` command line tool.

pub mod client;
pub mod types;

pub use client::{parse_export, TaskTracker, TaskWarriorClient};
pub use types::{Status, Task};

#[cfg(test)]
pub use client::MockTaskTracker;
