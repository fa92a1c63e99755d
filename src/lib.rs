//! pomodoro-counter - pomodoro support for TaskWarrior
//!
//! Runs work and break intervals against a TaskWarrior task and records every
//! completed interval in a local SQLite database.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod pomodoro;
pub mod storage;
pub mod tasks;

pub use cli::args::Cli;
pub use error::PomodoroError;
pub use tasks::TaskWarriorClient;
