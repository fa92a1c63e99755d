//! Storage layer.
//!
//! `SQLite` persistence for completed intervals and their task assignments.

mod database;
pub mod schema;

pub use database::Database;
