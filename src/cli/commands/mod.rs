//! Command implementations for pomodoro-counter.

mod workon;

pub use workon::workon;
