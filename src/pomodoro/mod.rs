//! Pomodoro intervals and the session loop.
//!
//! - Interval kinds and fixed durations
//! - Interruptible timed waits
//! - Acknowledgment prompt before each interval
//! - Interval and task assignment storage
//! - The work/break session loop

pub mod cancel;
pub mod interval;
pub mod prompt;
pub mod session;
pub mod storage;
pub mod timer;

pub use cancel::{install_interrupt_handler, CancellationToken};
pub use interval::{IntervalKind, IntervalRecord, RecordKind, Schedule, TaskAssignment};
pub use prompt::{Acknowledger, LineAcknowledger};
pub use session::{Session, SessionState};
pub use storage::IntervalStore;
pub use timer::{format_duration_mmss, run_interval, TimerOutcome};
