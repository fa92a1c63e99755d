//! Timed waits for intervals.

use std::time::Duration;

use chrono::Utc;
use colored::Colorize;
use tracing::debug;

use super::cancel::CancellationToken;
use super::interval::{IntervalKind, IntervalRecord};

/// Result of running one interval.
#[derive(Debug, Clone)]
pub struct TimerOutcome {
    pub record: IntervalRecord,
    /// The wait was cut short by an interrupt.
    pub interrupted: bool,
}

/// Block for `duration` (or until `token` is cancelled) and produce the
/// unsaved record of the interval.
pub fn run_interval(
    kind: IntervalKind,
    duration: Duration,
    token: &CancellationToken,
) -> TimerOutcome {
    println!("{}", banner(kind, duration).bold());

    let started_at = Utc::now();
    let interrupted = token.wait_timeout(duration);
    let ended_at = Utc::now();

    println!("-----");
    debug!(%kind, interrupted, "interval wait finished");

    TimerOutcome {
        record: IntervalRecord::new(started_at, ended_at, kind.record_kind()),
        interrupted,
    }
}

/// Heading printed when an interval starts.
#[must_use]
pub fn banner(kind: IntervalKind, duration: Duration) -> String {
    let label = if kind.is_break() { "Take break" } else { "Do work" };
    format!("{label} ({})", format_duration_mmss(duration))
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::interval::RecordKind;

    #[test]
    fn test_format_duration_mmss() {
        assert_eq!(format_duration_mmss(Duration::from_secs(1500)), "25:00");
        assert_eq!(format_duration_mmss(Duration::from_secs(90)), "01:30");
        assert_eq!(format_duration_mmss(Duration::from_secs(0)), "00:00");
    }

    #[test]
    fn test_banner() {
        assert_eq!(
            banner(IntervalKind::Work, Duration::from_secs(1500)),
            "Do work (25:00)"
        );
        assert_eq!(
            banner(IntervalKind::ShortBreak, Duration::from_secs(300)),
            "Take break (05:00)"
        );
    }

    #[test]
    fn test_run_interval_waits_full_duration() {
        let token = CancellationToken::new();
        let outcome = run_interval(IntervalKind::Work, Duration::from_millis(50), &token);

        assert!(!outcome.interrupted);
        assert_eq!(outcome.record.kind, RecordKind::Work);
        assert!(outcome.record.id.is_none());
        assert!(outcome.record.ended_at >= outcome.record.started_at);
        assert!(outcome.record.elapsed() >= chrono::Duration::milliseconds(50));
        assert!(outcome.record.elapsed() < chrono::Duration::milliseconds(50 + 500));
    }

    #[test]
    fn test_run_interval_interrupted() {
        let token = CancellationToken::new();
        token.cancel();

        let outcome = run_interval(IntervalKind::LongBreak, Duration::from_secs(60), &token);

        assert!(outcome.interrupted);
        assert_eq!(outcome.record.kind, RecordKind::Break);
        assert!(outcome.record.elapsed() < chrono::Duration::seconds(5));
    }
}
