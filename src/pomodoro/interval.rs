//! Interval kinds, durations, and the records they produce.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Work pomodoros before every long break.
pub const POMODOROS_PER_LONG_BREAK: u64 = 4;

/// Kind of interval the runner executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl IntervalKind {
    /// Kind stored in the database.
    #[must_use]
    pub const fn record_kind(&self) -> RecordKind {
        match self {
            Self::Work => RecordKind::Work,
            Self::ShortBreak | Self::LongBreak => RecordKind::Break,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break type.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Break to take after a work interval, given the pomodoro counter
    /// *after* that work interval was counted.
    #[must_use]
    pub const fn break_after(counter: u64) -> Self {
        if counter % POMODOROS_PER_LONG_BREAK == 0 {
            Self::LongBreak
        } else {
            Self::ShortBreak
        }
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Kind of a persisted interval record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Work,
    Break,
}

impl RecordKind {
    /// Convert enum → DB string
    #[must_use]
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// Convert DB string → enum
    #[must_use]
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(Self::Work),
            "break" => Some(Self::Break),
            _ => None,
        }
    }
}

/// Interval durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
}

impl Schedule {
    #[must_use]
    pub const fn new(work: Duration, short_break: Duration, long_break: Duration) -> Self {
        Self {
            work,
            short_break,
            long_break,
        }
    }

    /// Duration of the given interval kind.
    #[must_use]
    pub const fn duration(&self, kind: IntervalKind) -> Duration {
        match kind {
            IntervalKind::Work => self.work,
            IntervalKind::ShortBreak => self.short_break,
            IntervalKind::LongBreak => self.long_break,
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(1500),
            Duration::from_secs(300),
            Duration::from_secs(1500),
        )
    }
}

/// A completed work or break period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub kind: RecordKind,
}

impl IntervalRecord {
    /// Create an unsaved record. `ended_at` never precedes `started_at`.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>, kind: RecordKind) -> Self {
        Self {
            id: None,
            started_at,
            ended_at: ended_at.max(started_at),
            kind,
        }
    }

    /// Wall time covered by the interval.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.ended_at.signed_duration_since(self.started_at)
    }
}

/// Link between an interval record and an external task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    pub id: i64,
    pub interval_id: i64,
    pub task_uuid: String,
}
