//! Error types.
//!
//! Two layers:
//! - [`Violation`]: a proposed placement breaks a business rule (holiday
//!   start, overlap, daily cap, unresolvable span). Expected, non-fatal,
//!   reported back to the caller.
//! - [`BoardError`]: everything a board operation can return. Wraps
//!   `Violation` and adds precondition failures (bad duration, unknown
//!   task id, ...) which indicate a caller bug rather than a rejected
//!   placement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// A business-rule rejection of a proposed placement.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    /// The start day is not a working day.
    #[error("day {day} is not a working day")]
    Holiday {
        /// Rejected start day index.
        day: u32,
    },
    /// The proposed interval intersects another task of the same user.
    #[error("overlaps task '{conflicting_task}' of user '{user}'")]
    Overlap {
        /// User whose schedule conflicts.
        user: String,
        /// The task already occupying the interval.
        conflicting_task: String,
    },
    /// Some working day would exceed the daily cap.
    #[error("user '{user}' would have {total_hours}h on day {day} (cap {cap}h)")]
    Capacity {
        /// User whose day overflows.
        user: String,
        /// First overflowing day index.
        day: u32,
        /// Hours that day would carry.
        total_hours: u32,
        /// Configured daily cap.
        cap: u32,
    },
    /// No working day found within the look-ahead bound.
    #[error("no working day within {look_ahead_days} days after day {after_day}")]
    UnresolvableSpan {
        /// Last day examined before giving up.
        after_day: u32,
        /// Configured look-ahead bound.
        look_ahead_days: u32,
    },
}

/// Errors returned by [`TaskBoard`](crate::scheduler::TaskBoard) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    /// A business-rule rejection.
    #[error(transparent)]
    Violation(#[from] Violation),
    /// Duration must be at least one hour.
    #[error("duration must be at least 1 hour, got {0}")]
    InvalidDuration(u32),
    /// Start hour falls outside the working day.
    #[error("start hour {hour} outside working day of {capacity}h")]
    StartHourOutOfRange {
        /// Requested start hour.
        hour: u32,
        /// Hours per working day.
        capacity: u32,
    },
    /// Start day is not part of the board's day window.
    #[error("day {0} is outside the board window")]
    DayOutsideWindow(u32),
    /// No task with this id.
    #[error("unknown task '{0}'")]
    UnknownTask(String),
    /// A task with this id already exists.
    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),
    /// User is not on the attached roster.
    #[error("user '{0}' is not on the roster")]
    UnknownUser(String),
    /// Board configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A snapshot failed integrity checks.
    #[error("snapshot rejected with {} problem(s)", .0.len())]
    Restore(Vec<ValidationError>),
}

impl BoardError {
    /// The business-rule violation, if this error is one.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Violation(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is a business-rule rejection (as opposed to a
    /// precondition failure).
    pub fn is_violation(&self) -> bool {
        self.violation().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let v = Violation::Holiday { day: 3 };
        assert_eq!(v.to_string(), "day 3 is not a working day");

        let v = Violation::Capacity {
            user: "X".into(),
            day: 0,
            total_hours: 10,
            cap: 9,
        };
        assert_eq!(v.to_string(), "user 'X' would have 10h on day 0 (cap 9h)");
    }

    #[test]
    fn test_board_error_classification() {
        let err: BoardError = Violation::Holiday { day: 1 }.into();
        assert!(err.is_violation());
        assert_eq!(err.violation(), Some(&Violation::Holiday { day: 1 }));
        assert_eq!(err.to_string(), "day 1 is not a working day");

        let err = BoardError::InvalidDuration(0);
        assert!(!err.is_violation());
        assert!(err.violation().is_none());
    }

    #[test]
    fn test_violation_serde() {
        let v = Violation::Overlap {
            user: "X".into(),
            conflicting_task: "A".into(),
        };
        let json = serde_json::to_string(&v).unwrap();
        let back: Violation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
