//! Bulk integrity checks for task snapshots.
//!
//! Used when rebuilding a board from persisted tasks. Unlike a single
//! placement, which stops at the first problem, this reports every
//! problem in the snapshot at once. Detects:
//! - Duplicate task IDs
//! - Out-of-range durations, start hours and start days
//! - Assignees missing from the roster
//! - Starts on non-working days
//! - Overlapping tasks of the same user
//! - Days over the daily cap
//!
//! # Algorithm
//! Tasks are replayed in the given order onto an empty board. A task that
//! fails is reported and left out, so later tasks are checked against the
//! accepted ones only. For a snapshot that is valid as a whole, order does
//! not matter: every prefix of a valid set is itself valid.

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::error::{BoardError, Violation};
use crate::models::{Roster, Task, TaskInput, WorkCalendar};
use crate::scheduler::TaskBoard;

/// Validation result: the accepted tasks with recomputed end positions.
pub type ValidationResult = Result<Vec<Task>, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending task, if the problem is tied to one.
    pub task_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Duration is zero.
    InvalidDuration,
    /// Start hour or start day outside the board.
    OutOfRange,
    /// Assignee is not on the roster.
    UnknownUser,
    /// Task starts on a non-working day.
    HolidayStart,
    /// Task overlaps another task of the same user.
    Overlap,
    /// Task pushes a day over the cap.
    CapacityExceeded,
    /// No working day within the look-ahead bound.
    UnresolvableSpan,
    /// Board configuration is unusable.
    InvalidConfig,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, task_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            task_id: task_id.map(str::to_string),
            message: message.into(),
        }
    }

    fn from_board_error(task_id: &str, err: &BoardError) -> Self {
        let kind = match err {
            BoardError::Violation(Violation::Holiday { .. }) => ValidationErrorKind::HolidayStart,
            BoardError::Violation(Violation::Overlap { .. }) => ValidationErrorKind::Overlap,
            BoardError::Violation(Violation::Capacity { .. }) => {
                ValidationErrorKind::CapacityExceeded
            }
            BoardError::Violation(Violation::UnresolvableSpan { .. }) => {
                ValidationErrorKind::UnresolvableSpan
            }
            BoardError::DuplicateTask(_) => ValidationErrorKind::DuplicateId,
            BoardError::InvalidDuration(_) => ValidationErrorKind::InvalidDuration,
            BoardError::StartHourOutOfRange { .. } | BoardError::DayOutsideWindow(_) => {
                ValidationErrorKind::OutOfRange
            }
            BoardError::UnknownUser(_) => ValidationErrorKind::UnknownUser,
            BoardError::UnknownTask(_) | BoardError::InvalidConfig(_) | BoardError::Restore(_) => {
                ValidationErrorKind::InvalidConfig
            }
        };
        Self::new(kind, Some(task_id), format!("Task '{task_id}': {err}"))
    }
}

/// Validates a task snapshot against a calendar and configuration.
///
/// # Returns
/// `Ok(tasks)` with end positions recomputed if all checks pass,
/// `Err(errors)` with every detected issue otherwise.
pub fn validate_tasks(
    tasks: &[TaskInput],
    calendar: &WorkCalendar,
    config: &BoardConfig,
    roster: Option<&Roster>,
) -> ValidationResult {
    let mut board = TaskBoard::new(calendar.clone(), config.clone()).map_err(|e| {
        vec![ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            None,
            e.to_string(),
        )]
    })?;
    if let Some(roster) = roster {
        board = board.with_roster(roster.clone());
    }

    let mut errors = Vec::new();
    let mut accepted = Vec::with_capacity(tasks.len());
    for input in tasks {
        match board.create(input.clone()) {
            Ok(task) => accepted.push(task),
            Err(err) => errors.push(ValidationError::from_board_error(&input.id, &err)),
        }
    }

    if errors.is_empty() {
        Ok(accepted)
    } else {
        Err(errors)
    }
}
