//! Task model.
//!
//! A task is a block of work assigned to one mechanic: a start position,
//! a duration in working hours, and a derived end position.
//!
//! # End Position
//! `end` is stored only for multi-day tasks. `None` means the task ends on
//! its start day at `start_hour + duration_hours`; it never means "unknown".
//! The board recomputes it on every placement.
//!
//! # Charged Hours
//! The hours a task counts against a day's cap:
//!
//! | Day | Charged |
//! |-----|---------|
//! | only day of a single-day task | `duration_hours` |
//! | start day of a multi-day task | `min(duration_hours, cap)` |
//! | working day inside the span | `cap` |
//! | end day of a multi-day task | `end.hour` |
//! | non-working day | 0 |

use serde::{Deserialize, Serialize};

use super::{SlotPosition, SlotSpan, WorkCalendar};

/// A placed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Assigned mechanic.
    pub user: String,
    /// Free-text label.
    pub title: String,
    /// Start day index.
    pub start_day: u32,
    /// Start hour offset within the working day.
    pub start_hour: u32,
    /// Requested working hours (≥ 1).
    pub duration_hours: u32,
    /// End position for multi-day tasks; `None` for single-day tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<SlotPosition>,
}

/// A contiguous piece of a task on one working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSegment {
    /// Day index.
    pub day: u32,
    /// First occupied hour (inclusive).
    pub from_hour: u32,
    /// End hour (exclusive).
    pub to_hour: u32,
}

impl TaskSegment {
    /// Hours in this segment.
    #[inline]
    pub fn hours(&self) -> u32 {
        self.to_hour - self.from_hour
    }
}

impl Task {
    /// Builds a placed task from an input and its computed end.
    pub(crate) fn placed(input: TaskInput, end: SlotPosition) -> Self {
        let end = (end.day != input.start_day).then_some(end);
        Self {
            id: input.id,
            user: input.user,
            title: input.title,
            start_day: input.start_day,
            start_hour: input.start_hour,
            duration_hours: input.duration_hours,
            end,
        }
    }

    /// Start position.
    #[inline]
    pub fn start(&self) -> SlotPosition {
        SlotPosition::new(self.start_day, self.start_hour)
    }

    /// End position (exclusive). Single-day tasks end on their start day.
    pub fn end(&self) -> SlotPosition {
        self.end.unwrap_or(SlotPosition::new(
            self.start_day,
            self.start_hour + self.duration_hours,
        ))
    }

    /// Occupied span `[start, end)`.
    pub fn span(&self) -> SlotSpan {
        SlotSpan::new(self.start(), self.end())
    }

    /// Whether the task runs past its start day.
    pub fn is_multi_day(&self) -> bool {
        self.end().day > self.start_day
    }

    /// Hours this task counts against `day`'s cap.
    pub fn charged_hours(&self, day: u32, calendar: &WorkCalendar, cap: u32) -> u32 {
        charged_hours(self.start(), self.end(), self.duration_hours, day, calendar, cap)
    }

    /// Hours of actual work this task puts on `day` (its positional
    /// segment). Summed over all days this equals `duration_hours`.
    pub fn worked_hours(&self, day: u32, calendar: &WorkCalendar, cap: u32) -> u32 {
        let end = self.end();
        if day < self.start_day || day > end.day || !calendar.is_working_day(day) {
            return 0;
        }
        let from = if day == self.start_day { self.start_hour } else { 0 };
        let to = if day == end.day { end.hour } else { cap };
        to - from
    }

    /// Hour until which this task keeps the user busy on `day`, if it
    /// touches that day.
    pub fn occupied_until(&self, day: u32, cap: u32) -> Option<u32> {
        let end = self.end();
        if !self.span().touches_day(day) {
            return None;
        }
        if day == end.day {
            Some(end.hour)
        } else {
            Some(cap)
        }
    }

    /// Positional pieces of the task on each working day it occupies.
    pub fn segments(&self, calendar: &WorkCalendar, cap: u32) -> Vec<TaskSegment> {
        let end = self.end();
        if end.day == self.start_day {
            return vec![TaskSegment {
                day: self.start_day,
                from_hour: self.start_hour,
                to_hour: end.hour,
            }];
        }

        let mut segments = vec![TaskSegment {
            day: self.start_day,
            from_hour: self.start_hour,
            to_hour: cap,
        }];
        for day in calendar.working_days_between(self.start_day + 1, end.day) {
            let to_hour = if day == end.day { end.hour } else { cap };
            segments.push(TaskSegment {
                day,
                from_hour: 0,
                to_hour,
            });
        }
        segments
    }
}

/// Charged hours for a span on one day. Shared by placed tasks and
/// proposals that have no `Task` yet.
pub(crate) fn charged_hours(
    start: SlotPosition,
    end: SlotPosition,
    duration_hours: u32,
    day: u32,
    calendar: &WorkCalendar,
    cap: u32,
) -> u32 {
    if day < start.day || day > end.day || !calendar.is_working_day(day) {
        return 0;
    }
    if start.day == end.day {
        duration_hours
    } else if day == start.day {
        duration_hours.min(cap)
    } else if day == end.day {
        end.hour
    } else {
        cap
    }
}

/// A placement request: a task before its end position is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Unique task identifier.
    pub id: String,
    /// Assigned mechanic.
    pub user: String,
    /// Free-text label.
    #[serde(default)]
    pub title: String,
    /// Start day index.
    pub start_day: u32,
    /// Start hour offset.
    pub start_hour: u32,
    /// Requested working hours.
    pub duration_hours: u32,
}

impl TaskInput {
    /// Creates a one-hour request at day 0, hour 0.
    pub fn new(id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            title: String::new(),
            start_day: 0,
            start_hour: 0,
            duration_hours: 1,
        }
    }

    /// Sets the start position.
    pub fn at(mut self, day: u32, hour: u32) -> Self {
        self.start_day = day;
        self.start_hour = hour;
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, hours: u32) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl From<Task> for TaskInput {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user: task.user,
            title: task.title,
            start_day: task.start_day,
            start_hour: task.start_hour,
            duration_hours: task.duration_hours,
        }
    }
}

/// Field changes for an existing task. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    /// New assignee.
    pub user: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New start day.
    pub start_day: Option<u32>,
    /// New start hour.
    pub start_hour: Option<u32>,
    /// New duration.
    pub duration_hours: Option<u32>,
}

impl TaskPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassigns the task.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Renames the task.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Moves the start position.
    pub fn start(mut self, day: u32, hour: u32) -> Self {
        self.start_day = Some(day);
        self.start_hour = Some(hour);
        self
    }

    /// Changes the duration.
    pub fn duration(mut self, hours: u32) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    /// Applies the patch to an input.
    pub fn apply(self, mut input: TaskInput) -> TaskInput {
        if let Some(user) = self.user {
            input.user = user;
        }
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(day) = self.start_day {
            input.start_day = day;
        }
        if let Some(hour) = self.start_hour {
            input.start_hour = hour;
        }
        if let Some(hours) = self.duration_hours {
            input.duration_hours = hours;
        }
        input
    }
}
