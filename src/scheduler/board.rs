//! Task board: placement validation and the task store.
//!
//! # Validation Order
//!
//! A proposed placement `(user, start_day, start_hour, duration, exclude)`
//! is checked in this order, stopping at the first failure:
//!
//! 1. Preconditions: duration ≥ 1, start hour inside the working day,
//!    start day inside the window, user on the roster (if one is attached).
//! 2. Start day is a working day, else [`Violation::Holiday`].
//! 3. End position via [`SpanCalculator`].
//! 4. No overlap with the user's other tasks, else [`Violation::Overlap`].
//! 5. Every working day of the span stays within the daily cap,
//!    else [`Violation::Capacity`].
//!
//! `exclude` names the task being moved or edited so it never collides
//! with its own previous placement.
//!
//! # Atomicity
//! Mutating operations validate first and touch the store only on
//! success. A rejected placement leaves the board unchanged.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::SpanCalculator;
use crate::config::BoardConfig;
use crate::error::{BoardError, Violation};
use crate::models::{
    charged_hours, DayWindow, HolidaySet, Roster, SlotPosition, SlotSpan, Task, TaskInput,
    TaskPatch, WorkCalendar,
};
use crate::validation::validate_tasks;

/// The authoritative set of placed tasks, with the rules that guard it.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use u_taskboard::BoardConfig;
/// use u_taskboard::models::{DayWindow, HolidaySet, TaskInput, WorkCalendar};
/// use u_taskboard::scheduler::TaskBoard;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(); // Saturday
/// let cal = WorkCalendar::new(DayWindow::week(start), HolidaySet::new(), Weekday::Fri);
/// let mut board = TaskBoard::new(cal, BoardConfig::default()).unwrap();
///
/// let task = board
///     .place(TaskInput::new("A", "ali").at(0, 5).with_duration(9))
///     .unwrap();
/// assert_eq!((task.end().day, task.end().hour), (1, 5));
///
/// let clash = board.place(TaskInput::new("B", "ali").at(1, 0).with_duration(2));
/// assert!(clash.unwrap_err().is_violation());
/// ```
#[derive(Debug, Clone)]
pub struct TaskBoard {
    calendar: WorkCalendar,
    config: BoardConfig,
    roster: Option<Roster>,
    tasks: BTreeMap<String, Task>,
}

impl TaskBoard {
    /// Creates an empty board.
    ///
    /// The calendar's rest weekday must match `config.rest_weekday`.
    pub fn new(calendar: WorkCalendar, config: BoardConfig) -> Result<Self, BoardError> {
        check_config(&calendar, &config)?;
        Ok(Self {
            calendar,
            config,
            roster: None,
            tasks: BTreeMap::new(),
        })
    }

    /// Creates an empty board from a window and holidays, taking the
    /// rest weekday from `config`.
    pub fn configure(
        window: DayWindow,
        holidays: HolidaySet,
        config: BoardConfig,
    ) -> Result<Self, BoardError> {
        let calendar = WorkCalendar::new(window, holidays, config.rest_weekday);
        Self::new(calendar, config)
    }

    /// Restricts assignees to `roster`.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Rebuilds a board from a task snapshot.
    ///
    /// Every task is checked against every rule; all problems are
    /// reported together in [`BoardError::Restore`]. Stored end
    /// positions are ignored and recomputed.
    pub fn restore(
        calendar: WorkCalendar,
        config: BoardConfig,
        roster: Option<Roster>,
        tasks: Vec<Task>,
    ) -> Result<Self, BoardError> {
        check_config(&calendar, &config)?;
        let inputs: Vec<TaskInput> = tasks.into_iter().map(TaskInput::from).collect();
        let placed = validate_tasks(&inputs, &calendar, &config, roster.as_ref())
            .map_err(BoardError::Restore)?;

        info!(tasks = placed.len(), "restored task board");
        Ok(Self {
            calendar,
            config,
            roster,
            tasks: placed.into_iter().map(|t| (t.id.clone(), t)).collect(),
        })
    }

    /// The calendar.
    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    /// The configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The attached roster, if any.
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// Span calculator bound to this board's calendar.
    pub fn span_calculator(&self) -> SpanCalculator<'_> {
        SpanCalculator::new(&self.calendar, &self.config)
    }

    #[inline]
    fn cap(&self) -> u32 {
        self.config.daily_capacity_hours
    }

    /// Whether a day index is a working day.
    pub fn is_working_day(&self, day: u32) -> bool {
        self.calendar.is_working_day(day)
    }

    /// Whether a date is a working day.
    pub fn is_working_date(&self, date: NaiveDate) -> bool {
        self.calendar.is_working_date(date)
    }

    /// Checks a proposed placement without changing the board.
    ///
    /// Returns the end position the task would have.
    #[doc(alias = "propose_placement")]
    pub fn validate_placement(
        &self,
        user: &str,
        start_day: u32,
        start_hour: u32,
        duration_hours: u32,
        exclude_task_id: Option<&str>,
    ) -> Result<SlotPosition, BoardError> {
        self.check_preconditions(user, start_day, start_hour, duration_hours)?;

        if !self.calendar.is_working_day(start_day) {
            return Err(Violation::Holiday { day: start_day }.into());
        }

        let end = self
            .span_calculator()
            .compute_end(start_day, start_hour, duration_hours)?;
        let start = SlotPosition::new(start_day, start_hour);

        if let Some(other) = self.find_overlap(user, SlotSpan::new(start, end), exclude_task_id) {
            return Err(Violation::Overlap {
                user: user.to_string(),
                conflicting_task: other.id.clone(),
            }
            .into());
        }

        self.check_daily_capacity(user, start, end, duration_hours, exclude_task_id)?;
        Ok(end)
    }

    fn check_preconditions(
        &self,
        user: &str,
        start_day: u32,
        start_hour: u32,
        duration_hours: u32,
    ) -> Result<(), BoardError> {
        if duration_hours == 0 {
            return Err(BoardError::InvalidDuration(duration_hours));
        }
        if start_hour >= self.cap() {
            return Err(BoardError::StartHourOutOfRange {
                hour: start_hour,
                capacity: self.cap(),
            });
        }
        if !self.calendar.window().contains(start_day) {
            return Err(BoardError::DayOutsideWindow(start_day));
        }
        if let Some(roster) = &self.roster {
            if !roster.contains(user) {
                return Err(BoardError::UnknownUser(user.to_string()));
            }
        }
        Ok(())
    }

    /// First of the user's tasks whose span intersects `span`.
    fn find_overlap<'a>(
        &'a self,
        user: &'a str,
        span: SlotSpan,
        exclude: Option<&'a str>,
    ) -> Option<&'a Task> {
        self.user_tasks(user, exclude).find(|t| t.span().overlaps(&span))
    }

    fn check_daily_capacity(
        &self,
        user: &str,
        start: SlotPosition,
        end: SlotPosition,
        duration_hours: u32,
        exclude: Option<&str>,
    ) -> Result<(), Violation> {
        let cap = self.cap();
        for day in self.calendar.working_days_between(start.day, end.day) {
            let committed: u32 = self
                .user_tasks(user, exclude)
                .map(|t| t.charged_hours(day, &self.calendar, cap))
                .sum();
            let proposed = charged_hours(start, end, duration_hours, day, &self.calendar, cap);
            let total_hours = committed + proposed;
            if total_hours > cap {
                return Err(Violation::Capacity {
                    user: user.to_string(),
                    day,
                    total_hours,
                    cap,
                });
            }
        }
        Ok(())
    }

    fn user_tasks<'a>(
        &'a self,
        user: &'a str,
        exclude: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .values()
            .filter(move |t| t.user == user && Some(t.id.as_str()) != exclude)
    }

    /// Places a task, or re-places it if the id already exists.
    ///
    /// On success the stored task carries its computed end position.
    pub fn place(&mut self, input: TaskInput) -> Result<Task, BoardError> {
        let exclude = self.tasks.contains_key(&input.id).then_some(input.id.as_str());
        let end = self
            .validate_placement(
                &input.user,
                input.start_day,
                input.start_hour,
                input.duration_hours,
                exclude,
            )
            .inspect_err(|err| {
                debug!(task = %input.id, user = %input.user, %err, "placement rejected");
            })?;

        let task = Task::placed(input, end);
        debug!(
            task = %task.id,
            user = %task.user,
            start = %task.start(),
            end = %task.end(),
            "task placed"
        );
        self.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// Places a new task. Fails if the id is already taken.
    pub fn create(&mut self, input: TaskInput) -> Result<Task, BoardError> {
        if self.tasks.contains_key(&input.id) {
            return Err(BoardError::DuplicateTask(input.id));
        }
        self.place(input)
    }

    /// Creates a task at the user's next available hour on `day`.
    ///
    /// A day with no free hour left is a [`Violation::Capacity`].
    pub fn append(
        &mut self,
        id: impl Into<String>,
        user: impl Into<String>,
        day: u32,
        duration_hours: u32,
    ) -> Result<Task, BoardError> {
        let user = user.into();
        let hour = self
            .next_available_hour(&user, day)
            .ok_or(Violation::Holiday { day })?;
        if hour >= self.cap() {
            return Err(Violation::Capacity {
                total_hours: self.daily_work_hours(&user, day) + duration_hours,
                user,
                day,
                cap: self.cap(),
            }
            .into());
        }
        self.create(
            TaskInput::new(id, user)
                .at(day, hour)
                .with_duration(duration_hours),
        )
    }

    /// Moves a task to a new assignee and start position (drag and drop).
    pub fn move_task(
        &mut self,
        task_id: &str,
        new_user: &str,
        new_day: u32,
        new_hour: u32,
    ) -> Result<Task, BoardError> {
        self.edit(
            task_id,
            TaskPatch::new().user(new_user).start(new_day, new_hour),
        )
    }

    /// Applies field changes to a task and re-places it.
    pub fn edit(&mut self, task_id: &str, patch: TaskPatch) -> Result<Task, BoardError> {
        let current = self
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| BoardError::UnknownTask(task_id.to_string()))?;
        self.place(patch.apply(current.into()))
    }

    /// Removes a task.
    pub fn remove(&mut self, task_id: &str) -> Result<Task, BoardError> {
        let task = self
            .tasks
            .remove(task_id)
            .ok_or_else(|| BoardError::UnknownTask(task_id.to_string()))?;
        info!(task = %task.id, user = %task.user, "task removed");
        Ok(task)
    }

    /// Looks up a task.
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Tasks, optionally filtered by user, ordered by start position.
    pub fn list_tasks(&self, user: Option<&str>) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| user.map_or(true, |u| t.user == u))
            .collect();
        tasks.sort_by(|a, b| (a.start(), a.id.as_str()).cmp(&(b.start(), b.id.as_str())));
        tasks
    }

    /// All tasks, cloned, for persistence.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    /// Number of tasks on the board.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Hour at which new work for `user` on `day` should start so it
    /// follows existing work. `None` if `day` is not a working day.
    ///
    /// `Some(cap)` means the day is full. A task started here that spills
    /// past the day still charges `min(duration, cap)` to this day, so it
    /// only fits if the day's existing work plus that charge stays within
    /// the cap.
    pub fn next_available_hour(&self, user: &str, day: u32) -> Option<u32> {
        if !self.calendar.is_working_day(day) {
            return None;
        }
        let cap = self.cap();
        Some(
            self.user_tasks(user, None)
                .filter_map(|t| t.occupied_until(day, cap))
                .max()
                .unwrap_or(0),
        )
    }

    /// Hours of actual work `user` has on `day`, without the start-day
    /// reservation of multi-day tasks. Zero on non-working days.
    pub fn daily_worked_hours(&self, user: &str, day: u32) -> u32 {
        let cap = self.cap();
        self.user_tasks(user, None)
            .map(|t| t.worked_hours(day, &self.calendar, cap))
            .sum()
    }

    /// Hours charged to `user` on `day`. Zero on non-working days.
    pub fn daily_work_hours(&self, user: &str, day: u32) -> u32 {
        let cap = self.cap();
        self.user_tasks(user, None)
            .map(|t| t.charged_hours(day, &self.calendar, cap))
            .sum()
    }
}

fn check_config(calendar: &WorkCalendar, config: &BoardConfig) -> Result<(), BoardError> {
    config.validate()?;
    if calendar.rest_weekday() != config.rest_weekday {
        return Err(BoardError::InvalidConfig(format!(
            "calendar rest day {} differs from configured rest day {}",
            calendar.rest_weekday(),
            config.rest_weekday
        )));
    }
    Ok(())
}
