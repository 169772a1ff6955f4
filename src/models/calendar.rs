//! Working-day calendar.
//!
//! Answers one question: is a given day a working day?
//!
//! # Day Model
//! Days are addressed by index into a [`DayWindow`], a run of consecutive
//! calendar dates starting at a fixed date. The index→date mapping is set
//! once per session and never changes. Indices past the visible window
//! still map to dates so multi-day spans can run beyond it.
//!
//! # Non-working Days
//! A day is non-working iff its date falls on the rest weekday OR is in
//! the [`HolidaySet`].

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A run of consecutive calendar days, addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Date of day index 0.
    pub start: NaiveDate,
    /// Number of visible days.
    pub len: u32,
}

impl DayWindow {
    /// Creates a window of `len` days starting at `start`.
    pub fn new(start: NaiveDate, len: u32) -> Self {
        Self { start, len }
    }

    /// A seven-day window starting at `start`.
    pub fn week(start: NaiveDate) -> Self {
        Self::new(start, 7)
    }

    /// Date for a day index. `None` only on calendar overflow.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        self.start.checked_add_days(Days::new(u64::from(day)))
    }

    /// Day index of a date, if it is on or after the window start.
    pub fn index_of(&self, date: NaiveDate) -> Option<u32> {
        let offset = (date - self.start).num_days();
        u32::try_from(offset).ok()
    }

    /// Whether the index is inside the visible window.
    #[inline]
    pub fn contains(&self, day: u32) -> bool {
        day < self.len
    }

    /// Visible day indices.
    pub fn days(&self) -> std::ops::Range<u32> {
        0..self.len
    }
}

/// Explicit non-working dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.dates.insert(date);
        self
    }

    /// Whether the date is a listed holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of listed holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no holidays are listed.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Calendar oracle: window, holidays and weekly rest day.
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use u_taskboard::models::{DayWindow, HolidaySet, WorkCalendar};
///
/// // 2024-01-06 is a Saturday.
/// let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
/// let holidays: HolidaySet = [NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()]
///     .into_iter()
///     .collect();
/// let cal = WorkCalendar::new(DayWindow::week(start), holidays, Weekday::Fri);
///
/// assert!(cal.is_working_day(0));  // Sat
/// assert!(!cal.is_working_day(2)); // Mon, holiday
/// assert!(!cal.is_working_day(6)); // Fri, rest day
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCalendar {
    window: DayWindow,
    holidays: HolidaySet,
    rest_weekday: Weekday,
}

impl WorkCalendar {
    /// Creates a calendar.
    pub fn new(window: DayWindow, holidays: HolidaySet, rest_weekday: Weekday) -> Self {
        Self {
            window,
            holidays,
            rest_weekday,
        }
    }

    /// The day window.
    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    /// The explicit holidays.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// The weekly rest day.
    pub fn rest_weekday(&self) -> Weekday {
        self.rest_weekday
    }

    /// Whether a date is a working day.
    pub fn is_working_date(&self, date: NaiveDate) -> bool {
        date.weekday() != self.rest_weekday && !self.holidays.contains(date)
    }

    /// Whether a day index is a working day.
    ///
    /// Indices that overflow the calendar are treated as non-working.
    pub fn is_working_day(&self, day: u32) -> bool {
        self.window
            .date_of(day)
            .is_some_and(|date| self.is_working_date(date))
    }

    /// Working day indices inside `[from, to]`.
    pub fn working_days_between(&self, from: u32, to: u32) -> impl Iterator<Item = u32> + '_ {
        (from..=to).filter(move |&d| self.is_working_day(d))
    }
}
