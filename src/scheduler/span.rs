//! Span calculator.
//!
//! Turns `(start_day, start_hour, duration)` into an end position,
//! spilling work over following working days and skipping non-working
//! days entirely.
//!
//! # Algorithm
//!
//! 1. The start day contributes `cap - start_hour` hours.
//! 2. Each following working day contributes `cap` hours; non-working
//!    days contribute nothing and are never an end position.
//! 3. The task ends on the day that absorbs its last hour, at the hour
//!    offset where that happens. Running out exactly at a day boundary
//!    ends at `(day, cap)`, never at `(next_day, 0)`.
//!
//! # Termination
//! A run of more than `max_look_ahead_days` consecutive non-working days
//! fails with [`Violation::UnresolvableSpan`].
//!
//! # Complexity
//! O(d) where d = number of calendar days spanned.

use tracing::warn;

use crate::config::BoardConfig;
use crate::error::Violation;
use crate::models::{SlotPosition, WorkCalendar};

/// Computes task end positions against a calendar.
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use u_taskboard::BoardConfig;
/// use u_taskboard::models::{DayWindow, HolidaySet, SlotPosition, WorkCalendar};
/// use u_taskboard::scheduler::SpanCalculator;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(); // Saturday
/// let cal = WorkCalendar::new(DayWindow::week(start), HolidaySet::new(), Weekday::Fri);
/// let config = BoardConfig::default();
/// let span = SpanCalculator::new(&cal, &config);
///
/// assert_eq!(span.compute_end(0, 5, 9).unwrap(), SlotPosition::new(1, 5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpanCalculator<'a> {
    calendar: &'a WorkCalendar,
    cap: u32,
    max_look_ahead_days: u32,
}

impl<'a> SpanCalculator<'a> {
    /// Creates a calculator over `calendar`.
    pub fn new(calendar: &'a WorkCalendar, config: &BoardConfig) -> Self {
        Self {
            calendar,
            cap: config.daily_capacity_hours,
            max_look_ahead_days: config.max_look_ahead_days,
        }
    }

    /// End position (exclusive) of a task.
    ///
    /// Expects `duration_hours >= 1` and `start_hour < cap`; the board
    /// checks both before calling.
    pub fn compute_end(
        &self,
        start_day: u32,
        start_hour: u32,
        duration_hours: u32,
    ) -> Result<SlotPosition, Violation> {
        let consumed = duration_hours.min(self.cap.saturating_sub(start_hour));
        let mut remaining = duration_hours - consumed;
        if remaining == 0 {
            return Ok(SlotPosition::new(start_day, start_hour + consumed));
        }

        let mut day = start_day;
        loop {
            day = self.next_working_day(day)?;
            if remaining <= self.cap {
                return Ok(SlotPosition::new(day, remaining));
            }
            remaining -= self.cap;
        }
    }

    /// First working day strictly after `day`.
    fn next_working_day(&self, day: u32) -> Result<u32, Violation> {
        let unresolvable = || {
            warn!(
                after_day = day,
                look_ahead_days = self.max_look_ahead_days,
                "no working day within look-ahead"
            );
            Violation::UnresolvableSpan {
                after_day: day,
                look_ahead_days: self.max_look_ahead_days,
            }
        };

        // One step past the bound: `max_look_ahead_days` skipped days are allowed.
        for step in 1..=self.max_look_ahead_days.saturating_add(1) {
            let candidate = day.checked_add(step).ok_or_else(unresolvable)?;
            if self.calendar.is_working_day(candidate) {
                return Ok(candidate);
            }
        }
        Err(unresolvable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayWindow, HolidaySet};
    use chrono::{Days, NaiveDate, Weekday};

    // 2024-01-06 is a Saturday: days 0..=5 are Sat..Thu, day 6 is Friday.
    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
    }

    fn calendar_with_holidays(days: &[u64]) -> WorkCalendar {
        let holidays: HolidaySet = days
            .iter()
            .map(|&d| start().checked_add_days(Days::new(d)).unwrap())
            .collect();
        WorkCalendar::new(DayWindow::new(start(), 28), holidays, Weekday::Fri)
    }

    #[test]
    fn test_single_day_full() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(0, 0, 9).unwrap(), SlotPosition::new(0, 9));
    }

    #[test]
    fn test_single_day_partial() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(2, 3, 4).unwrap(), SlotPosition::new(2, 7));
    }

    #[test]
    fn test_fills_rest_of_day_exactly() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        // Ends at end-of-day, not at (1, 0).
        assert_eq!(span.compute_end(0, 5, 4).unwrap(), SlotPosition::new(0, 9));
    }

    #[test]
    fn test_multi_day() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(0, 5, 9).unwrap(), SlotPosition::new(1, 5));
    }

    #[test]
    fn test_boundary_ends_at_end_of_day() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(0, 0, 18).unwrap(), SlotPosition::new(1, 9));
        assert_eq!(span.compute_end(0, 4, 14).unwrap(), SlotPosition::new(1, 9));
    }

    #[test]
    fn test_skips_holiday() {
        let cal = calendar_with_holidays(&[1]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        // 2h on day 0, day 1 skipped, 2h on day 2.
        assert_eq!(span.compute_end(0, 7, 4).unwrap(), SlotPosition::new(2, 2));
    }

    #[test]
    fn test_skips_rest_day_and_holiday_run() {
        // Day 5 (Thu) holiday, day 6 (Fri) rest day.
        let cal = calendar_with_holidays(&[5]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(4, 6, 5).unwrap(), SlotPosition::new(7, 2));
    }

    #[test]
    fn test_long_task_crosses_week() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        // 6 full working days Sat..Thu = 54h, Fri skipped, 1h on Sat.
        assert_eq!(span.compute_end(0, 0, 55).unwrap(), SlotPosition::new(7, 1));
    }

    #[test]
    fn test_recomputation_is_stable() {
        let cal = calendar_with_holidays(&[1, 3]);
        let config = BoardConfig::default();
        let span = SpanCalculator::new(&cal, &config);
        let a = span.compute_end(0, 2, 30);
        let b = span.compute_end(0, 2, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unresolvable_span() {
        let cal = calendar_with_holidays(&[1, 2, 3, 4]);
        let config = BoardConfig::default().with_max_look_ahead(3);
        let span = SpanCalculator::new(&cal, &config);
        let err = span.compute_end(0, 0, 10).unwrap_err();
        assert_eq!(
            err,
            Violation::UnresolvableSpan {
                after_day: 0,
                look_ahead_days: 3
            }
        );
    }

    #[test]
    fn test_look_ahead_bound_is_inclusive() {
        // Exactly three non-working days, bound of three: resolvable.
        let cal = calendar_with_holidays(&[1, 2, 3]);
        let config = BoardConfig::default().with_max_look_ahead(3);
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(0, 0, 10).unwrap(), SlotPosition::new(4, 1));
    }

    #[test]
    fn test_custom_capacity() {
        let cal = calendar_with_holidays(&[]);
        let config = BoardConfig::default().with_daily_capacity(8);
        let span = SpanCalculator::new(&cal, &config);
        assert_eq!(span.compute_end(0, 6, 4).unwrap(), SlotPosition::new(1, 2));
    }
}
