//! Slot suggestions for new tasks.
//!
//! # Algorithm
//!
//! 1. Order roster members by the chosen [`SuggestionPolicy`].
//! 2. For each member, propose a start at their next available hour on
//!    the day (so new work follows existing work).
//! 3. Return the first proposal that passes full placement validation.
//!
//! [`TaskBoard::suggest_earliest`] repeats this day by day across the
//! window.
//!
//! # Complexity
//! O(u * t) per day where u = roster size, t = tasks on the board.

use serde::{Deserialize, Serialize};

use super::TaskBoard;
use crate::models::{Roster, SlotPosition};

/// How roster members are ranked when several could take a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionPolicy {
    /// Roster order.
    #[default]
    RosterOrder,
    /// Fewest hours already charged that day; ties keep roster order.
    LeastLoaded,
}

/// A validated placement proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    /// Suggested assignee.
    pub user: String,
    /// Suggested start.
    pub start: SlotPosition,
    /// End the task would have.
    pub end: SlotPosition,
}

impl TaskBoard {
    /// Suggests who could take a task of `duration_hours` on `day`, and when.
    ///
    /// `None` if `day` is not a working day or nobody has room.
    pub fn suggest_placement(
        &self,
        roster: &Roster,
        day: u32,
        duration_hours: u32,
        policy: SuggestionPolicy,
    ) -> Option<SlotSuggestion> {
        if !self.is_working_day(day) {
            return None;
        }

        let mut candidates: Vec<&str> = roster.iter().collect();
        if policy == SuggestionPolicy::LeastLoaded {
            candidates.sort_by_key(|user| self.daily_work_hours(user, day));
        }

        candidates.into_iter().find_map(|user| {
            let hour = self.next_available_hour(user, day)?;
            let end = self
                .validate_placement(user, day, hour, duration_hours, None)
                .ok()?;
            Some(SlotSuggestion {
                user: user.to_string(),
                start: SlotPosition::new(day, hour),
                end,
            })
        })
    }

    /// First day from `from_day` on (inside the window) with a suggestion.
    pub fn suggest_earliest(
        &self,
        roster: &Roster,
        from_day: u32,
        duration_hours: u32,
        policy: SuggestionPolicy,
    ) -> Option<SlotSuggestion> {
        (from_day..self.calendar().window().len)
            .find_map(|day| self.suggest_placement(roster, day, duration_hours, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::models::{DayWindow, HolidaySet, TaskInput, WorkCalendar};
    use chrono::{NaiveDate, Weekday};

    // 2024-01-06 is a Saturday; day 1 is a holiday.
    fn board() -> TaskBoard {
        let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let holidays: HolidaySet = [NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()]
            .into_iter()
            .collect();
        let cal = WorkCalendar::new(DayWindow::week(start), holidays, Weekday::Fri);
        TaskBoard::new(cal, BoardConfig::default()).unwrap()
    }

    fn roster() -> Roster {
        ["ali", "reza", "sara"].into_iter().collect()
    }

    fn place(board: &mut TaskBoard, id: &str, user: &str, day: u32, hour: u32, dur: u32) {
        board
            .place(TaskInput::new(id, user).at(day, hour).with_duration(dur))
            .unwrap();
    }

    #[test]
    fn test_roster_order_appends_after_work() {
        let mut board = board();
        place(&mut board, "A", "ali", 0, 0, 3);

        let s = board
            .suggest_placement(&roster(), 0, 2, SuggestionPolicy::RosterOrder)
            .unwrap();
        assert_eq!(s.user, "ali");
        assert_eq!(s.start, SlotPosition::new(0, 3));
        assert_eq!(s.end, SlotPosition::new(0, 5));
    }

    #[test]
    fn test_skips_full_mechanic() {
        let mut board = board();
        place(&mut board, "A", "ali", 0, 0, 9);

        let s = board
            .suggest_placement(&roster(), 0, 4, SuggestionPolicy::RosterOrder)
            .unwrap();
        assert_eq!(s.user, "reza");
        assert_eq!(s.start, SlotPosition::new(0, 0));
    }

    #[test]
    fn test_skips_mechanic_over_capacity() {
        let mut board = board();
        place(&mut board, "A", "ali", 0, 0, 7);

        // ali has room at 7 but would carry 10h on day 0.
        let s = board
            .suggest_placement(&roster(), 0, 3, SuggestionPolicy::RosterOrder)
            .unwrap();
        assert_eq!(s.user, "reza");
    }

    #[test]
    fn test_least_loaded() {
        let mut board = board();
        place(&mut board, "A", "ali", 0, 0, 2);
        place(&mut board, "B", "reza", 0, 0, 5);

        let s = board
            .suggest_placement(&roster(), 0, 2, SuggestionPolicy::LeastLoaded)
            .unwrap();
        assert_eq!(s.user, "sara");
        assert_eq!(s.start, SlotPosition::new(0, 0));
    }

    #[test]
    fn test_holiday_has_no_suggestion() {
        let board = board();
        assert!(board
            .suggest_placement(&roster(), 1, 1, SuggestionPolicy::RosterOrder)
            .is_none());
    }

    #[test]
    fn test_earliest_skips_full_days() {
        let mut board = board();
        let solo: Roster = ["ali"].into_iter().collect();
        place(&mut board, "A", "ali", 0, 0, 9);

        // Day 0 is full, day 1 a holiday.
        let s = board
            .suggest_earliest(&solo, 0, 4, SuggestionPolicy::RosterOrder)
            .unwrap();
        assert_eq!(s.start, SlotPosition::new(2, 0));
    }

    #[test]
    fn test_earliest_none_when_window_exhausted() {
        let board = board();
        let empty = Roster::new();
        assert!(board
            .suggest_earliest(&empty, 0, 1, SuggestionPolicy::RosterOrder)
            .is_none());
    }
}
