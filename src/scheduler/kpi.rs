//! Board utilization metrics.
//!
//! Read-only summaries of how full the board is, for the utilization
//! display. Day hours are the positional hours actually worked, so a
//! user's total equals the summed task durations. Free hours follow the
//! charged-hours rule the board enforces, which also reserves
//! `min(duration, cap)` on the start day of a multi-day task.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Day hours | Worked hours of a user on a working day |
//! | Charged hours | Hours counted against the cap on that day |
//! | Free hours | `cap - charged hours` |
//! | User utilization | Sum of day hours / (working days * cap) |
//! | Avg utilization | Mean user utilization |
//! | Full days | Days where a user has no free hours |

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TaskBoard;
use crate::models::Roster;

/// One user's load on one working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLoad {
    /// Day index.
    pub day: u32,
    /// Calendar date of the day.
    pub date: NaiveDate,
    /// Worked hours.
    pub hours: u32,
    /// Hours counted against the cap; at least `hours`.
    pub charged_hours: u32,
    /// Remaining hours under the cap.
    pub free_hours: u32,
}

/// One user's load across the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLoad {
    /// Mechanic id.
    pub user: String,
    /// Per working day load, in day order.
    pub days: Vec<DayLoad>,
    /// Worked hours over the window.
    pub total_hours: u32,
    /// Fraction of available hours worked (0.0..1.0).
    pub utilization: f64,
    /// Working days with no free hours.
    pub full_days: usize,
}

/// Utilization over the board's day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// Per-user load, in roster order.
    pub users: Vec<UserLoad>,
    /// Working days in the window.
    pub working_days: usize,
    /// Mean user utilization (0.0..1.0).
    pub avg_utilization: f64,
}

impl UtilizationReport {
    /// Computes utilization for every roster member over the window.
    pub fn calculate(board: &TaskBoard, roster: &Roster) -> Self {
        let cap = board.config().daily_capacity_hours;
        let window = *board.calendar().window();
        let working: Vec<(u32, NaiveDate)> = window
            .days()
            .filter(|&d| board.is_working_day(d))
            .filter_map(|d| window.date_of(d).map(|date| (d, date)))
            .collect();
        let available = working.len() as f64 * f64::from(cap);

        let users: Vec<UserLoad> = roster
            .iter()
            .map(|user| {
                let days: Vec<DayLoad> = working
                    .iter()
                    .map(|&(day, date)| {
                        let charged_hours = board.daily_work_hours(user, day);
                        DayLoad {
                            day,
                            date,
                            hours: board.daily_worked_hours(user, day),
                            charged_hours,
                            free_hours: cap.saturating_sub(charged_hours),
                        }
                    })
                    .collect();
                let total_hours: u32 = days.iter().map(|d| d.hours).sum();
                let utilization = if available > 0.0 {
                    f64::from(total_hours) / available
                } else {
                    0.0
                };
                let full_days = days.iter().filter(|d| d.free_hours == 0).count();
                UserLoad {
                    user: user.to_string(),
                    days,
                    total_hours,
                    utilization,
                    full_days,
                }
            })
            .collect();

        let avg_utilization = if users.is_empty() {
            0.0
        } else {
            users.iter().map(|u| u.utilization).sum::<f64>() / users.len() as f64
        };

        Self {
            users,
            working_days: working.len(),
            avg_utilization,
        }
    }

    /// Utilization per user.
    pub fn utilization_by_user(&self) -> HashMap<String, f64> {
        self.users
            .iter()
            .map(|u| (u.user.clone(), u.utilization))
            .collect()
    }

    /// Load of one user, if on the roster.
    pub fn user(&self, user: &str) -> Option<&UserLoad> {
        self.users.iter().find(|u| u.user == user)
    }
}
