//! Task board domain models.
//!
//! Plain data types for the board: the working-day calendar, board
//! positions, tasks and the mechanic roster. No validation logic lives
//! here; see [`scheduler`](crate::scheduler) for placement rules.
//!
//! # Domain Mappings
//!
//! | u-taskboard | Repair shop | Generic |
//! |-------------|-------------|---------|
//! | Task | Repair job | Work item |
//! | user | Mechanic | Worker |
//! | WorkCalendar | Shop calendar | Availability |
//! | Roster | Active mechanics | Resource pool |

mod calendar;
mod roster;
mod slot;
mod task;

pub use calendar::{DayWindow, HolidaySet, WorkCalendar};
pub use roster::Roster;
pub use slot::{SlotPosition, SlotSpan};
pub use task::{Task, TaskInput, TaskPatch, TaskSegment};

pub(crate) use task::charged_hours;
