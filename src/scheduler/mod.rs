//! Placement rules and the task board.
//!
//! # Components
//!
//! - [`SpanCalculator`]: end position of a task, skipping non-working days.
//! - [`TaskBoard`]: task store guarded by holiday, overlap and daily-cap
//!   rules; every create, move and edit is fully revalidated.
//! - Suggestions: next free slot across a roster.
//! - [`UtilizationReport`]: per-user, per-day load.

mod board;
mod kpi;
mod span;
mod suggest;

pub use board::TaskBoard;
pub use kpi::{DayLoad, UserLoad, UtilizationReport};
pub use span::SpanCalculator;
pub use suggest::{SlotSuggestion, SuggestionPolicy};
