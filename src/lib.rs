//! Task board scheduling core for the U-Engine ecosystem.
//!
//! Places repair tasks on a weekly mechanic board: computes how a task
//! spreads over working days, and guards each mechanic's schedule against
//! holiday starts, overlapping work and days over the hour cap.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `WorkCalendar`, `HolidaySet`, `DayWindow`,
//!   `SlotPosition`, `Task`, `TaskInput`, `TaskPatch`, `Roster`
//! - **`scheduler`**: `SpanCalculator`, `TaskBoard`, slot suggestions,
//!   `UtilizationReport`
//! - **`validation`**: Snapshot integrity checks (duplicate IDs, overlaps,
//!   capacity, holiday starts)
//! - **`config`**: `BoardConfig` (daily cap, rest weekday, look-ahead)
//! - **`error`**: `Violation` and `BoardError`
//!
//! # Threading
//!
//! Everything is synchronous and single-owner. `TaskBoard` mutates
//! through `&mut self`; callers sharing a board across threads wrap it
//! in their own lock.

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::BoardConfig;
pub use error::{BoardError, Violation};
