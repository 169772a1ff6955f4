//! Board positions and spans.
//!
//! A [`SlotPosition`] is a `(day, hour)` pair. Positions are ordered
//! lexicographically: first by day, then by hour. An end position of
//! `(d, cap)` means "end of day d" and sorts before `(d + 1, 0)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(day, hour)` position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotPosition {
    /// Day index.
    pub day: u32,
    /// Hour offset within the working day.
    pub hour: u32,
}

impl SlotPosition {
    /// Creates a position.
    #[inline]
    pub const fn new(day: u32, hour: u32) -> Self {
        Self { day, hour }
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.day, self.hour)
    }
}

impl From<(u32, u32)> for SlotPosition {
    fn from((day, hour): (u32, u32)) -> Self {
        Self::new(day, hour)
    }
}

/// A half-open span `[start, end)` of board positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpan {
    /// First occupied position (inclusive).
    pub start: SlotPosition,
    /// End position (exclusive).
    pub end: SlotPosition,
}

impl SlotSpan {
    /// Creates a span.
    pub fn new(start: SlotPosition, end: SlotPosition) -> Self {
        Self { start, end }
    }

    /// Whether two spans intersect.
    ///
    /// Touching spans (one ends where the other starts) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the span covers more than one day.
    pub fn is_multi_day(&self) -> bool {
        self.end.day > self.start.day
    }

    /// Whether the span touches `day` (starts, ends, or runs through it).
    pub fn touches_day(&self, day: u32) -> bool {
        self.start.day <= day && day <= self.end.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(sd: u32, sh: u32, ed: u32, eh: u32) -> SlotSpan {
        SlotSpan::new(SlotPosition::new(sd, sh), SlotPosition::new(ed, eh))
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(SlotPosition::new(0, 9) < SlotPosition::new(1, 0));
        assert!(SlotPosition::new(1, 2) < SlotPosition::new(1, 3));
        assert!(SlotPosition::new(2, 0) > SlotPosition::new(1, 8));
    }

    #[test]
    fn test_overlap() {
        let a = span(0, 0, 0, 4);
        assert!(a.overlaps(&span(0, 2, 0, 4)));
        assert!(a.overlaps(&span(0, 3, 1, 2)));
        assert!(span(0, 5, 2, 3).overlaps(&span(1, 0, 1, 1)));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = span(0, 0, 0, 4);
        assert!(!a.overlaps(&span(0, 4, 0, 6)));
        assert!(!span(0, 0, 0, 9).overlaps(&span(1, 0, 1, 3)));
    }

    #[test]
    fn test_touches_day() {
        let s = span(1, 5, 3, 2);
        assert!(s.is_multi_day());
        assert!(s.touches_day(1));
        assert!(s.touches_day(2));
        assert!(s.touches_day(3));
        assert!(!s.touches_day(0));
        assert!(!s.touches_day(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(SlotPosition::new(2, 7).to_string(), "2:7");
        assert_eq!(SlotPosition::from((1, 3)), SlotPosition::new(1, 3));
    }
}
