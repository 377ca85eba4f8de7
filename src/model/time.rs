//! Weekday, clock time, and time slot value types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Teaching day, Monday through Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// The teaching week, in order.
    pub const WEEK: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minute-resolution clock time within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a clock time.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24` or `minute >= 60`.
    pub const fn new(hour: u8, minute: u8) -> Self {
        assert!(hour < 24, "hour must be below 24");
        assert!(minute < 60, "minute must be below 60");
        Self { hour, minute }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub const fn minutes_from_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Inverse of [`minutes_from_midnight`](Self::minutes_from_midnight).
    ///
    /// # Panics
    ///
    /// Panics if `minutes >= 24 * 60`.
    pub const fn from_minutes(minutes: u32) -> Self {
        assert!(minutes < 24 * 60, "time of day past midnight");
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// A concrete calendar slot: day, start time, and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    day: Day,
    start: TimeOfDay,
    duration_minutes: u32,
}

impl TimeSlot {
    pub const fn new(day: Day, start: TimeOfDay, duration_minutes: u32) -> Self {
        Self {
            day,
            start,
            duration_minutes,
        }
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Minutes since midnight at which the slot ends.
    pub const fn end_minutes(&self) -> u32 {
        self.start.minutes_from_midnight() + self.duration_minutes
    }

    /// Two slots overlap iff they share a day and their half-open
    /// `[start, start + duration)` intervals intersect.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        if self.day != other.day {
            return false;
        }
        let this_start = self.start.minutes_from_midnight();
        let other_start = other.start.minutes_from_midnight();
        this_start < other.end_minutes() && other_start < self.end_minutes()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = TimeOfDay::from_minutes(self.end_minutes() % (24 * 60));
        write!(f, "{} {} - {}", self.day, self.start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: Day, hour: u8, minute: u8, duration: u32) -> TimeSlot {
        TimeSlot::new(day, TimeOfDay::new(hour, minute), duration)
    }

    #[test]
    fn minutes_round_trip() {
        let t = TimeOfDay::new(13, 45);
        assert_eq!(t.minutes_from_midnight(), 825);
        assert_eq!(TimeOfDay::from_minutes(825), t);
    }

    #[test]
    fn overlap_requires_same_day() {
        let a = slot(Day::Monday, 9, 0, 60);
        let b = slot(Day::Tuesday, 9, 0, 60);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn overlapping_intervals_detected() {
        let a = slot(Day::Monday, 9, 0, 60);
        let b = slot(Day::Monday, 9, 30, 60);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_slots_do_not_overlap() {
        let a = slot(Day::Monday, 9, 0, 60);
        let b = slot(Day::Monday, 10, 0, 60);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn identical_slots_overlap() {
        let a = slot(Day::Friday, 8, 0, 90);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn display_formats() {
        let s = slot(Day::Wednesday, 8, 5, 85);
        assert_eq!(s.to_string(), "Wednesday 8:05 - 9:30");
        assert_eq!(Day::Friday.to_string(), "Friday");
    }
}
