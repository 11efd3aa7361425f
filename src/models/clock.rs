//! Clock arithmetic for course sessions.
//!
//! Session times are wall-clock `HH:MM` strings as entered on the course
//! form. All arithmetic wraps within a 24-hour day; a course day never
//! crosses midnight, so no date is carried.
//!
//! # Fallback
//! [`compute_slot_window`] is reachable while a form is still being filled
//! in, so it never fails: a missing start time or duration yields the
//! positional label `"Time Slot {n}"` instead.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

const CLOCK_FORMAT: &str = "%H:%M";
const MINUTES_PER_DAY: u64 = 24 * 60;

/// Parses an `HH:MM` clock string. Blank or malformed input yields `None`.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(value, CLOCK_FORMAT).ok()
}

/// Formats a clock time as `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Signed minutes from `start` to `end`, or `None` if either fails to parse.
pub fn minutes_between(start: &str, end: &str) -> Option<i64> {
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    Some((end - start).num_minutes())
}

/// Shifts a clock time forward, wrapping past midnight.
pub fn shift_clock(time: NaiveTime, minutes: u64) -> NaiveTime {
    let wrapped = (minutes % MINUTES_PER_DAY) as i64;
    time + Duration::minutes(wrapped)
}

/// Formats the window `[start + offset, start + offset + duration)` as
/// `HH:MM-HH:MM`.
pub fn format_window(start: NaiveTime, offset_minutes: u64, duration_minutes: u32) -> String {
    let from = shift_clock(start, offset_minutes);
    let to = shift_clock(from, u64::from(duration_minutes));
    format!("{}-{}", format_clock(from), format_clock(to))
}

/// Positional label used when a slot's time cannot be computed.
pub fn placeholder_label(slot_index: usize) -> String {
    format!("Time Slot {}", slot_index + 1)
}

/// Computes the display window of the `slot_index`-th (0-based) slot of
/// equal length `slot_duration_minutes` starting at `start_time`.
///
/// # Examples
///
/// ```
/// use course_rotation::models::compute_slot_window;
///
/// assert_eq!(compute_slot_window("09:00", 0, 30), "09:00-09:30");
/// assert_eq!(compute_slot_window("09:00", 3, 30), "10:30-11:00");
/// assert_eq!(compute_slot_window("", 3, 30), "Time Slot 4");
/// ```
pub fn compute_slot_window(start_time: &str, slot_index: usize, slot_duration_minutes: u32) -> String {
    match parse_clock(start_time) {
        Some(start) if slot_duration_minutes > 0 => {
            // Reduced first so absurd indices cannot overflow.
            let offset = (slot_index as u64 % MINUTES_PER_DAY) * u64::from(slot_duration_minutes);
            format_window(start, offset, slot_duration_minutes)
        }
        _ => placeholder_label(slot_index),
    }
}

/// A same-day clock interval [start, end), in minutes after midnight.
///
/// Half-open interval: a session ending at 10:00 does not clash with one
/// starting at 10:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (minute of day, inclusive).
    pub start_minute: u32,
    /// Interval end (minute of day, exclusive).
    pub end_minute: u32,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_minute: u32, end_minute: u32) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Builds a window from `HH:MM` strings.
    ///
    /// Returns `None` if either end fails to parse or `end <= start`.
    pub fn from_clock(start: &str, end: &str) -> Option<Self> {
        let start = parse_clock(start)?;
        let end = parse_clock(end)?;
        let window = Self::new(minute_of_day(start), minute_of_day(end));
        (window.end_minute > window.start_minute).then_some(window)
    }

    /// Length of this window in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60
        )
    }
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_window_first_slot() {
        assert_eq!(compute_slot_window("09:00", 0, 30), "09:00-09:30");
    }

    #[test]
    fn test_slot_window_later_slot() {
        assert_eq!(compute_slot_window("09:00", 3, 30), "10:30-11:00");
        assert_eq!(compute_slot_window("13:45", 2, 20), "14:25-14:45");
    }

    #[test]
    fn test_slot_window_wraps_midnight() {
        assert_eq!(compute_slot_window("23:30", 1, 20), "23:50-00:10");
    }

    #[test]
    fn test_slot_window_huge_index() {
        // 1441 slots of 1 minute wrap to one minute past the start.
        assert_eq!(compute_slot_window("09:00", 1441, 1), "09:01-09:02");
        let window = compute_slot_window("09:00", usize::MAX, u32::MAX);
        assert_eq!(window.len(), "HH:MM-HH:MM".len());
    }

    #[test]
    fn test_slot_window_placeholder() {
        assert_eq!(compute_slot_window("", 3, 30), "Time Slot 4");
        assert_eq!(compute_slot_window("nine", 0, 30), "Time Slot 1");
        assert_eq!(compute_slot_window("09:00", 1, 0), "Time Slot 2");
    }

    #[test]
    fn test_minutes_between() {
        assert_eq!(minutes_between("09:00", "10:30"), Some(90));
        assert_eq!(minutes_between("10:00", "09:30"), Some(-30));
        assert_eq!(minutes_between("", "09:30"), None);
    }

    #[test]
    fn test_time_window_from_clock() {
        let w = TimeWindow::from_clock("09:00", "10:15").unwrap();
        assert_eq!(w.start_minute, 540);
        assert_eq!(w.duration_minutes(), 75);
        assert_eq!(w.to_string(), "09:00-10:15");
        assert!(TimeWindow::from_clock("10:00", "09:30").is_none());
        assert!(TimeWindow::from_clock("10:00", "10:00").is_none());
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(540, 600);
        let b = TimeWindow::new(570, 660);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::new(600, 660); // touching but not overlapping
        assert!(!a.overlaps(&c));
    }
}
