//! Minutes-of-day arithmetic for schedule entries.
//!
//! Times are lexical `"HH:MM"` strings on a 24-hour clock. They are parsed
//! once per layout pass into a [`TimeInterval`], and every later stage works
//! on plain minute counts.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// A day-bound half-open interval `[start_minute, end_minute)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    pub day: u32,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeInterval {
    /// Length of the interval in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    /// Length of the interval in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / f64::from(MINUTES_PER_HOUR)
    }
}

/// Whether two intervals overlap: same day, and each starts strictly before
/// the other ends. Back-to-back intervals sharing an endpoint do not overlap.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.day == b.day && a.start_minute < b.end_minute && a.end_minute > b.start_minute
}

/// Parse an `"HH:MM"` lexeme into minutes since midnight.
///
/// Both components must be exactly two digits; `"9:00"` and `"09:00:00"` are
/// rejected so that every accepted lexeme has a single spelling.
pub fn parse_minutes(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
        return None;
    }
    let t = NaiveTime::parse_from_str(s, "%H:%M").ok()?;
    Some(t.hour() * MINUTES_PER_HOUR + t.minute())
}

/// Format minutes since midnight back into `"HH:MM"`.
pub fn format_minutes(minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}
