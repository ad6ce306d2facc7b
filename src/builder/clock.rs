//! Build-time clock.
//!
//! The builder reads "now" once per build for default date ranges and for the
//! local→UTC hour offset. The offset is the one in effect *now*, not on the
//! queried dates.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current local offset from UTC in minutes (east positive).
    fn utc_offset_minutes(&self) -> i32 {
        self.now().offset().local_minus_utc() / 60
    }
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp such as `2025-05-07T10:00:00-04:00`.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Convert a local hour of day to the UTC hour using a fixed offset.
///
/// Offsets that are not whole hours round toward the earlier UTC hour.
pub fn local_hour_to_utc(hour: u32, offset_minutes: i32) -> u32 {
    let minutes = (hour as i32 * 60 - offset_minutes).rem_euclid(24 * 60);
    (minutes / 60) as u32
}
