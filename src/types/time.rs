//! Time selections: date range plus optional refinements.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::Logic;

#[derive(Error, Debug, PartialEq)]
pub enum TimeParseError {
    #[error("Invalid day of month '{0}': expected 1-31 or 'last'")]
    InvalidDay(String),

    #[error("Invalid holiday '{0}': expected NAME:YEAR")]
    InvalidHoliday(String),
}

/// A day-of-month refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDay", into = "RawDay")]
pub enum DayOfMonth {
    Day(u32),
    /// Whatever the last day of the record's month is
    Last,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDay {
    Number(u32),
    Text(String),
}

impl TryFrom<RawDay> for DayOfMonth {
    type Error = TimeParseError;

    fn try_from(raw: RawDay) -> Result<Self, Self::Error> {
        match raw {
            RawDay::Number(n) => n.to_string().parse(),
            RawDay::Text(text) => text.parse(),
        }
    }
}

impl From<DayOfMonth> for RawDay {
    fn from(day: DayOfMonth) -> Self {
        match day {
            DayOfMonth::Day(n) => RawDay::Number(n),
            DayOfMonth::Last => RawDay::Text("last".to_string()),
        }
    }
}

impl FromStr for DayOfMonth {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("last") {
            return Ok(DayOfMonth::Last);
        }
        match s.parse::<u32>() {
            Ok(day) if (1..=31).contains(&day) => Ok(DayOfMonth::Day(day)),
            _ => Err(TimeParseError::InvalidDay(s.to_string())),
        }
    }
}

impl fmt::Display for DayOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayOfMonth::Day(day) => write!(f, "{}", day),
            DayOfMonth::Last => write!(f, "last"),
        }
    }
}

/// A named holiday in a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySelection {
    pub holiday: String,
    pub year: i32,
}

impl FromStr for HolidaySelection {
    type Err = TimeParseError;

    /// Parse `NAME:YEAR`, e.g. `Thanksgiving:2025`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeParseError::InvalidHoliday(s.trim().to_string());
        let (holiday, year) = s.rsplit_once(':').ok_or_else(invalid)?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let holiday = holiday.trim();
        if holiday.is_empty() {
            return Err(invalid());
        }
        Ok(HolidaySelection {
            holiday: holiday.to_string(),
            year,
        })
    }
}

/// Date range and refinements. Hours are local wall-clock hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeFilter {
    #[serde(default, rename = "startDate", alias = "start_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, rename = "endDate", alias = "end_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub hours: Vec<u32>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub days_of_month: Vec<DayOfMonth>,
    #[serde(default)]
    pub holidays: Vec<HolidaySelection>,
    #[serde(default)]
    pub logic: Logic,
}

impl TimeFilter {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }
}
