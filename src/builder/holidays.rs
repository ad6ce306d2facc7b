//! Observed holiday dates for the supported years.

use chrono::NaiveDate;

/// (holiday name, year, month, day)
const HOLIDAY_DATES: &[(&str, i32, u32, u32)] = &[
    ("New Year's Day", 2024, 1, 1),
    ("Martin Luther King Jr. Day", 2024, 1, 15),
    ("Presidents' Day", 2024, 2, 19),
    ("Memorial Day", 2024, 5, 27),
    ("Independence Day", 2024, 7, 4),
    ("Labor Day", 2024, 9, 2),
    ("Columbus Day", 2024, 10, 14),
    ("Veterans Day", 2024, 11, 11),
    ("Thanksgiving", 2024, 11, 28),
    ("Christmas", 2024, 12, 25),
    ("New Year's Day", 2025, 1, 1),
    ("Martin Luther King Jr. Day", 2025, 1, 20),
    ("Presidents' Day", 2025, 2, 17),
    ("Memorial Day", 2025, 5, 26),
    ("Independence Day", 2025, 7, 4),
    ("Labor Day", 2025, 9, 1),
    ("Columbus Day", 2025, 10, 13),
    ("Veterans Day", 2025, 11, 11),
    ("Thanksgiving", 2025, 11, 27),
    ("Christmas", 2025, 12, 25),
];

pub const SUPPORTED_YEARS: [i32; 2] = [2024, 2025];

/// Case, space and punctuation insensitive key.
fn holiday_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Date of `holiday` in `year`, if the pair is in the table.
pub fn holiday_date(holiday: &str, year: i32) -> Option<NaiveDate> {
    let key = holiday_key(holiday);
    HOLIDAY_DATES
        .iter()
        .find(|(name, y, _, _)| *y == year && holiday_key(name) == key)
        .and_then(|&(_, y, month, day)| NaiveDate::from_ymd_opt(y, month, day))
}

/// Distinct holiday names, in calendar order.
pub fn holiday_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for &(name, _, _, _) in HOLIDAY_DATES {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
