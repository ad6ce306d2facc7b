//! Temporal join conditions from the time selection.

use chrono::{Duration, NaiveDate, Weekday};
use serde_json::json;
use tracing::debug;

use super::clock::{local_hour_to_utc, Clock};
use super::holidays::holiday_date;
use crate::query::{Expression, Operator, QueryFilter};
use crate::types::{lookup_dataset, DayOfMonth, TimeFilter, DATE_COLUMN};

/// Days covered by the default range, ending today.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Start and end dates actually queried.
pub fn effective_range(time: &TimeFilter, clock: &dyn Clock) -> (NaiveDate, NaiveDate) {
    let today = clock.today();
    let start = time
        .start_date
        .unwrap_or(today - Duration::days(DEFAULT_LOOKBACK_DAYS));
    let end = time.end_date.unwrap_or(today);
    (start, end)
}

fn range_expressions(column: &str, start: NaiveDate, end: NaiveDate) -> Vec<Expression> {
    vec![
        Expression::column(column, Operator::Gte, start.to_string()),
        Expression::column(column, Operator::Lte, end.to_string()),
    ]
}

/// Hours expression over sorted UTC hours: BETWEEN for one contiguous run, IN otherwise.
pub fn hour_expression(column: &str, hours: &[u32], offset_minutes: i32) -> Option<Expression> {
    let mut utc: Vec<u32> = hours
        .iter()
        .copied()
        .filter(|h| *h < 24)
        .map(|hour| local_hour_to_utc(hour, offset_minutes))
        .collect();
    utc.sort_unstable();
    utc.dedup();
    if utc.is_empty() {
        return None;
    }

    let column = format!("EXTRACT(HOUR FROM {})", column);

    let contiguous = utc.windows(2).all(|pair| pair[1] == pair[0] + 1);
    if contiguous {
        let (first, last) = (utc[0], utc[utc.len() - 1]);
        Some(Expression::column(column, Operator::Between, json!([first, last])))
    } else {
        Some(Expression::column(column, Operator::In, json!(utc)))
    }
}

/// Weekday names to `0 = Sunday .. 6 = Saturday`; unknown names are dropped.
pub fn weekday_numbers(names: &[String]) -> Vec<u32> {
    names
        .iter()
        .filter_map(|name| match name.trim().parse::<Weekday>() {
            Ok(day) => Some(day.num_days_from_sunday()),
            Err(_) => {
                debug!(weekday = %name, "unknown weekday, skipping");
                None
            }
        })
        .collect()
}

fn day_of_month_expressions(column: &str, days: &[DayOfMonth]) -> Vec<Expression> {
    let day_column = format!("EXTRACT(DAY FROM {})", column);
    let mut numbered: Vec<u32> = days
        .iter()
        .filter_map(|day| match day {
            DayOfMonth::Day(n) => Some(*n),
            DayOfMonth::Last => None,
        })
        .collect();
    numbered.sort_unstable();
    numbered.dedup();

    let mut expressions = Vec::new();
    if !numbered.is_empty() {
        expressions.push(Expression::column(day_column.as_str(), Operator::In, json!(numbered)));
    }
    if days.contains(&DayOfMonth::Last) {
        expressions.push(Expression::column(
            day_column.as_str(),
            Operator::Eq,
            last_day_of_month_sql(column),
        ));
    }
    expressions
}

/// SQL computing the day number of the last day in `column`'s month.
pub fn last_day_of_month_sql(column: &str) -> String {
    format!(
        "EXTRACT(DAY FROM (DATE_TRUNC('month', {}) + INTERVAL '1 month' - INTERVAL '1 day'))",
        column
    )
}

fn holiday_expressions(column: &str, time: &TimeFilter) -> Vec<Expression> {
    let date_column = format!("DATE({})", column);
    time.holidays
        .iter()
        .filter_map(|selection| {
            let date = holiday_date(&selection.holiday, selection.year);
            if date.is_none() {
                debug!(holiday = %selection.holiday, year = selection.year, "holiday not in table, skipping");
            }
            date
        })
        .map(|date| Expression::column(date_column.as_str(), Operator::Eq, date.to_string()))
        .collect()
}

/// Build the temporal join conditions. Always exactly one group.
pub fn build_temporal_conditions(
    datasets: &[String],
    time: &TimeFilter,
    clock: &dyn Clock,
) -> Vec<QueryFilter> {
    let (start, end) = effective_range(time, clock);

    let date_filtered = datasets
        .iter()
        .filter_map(|id| lookup_dataset(id))
        .find(|dataset| dataset.date_filtered);

    let Some(dataset) = date_filtered else {
        return vec![QueryFilter::new(range_expressions(DATE_COLUMN, start, end), time.logic)];
    };
    let column = dataset.date_column;

    let mut expressions = range_expressions(column, start, end);

    if let Some(hours) = hour_expression(column, &time.hours, clock.utc_offset_minutes()) {
        expressions.push(hours);
    }

    let weekdays = weekday_numbers(&time.weekdays);
    if !weekdays.is_empty() {
        expressions.push(Expression::column(
            format!("EXTRACT(DOW FROM {})", column),
            Operator::In,
            json!(weekdays),
        ));
    }

    expressions.extend(day_of_month_expressions(column, &time.days_of_month));
    expressions.extend(holiday_expressions(column, time));

    vec![QueryFilter::new(expressions, time.logic)]
}
