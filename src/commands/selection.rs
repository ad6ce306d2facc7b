//! Filter flags shared by the `build` and `query` commands.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::Args;

use crate::builder::QuerySelections;
use crate::config::ConfigFile;
use crate::query::Logic;
use crate::types::{DayOfMonth, HolidaySelection, LocationSelection};

/// `dataset.attribute=value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeArg {
    pub dataset: String,
    pub attribute: String,
    pub value: String,
}

impl FromStr for AttributeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected dataset.attribute=value, got '{}'", s))?;
        let (dataset, attribute) = key
            .split_once('.')
            .ok_or_else(|| format!("expected dataset.attribute before '=', got '{}'", key))?;
        let (dataset, attribute) = (dataset.trim(), attribute.trim());
        if dataset.is_empty() || attribute.is_empty() {
            return Err(format!("dataset and attribute must be non-empty in '{}'", s));
        }
        Ok(Self {
            dataset: dataset.to_string(),
            attribute: attribute.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// `dataset.column`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnArg {
    pub dataset: String,
    pub column: String,
}

impl FromStr for ColumnArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((dataset, column)) if !dataset.trim().is_empty() && !column.trim().is_empty() => {
                Ok(Self {
                    dataset: dataset.trim().to_string(),
                    column: column.trim().to_string(),
                })
            }
            _ => Err(format!("expected dataset.column, got '{}'", s)),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Dataset to query (repeatable), e.g. incidents, closures
    #[arg(short, long = "dataset")]
    pub datasets: Vec<String>,

    /// Attribute filter as dataset.attribute=value (repeat to allow several values)
    #[arg(long = "filter")]
    pub filters: Vec<AttributeArg>,

    /// Explicit column as dataset.column (default: all columns)
    #[arg(long = "column")]
    pub columns: Vec<ColumnArg>,

    /// Location as kind:name, e.g. road:I-65, county:Marion County, poi:Name@2.5
    #[arg(short, long = "location")]
    pub locations: Vec<LocationSelection>,

    /// How location constraints combine (default: AND, or the selections file)
    #[arg(long, value_enum)]
    pub logic: Option<Logic>,

    /// First day, inclusive (yyyy-mm-dd; default: 7 days before end)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day, inclusive (yyyy-mm-dd; default: today)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Local hour of day, 0-23 (repeatable)
    #[arg(long = "hour", value_parser = clap::value_parser!(u32).range(0..24))]
    pub hours: Vec<u32>,

    /// Weekday name, e.g. Monday (repeatable)
    #[arg(long = "weekday")]
    pub weekdays: Vec<String>,

    /// Day of month 1-31, or "last" (repeatable)
    #[arg(long = "day")]
    pub days: Vec<DayOfMonth>,

    /// Holiday as NAME:YEAR, e.g. "Memorial Day:2025" (repeatable)
    #[arg(long = "holiday")]
    pub holidays: Vec<HolidaySelection>,

    /// How temporal constraints combine (default: AND, or the selections file)
    #[arg(long, value_enum)]
    pub time_logic: Option<Logic>,

    /// Aggregation granularity, e.g. 1H, 15T
    #[arg(short, long)]
    pub granularity: Option<String>,

    /// JSON file of selections; flags add to it
    #[arg(short, long)]
    pub selections: Option<PathBuf>,
}

impl SelectionArgs {
    /// Merge the selections file (if any), the flags and config defaults.
    pub fn into_selections(self, config: &ConfigFile) -> Result<QuerySelections, Box<dyn Error>> {
        let mut selections = match &self.selections {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                serde_json::from_str::<QuerySelections>(&content)
                    .map_err(|e| format!("Invalid selections in {}: {}", path.display(), e))?
            }
            None => QuerySelections::default(),
        };

        for dataset in self.datasets {
            if !selections.datasets.contains(&dataset) {
                selections.datasets.push(dataset);
            }
        }

        for filter in self.filters {
            let values = selections
                .dataset_filters
                .entry(filter.dataset)
                .or_default()
                .entry(filter.attribute)
                .or_default();
            if !values.contains(&filter.value) {
                values.push(filter.value);
            }
        }

        for column in self.columns {
            selections.columns.entry(column.dataset).or_default().push(column.column);
        }

        selections.location_filter.selections.extend(self.locations);
        if let Some(logic) = self.logic {
            selections.location_filter.logic = logic;
        }

        let time = &mut selections.time_filter;
        if self.start.is_some() {
            time.start_date = self.start;
        }
        if self.end.is_some() {
            time.end_date = self.end;
        }
        time.hours.extend(self.hours);
        time.weekdays.extend(self.weekdays);
        time.days_of_month.extend(self.days);
        time.holidays.extend(self.holidays);
        if let Some(logic) = self.time_logic {
            time.logic = logic;
        }

        if let (Some(start), Some(end)) = (time.start_date, time.end_date) {
            if start > end {
                return Err(format!("start date {} is after end date {}", start, end).into());
            }
        }

        selections.granularity = self
            .granularity
            .or(selections.granularity)
            .or_else(|| Some(config.query.granularity.clone()));

        Ok(selections)
    }
}
