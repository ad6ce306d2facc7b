//! Filter selections handed to the query builder.

mod dataset;
mod location;
mod time;

pub use dataset::{
    lookup_dataset, AttributeFilter, DatasetFilters, DatasetInfo, ALL_COLUMNS, DATASETS,
    DATE_COLUMN,
};
pub use location::{
    LocationFilter, LocationSelection, SelectionParseError, DEFAULT_POI_RADIUS,
    INTERSECTION_SEPARATOR,
};
pub use time::{DayOfMonth, HolidaySelection, TimeFilter, TimeParseError};
