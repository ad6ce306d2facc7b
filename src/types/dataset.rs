//! Dataset catalog and per-dataset attribute filters.

use std::collections::BTreeMap;

/// Static description of one queryable dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetInfo {
    /// Identifier used in selections, e.g. `incidents`
    pub id: &'static str,
    /// Table name in the analytics service
    pub table: &'static str,
    /// Timestamp column temporal conditions apply to
    pub date_column: &'static str,
    /// Column the map view plots; always part of an explicit column list
    pub coordinate_column: &'static str,
    /// Whether temporal conditions use the date-range convention
    pub date_filtered: bool,
}

pub const DATASETS: &[DatasetInfo] = &[
    DatasetInfo {
        id: "incidents",
        table: "indot_incidents",
        date_column: "date_start",
        coordinate_column: "geom",
        date_filtered: true,
    },
    DatasetInfo {
        id: "closures",
        table: "indot_closures",
        date_column: "date_start",
        coordinate_column: "geom",
        date_filtered: true,
    },
    DatasetInfo {
        id: "construction",
        table: "indot_construction",
        date_column: "date_start",
        coordinate_column: "geom",
        date_filtered: true,
    },
    DatasetInfo {
        id: "road_conditions",
        table: "indot_road_conditions",
        date_column: "date_start",
        coordinate_column: "geom",
        date_filtered: true,
    },
    DatasetInfo {
        id: "traffic_speeds",
        table: "indot_traffic_speeds",
        date_column: "date_start",
        coordinate_column: "geom",
        date_filtered: true,
    },
];

/// Column every temporal condition is written against.
pub const DATE_COLUMN: &str = "date_start";

/// Sentinel for "all columns".
pub const ALL_COLUMNS: &str = "*";

pub fn lookup_dataset(id: &str) -> Option<&'static DatasetInfo> {
    DATASETS.iter().find(|dataset| dataset.id == id)
}

/// Attribute name -> allowed values. An empty value list means no constraint.
pub type AttributeFilter = BTreeMap<String, Vec<String>>;

/// Dataset id -> attribute filter.
pub type DatasetFilters = BTreeMap<String, AttributeFilter>;
