//! Query request building.
//!
//! Translates filter selections into the analytics API's `QueryRequest`.
//!
//! # Architecture
//!
//! The build runs in three independent passes whose outputs are assembled
//! into one request:
//!
//! 1. **Tables** (`tables`) - selected columns and attribute filters per dataset
//! 2. **Spatial** (`spatial`) - location selections resolved to geometry
//! 3. **Temporal** (`temporal`) - date range plus hour/weekday/day/holiday refinements
//!
//! Only the spatial pass does I/O, through an injected `GeometryLookup`. The
//! current time comes from an injected `Clock`, so a fixed clock and lookup
//! give byte-identical requests.
//!
//! # Example
//!
//! ```ignore
//! let cache = Arc::new(GeometryCache::new());
//! let lookup = CatalogLookup::new(Box::new(DirectorySource::new("./data/geo")), cache);
//! let request = QueryBuilder::new(&lookup, &SystemClock).build(&selections).await;
//! let response = client.execute(&request).await?;
//! ```

pub mod clock;
pub mod holidays;
pub mod spatial;
pub mod tables;
pub mod temporal;

pub use clock::{Clock, FixedClock, SystemClock};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::GeometryLookup;
use crate::query::{QueryParameters, QueryRequest};
use crate::types::{DatasetFilters, LocationFilter, TimeFilter};

/// Granularity used when none is requested.
pub const DEFAULT_GRANULARITY: &str = "1H";

/// Everything the user selected for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySelections {
    #[serde(default)]
    pub datasets: Vec<String>,
    #[serde(default)]
    pub dataset_filters: DatasetFilters,
    #[serde(default)]
    pub location_filter: LocationFilter,
    #[serde(default)]
    pub time_filter: TimeFilter,
    /// Dataset id -> explicit column list
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

/// Builds `QueryRequest`s against a geometry lookup and a clock.
pub struct QueryBuilder<'a> {
    lookup: &'a dyn GeometryLookup,
    clock: &'a dyn Clock,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(lookup: &'a dyn GeometryLookup, clock: &'a dyn Clock) -> Self {
        Self { lookup, clock }
    }

    /// Build the request. Never fails: unresolvable locations, unknown
    /// datasets and unknown refinements are dropped.
    pub async fn build(&self, selections: &QuerySelections) -> QueryRequest {
        let tables = tables::build_tables(
            &selections.datasets,
            &selections.dataset_filters,
            &selections.columns,
        );
        let spatial_join_conditions =
            spatial::build_spatial_conditions(&selections.location_filter, self.lookup).await;
        let temporal_join_conditions = temporal::build_temporal_conditions(
            &selections.datasets,
            &selections.time_filter,
            self.clock,
        );
        let granularity = selections
            .granularity
            .clone()
            .unwrap_or_else(|| DEFAULT_GRANULARITY.to_string());

        debug!(
            tables = tables.len(),
            spatial = spatial_join_conditions
                .as_ref()
                .map_or(0, |groups| groups.iter().map(|g| g.expressions.len()).sum::<usize>()),
            temporal = temporal_join_conditions[0].expressions.len(),
            %granularity,
            "built query request"
        );

        QueryRequest {
            parameters: QueryParameters {
                tables,
                spatial_join_conditions,
                temporal_join_conditions,
                granularity,
            },
        }
    }
}

/// Build a request in one call.
pub async fn build_query_request(
    selections: &QuerySelections,
    lookup: &dyn GeometryLookup,
    clock: &dyn Clock,
) -> QueryRequest {
    QueryBuilder::new(lookup, clock).build(selections).await
}
