//! Wire types of the analytics query request.

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::Geometry;

/// How the expressions of one filter group combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

/// Comparison operator of a column expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "BETWEEN")]
    Between,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::In => "IN",
            Operator::Between => "BETWEEN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialFunction {
    #[serde(rename = "ST_Intersects")]
    Intersects,
    #[serde(rename = "ST_DWithin")]
    DWithin,
}

impl SpatialFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialFunction::Intersects => "ST_Intersects",
            SpatialFunction::DWithin => "ST_DWithin",
        }
    }
}

/// One atomic constraint.
///
/// Spatial expressions are tried first when deserializing; they are the only
/// shape carrying `spatial_function`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Spatial {
        spatial_function: SpatialFunction,
        value: Geometry,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance: Option<String>,
    },
    Column {
        column: String,
        operator: Operator,
        value: Value,
    },
}

impl Expression {
    pub fn column(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Expression::Column {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn intersects(geometry: Geometry) -> Self {
        Expression::Spatial {
            spatial_function: SpatialFunction::Intersects,
            value: geometry,
            distance: None,
        }
    }

    pub fn within_distance(geometry: Geometry, distance: impl Into<String>) -> Self {
        Expression::Spatial {
            spatial_function: SpatialFunction::DWithin,
            value: geometry,
            distance: Some(distance.into()),
        }
    }

    pub fn is_spatial(&self) -> bool {
        matches!(self, Expression::Spatial { .. })
    }
}

/// One-line human summary; geometry is reduced to its type and size.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Column { column, operator, value } => {
                write!(f, "{} {} {}", column, operator.as_str(), value)
            }
            Expression::Spatial { spatial_function, value, distance } => {
                write!(
                    f,
                    "{}({}, {} vertices",
                    spatial_function.as_str(),
                    value.type_name(),
                    value.vertex_count()
                )?;
                if let Some(distance) = distance {
                    write!(f, ", distance {}", distance)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A group of expressions combined with one logic operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub expressions: Vec<Expression>,
    pub logic: Logic,
}

impl QueryFilter {
    pub fn new(expressions: Vec<Expression>, logic: Logic) -> Self {
        Self { expressions, logic }
    }
}

/// Columns and attribute filters requested from one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    pub selected_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<QueryFilter>,
}

/// A single-entry map of table name to its query block.
pub type TableEntry = BTreeMap<String, TableQuery>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameters {
    pub tables: Vec<TableEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_join_conditions: Option<Vec<QueryFilter>>,
    pub temporal_join_conditions: Vec<QueryFilter>,
    pub granularity: String,
}

/// Root object POSTed to the analytics API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub parameters: QueryParameters,
}

impl QueryRequest {
    /// Names of the requested tables, in request order.
    pub fn table_names(&self) -> Vec<&str> {
        self.parameters
            .tables
            .iter()
            .flat_map(|entry| entry.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn table(&self, name: &str) -> Option<&TableQuery> {
        self.parameters
            .tables
            .iter()
            .find_map(|entry| entry.get(name))
    }

    pub fn spatial_group(&self) -> Option<&QueryFilter> {
        self.parameters
            .spatial_join_conditions
            .as_ref()
            .and_then(|groups| groups.first())
    }

    pub fn temporal_group(&self) -> Option<&QueryFilter> {
        self.parameters.temporal_join_conditions.first()
    }
}
