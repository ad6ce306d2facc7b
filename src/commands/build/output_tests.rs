//! Output formatting tests for build command.

#[cfg(test)]
mod tests {
    use super::super::execute::BuildResult;
    use crate::geometry::Geometry;
    use crate::query::{
        Expression, Logic, Operator, QueryFilter, QueryParameters, QueryRequest, TableEntry,
        TableQuery,
    };
    use rstest::{fixture, rstest};
    use serde_json::json;

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const MINIMAL_TABLE: &str = "\
Query request (granularity 1H)

Tables: none

Spatial: none

Temporal (AND):
  date_start >= \"2025-05-01\"
  date_start <= \"2025-05-07\"";

    const FULL_TABLE: &str = "\
Query request (granularity 15T)

Tables (1):
  indot_incidents [id, geom]
    severity IN [\"major\",\"minor\"]

Spatial (OR):
  ST_DWithin(Point, 1 vertices, distance 1)

Temporal (AND):
  date_start >= \"2025-05-01\"
  date_start <= \"2025-05-07\"";

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn range_group() -> Vec<QueryFilter> {
        vec![QueryFilter::new(
            vec![
                Expression::column("date_start", Operator::Gte, "2025-05-01"),
                Expression::column("date_start", Operator::Lte, "2025-05-07"),
            ],
            Logic::And,
        )]
    }

    #[fixture]
    fn minimal_result() -> BuildResult {
        BuildResult {
            request: QueryRequest {
                parameters: QueryParameters {
                    tables: vec![],
                    spatial_join_conditions: None,
                    temporal_join_conditions: range_group(),
                    granularity: "1H".to_string(),
                },
            },
        }
    }

    #[fixture]
    fn full_result() -> BuildResult {
        let mut entry = TableEntry::new();
        entry.insert(
            "indot_incidents".to_string(),
            TableQuery {
                selected_columns: vec!["id".to_string(), "geom".to_string()],
                filters: Some(QueryFilter::new(
                    vec![Expression::column("severity", Operator::In, json!(["major", "minor"]))],
                    Logic::And,
                )),
            },
        );
        BuildResult {
            request: QueryRequest {
                parameters: QueryParameters {
                    tables: vec![entry],
                    spatial_join_conditions: Some(vec![QueryFilter::new(
                        vec![Expression::within_distance(
                            Geometry::Point { coordinates: [-86.16, 39.76] },
                            "1",
                        )],
                        Logic::Or,
                    )]),
                    temporal_join_conditions: range_group(),
                    granularity: "15T".to_string(),
                },
            },
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_minimal,
        fixture: minimal_result,
        fixture_type: BuildResult,
        expected: MINIMAL_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_full,
        fixture: full_result,
        fixture_type: BuildResult,
        expected: FULL_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json_is_bare_request,
        fixture: full_result,
        fixture_type: BuildResult,
        assertions: {
            "/parameters/granularity": "15T",
            "/parameters/tables/0/indot_incidents/selected_columns": ["id", "geom"],
            "/parameters/spatial_join_conditions/0/logic": "OR",
            "/parameters/spatial_join_conditions/0/expressions/0/distance": "1",
            "/request": serde_json::Value::Null,
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_omits_spatial,
        fixture: minimal_result,
        fixture_type: BuildResult,
        assertions: {
            "/parameters/spatial_join_conditions": serde_json::Value::Null,
            "/parameters/temporal_join_conditions/0/expressions/0/operator": ">=",
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: minimal_result,
        fixture_type: BuildResult,
        contains: ["parameters", "granularity: 1H"],
    }
}
