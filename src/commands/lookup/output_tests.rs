//! Output formatting tests for lookup command.

#[cfg(test)]
mod tests {
    use super::super::execute::{GeometrySummary, LookupResult};
    use rstest::{fixture, rstest};

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const MISS_TABLE: &str = "\
Location: city:Atlantis

No geometry found.";

    const POI_TABLE: &str = "\
Location: poi:Lucas Oil Stadium@2.5

Resolved to 1 expression(s):
  ST_DWithin Point (1 vertices) within 2.5";

    const INTERSECTION_TABLE: &str = "\
Location: intersection:I-65 ∩ Marion County

Resolved to 2 expression(s):
  ST_Intersects MultiLineString (6 vertices)
  ST_Intersects Polygon (101 vertices)
Location logic forced to AND";

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn intersects(geometry_type: &str, vertices: usize) -> GeometrySummary {
        GeometrySummary {
            spatial_function: "ST_Intersects".to_string(),
            geometry_type: geometry_type.to_string(),
            vertices,
            distance: None,
        }
    }

    #[fixture]
    fn miss_result() -> LookupResult {
        LookupResult {
            selection: "city:Atlantis".to_string(),
            kind: "city".to_string(),
            ..Default::default()
        }
    }

    #[fixture]
    fn poi_result() -> LookupResult {
        LookupResult {
            selection: "poi:Lucas Oil Stadium@2.5".to_string(),
            kind: "poi".to_string(),
            resolved: true,
            forces_and: false,
            expressions: vec![GeometrySummary {
                spatial_function: "ST_DWithin".to_string(),
                geometry_type: "Point".to_string(),
                vertices: 1,
                distance: Some("2.5".to_string()),
            }],
        }
    }

    #[fixture]
    fn intersection_result() -> LookupResult {
        LookupResult {
            selection: "intersection:I-65 ∩ Marion County".to_string(),
            kind: "intersection".to_string(),
            resolved: true,
            forces_and: true,
            expressions: vec![intersects("MultiLineString", 6), intersects("Polygon", 101)],
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_miss,
        fixture: miss_result,
        fixture_type: LookupResult,
        expected: MISS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_poi,
        fixture: poi_result,
        fixture_type: LookupResult,
        expected: POI_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_intersection,
        fixture: intersection_result,
        fixture_type: LookupResult,
        expected: INTERSECTION_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: poi_result,
        fixture_type: LookupResult,
        assertions: {
            "/kind": "poi",
            "/resolved": true,
            "/expressions/0/distance": "2.5",
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_omits_missing_distance,
        fixture: intersection_result,
        fixture_type: LookupResult,
        assertions: {
            "/expressions/0/distance": serde_json::Value::Null,
            "/forces_and": true,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: miss_result,
        fixture_type: LookupResult,
        contains: ["kind: city", "resolved: false"],
    }
}
