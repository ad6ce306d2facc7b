//! Per-dataset table blocks: selected columns and attribute filters.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::query::{Expression, Logic, Operator, QueryFilter, TableEntry, TableQuery};
use crate::types::{lookup_dataset, AttributeFilter, DatasetInfo, ALL_COLUMNS};

/// Resolve the selected columns of one dataset.
///
/// No explicit list means all columns. An explicit list always gains the
/// coordinate column so the map can plot the rows.
pub fn resolve_columns(dataset: &DatasetInfo, explicit: Option<&Vec<String>>) -> Vec<String> {
    match explicit {
        Some(columns) if !columns.is_empty() => {
            let mut columns = columns.clone();
            if !columns.iter().any(|c| c == dataset.coordinate_column) {
                columns.push(dataset.coordinate_column.to_string());
            }
            columns
        }
        _ => vec![ALL_COLUMNS.to_string()],
    }
}

/// One expression per attribute with at least one allowed value.
pub fn attribute_expressions(filter: &AttributeFilter) -> Vec<Expression> {
    filter
        .iter()
        .filter_map(|(attribute, values)| match values.as_slice() {
            [] => None,
            [single] => Some(Expression::column(attribute.as_str(), Operator::Eq, single.as_str())),
            many => Some(Expression::column(
                attribute.as_str(),
                Operator::In,
                Value::from(many.to_vec()),
            )),
        })
        .collect()
}

/// Build the `tables` array, one single-entry map per known dataset.
pub fn build_tables(
    datasets: &[String],
    filters: &BTreeMap<String, AttributeFilter>,
    columns: &BTreeMap<String, Vec<String>>,
) -> Vec<TableEntry> {
    let mut tables = Vec::with_capacity(datasets.len());

    for id in datasets {
        let Some(dataset) = lookup_dataset(id) else {
            warn!(dataset = %id, "unknown dataset, skipping");
            continue;
        };

        let expressions = filters.get(id).map(attribute_expressions).unwrap_or_default();
        let table = TableQuery {
            selected_columns: resolve_columns(dataset, columns.get(id)),
            filters: (!expressions.is_empty()).then(|| QueryFilter::new(expressions, Logic::And)),
        };

        let mut entry = TableEntry::new();
        entry.insert(dataset.table.to_string(), table);
        tables.push(entry);
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn filter(attribute: &str, values: &[&str]) -> AttributeFilter {
        let mut filter = AttributeFilter::new();
        filter.insert(attribute.to_string(), values.iter().map(|v| v.to_string()).collect());
        filter
    }

    #[rstest]
    fn test_single_value_is_equality() {
        let exprs = attribute_expressions(&filter("severity", &["major"]));
        assert_eq!(exprs, vec![Expression::column("severity", Operator::Eq, "major")]);
    }

    #[rstest]
    fn test_many_values_is_membership() {
        let exprs = attribute_expressions(&filter("severity", &["major", "minor"]));
        assert_eq!(
            exprs,
            vec![Expression::column("severity", Operator::In, json!(["major", "minor"]))]
        );
    }

    #[rstest]
    fn test_empty_values_contribute_nothing() {
        let mut attributes = filter("severity", &[]);
        attributes.insert("county".to_string(), vec!["Marion".to_string()]);
        let exprs = attribute_expressions(&attributes);
        assert_eq!(exprs, vec![Expression::column("county", Operator::Eq, "Marion")]);
    }

    #[rstest]
    fn test_default_columns_are_wildcard() {
        let dataset = lookup_dataset("incidents").unwrap();
        assert_eq!(resolve_columns(dataset, None), vec!["*"]);
        assert_eq!(resolve_columns(dataset, Some(&vec![])), vec!["*"]);
    }

    #[rstest]
    fn test_explicit_columns_gain_coordinates() {
        let dataset = lookup_dataset("incidents").unwrap();
        let columns = vec!["id".to_string(), "severity".to_string()];
        assert_eq!(resolve_columns(dataset, Some(&columns)), vec!["id", "severity", "geom"]);

        let with_geom = vec!["geom".to_string(), "id".to_string()];
        assert_eq!(resolve_columns(dataset, Some(&with_geom)), vec!["geom", "id"]);
    }

    #[rstest]
    fn test_build_tables_skips_unknown_and_omits_empty_filters() {
        let datasets = vec!["incidents".to_string(), "cameras".to_string(), "closures".to_string()];
        let mut filters = BTreeMap::new();
        filters.insert("closures".to_string(), filter("direction", &["N", "S"]));
        filters.insert("incidents".to_string(), filter("severity", &[]));

        let tables = build_tables(&datasets, &filters, &BTreeMap::new());
        assert_eq!(tables.len(), 2);

        let incidents = &tables[0]["indot_incidents"];
        assert!(incidents.filters.is_none());

        let closures = tables[1]["indot_closures"].filters.as_ref().unwrap();
        assert_eq!(closures.logic, Logic::And);
        assert_eq!(closures.expressions.len(), 1);
    }
}
