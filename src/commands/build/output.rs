//! Output formatting for build command results.

use super::execute::BuildResult;
use crate::output::Outputable;
use crate::query::QueryFilter;

fn push_group(lines: &mut Vec<String>, title: &str, group: Option<&QueryFilter>) {
    match group {
        Some(group) if !group.expressions.is_empty() => {
            lines.push(format!("{} ({}):", title, group.logic.as_str()));
            for expr in &group.expressions {
                lines.push(format!("  {}", expr));
            }
        }
        _ => lines.push(format!("{}: none", title)),
    }
}

impl Outputable for BuildResult {
    fn to_table(&self) -> String {
        let params = &self.request.parameters;
        let mut lines = Vec::new();

        lines.push(format!("Query request (granularity {})", params.granularity));
        lines.push(String::new());

        if params.tables.is_empty() {
            lines.push("Tables: none".to_string());
        } else {
            lines.push(format!("Tables ({}):", params.tables.len()));
            for (name, table) in params.tables.iter().flatten() {
                lines.push(format!("  {} [{}]", name, table.selected_columns.join(", ")));
                if let Some(filters) = &table.filters {
                    for expr in &filters.expressions {
                        lines.push(format!("    {}", expr));
                    }
                }
            }
        }

        lines.push(String::new());
        push_group(&mut lines, "Spatial", self.request.spatial_group());
        lines.push(String::new());
        push_group(&mut lines, "Temporal", self.request.temporal_group());

        lines.join("\n")
    }
}
