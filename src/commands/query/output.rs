//! Output formatting for query command results.

use super::execute::QueryResult;
use crate::output::{truncate, Outputable};

/// Widest row preview in table output.
const ROW_PREVIEW_WIDTH: usize = 120;

impl Outputable for QueryResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Query: {}", self.endpoint));
        lines.push(String::new());

        if self.total_rows == 0 {
            lines.push("No results.".to_string());
            return lines.join("\n");
        }

        lines.push(format!(
            "Found {} row(s) in {} table(s):",
            self.total_rows,
            self.tables.iter().filter(|t| t.row_count > 0).count()
        ));
        for table in &self.tables {
            lines.push(format!("  {}: {} row(s)", table.table, table.row_count));
            for row in &table.rows {
                lines.push(format!("    {}", truncate(&row.to_string(), ROW_PREVIEW_WIDTH)));
            }
            let hidden = table.row_count - table.rows.len();
            if hidden > 0 {
                lines.push(format!("    ... {} more", hidden));
            }
        }

        lines.join("\n")
    }
}
