//! Output formatting for lookup command results.

use super::execute::LookupResult;
use crate::output::Outputable;

impl Outputable for LookupResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Location: {}", self.selection));
        lines.push(String::new());

        if !self.resolved {
            lines.push("No geometry found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Resolved to {} expression(s):", self.expressions.len()));
        for summary in &self.expressions {
            let mut line = format!(
                "  {} {} ({} vertices)",
                summary.spatial_function, summary.geometry_type, summary.vertices
            );
            if let Some(distance) = &summary.distance {
                line.push_str(&format!(" within {}", distance));
            }
            lines.push(line);
        }
        if self.forces_and {
            lines.push("Location logic forced to AND".to_string());
        }

        lines.join("\n")
    }
}
