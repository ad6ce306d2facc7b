use std::error::Error;

use async_trait::async_trait;
use serde::Serialize;

use super::LookupCmd;
use crate::builder::spatial::resolve_selection;
use crate::commands::{Context, Execute};
use crate::query::Expression;

/// One spatial expression, with the geometry reduced to its shape
#[derive(Debug, Clone, Serialize)]
pub struct GeometrySummary {
    pub spatial_function: String,
    pub geometry_type: String,
    pub vertices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

impl GeometrySummary {
    fn from_expression(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Spatial { spatial_function, value, distance } => Some(Self {
                spatial_function: spatial_function.as_str().to_string(),
                geometry_type: value.type_name().to_string(),
                vertices: value.vertex_count(),
                distance: distance.clone(),
            }),
            Expression::Column { .. } => None,
        }
    }
}

/// Result of the lookup command execution
#[derive(Debug, Default, Serialize)]
pub struct LookupResult {
    pub selection: String,
    pub kind: String,
    pub resolved: bool,
    /// The selection forces the whole location group to AND
    pub forces_and: bool,
    pub expressions: Vec<GeometrySummary>,
}

#[async_trait(?Send)]
impl Execute for LookupCmd {
    type Output = LookupResult;

    async fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let mut result = LookupResult {
            selection: self.selection.to_string(),
            kind: self.selection.kind().to_string(),
            ..Default::default()
        };

        if let Some(resolved) = resolve_selection(&self.selection, ctx.lookup.as_ref()).await {
            result.resolved = true;
            result.forces_and = resolved.forces_and;
            result.expressions = resolved
                .expressions
                .iter()
                .filter_map(GeometrySummary::from_expression)
                .collect();
        }

        Ok(result)
    }
}
