use std::error::Error;

use async_trait::async_trait;
use serde::Serialize;

use super::BuildCmd;
use crate::builder::QueryBuilder;
use crate::commands::{Context, Execute};
use crate::query::QueryRequest;

/// Result of the build command: the request itself.
///
/// Serializes transparently so `--format json` prints exactly what would be
/// posted to the API.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct BuildResult {
    pub request: QueryRequest,
}

#[async_trait(?Send)]
impl Execute for BuildCmd {
    type Output = BuildResult;

    async fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let selections = self.selection.into_selections(&ctx.config)?;
        let request = QueryBuilder::new(ctx.lookup.as_ref(), ctx.clock.as_ref())
            .build(&selections)
            .await;
        Ok(BuildResult { request })
    }
}
