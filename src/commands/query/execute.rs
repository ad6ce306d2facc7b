use std::error::Error;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::QueryCmd;
use crate::builder::QueryBuilder;
use crate::client::QueryClient;
use crate::commands::{Context, Execute};
use crate::query::{QueryRequest, QueryResponse};

/// Rows returned for one table
#[derive(Debug, Clone, Serialize)]
pub struct TableRows {
    pub table: String,
    pub row_count: usize,
    /// At most `limit` rows
    pub rows: Vec<Value>,
}

/// Result of the query command execution
#[derive(Debug, Default, Serialize)]
pub struct QueryResult {
    pub endpoint: String,
    pub total_rows: usize,
    pub tables: Vec<TableRows>,
}

impl QueryResult {
    /// Requested tables first, in request order, then any extra tables the
    /// API returned.
    pub fn from_response(
        endpoint: &str,
        request: &QueryRequest,
        response: QueryResponse,
        limit: usize,
    ) -> Self {
        let total_rows = response.total_rows();
        let mut results = response.results;
        let mut tables = Vec::new();

        for name in request.table_names() {
            let rows = results.remove(name).unwrap_or_default();
            tables.push(table_rows(name.to_string(), rows, limit));
        }
        for (name, rows) in results {
            tables.push(table_rows(name, rows, limit));
        }

        Self {
            endpoint: endpoint.to_string(),
            total_rows,
            tables,
        }
    }
}

fn table_rows(table: String, mut rows: Vec<Value>, limit: usize) -> TableRows {
    let row_count = rows.len();
    rows.truncate(limit);
    TableRows {
        table,
        row_count,
        rows,
    }
}

#[async_trait(?Send)]
impl Execute for QueryCmd {
    type Output = QueryResult;

    async fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let selections = self.selection.into_selections(&ctx.config)?;
        let request = QueryBuilder::new(ctx.lookup.as_ref(), ctx.clock.as_ref())
            .build(&selections)
            .await;

        let api = &ctx.config.api;
        let client = QueryClient::new(&api.base_url, &api.query_path, api.timeout())?;
        let response = client.execute(&request).await?;

        Ok(QueryResult::from_response(
            client.url(),
            &request,
            response,
            self.limit as usize,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SelectionArgs;
    use crate::config::ConfigFile;
    use crate::test_utils::{fixed_clock, MockLookup};
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx_for(server: &MockServer) -> Context {
        let mut config = ConfigFile::default();
        config.api.base_url = server.uri();
        Context {
            config,
            lookup: Box::new(MockLookup::indiana()),
            clock: Box::new(fixed_clock()),
        }
    }

    fn cmd(datasets: &[&str], limit: u32) -> QueryCmd {
        QueryCmd {
            selection: SelectionArgs {
                datasets: datasets.iter().map(|d| d.to_string()).collect(),
                ..SelectionArgs::default()
            },
            limit,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_query_orders_tables_and_limits_rows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {
                    "indot_closures": [{"id": 1}, {"id": 2}, {"id": 3}],
                    "indot_weather": [{"id": 7}]
                }
            })))
            .mount(&server)
            .await;

        let result = cmd(&["incidents", "closures"], 2).execute(&ctx_for(&server)).await.unwrap();

        assert_eq!(result.total_rows, 4);
        let names: Vec<&str> = result.tables.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(names, vec!["indot_incidents", "indot_closures", "indot_weather"]);
        assert_eq!(result.tables[0].row_count, 0);
        assert_eq!(result.tables[1].row_count, 3);
        assert_eq!(result.tables[1].rows.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_query_empty_body_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = cmd(&["incidents"], 20).execute(&ctx_for(&server)).await.unwrap();
        assert_eq!(result.total_rows, 0);
        assert_eq!(result.tables.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_query_surfaces_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = cmd(&["incidents"], 20).execute(&ctx_for(&server)).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));
    }
}
