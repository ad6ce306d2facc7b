//! HTTP client for the analytics API's query endpoint.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::query::{QueryRequest, QueryResponse};

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Query request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Query endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Query endpoint returned invalid JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// Posts query requests to one endpoint. No retries.
#[derive(Debug, Clone)]
pub struct QueryClient {
    url: String,
    http: reqwest::Client,
}

impl QueryClient {
    /// Client posting to `<base_url><query_path>`.
    pub fn new(base_url: &str, query_path: &str, timeout: Duration) -> Result<Self, ClientError> {
        let url = endpoint_url(base_url, query_path);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        Ok(Self { url, http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute one request.
    ///
    /// # Errors
    ///
    /// - `Transport` when the endpoint cannot be reached or times out
    /// - `Status` for any non-2xx response, carrying the response body
    /// - `Decode` when a non-empty body is not JSON
    pub async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse, ClientError> {
        info!(url = %self.url, tables = request.parameters.tables.len(), "executing query");

        let transport = |source| ClientError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = parse_response(&body)?;
        debug!(rows = parsed.total_rows(), "query response received");
        Ok(parsed)
    }
}

fn endpoint_url(base_url: &str, query_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        query_path.trim_start_matches('/')
    )
}

/// Decode a response body. An empty body means no data.
pub fn parse_response(body: &str) -> Result<QueryResponse, ClientError> {
    if body.trim().is_empty() {
        return Ok(QueryResponse::default());
    }
    serde_json::from_str(body).map_err(|source| ClientError::Decode { source })
}
