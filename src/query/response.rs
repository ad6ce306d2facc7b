//! Response of the analytics API.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Records keyed by table name. A missing or null `results` member reads as
/// "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: BTreeMap<String, Vec<Value>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl QueryResponse {
    pub fn is_empty(&self) -> bool {
        self.results.values().all(Vec::is_empty)
    }

    pub fn total_rows(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn rows(&self, table: &str) -> &[Value] {
        self.results.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}
