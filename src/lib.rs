//! indot_query library - INDOT 511 analytics query builder
//!
//! Turns dataset, attribute, location and time selections into the JSON
//! `QueryRequest` accepted by the traffic analytics API, resolves named places
//! to geometry through cached layer lookups, and executes requests over HTTP.

pub mod builder;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod geometry;
pub mod output;
pub mod query;
pub mod types;

pub use builder::{build_query_request, QueryBuilder, QuerySelections};
pub use client::{ClientError, QueryClient};
pub use query::{QueryRequest, QueryResponse};

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
