//! Query request/response wire types.

pub mod request;
pub mod response;

pub use request::{
    Expression, Logic, Operator, QueryFilter, QueryParameters, QueryRequest, SpatialFunction,
    TableEntry, TableQuery,
};
pub use response::QueryResponse;
