//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a command-specific result
//! - An `Outputable` impl formatting that result

pub mod build;
pub mod lookup;
pub mod query;
mod selection;

pub use build::BuildCmd;
pub use lookup::LookupCmd;
pub use query::QueryCmd;
pub use selection::{AttributeArg, ColumnArg, SelectionArgs};

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Subcommand;

use crate::builder::{Clock, SystemClock};
use crate::config::ConfigFile;
use crate::geometry::{CatalogLookup, GeometryCache, GeometryLookup};
use crate::output::{OutputFormat, Outputable};

/// Everything a command needs from its environment.
pub struct Context {
    pub config: ConfigFile,
    pub lookup: Box<dyn GeometryLookup>,
    pub clock: Box<dyn Clock>,
}

impl Context {
    /// Context backed by the configured geometry source and the system clock.
    pub fn from_config(config: ConfigFile) -> Result<Self, Box<dyn Error>> {
        let source = config.geometry.to_source(config.api.timeout())?;
        let lookup = CatalogLookup::new(source, Arc::new(GeometryCache::new()));
        Ok(Self {
            config,
            lookup: Box::new(lookup),
            clock: Box::new(SystemClock),
        })
    }
}

/// Trait for executing commands with command-specific result types.
#[async_trait(?Send)]
pub trait Execute {
    type Output: Outputable;

    async fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a query request from filter selections and print it
    Build(BuildCmd),

    /// Build a query request, execute it and print the results
    Query(QueryCmd),

    /// Resolve one location selection and summarize its geometry
    Lookup(LookupCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub async fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Build(cmd) => {
                let result = cmd.execute(ctx).await?;
                Ok(result.format(format))
            }
            Command::Query(cmd) => {
                let result = cmd.execute(ctx).await?;
                Ok(result.format(format))
            }
            Command::Lookup(cmd) => {
                let result = cmd.execute(ctx).await?;
                Ok(result.format(format))
            }
        }
    }
}
