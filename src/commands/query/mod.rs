mod execute;
mod output;

pub use execute::{QueryResult, TableRows};

use clap::Args;

use super::SelectionArgs;

/// Build a query request, execute it and print the results
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  indot_query query -d incidents                        # Last 7 days of incidents
  indot_query query -d closures -l 'road:I-65' -n 5     # First 5 closures on I-65
  indot_query -f json query --selections saved.json     # Full rows as JSON")]
pub struct QueryCmd {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Maximum number of rows shown per table (1-1000)
    #[arg(short = 'n', long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub limit: u32,
}
