mod execute;
mod output;
mod output_tests;

pub use execute::BuildResult;

use clap::Args;

use super::SelectionArgs;

/// Build a query request from filter selections and print it
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  indot_query build -d incidents                                  # Last 7 days of incidents
  indot_query build -d incidents --filter incidents.severity=major
  indot_query build -d closures -l 'road:I-65' -l 'county:Marion County' --logic or
  indot_query build -d incidents --start 2025-05-01 --end 2025-05-31 --hour 7 --hour 8
  indot_query build -d incidents --holiday 'Memorial Day:2025'
  indot_query -f json build --selections saved.json               # Request JSON for piping")]
pub struct BuildCmd {
    #[command(flatten)]
    pub selection: SelectionArgs,
}
