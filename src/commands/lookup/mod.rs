mod execute;
mod output;
mod output_tests;

pub use execute::{GeometrySummary, LookupResult};

use clap::Args;

use crate::types::LocationSelection;

/// Resolve one location selection and summarize its geometry
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  indot_query lookup 'road:I-65'
  indot_query lookup 'county:Marion County'
  indot_query lookup 'poi:Lucas Oil Stadium@0.5'
  indot_query lookup 'I-65 ∩ Marion County'")]
pub struct LookupCmd {
    /// Location as kind:name (road, city, county, district, subdistrict, poi, polygon, intersection)
    pub selection: LocationSelection,
}
