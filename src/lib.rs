pub mod cli;
pub mod error;
pub mod fetch;
pub mod reference;
pub mod report;
pub mod table;

#[cfg(test)]
mod testing;

pub use error::{DataError, FetchError, ReferenceError, ReportError};
pub use fetch::{VisitorClient, VisitorResponse};
pub use reference::{load_reference, ReferenceColumns, ZoneReference};
pub use report::{run, ReportOptions};
pub use table::{build_visitors_table, missing_zones, Metric, VisitorsTable};
