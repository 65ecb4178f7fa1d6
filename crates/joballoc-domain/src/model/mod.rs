//! Domain model types

pub mod allocation;
pub mod vehicle;
pub mod visit;

pub use allocation::{AggregatedRow, AnalysisRow, FinalRow, SummaryRow};
pub use vehicle::{VehicleDirectory, VehicleEntry};
pub use visit::{parse_report_name, JobTag, RawVisit, Visit, OVERHEAD_JOB, UNASSIGNED_DRIVER};
