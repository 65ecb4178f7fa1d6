//! Infrastructure layer - report loading, vehicle lookup loading, file renaming

pub mod lookup_csv;
pub mod rename;
pub mod report_csv;
