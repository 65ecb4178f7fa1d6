//! Domain models and pipeline services for vehicle job allocation
//!
//! Everything in this crate is pure computation over owned tables; file
//! formats and the workbook live in `joballoc-infra` and `joballoc-app`.

pub mod model;
pub mod service;
