//! Row types for the aggregation, analysis, and billing stages

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row per (asset, driver, job, job name, arrival, departure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub asset: String,
    pub driver: String,
    pub job: String,
    pub job_name: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub minutes_on_site: f64,
    pub hours: f64,
    /// Occupancy days: 0 when hours <= 4, otherwise max(1, floor(hours / 8))
    pub days: u32,
}

/// Aggregated row extended with asset-level figures and the calendar split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRow {
    #[serde(flatten)]
    pub row: AggregatedRow,
    /// Hours for this asset+job over ALL cleaned visits, rounded to 2 decimals
    pub job_total_hours: f64,
    /// Distinct non-Overhead jobs for this asset; 0 when it has only Overhead work
    pub total_jobs: u32,
    pub business_days: u32,
    pub weekend_days: u32,
}

/// Billing summary row, grouped by (asset, driver, job, job name,
/// job-total-hours, total-jobs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub asset: String,
    pub driver: String,
    pub job: String,
    pub job_name: String,
    pub job_total_hours: f64,
    pub total_jobs: u32,
    pub hours: f64,
    pub business_days: u32,
    pub weekend_days: u32,
    pub allocation_pct: f64,
    pub pickup_repair: f64,
}

/// Billing tab row with the vehicle name joined on.
///
/// The workbook's placeholder columns (Vehicle, Fuel Cost, Total, Bill
/// Rate) are written empty at export; they carry no data here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalRow {
    pub asset: String,
    /// Empty when the asset has no entry in the vehicle lookup
    pub vehicle_name: String,
    pub driver: String,
    pub business_days: u32,
    pub pickup_repair: f64,
    pub hours: f64,
    pub allocation_pct: f64,
    pub job: String,
    pub job_name: String,
    pub total_jobs: u32,
}
