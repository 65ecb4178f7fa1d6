//! Final billing projection

use log::warn;

use crate::model::{FinalRow, SummaryRow, VehicleDirectory};

/// Result of the final projection: billing rows plus the assets that had
/// no entry in the vehicle lookup.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub rows: Vec<FinalRow>,
    /// Assets without a lookup entry, in first-seen order, deduplicated
    pub unmatched_assets: Vec<String>,
}

/// Join vehicle names onto the summary and shape the billing tab rows.
///
/// The join is a left join on trimmed asset ids: assets missing from the
/// lookup keep an empty vehicle name and are reported, never fatal.
pub fn project_final(summary: &[SummaryRow], directory: &VehicleDirectory) -> Projection {
    let mut rows = Vec::with_capacity(summary.len());
    let mut unmatched: Vec<String> = Vec::new();

    for s in summary {
        let asset = s.asset.trim().to_string();
        let name = directory.name_for(&asset);
        if name.is_none() && !unmatched.contains(&asset) {
            warn!("asset {} has no entry in the vehicle lookup", asset);
            unmatched.push(asset.clone());
        }
        rows.push(FinalRow {
            asset,
            vehicle_name: name.unwrap_or_default().to_string(),
            driver: s.driver.clone(),
            business_days: s.business_days,
            pickup_repair: s.pickup_repair,
            hours: s.hours,
            allocation_pct: s.allocation_pct,
            job: s.job.clone(),
            job_name: s.job_name.clone(),
            total_jobs: s.total_jobs,
        });
    }

    Projection {
        rows,
        unmatched_assets: unmatched,
    }
}
