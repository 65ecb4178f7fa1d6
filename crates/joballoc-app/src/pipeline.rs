//! Pipeline orchestration
//!
//! Runs the monthly allocation in strict sequence:
//! 1. Load every report CSV into raw visit rows
//! 2. Clean rows into typed, job-tagged visits
//! 3. Aggregate visits per (asset, driver, job, job name, arrival, departure)
//! 4. Extend with job totals and the business/weekend-day split
//! 5. Summarize into billing rows with the allocation percentage
//! 6. Join vehicle names and shape the billing tab
//!
//! Every stage's table is kept so the workbook can show the full audit
//! trail. Nothing is written to disk here; export happens only after the
//! whole pipeline has succeeded.

use std::path::Path;

use joballoc_domain::model::{AggregatedRow, AnalysisRow, RawVisit, SummaryRow, Visit};
use joballoc_domain::service::{
    aggregate_visits, analyze_rows, clean_visits, project_final, summarize, AllocationSettings,
    Projection,
};
use joballoc_infra::{lookup_csv, report_csv};
use joballoc_types::Result;
use log::info;

/// Output table of every pipeline stage
#[derive(Debug)]
pub struct PipelineOutput {
    pub raw: Vec<RawVisit>,
    pub cleaned: Vec<Visit>,
    pub aggregated: Vec<AggregatedRow>,
    pub analysis: Vec<AnalysisRow>,
    pub summary: Vec<SummaryRow>,
    pub finals: Projection,
}

/// Run the full allocation pipeline over one month's report directory.
pub fn run_pipeline(
    input_dir: &Path,
    lookup_path: &Path,
    settings: &AllocationSettings,
) -> Result<PipelineOutput> {
    let raw = report_csv::load_reports(input_dir)?;
    let cleaned = clean_visits(&raw)?;
    let aggregated = aggregate_visits(&cleaned);
    let analysis = analyze_rows(&aggregated, &cleaned)?;
    let summary = summarize(&analysis, settings);

    let directory = lookup_csv::load_lookup(lookup_path)?;
    let finals = project_final(&summary, &directory);

    info!(
        "pipeline: {} raw rows -> {} aggregated -> {} summary rows ({} unmatched assets)",
        raw.len(),
        aggregated.len(),
        summary.len(),
        finals.unmatched_assets.len()
    );

    Ok(PipelineOutput {
        raw,
        cleaned,
        aggregated,
        analysis,
        summary,
        finals,
    })
}
