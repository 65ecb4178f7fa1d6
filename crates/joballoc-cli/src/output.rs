//! Output formatting module

use std::path::Path;

use serde::Serialize;

use joballoc_app::PipelineOutput;
use joballoc_infra::rename::Rename;
use joballoc_types::{OutputFormat, Result};

/// Machine-readable run summary for --format json
#[derive(Serialize)]
struct RunSummary<'a> {
    report_rows: usize,
    cleaned_visits: usize,
    aggregated_groups: usize,
    billing_rows: usize,
    allocations: Vec<AllocationLine<'a>>,
    unmatched_assets: &'a [String],
    workbook: Option<String>,
}

/// One asset's winning allocation
#[derive(Serialize)]
struct AllocationLine<'a> {
    asset: &'a str,
    vehicle_name: &'a str,
    driver: &'a str,
    job: &'a str,
    job_name: &'a str,
    allocation_pct: f64,
    pickup_repair: f64,
}

pub fn print_run(
    output_format: OutputFormat,
    output: &PipelineOutput,
    workbook: Option<&Path>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let summary = RunSummary {
            report_rows: output.raw.len(),
            cleaned_visits: output.cleaned.len(),
            aggregated_groups: output.aggregated.len(),
            billing_rows: output.finals.rows.len(),
            allocations: allocation_lines(output),
            unmatched_assets: &output.finals.unmatched_assets,
            workbook: workbook.map(|p| p.display().to_string()),
        };
        let content = serde_json::to_string_pretty(&summary)?;
        println!("{}", content);
    } else {
        println!("{}", generate_run_report(output, workbook));
    }

    Ok(())
}

fn allocation_lines(output: &PipelineOutput) -> Vec<AllocationLine<'_>> {
    output
        .finals
        .rows
        .iter()
        .filter(|r| r.allocation_pct > 0.0)
        .map(|r| AllocationLine {
            asset: &r.asset,
            vehicle_name: &r.vehicle_name,
            driver: &r.driver,
            job: &r.job,
            job_name: &r.job_name,
            allocation_pct: r.allocation_pct,
            pickup_repair: r.pickup_repair,
        })
        .collect()
}

/// Build the human-readable run report.
///
/// Sections:
/// - Stage counts
/// - Winning allocations per asset
/// - Assets missing from the vehicle lookup
pub fn generate_run_report(output: &PipelineOutput, workbook: Option<&Path>) -> String {
    let mut report = String::new();

    report.push_str("==================================================\n");
    report.push_str("            Job Allocation Run Report             \n");
    report.push_str("==================================================\n\n");

    report.push_str("Summary\n");
    report.push_str(&format!("  Report rows:        {}\n", output.raw.len()));
    report.push_str(&format!("  Cleaned visits:     {}\n", output.cleaned.len()));
    report.push_str(&format!("  Aggregated groups:  {}\n", output.aggregated.len()));
    report.push_str(&format!("  Billing rows:       {}\n", output.finals.rows.len()));
    report.push('\n');

    let winners: Vec<_> = output
        .finals
        .rows
        .iter()
        .filter(|r| r.allocation_pct > 0.0)
        .collect();

    report.push_str("Allocations\n");
    if winners.is_empty() {
        report.push_str("  (none - every row allocated 0)\n");
    } else {
        report.push_str("-".repeat(70).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<10} {:<22} {:<10} {:>6} {:>10}\n",
            "Asset", "Vehicle Name", "Job", "Pct", "Pickup"
        ));
        report.push_str("-".repeat(70).as_str());
        report.push('\n');

        for row in winners {
            report.push_str(&format!(
                "{:<10} {:<22} {:<10} {:>6.2} {:>10.2}\n",
                truncate_str(&row.asset, 9),
                truncate_str(&row.vehicle_name, 21),
                truncate_str(&row.job, 9),
                row.allocation_pct,
                row.pickup_repair
            ));
        }
    }
    report.push('\n');

    if !output.finals.unmatched_assets.is_empty() {
        report.push_str("Assets missing from the vehicle lookup\n");
        for asset in &output.finals.unmatched_assets {
            report.push_str(&format!("  {}\n", asset));
        }
        report.push('\n');
    }

    match workbook {
        Some(path) => report.push_str(&format!("Workbook: {}\n", path.display())),
        None => report.push_str("Dry run - workbook not written\n"),
    }

    report
}

pub fn print_renames(
    output_format: OutputFormat,
    renames: &[Rename],
    dry_run: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(renames)?;
        println!("{}", content);
        return Ok(());
    }

    if renames.is_empty() {
        println!("Nothing to rename");
        return Ok(());
    }

    for rename in renames {
        println!("  {} -> {}", rename.from, rename.to);
    }
    if dry_run {
        println!("\nDry run - {} file(s) would be renamed", renames.len());
    } else {
        println!("\nRenamed {} file(s)", renames.len());
    }

    Ok(())
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    }
}
