//! Workbook export
//!
//! Writes one tab per pipeline stage so a reviewer can audit every
//! transformation next to the final billing tab.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use joballoc_domain::model::{AggregatedRow, AnalysisRow, FinalRow, RawVisit, SummaryRow, Visit};
use joballoc_types::{Error, Result};

use crate::pipeline::PipelineOutput;

/// Write the six-tab workbook: Original, Clean_Data, Aggregated_Data,
/// Analysis, Summary, Final.
///
/// The workbook is created in memory and saved once at the end; a failed
/// run leaves no partial file behind.
pub fn export_workbook(output: &PipelineOutput, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    write_original_sheet(workbook.add_worksheet(), &output.raw)?;
    write_clean_sheet(workbook.add_worksheet(), &output.cleaned)?;
    write_aggregated_sheet(workbook.add_worksheet(), &output.aggregated)?;
    write_analysis_sheet(workbook.add_worksheet(), &output.analysis)?;
    write_summary_sheet(workbook.add_worksheet(), &output.summary)?;
    write_final_sheet(workbook.add_worksheet(), &output.finals.rows)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

/// Date rendering shared by every tab
fn fmt_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn write_header_row(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    Ok(())
}

/// Raw combined input exactly as loaded, one row per report line
fn write_original_sheet(sheet: &mut Worksheet, rows: &[RawVisit]) -> Result<()> {
    sheet
        .set_name("Original")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_header_row(
        sheet,
        &[
            "Asset",
            "Driver",
            "Arrival",
            "Departure",
            "Time on Site (Minutes)",
            "GPS Distance Traveled (mi)",
            "Filename",
        ],
    )?;

    for (row_idx, visit) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, &visit.asset)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, visit.driver.as_deref().unwrap_or(""))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &visit.arrival)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, &visit.departure)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 4, visit.minutes_on_site)
            .map_err(|e| Error::Excel(e.to_string()))?;
        if let Some(distance) = visit.distance_mi {
            sheet
                .write_number(row, 5, distance)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        sheet
            .write_string(row, 6, &visit.report)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(6, 30)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_clean_sheet(sheet: &mut Worksheet, rows: &[Visit]) -> Result<()> {
    sheet
        .set_name("Clean_Data")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_header_row(
        sheet,
        &[
            "Asset",
            "Driver",
            "Arrival",
            "Departure",
            "Time on Site (Minutes)",
            "Hours",
            "Job",
            "Job Name",
        ],
    )?;

    for (row_idx, visit) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, &visit.asset)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, &visit.driver)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &fmt_date(visit.arrival))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, &fmt_date(visit.departure))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 4, visit.minutes_on_site)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 5, visit.hours)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 6, &visit.job)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 7, &visit.job_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(7, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_aggregated_sheet(sheet: &mut Worksheet, rows: &[AggregatedRow]) -> Result<()> {
    sheet
        .set_name("Aggregated_Data")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_header_row(
        sheet,
        &[
            "Asset",
            "Driver",
            "Job",
            "Job Name",
            "Arrival",
            "Departure",
            "Time on Site (Minutes)",
            "Hours",
            "Days",
        ],
    )?;

    for (row_idx, agg) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        write_aggregated_cells(sheet, row, agg)?;
    }

    sheet
        .set_column_width(3, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

/// The aggregated columns are the leading columns of the Analysis tab too
fn write_aggregated_cells(sheet: &mut Worksheet, row: u32, agg: &AggregatedRow) -> Result<()> {
    sheet
        .write_string(row, 0, &agg.asset)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(row, 1, &agg.driver)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(row, 2, &agg.job)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(row, 3, &agg.job_name)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(row, 4, &fmt_date(agg.arrival))
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(row, 5, &fmt_date(agg.departure))
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(row, 6, agg.minutes_on_site)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(row, 7, agg.hours)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(row, 8, agg.days as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;
    Ok(())
}

fn write_analysis_sheet(sheet: &mut Worksheet, rows: &[AnalysisRow]) -> Result<()> {
    sheet
        .set_name("Analysis")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_header_row(
        sheet,
        &[
            "Asset",
            "Driver",
            "Job",
            "Job Name",
            "Arrival",
            "Departure",
            "Time on Site (Minutes)",
            "Hours",
            "Days",
            "Hours Job Total",
            "Total Jobs",
            "Business Days",
            "Weekend Days",
        ],
    )?;

    for (row_idx, analysis) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        write_aggregated_cells(sheet, row, &analysis.row)?;
        sheet
            .write_number(row, 9, analysis.job_total_hours)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 10, analysis.total_jobs as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 11, analysis.business_days as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 12, analysis.weekend_days as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(3, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, rows: &[SummaryRow]) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_header_row(
        sheet,
        &[
            "Asset",
            "Driver",
            "Job",
            "Job Name",
            "Hours Job Total",
            "Total Jobs",
            "Hours",
            "Business Days",
            "Weekend Days",
            "Allocation Pct",
            "Pickup Repair",
        ],
    )?;

    for (row_idx, summary) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, &summary.asset)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, &summary.driver)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &summary.job)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, &summary.job_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 4, summary.job_total_hours)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 5, summary.total_jobs as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 6, summary.hours)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 7, summary.business_days as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 8, summary.weekend_days as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 9, summary.allocation_pct)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 10, summary.pickup_repair)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(3, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

/// Billing tab; Vehicle, Fuel Cost, Total, and Bill Rate stay empty for
/// manual entry downstream
fn write_final_sheet(sheet: &mut Worksheet, rows: &[FinalRow]) -> Result<()> {
    sheet
        .set_name("Final")
        .map_err(|e| Error::Excel(e.to_string()))?;

    write_header_row(
        sheet,
        &[
            "Asset",
            "Vehicle Name",
            "Driver",
            "Business Days",
            "Vehicle",
            "Fuel Cost",
            "Pickup Repair",
            "Total",
            "Bill Rate",
            "Hours",
            "Allocation Pct",
            "Job",
            "Job Name",
            "Total Jobs",
        ],
    )?;

    for (row_idx, final_row) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, &final_row.asset)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, &final_row.vehicle_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, &final_row.driver)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 3, final_row.business_days as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 4, "")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 5, "")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 6, final_row.pickup_repair)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 7, "")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 8, "")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 9, final_row.hours)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 10, final_row.allocation_pct)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 11, &final_row.job)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 12, &final_row.job_name)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 13, final_row.total_jobs as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(1, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(12, 24)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}
