//! Raw report normalization

use chrono::{NaiveDate, NaiveDateTime};
use joballoc_types::{Error, Result};

use crate::model::{parse_report_name, RawVisit, Visit, UNASSIGNED_DRIVER};

/// Date-time formats accepted in report cells; the time of day is discarded
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only formats accepted in report cells
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Normalize raw report rows into typed, job-tagged visit records.
///
/// Blank drivers become "Unassigned", arrival/departure are parsed to
/// dates, hours are derived from minutes, and the job number/name come
/// from the report file name. The filename and distance fields are not
/// carried forward. An unparseable date is fatal; the row must be fixed
/// in the source report.
pub fn clean_visits(raw: &[RawVisit]) -> Result<Vec<Visit>> {
    raw.iter().map(clean_one).collect()
}

fn clean_one(raw: &RawVisit) -> Result<Visit> {
    let driver = match raw.driver.as_deref() {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => UNASSIGNED_DRIVER.to_string(),
    };

    let arrival = parse_report_date(&raw.arrival, &raw.report, raw.row)?;
    let departure = parse_report_date(&raw.departure, &raw.report, raw.row)?;

    let tag = parse_report_name(&raw.report);

    Ok(Visit {
        asset: raw.asset.clone(),
        driver,
        job: tag.job().to_string(),
        job_name: tag.job_name().to_string(),
        arrival,
        departure,
        minutes_on_site: raw.minutes_on_site,
        hours: raw.minutes_on_site / 60.0,
    })
}

/// Parse an arrival/departure cell, trying date-time formats before
/// date-only ones.
fn parse_report_date(value: &str, report: &str, row: usize) -> Result<NaiveDate> {
    let value = value.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }

    Err(Error::MalformedDate {
        report: report.to_string(),
        row,
        value: value.to_string(),
    })
}
