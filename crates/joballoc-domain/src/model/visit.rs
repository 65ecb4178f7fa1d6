//! Visit records and job tagging

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pseudo-job bucket for non-billable time
pub const OVERHEAD_JOB: &str = "Overhead";

/// Driver value used when the report cell is blank
pub const UNASSIGNED_DRIVER: &str = "Unassigned";

/// One row of a per-vehicle report as loaded, before normalization.
///
/// Arrival/departure stay as raw text so the Original tab can show the
/// input verbatim; the cleaner parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVisit {
    pub asset: String,
    pub driver: Option<String>,
    pub arrival: String,
    pub departure: String,
    pub minutes_on_site: f64,
    /// GPS distance traveled in miles, when the report includes it
    pub distance_mi: Option<f64>,
    /// Report file stem this row came from, e.g. "12345 - Site A"
    pub report: String,
    /// 1-based data row within the source report (the header is row 1)
    pub row: usize,
}

/// A cleaned, job-tagged visit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub asset: String,
    pub driver: String,
    /// Digits-only job number, or [`OVERHEAD_JOB`]
    pub job: String,
    pub job_name: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub minutes_on_site: f64,
    pub hours: f64,
}

/// Job identity extracted from a report file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobTag {
    /// Billable job: the prefix before the first "-" was all digits
    Numbered { number: String, name: String },
    /// Non-billable bucket: anything without a numeric prefix
    Overhead { name: String },
}

impl JobTag {
    /// Job column value: the job number, or the Overhead literal
    pub fn job(&self) -> &str {
        match self {
            JobTag::Numbered { number, .. } => number,
            JobTag::Overhead { .. } => OVERHEAD_JOB,
        }
    }

    pub fn job_name(&self) -> &str {
        match self {
            JobTag::Numbered { name, .. } | JobTag::Overhead { name } => name,
        }
    }
}

/// Parse the job tag out of a report file name.
///
/// A trailing ".xlsx" or ".csv" extension is stripped first. The part
/// before the first "-" is the job number when it is purely numeric;
/// anything else lands in the Overhead bucket with the whole stem as the
/// job name.
///
/// - "12345 - Site A.xlsx" → Numbered("12345", "Site A")
/// - "Overhead Report.xlsx" → Overhead("Overhead Report")
pub fn parse_report_name(report: &str) -> JobTag {
    let stem = strip_extension(report).trim();
    match stem.split_once('-') {
        Some((left, right)) if is_job_number(left.trim()) => JobTag::Numbered {
            number: left.trim().to_string(),
            name: right.trim().to_string(),
        },
        Some(_) => JobTag::Overhead {
            name: stem.to_string(),
        },
        None => {
            if is_job_number(stem) {
                JobTag::Numbered {
                    number: stem.to_string(),
                    name: stem.to_string(),
                }
            } else {
                JobTag::Overhead {
                    name: stem.to_string(),
                }
            }
        }
    }
}

/// A job number is one or more ASCII digits; an empty prefix is not one.
fn is_job_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn strip_extension(name: &str) -> &str {
    for ext in [".xlsx", ".csv"] {
        if name.len() > ext.len() && name.to_ascii_lowercase().ends_with(ext) {
            return &name[..name.len() - ext.len()];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_report_with_site_name() {
        let tag = parse_report_name("12345 - Site A.xlsx");
        assert_eq!(
            tag,
            JobTag::Numbered {
                number: "12345".to_string(),
                name: "Site A".to_string(),
            }
        );
        assert_eq!(tag.job(), "12345");
        assert_eq!(tag.job_name(), "Site A");
    }

    #[test]
    fn test_overhead_report_without_separator() {
        let tag = parse_report_name("Overhead Report.xlsx");
        assert_eq!(
            tag,
            JobTag::Overhead {
                name: "Overhead Report".to_string(),
            }
        );
        assert_eq!(tag.job(), OVERHEAD_JOB);
    }

    #[test]
    fn test_non_numeric_prefix_with_separator_is_overhead() {
        let tag = parse_report_name("Shop - Maintenance.csv");
        assert_eq!(
            tag,
            JobTag::Overhead {
                name: "Shop - Maintenance".to_string(),
            }
        );
    }

    #[test]
    fn test_bare_job_number() {
        let tag = parse_report_name("41022");
        assert_eq!(tag.job(), "41022");
        assert_eq!(tag.job_name(), "41022");
    }

    #[test]
    fn test_empty_prefix_is_overhead() {
        // A leading "-" leaves an empty prefix, which is not a job number
        let tag = parse_report_name("- Site B");
        assert_eq!(tag.job(), OVERHEAD_JOB);
        assert_eq!(tag.job_name(), "- Site B");
    }

    #[test]
    fn test_extension_stripping_is_case_insensitive() {
        let tag = parse_report_name("12345 - Site A.XLSX");
        assert_eq!(tag.job_name(), "Site A");
        let tag = parse_report_name("12345 - Site A.csv");
        assert_eq!(tag.job_name(), "Site A");
    }

    #[test]
    fn test_only_first_separator_splits() {
        let tag = parse_report_name("40117 - Route 5 - Phase 2");
        assert_eq!(tag.job(), "40117");
        assert_eq!(tag.job_name(), "Route 5 - Phase 2");
    }
}
