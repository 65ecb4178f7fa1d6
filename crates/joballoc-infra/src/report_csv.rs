//! CSV loader for per-vehicle site-visit reports
//!
//! Each report file covers one job; the file name carries the job number
//! and site name, and the rows are individual asset visits to that site.

use std::path::{Path, PathBuf};

use joballoc_domain::model::RawVisit;
use joballoc_types::{Error, Result};
use log::{debug, info};

/// Optional column; a malformed cell downgrades to absent
const DISTANCE_COLUMN: &str = "GPS Distance Traveled (mi)";

/// Load every report CSV in a directory (non-recursive).
///
/// Files are read in file-name order so the combined row set is
/// deterministic. A directory with no `*.csv` files is an error; it
/// usually means the month's export landed somewhere else.
pub fn load_reports(dir: &Path) -> Result<Vec<RawVisit>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_report_csv(p))
        .collect();

    files.sort_by(|a, b| {
        a.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .cmp(b.file_name().and_then(|n| n.to_str()).unwrap_or(""))
    });

    if files.is_empty() {
        return Err(Error::EmptyInput {
            dir: dir.display().to_string(),
        });
    }

    let mut visits = Vec::new();
    for file in &files {
        let rows = load_report(file)?;
        debug!("{}: {} rows", file.display(), rows.len());
        visits.extend(rows);
    }

    info!("loaded {} rows from {} reports", visits.len(), files.len());
    Ok(visits)
}

fn is_report_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Load a single report CSV.
///
/// Expected header:
/// Asset,Driver,Arrival,Departure,Time on Site (Minutes)[,GPS Distance Traveled (mi)]
pub fn load_report(path: &Path) -> Result<Vec<RawVisit>> {
    let report = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers, &report)?;

    let mut visits = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2; // +2 because row_idx is 0-based and the header is row 1

        visits.push(parse_record(&record, &columns, &report, row)?);
    }

    Ok(visits)
}

/// Column positions resolved from the header row; reports list columns
/// in whatever order the export tool felt like that month.
struct ColumnMap {
    asset: usize,
    driver: usize,
    arrival: usize,
    departure: usize,
    minutes: usize,
    distance: Option<usize>,
}

fn resolve_columns(headers: &csv::StringRecord, report: &str) -> Result<ColumnMap> {
    Ok(ColumnMap {
        asset: column_index(headers, report, "Asset")?,
        driver: column_index(headers, report, "Driver")?,
        arrival: column_index(headers, report, "Arrival")?,
        departure: column_index(headers, report, "Departure")?,
        minutes: column_index(headers, report, "Time on Site (Minutes)")?,
        distance: headers.iter().position(|h| h == DISTANCE_COLUMN),
    })
}

fn column_index(headers: &csv::StringRecord, report: &str, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingColumn {
            report: report.to_string(),
            column: name.to_string(),
        })
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    report: &str,
    row: usize,
) -> Result<RawVisit> {
    let asset = record.get(columns.asset).unwrap_or("").to_string();

    let driver = record
        .get(columns.driver)
        .and_then(|d| if d.is_empty() { None } else { Some(d.to_string()) });

    let arrival = record.get(columns.arrival).unwrap_or("").to_string();
    let departure = record.get(columns.departure).unwrap_or("").to_string();

    let minutes_on_site = parse_f64(
        record.get(columns.minutes).unwrap_or("0"),
        report,
        row,
        "Time on Site (Minutes)",
    )?;

    let distance_mi = columns
        .distance
        .and_then(|i| record.get(i))
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
        .and_then(|s| s.replace(',', "").parse().ok());

    Ok(RawVisit {
        asset,
        driver,
        arrival,
        departure,
        minutes_on_site,
        distance_mi,
        report: report.to_string(),
        row,
    })
}

fn parse_f64(s: &str, report: &str, row: usize, column: &str) -> Result<f64> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return Ok(0.0);
    }

    cleaned.parse().map_err(|_| Error::MalformedNumber {
        report: report.to_string(),
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "Asset,Driver,Arrival,Departure,Time on Site (Minutes),GPS Distance Traveled (mi)";

    fn write_report(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_report_parses_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(
            dir.path(),
            "12345 - Site A.csv",
            &format!(
                "{HEADER}\n101,J. Ortiz,05/01/2024 07:32,05/01/2024 16:05,512,48.2\n101,,05/02/2024,05/02/2024,90,\n"
            ),
        );

        let visits = load_report(&path).unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].asset, "101");
        assert_eq!(visits[0].driver.as_deref(), Some("J. Ortiz"));
        assert_eq!(visits[0].minutes_on_site, 512.0);
        assert_eq!(visits[0].distance_mi, Some(48.2));
        assert_eq!(visits[0].report, "12345 - Site A");
        assert_eq!(visits[0].row, 2);
        assert_eq!(visits[1].driver, None);
        assert_eq!(visits[1].distance_mi, None);
        assert_eq!(visits[1].row, 3);
    }

    #[test]
    fn test_columns_resolved_by_name_not_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(
            dir.path(),
            "12345 - Site A.csv",
            "Driver,Asset,Time on Site (Minutes),Departure,Arrival\nJ. Ortiz,101,60,05/02/2024,05/01/2024\n",
        );

        let visits = load_report(&path).unwrap();
        assert_eq!(visits[0].asset, "101");
        assert_eq!(visits[0].arrival, "05/01/2024");
        assert_eq!(visits[0].departure, "05/02/2024");
        assert_eq!(visits[0].distance_mi, None);
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(
            dir.path(),
            "12345 - Site A.csv",
            "Asset,Driver,Arrival,Departure\n101,J. Ortiz,05/01/2024,05/01/2024\n",
        );

        let err = load_report(&path).unwrap_err();
        match err {
            Error::MissingColumn { report, column } => {
                assert_eq!(report, "12345 - Site A");
                assert_eq!(column, "Time on Site (Minutes)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_minutes_default_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(
            dir.path(),
            "41022 - Yard.csv",
            &format!("{HEADER}\n101,J. Ortiz,05/01/2024,05/01/2024,,\n"),
        );

        let visits = load_report(&path).unwrap();
        assert_eq!(visits[0].minutes_on_site, 0.0);
    }

    #[test]
    fn test_bad_minutes_cell_reports_row_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(
            dir.path(),
            "41022 - Yard.csv",
            &format!("{HEADER}\n101,J. Ortiz,05/01/2024,05/01/2024,60,\n101,J. Ortiz,05/02/2024,05/02/2024,n/a,\n"),
        );

        let err = load_report(&path).unwrap_err();
        match err {
            Error::MalformedNumber { row, column, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "Time on Site (Minutes)");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_thousands_separator_in_minutes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(
            dir.path(),
            "41022 - Yard.csv",
            &format!("{HEADER}\n101,J. Ortiz,05/01/2024,05/20/2024,\"1,440\",\n"),
        );

        let visits = load_report(&path).unwrap();
        assert_eq!(visits[0].minutes_on_site, 1440.0);
    }

    #[test]
    fn test_load_reports_walks_csv_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_report(
            dir.path(),
            "40117 - Route 5.csv",
            &format!("{HEADER}\n202,B. Chen,05/01/2024,05/01/2024,300,\n"),
        );
        write_report(
            dir.path(),
            "12345 - Site A.csv",
            &format!("{HEADER}\n101,J. Ortiz,05/01/2024,05/01/2024,60,\n"),
        );
        // not a report, must be ignored
        fs::write(dir.path().join("notes.txt"), "scratch").unwrap();

        let visits = load_reports(dir.path()).unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].report, "12345 - Site A");
        assert_eq!(visits[1].report, "40117 - Route 5");
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_reports(dir.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput { .. }));
    }
}
