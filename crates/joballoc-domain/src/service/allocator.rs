//! Allocation derivation: asset job totals, billing summary, percentage,
//! and the pickup-repair cost line.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use joballoc_types::Result;

use crate::model::{AggregatedRow, AnalysisRow, SummaryRow, Visit, OVERHEAD_JOB};
use crate::service::calendar::business_day_split;

/// Tunable business constants, normally sourced from the app config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationSettings {
    /// Assets on at least this many distinct jobs count as overhead
    pub overhead_job_threshold: u32,
    /// Business days at or above this mean a full-month allocation
    pub full_allocation_business_days: u32,
    /// Assumed working days per month for the pro-rata fraction
    pub working_days_per_month: u32,
    /// Monthly pickup repair cost in dollars
    pub monthly_pickup_cost: f64,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            overhead_job_threshold: 4,
            full_allocation_business_days: 14,
            working_days_per_month: 21,
            monthly_pickup_cost: 620.0,
        }
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Grouping key for a 2-decimal-rounded hours figure: the hundredths
/// value as an integer, so grouping is exact.
fn hundredths(hours: f64) -> i64 {
    (hours * 100.0).round() as i64
}

/// Extend aggregated rows with asset-level figures and the calendar split.
///
/// Job-total hours and distinct-job counts are computed over the FULL
/// cleaned visit table, not just the rows of the current group: an
/// asset's standing is judged across everything it did in the month.
pub fn analyze_rows(aggregated: &[AggregatedRow], cleaned: &[Visit]) -> Result<Vec<AnalysisRow>> {
    let job_hours = job_total_hours(cleaned);
    let jobs_per_asset = total_jobs_per_asset(cleaned);

    aggregated
        .iter()
        .map(|row| {
            let (business_days, weekend_days) = business_day_split(row)?;
            let job_total = job_hours
                .get(&(row.asset.clone(), row.job.clone()))
                .copied()
                .unwrap_or(0.0);
            let total_jobs = jobs_per_asset.get(&row.asset).copied().unwrap_or(0);
            Ok(AnalysisRow {
                row: row.clone(),
                job_total_hours: job_total,
                total_jobs,
                business_days,
                weekend_days,
            })
        })
        .collect()
}

/// Hours per (asset, job) over all cleaned visits, rounded to 2 decimals
fn job_total_hours(cleaned: &[Visit]) -> HashMap<(String, String), f64> {
    let mut totals: HashMap<(String, String), f64> = HashMap::new();
    for v in cleaned {
        *totals
            .entry((v.asset.clone(), v.job.clone()))
            .or_insert(0.0) += v.hours;
    }
    totals
        .into_iter()
        .map(|(key, hours)| (key, round2(hours)))
        .collect()
}

/// Distinct non-Overhead jobs per asset over all cleaned visits. Assets
/// with only Overhead work are absent (their count is 0).
fn total_jobs_per_asset(cleaned: &[Visit]) -> HashMap<String, u32> {
    let mut jobs: HashMap<String, BTreeSet<&str>> = HashMap::new();
    for v in cleaned {
        if v.job != OVERHEAD_JOB {
            jobs.entry(v.asset.clone()).or_default().insert(&v.job);
        }
    }
    jobs.into_iter()
        .map(|(asset, set)| (asset, set.len() as u32))
        .collect()
}

type SummaryKey = (String, String, String, String, i64, u32);

/// Regroup analysis rows into the billing summary and derive the
/// allocation percentage and pickup-repair cost per row.
pub fn summarize(analysis: &[AnalysisRow], settings: &AllocationSettings) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<SummaryKey, (f64, u32, u32)> = BTreeMap::new();

    for a in analysis {
        let key = (
            a.row.asset.clone(),
            a.row.driver.clone(),
            a.row.job.clone(),
            a.row.job_name.clone(),
            hundredths(a.job_total_hours),
            a.total_jobs,
        );
        let sums = groups.entry(key).or_insert((0.0, 0, 0));
        sums.0 += a.row.hours;
        sums.1 += a.business_days;
        sums.2 += a.weekend_days;
    }

    let mut rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|(key, (hours, business_days, weekend_days))| {
            let (asset, driver, job, job_name, hours_key, total_jobs) = key;
            let mut row = SummaryRow {
                asset,
                driver,
                job,
                job_name,
                job_total_hours: hours_key as f64 / 100.0,
                total_jobs,
                hours: round2(hours),
                business_days,
                weekend_days,
                allocation_pct: 0.0,
                pickup_repair: 0.0,
            };
            row.allocation_pct = allocation_pct(&row, settings);
            row
        })
        .collect();

    apply_single_winner(&mut rows);

    for row in &mut rows {
        row.pickup_repair = round2(row.allocation_pct * settings.monthly_pickup_cost);
    }

    rows
}

/// Allocation percentage before the single-winner pass, evaluated in
/// precedence order: spread across too many jobs → 0, a near-full month
/// of business days → 1.00, Overhead → 0, otherwise pro-rata business
/// days over the working month.
fn allocation_pct(row: &SummaryRow, settings: &AllocationSettings) -> f64 {
    if row.total_jobs >= settings.overhead_job_threshold {
        0.0
    } else if row.business_days >= settings.full_allocation_business_days {
        1.0
    } else if row.job == OVERHEAD_JOB {
        0.0
    } else {
        round2(row.business_days as f64 / settings.working_days_per_month as f64)
    }
}

/// Keep the allocation only on the first row holding each asset's maximum
/// percentage; every other row for that asset is forced to zero. When the
/// maximum is zero nothing qualifies and all rows stay zero.
///
/// Rows arrive in summary-table order (ascending grouping key), so the
/// winner is deterministic across runs even when percentages tie.
fn apply_single_winner(rows: &mut [SummaryRow]) {
    let mut max_by_asset: HashMap<String, f64> = HashMap::new();
    for row in rows.iter() {
        let max = max_by_asset.entry(row.asset.clone()).or_insert(0.0);
        if row.allocation_pct > *max {
            *max = row.allocation_pct;
        }
    }

    let mut winner_taken: HashSet<String> = HashSet::new();
    for row in rows.iter_mut() {
        let max = max_by_asset[&row.asset];
        let wins = max > 0.0 && row.allocation_pct == max && winner_taken.insert(row.asset.clone());
        if !wins {
            row.allocation_pct = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn visit(asset: &str, job: &str, hours: f64) -> Visit {
        Visit {
            asset: asset.to_string(),
            driver: "J. Ortiz".to_string(),
            job: job.to_string(),
            job_name: format!("Job {job}"),
            arrival: date(1),
            departure: date(1),
            minutes_on_site: hours * 60.0,
            hours,
        }
    }

    fn agg(asset: &str, job: &str, from: u32, to: u32, hours: f64) -> AggregatedRow {
        AggregatedRow {
            asset: asset.to_string(),
            driver: "J. Ortiz".to_string(),
            job: job.to_string(),
            job_name: format!("Job {job}"),
            arrival: date(from),
            departure: date(to),
            minutes_on_site: hours * 60.0,
            hours,
            days: 1,
        }
    }

    fn analysis(asset: &str, job: &str, business_days: u32, total_jobs: u32) -> AnalysisRow {
        AnalysisRow {
            row: agg(asset, job, 1, 1, 8.0),
            job_total_hours: 8.0,
            total_jobs,
            business_days,
            weekend_days: 0,
        }
    }

    #[test]
    fn test_job_totals_span_all_visits_for_the_asset() {
        // Two aggregated groups of the same asset+job; the job total must
        // cover both, not just the group's own hours
        let cleaned = vec![visit("101", "12345", 3.0), visit("101", "12345", 5.5)];
        let aggregated = vec![agg("101", "12345", 1, 1, 3.0), agg("101", "12345", 2, 2, 5.5)];
        let rows = analyze_rows(&aggregated, &cleaned).unwrap();
        assert_eq!(rows[0].job_total_hours, 8.5);
        assert_eq!(rows[1].job_total_hours, 8.5);
    }

    #[test]
    fn test_total_jobs_counts_distinct_non_overhead() {
        let cleaned = vec![
            visit("101", "12345", 1.0),
            visit("101", "12345", 1.0),
            visit("101", "67890", 1.0),
            visit("101", OVERHEAD_JOB, 1.0),
        ];
        let aggregated = vec![agg("101", "12345", 1, 1, 2.0)];
        let rows = analyze_rows(&aggregated, &cleaned).unwrap();
        assert_eq!(rows[0].total_jobs, 2);
    }

    #[test]
    fn test_overhead_only_asset_has_zero_total_jobs() {
        let cleaned = vec![visit("102", OVERHEAD_JOB, 6.0)];
        let aggregated = vec![agg("102", OVERHEAD_JOB, 1, 1, 6.0)];
        let rows = analyze_rows(&aggregated, &cleaned).unwrap();
        assert_eq!(rows[0].total_jobs, 0);
    }

    #[test]
    fn test_full_month_short_circuits_to_one() {
        // 15 business days beats the pro-rata path even though 15/21 < 1
        let rows = summarize(&[analysis("101", "12345", 15, 1)], &AllocationSettings::default());
        assert_eq!(rows[0].allocation_pct, 1.0);
    }

    #[test]
    fn test_pro_rata_allocation() {
        let rows = summarize(&[analysis("101", "12345", 7, 1)], &AllocationSettings::default());
        assert_eq!(rows[0].allocation_pct, 0.33);
        assert_eq!(rows[0].pickup_repair, 204.6);
    }

    #[test]
    fn test_overhead_job_gets_zero() {
        let rows = summarize(
            &[analysis("101", OVERHEAD_JOB, 10, 1)],
            &AllocationSettings::default(),
        );
        assert_eq!(rows[0].allocation_pct, 0.0);
        assert_eq!(rows[0].pickup_repair, 0.0);
    }

    #[test]
    fn test_too_many_jobs_zeroes_everything() {
        // Asset on 5 distinct jobs counts as overhead regardless of days
        let rows = summarize(
            &[
                analysis("101", "11111", 15, 5),
                analysis("101", "22222", 9, 5),
            ],
            &AllocationSettings::default(),
        );
        assert!(rows.iter().all(|r| r.allocation_pct == 0.0));
    }

    #[test]
    fn test_single_winner_keeps_only_the_max() {
        let rows = summarize(
            &[
                analysis("101", "11111", 5, 2),
                analysis("101", "22222", 9, 2),
            ],
            &AllocationSettings::default(),
        );
        let winners: Vec<&SummaryRow> = rows.iter().filter(|r| r.allocation_pct > 0.0).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].job, "22222");
        assert_eq!(winners[0].allocation_pct, 0.43);
    }

    #[test]
    fn test_tied_maximum_goes_to_first_row_in_order() {
        let rows = summarize(
            &[
                analysis("101", "22222", 7, 2),
                analysis("101", "11111", 7, 2),
            ],
            &AllocationSettings::default(),
        );
        // Summary order is ascending by job, so "11111" comes first
        assert_eq!(rows[0].job, "11111");
        assert_eq!(rows[0].allocation_pct, 0.33);
        assert_eq!(rows[1].job, "22222");
        assert_eq!(rows[1].allocation_pct, 0.0);
    }

    #[test]
    fn test_winner_sum_property() {
        // Per asset, the post-constraint sum equals one row's value or zero
        let rows = summarize(
            &[
                analysis("101", "11111", 4, 3),
                analysis("101", "22222", 6, 3),
                analysis("101", "33333", 2, 3),
                analysis("102", OVERHEAD_JOB, 3, 0),
            ],
            &AllocationSettings::default(),
        );
        let sum_101: f64 = rows
            .iter()
            .filter(|r| r.asset == "101")
            .map(|r| r.allocation_pct)
            .sum();
        assert_eq!(sum_101, 0.29); // round(6/21, 2)
        let sum_102: f64 = rows
            .iter()
            .filter(|r| r.asset == "102")
            .map(|r| r.allocation_pct)
            .sum();
        assert_eq!(sum_102, 0.0);
    }

    #[test]
    fn test_allocation_pct_stays_in_unit_range() {
        let settings = AllocationSettings::default();
        for bd in 0..25 {
            let rows = summarize(&[analysis("101", "12345", bd, 1)], &settings);
            assert!(rows[0].allocation_pct >= 0.0 && rows[0].allocation_pct <= 1.0);
            assert_eq!(
                rows[0].pickup_repair,
                round2(rows[0].allocation_pct * settings.monthly_pickup_cost)
            );
        }
    }

    #[test]
    fn test_summary_groups_split_by_driver() {
        let mut a = analysis("101", "12345", 7, 1);
        let mut b = analysis("101", "12345", 7, 1);
        a.row.driver = "J. Ortiz".to_string();
        b.row.driver = "M. Reyes".to_string();
        let rows = summarize(&[a, b], &AllocationSettings::default());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_summary_sums_hours_and_days() {
        let mut a = analysis("101", "12345", 3, 1);
        let mut b = analysis("101", "12345", 4, 1);
        a.row.hours = 10.255;
        b.row.hours = 5.125;
        a.weekend_days = 1;
        b.weekend_days = 1;
        let rows = summarize(&[a, b], &AllocationSettings::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hours, 15.38);
        assert_eq!(rows[0].business_days, 7);
        assert_eq!(rows[0].weekend_days, 2);
    }
}
