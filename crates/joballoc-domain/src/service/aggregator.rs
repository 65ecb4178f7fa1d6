//! Visit aggregation

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{AggregatedRow, Visit};

type GroupKey = (String, String, String, String, NaiveDate, NaiveDate);

/// Collapse cleaned visits into one row per (asset, driver, job, job name,
/// arrival, departure), summing minutes and hours.
///
/// Key equality is exact; output rows are ordered by the grouping key, so
/// repeated runs produce identical tables. Re-aggregating the output is a
/// no-op.
pub fn aggregate_visits(visits: &[Visit]) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<GroupKey, (f64, f64)> = BTreeMap::new();

    for v in visits {
        let key = (
            v.asset.clone(),
            v.driver.clone(),
            v.job.clone(),
            v.job_name.clone(),
            v.arrival,
            v.departure,
        );
        let sums = groups.entry(key).or_insert((0.0, 0.0));
        sums.0 += v.minutes_on_site;
        sums.1 += v.hours;
    }

    groups
        .into_iter()
        .map(|((asset, driver, job, job_name, arrival, departure), (minutes, hours))| {
            AggregatedRow {
                asset,
                driver,
                job,
                job_name,
                arrival,
                departure,
                minutes_on_site: minutes,
                hours,
                days: occupancy_days(hours),
            }
        })
        .collect()
}

/// Occupancy-day count for a visit group: four hours or less does not
/// count as a day; above that, every full eight hours is a day, with a
/// minimum of one.
pub fn occupancy_days(hours: f64) -> u32 {
    if hours > 4.0 {
        ((hours / 8.0).floor() as u32).max(1)
    } else {
        0
    }
}
