//! Business-day and weekend-day counting

use chrono::{Datelike, NaiveDate, Weekday};
use joballoc_types::{Error, Result};

use crate::model::AggregatedRow;

/// Count Monday–Friday days in the inclusive range. Holidays are not
/// observed. Returns 0 when start is after end.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    count_days(start, end, |d| {
        !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
    })
}

/// Count Saturdays and Sundays in the inclusive range. Returns 0 when
/// start is after end.
pub fn weekend_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    count_days(start, end, |d| {
        matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
    })
}

fn count_days(start: NaiveDate, end: NaiveDate, pred: impl Fn(NaiveDate) -> bool) -> u32 {
    if start > end {
        return 0;
    }
    let mut count = 0;
    let mut day = start;
    loop {
        if pred(day) {
            count += 1;
        }
        if day == end {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}

/// Business/weekend day counts for one aggregated row.
///
/// A same-day visit counts one business day only when it ran longer than
/// four hours; weekend days always come straight off the calendar, so a
/// five-hour Saturday visit counts as one business day AND one weekend
/// day. That asymmetry is the billing rule, not an accident.
///
/// Arrival after departure is invalid input and fails the run.
pub fn business_day_split(row: &AggregatedRow) -> Result<(u32, u32)> {
    if row.arrival > row.departure {
        return Err(Error::InvalidDateRange {
            asset: row.asset.clone(),
            arrival: row.arrival,
            departure: row.departure,
        });
    }

    let business_days = if row.arrival == row.departure {
        u32::from(row.hours > 4.0)
    } else {
        business_days_between(row.arrival, row.departure)
    };
    let weekend_days = weekend_days_between(row.arrival, row.departure);

    Ok((business_days, weekend_days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(arrival: NaiveDate, departure: NaiveDate, hours: f64) -> AggregatedRow {
        AggregatedRow {
            asset: "101".to_string(),
            driver: "J. Ortiz".to_string(),
            job: "12345".to_string(),
            job_name: "Site A".to_string(),
            arrival,
            departure,
            minutes_on_site: hours * 60.0,
            hours,
            days: 0,
        }
    }

    #[test]
    fn test_single_weekday_over_four_hours() {
        // 2024-05-01 is a Wednesday
        let (bd, wd) = business_day_split(&row(date(2024, 5, 1), date(2024, 5, 1), 5.0)).unwrap();
        assert_eq!(bd, 1);
        assert_eq!(wd, 0);
    }

    #[test]
    fn test_single_day_at_four_hours_is_zero() {
        let (bd, _) = business_day_split(&row(date(2024, 5, 1), date(2024, 5, 1), 4.0)).unwrap();
        assert_eq!(bd, 0);
    }

    #[test]
    fn test_two_week_span() {
        // Mon 2024-05-06 through Mon 2024-05-20: 11 weekdays, 2 Sat + 2 Sun
        let (bd, wd) = business_day_split(&row(date(2024, 5, 6), date(2024, 5, 20), 40.0)).unwrap();
        assert_eq!(bd, 11);
        assert_eq!(wd, 4);
    }

    #[test]
    fn test_saturday_single_day_counts_both_ways() {
        // 2024-05-04 is a Saturday; the hours rule still grants a business
        // day while the calendar counts it as a weekend day
        let (bd, wd) = business_day_split(&row(date(2024, 5, 4), date(2024, 5, 4), 6.0)).unwrap();
        assert_eq!(bd, 1);
        assert_eq!(wd, 1);
    }

    #[test]
    fn test_weekend_only_span() {
        // Sat 2024-05-04 through Sun 2024-05-05
        let (bd, wd) = business_day_split(&row(date(2024, 5, 4), date(2024, 5, 5), 10.0)).unwrap();
        assert_eq!(bd, 0);
        assert_eq!(wd, 2);
    }

    #[test]
    fn test_arrival_after_departure_fails() {
        let err = business_day_split(&row(date(2024, 5, 10), date(2024, 5, 1), 8.0)).unwrap_err();
        match err {
            Error::InvalidDateRange { asset, arrival, departure } => {
                assert_eq!(asset, "101");
                assert_eq!(arrival, date(2024, 5, 10));
                assert_eq!(departure, date(2024, 5, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_full_month_of_may_2024() {
        assert_eq!(business_days_between(date(2024, 5, 1), date(2024, 5, 31)), 23);
        assert_eq!(weekend_days_between(date(2024, 5, 1), date(2024, 5, 31)), 8);
    }
}
