//! Monthly bucketing for the trend line.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use crime_dashboard_analytics_models::{MonthlyCount, TimeSeries, TrendPoint};
use crime_dashboard_crime_models::Incident;

/// Counts incidents per `(year, month)`, chronologically. Months without
/// incidents are absent.
#[must_use]
pub fn aggregate_by_month(filtered: &[&Incident]) -> TimeSeries {
    let mut buckets: BTreeMap<(i32, u8), u64> = BTreeMap::new();
    for incident in filtered {
        *buckets.entry((incident.year, incident.month)).or_insert(0) += 1;
    }

    TimeSeries(
        buckets
            .into_iter()
            .map(|((year, month), count)| MonthlyCount { year, month, count })
            .collect(),
    )
}

/// Axis label for a month: `Jun` within a single year, `Jun 15` across
/// years.
#[must_use]
pub fn month_label(date: NaiveDate, single_year: bool) -> String {
    if single_year {
        date.format("%b").to_string()
    } else {
        date.format("%b %y").to_string()
    }
}

/// Converts a series into labelled trend points dated on the first of each
/// month. Buckets that do not form a valid date are skipped.
#[must_use]
pub fn trend_points(series: &TimeSeries, single_year: bool) -> Vec<TrendPoint> {
    series
        .0
        .iter()
        .filter_map(|bucket| {
            let date = NaiveDate::from_ymd_opt(bucket.year, u32::from(bucket.month), 1)?;
            Some(TrendPoint {
                date,
                label: month_label(date, single_year),
                count: bucket.count,
            })
        })
        .collect()
}
