// Date availability - which calendar days fully cover the preferred window
use crate::domain::preference::TimeWindow;
use crate::domain::reading::Reading;
use chrono::{Datelike, Days, NaiveDate, TimeZone, Timelike, Weekday};
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_BUFFER_HOURS: f64 = 2.0;

/// Earliest and latest timestamp (seconds) in a collection.
pub fn available_time_range(readings: &[Reading]) -> Option<(i64, i64)> {
    let first = readings.iter().map(|r| r.timestamp).min()?;
    let last = readings.iter().map(|r| r.timestamp).max()?;
    Some((first, last))
}

/// Readings within `[start - buffer, end + buffer]`. Input must be sorted.
pub fn readings_for_range(readings: &[Reading], start: i64, end: i64, buffer_hours: f64) -> &[Reading] {
    let buffer = (buffer_hours * 3600.0).round() as i64;
    let lower = readings.partition_point(|r| r.timestamp < start - buffer);
    let upper = readings.partition_point(|r| r.timestamp <= end + buffer);
    if lower >= upper {
        return &[];
    }
    &readings[lower..upper]
}

/// First and last second of `window` on `date`. A wrapping window ends on the
/// following morning.
pub fn day_window_bounds<Tz: TimeZone>(date: NaiveDate, window: &TimeWindow, tz: &Tz) -> Option<(i64, i64)> {
    let end_date = if window.wraps() {
        date.checked_add_days(Days::new(1))?
    } else {
        date
    };
    let start = tz
        .from_local_datetime(&date.and_hms_opt(window.start_hour, 0, 0)?)
        .earliest()?;
    let end = tz
        .from_local_datetime(&end_date.and_hms_opt(window.end_hour, 59, 59)?)
        .latest()?;
    Some((start.timestamp(), end.timestamp()))
}

/// Local calendar days, from the first to the last observed, on which every
/// hour of `window` has at least one reading. For a wrapping window both the
/// evening hours and the morning hours must appear on that same day.
pub fn available_dates<Tz: TimeZone>(readings: &[Reading], window: &TimeWindow, tz: &Tz) -> Vec<NaiveDate> {
    let mut hours_by_date: BTreeMap<NaiveDate, HashSet<u32>> = BTreeMap::new();
    for reading in readings {
        if let Some(local) = reading.local_datetime(tz) {
            hours_by_date
                .entry(local.date_naive())
                .or_default()
                .insert(local.hour());
        }
    }

    let (Some(first), Some(last)) = (
        hours_by_date.keys().next().copied(),
        hours_by_date.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let required = window.hours();
    let dates: Vec<NaiveDate> = first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| {
            hours_by_date
                .get(day)
                .is_some_and(|hours| required.iter().all(|h| hours.contains(h)))
        })
        .collect();

    tracing::debug!(
        "{} of {} days cover hours {}..={}",
        dates.len(),
        hours_by_date.len(),
        window.start_hour,
        window.end_hour
    );

    dates
}

/// Keep dates falling on `preferred` (all dates when `None`), most recent first.
pub fn filter_by_weekday(dates: &[NaiveDate], preferred: Option<Weekday>) -> Vec<NaiveDate> {
    let mut filtered: Vec<NaiveDate> = dates
        .iter()
        .copied()
        .filter(|date| preferred.is_none_or(|day| date.weekday() == day))
        .collect();
    filtered.sort_unstable_by(|a, b| b.cmp(a));
    filtered
}
