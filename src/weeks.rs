// src/weeks.rs
//! Buckets per-day hours into Sunday-anchored weeks.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{HarvestError, Result};
use crate::model::{RawDayEntry, WeekRecord};

/// `"01/06/2024 - Sáb"` → 2024-06-01. Only the part before the first `" - "` counts.
pub fn parse_entry_date(text: &str) -> Result<NaiveDate> {
    let head = text.split(" - ").next().unwrap_or("").trim();
    NaiveDate::parse_from_str(head, "%d/%m/%Y").map_err(|_| HarvestError::InvalidDate(s!(text)))
}

/// 0 = Sunday … 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(weekday_index(date) as u64)
}

/// One record per distinct week start, ascending.
///
/// A day seen twice keeps the last value (no summing), which absorbs the
/// walker's re-read of its start page. Any unparseable date fails the whole
/// aggregation.
pub fn aggregate_weeks(days: &[RawDayEntry], weekly_goal_hours: f64) -> Result<Vec<WeekRecord>> {
    let mut slots: BTreeMap<NaiveDate, [f64; 7]> = BTreeMap::new();

    for day in days {
        let date = parse_entry_date(&day.date)?;
        let week = slots.entry(week_start(date)).or_insert([0.0; 7]);
        week[weekday_index(date)] = day.hours_worked;
    }

    logd!("{} days → {} weeks", days.len(), slots.len());

    Ok(slots
        .into_iter()
        .map(|(start, hours)| WeekRecord::from_days(start, hours, weekly_goal_hours))
        .collect())
}
