// src/report.rs
//! Month view over week records, the way the chart front end lays them out:
//! months ascending, newest week first inside each month. A week belongs to
//! the month of its Sunday.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::Datelike;

use crate::model::WeekRecord;

pub const DAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

#[derive(Clone, Debug, PartialEq)]
pub struct MonthGroup {
    /// `"YYYY-MM"`
    pub key: String,
    pub weeks: Vec<WeekRecord>,
}

pub fn group_by_month(weeks: &[WeekRecord]) -> Vec<MonthGroup> {
    let mut months: BTreeMap<String, Vec<WeekRecord>> = BTreeMap::new();
    for w in weeks {
        let start = w.week_start();
        let key = format!("{:04}-{:02}", start.year(), start.month());
        months.entry(key).or_default().push(w.clone());
    }

    months
        .into_iter()
        .map(|(key, mut weeks)| {
            weeks.sort_by(|a, b| b.week_start().cmp(&a.week_start()));
            MonthGroup { key, weeks }
        })
        .collect()
}

impl MonthGroup {
    pub fn total_hours(&self) -> f64 {
        self.weeks.iter().map(WeekRecord::total_hours).sum()
    }

    /// Plain-text table, one line per week.
    pub fn render(&self) -> String {
        let mut out = s!();
        let _ = writeln!(out, "== {} ==", self.key);

        let _ = write!(out, "{:<12}", "Semana");
        for label in DAY_LABELS {
            let _ = write!(out, "{label:>7}");
        }
        let _ = writeln!(out, "{:>8}{:>7}", "Total", "Meta");

        for w in &self.weeks {
            let _ = write!(out, "{:<12}", w.week_start_iso());
            for h in w.daily_hours() {
                let _ = write!(out, "{h:>7.2}");
            }
            let mark = if w.total_hours() >= w.weekly_goal_hours() { " ✓" } else { "" };
            let _ = writeln!(out, "{:>8.2}{:>7.1}{mark}", w.total_hours(), w.weekly_goal_hours());
        }
        out
    }
}
