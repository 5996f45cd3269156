// src/model.rs
//! Data shapes flowing through a harvest: credential in, raw page rows,
//! per-day entries, week records out.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Portal login. Lives for one harvest call only.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub identifier: String,
    pub secret: String,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), secret: secret.into() }
    }
}

// never print the secret
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"***")
            .finish()
    }
}

/// One `<td>` as the portal rendered it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCell {
    /// Visible text, tags stripped, whitespace collapsed.
    pub text: String,
    /// Text of each `<span>` inside the cell, in document order.
    pub spans: Vec<String>,
}

impl RawCell {
    pub fn text(text: &str) -> Self {
        Self { text: s!(text), spans: Vec::new() }
    }

    pub fn spans<I, S>(spans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spans: Vec<String> = spans.into_iter().map(Into::into).collect();
        Self { text: spans.join(" "), spans }
    }
}

/// One `<tr>` of the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Carries the day-row marker (`tr.maozinha` on the portal).
    pub day_row: bool,
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn day(cells: Vec<RawCell>) -> Self {
        Self { day_row: true, cells }
    }
}

/// Hours worked on one day, date still in the portal's display format
/// (`"DD/MM/YYYY - Seg"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDayEntry {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "horas")]
    pub hours_worked: f64,
}

impl RawDayEntry {
    pub fn new(date: impl Into<String>, hours_worked: f64) -> Self {
        Self { date: date.into(), hours_worked }
    }
}

/// Clock-in/clock-out pair, minutes since midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: u32,
    pub end: u32,
}

impl TimeInterval {
    /// `end - start`; negative when the pair is out of order.
    pub fn minutes(&self) -> i32 {
        self.end as i32 - self.start as i32
    }
}

/// One Sunday-anchored week. Slot 0 is Sunday, slot 6 Saturday.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeekRecord {
    #[serde(rename = "semana")]
    week_start: NaiveDate,
    #[serde(rename = "dias")]
    daily_hours: [f64; 7],
    #[serde(rename = "total")]
    total_hours: f64,
    #[serde(rename = "meta")]
    weekly_goal_hours: f64,
}

impl WeekRecord {
    /// The total is summed here, slot by slot, so it always equals the slots' sum.
    pub fn from_days(week_start: NaiveDate, daily_hours: [f64; 7], weekly_goal_hours: f64) -> Self {
        let total_hours = daily_hours.iter().sum();
        Self { week_start, daily_hours, total_hours, weekly_goal_hours }
    }

    pub fn week_start(&self) -> NaiveDate { self.week_start }

    /// ISO form of the bucket key, e.g. `"2024-05-26"`.
    pub fn week_start_iso(&self) -> String {
        self.week_start.format("%Y-%m-%d").to_string()
    }

    pub fn daily_hours(&self) -> &[f64; 7] { &self.daily_hours }
    pub fn total_hours(&self) -> f64 { self.total_hours }
    pub fn weekly_goal_hours(&self) -> f64 { self.weekly_goal_hours }

    /// Hours left to reach the goal; negative when it was exceeded.
    pub fn balance(&self) -> f64 {
        self.weekly_goal_hours - self.total_hours
    }
}

/// Response envelope the HTTP layer hands to the chart front end.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HarvestOutput {
    pub dados: Vec<WeekRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Previous => f.write_str("previous"),
            Direction::Next => f.write_str("next"),
        }
    }
}

/// Page elements the harvest waits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The identifier input of the login form (`#txtIdentificacao`).
    LoginForm,
    /// The topmost date cell of the consult table (`td[label='Data']`).
    DateCell,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::LoginForm => f.write_str("login form"),
            Marker::DateCell => f.write_str("date cell"),
        }
    }
}

/// Handle to a navigation link found on the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affordance {
    pub direction: Direction,
    /// Implementation-defined; the HTTP portal stores the resolved link URL.
    pub target: String,
}
