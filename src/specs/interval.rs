// src/specs/interval.rs
//! Clock tokens (`HH:MM`, 24-hour) and the minutes between two of them.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::TimeInterval;

static CLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap());

/// Exactly two ASCII digits, a colon, two ASCII digits. Labels and icons in the punch
/// cell fail this and are dropped before any arithmetic.
pub fn is_clock_token(s: &str) -> bool {
    CLOCK.is_match(s)
}

/// Minutes since midnight, `h*60 + m`. No range check: `25:70` is 1570.
pub fn parse_clock(token: &str) -> Option<u32> {
    if !is_clock_token(token) {
        return None;
    }
    let (h, m) = token.split_once(':')?;
    Some(h.parse::<u32>().ok()? * 60 + m.parse::<u32>().ok()?)
}

/// `(h2*60+m2) - (h1*60+m1)`. Negative when `end` is earlier than `start`.
pub fn minutes_between(start: &str, end: &str) -> Option<i32> {
    interval(start, end).map(|iv| iv.minutes())
}

pub fn interval(start: &str, end: &str) -> Option<TimeInterval> {
    Some(TimeInterval { start: parse_clock(start)?, end: parse_clock(end)? })
}
