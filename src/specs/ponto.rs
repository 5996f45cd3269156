// src/specs/ponto.rs
//! Reading rules for the time-clock consult page (`/core/Ponto/Consulta`).
//!
//! Page shape:
//! - one table, one `<tr class="maozinha">` per day;
//! - cell 0 is the date (`td[label='Data']`, text `"01/06/2024 - Sáb"`);
//! - cell 2 holds one `<span>` per punch (`08:00`, `12:00`, …) mixed with
//!   labels and icons;
//! - pagination links are plain anchors floated left (previous period) and
//!   right (next period). A missing link means there is nothing further.
//!
//! Two layers:
//! - `parse_rows` / `top_date` / `find_nav_link` read HTML (used by the HTTP portal);
//! - `extract_days` turns raw rows into per-day hours, whatever produced the rows.

use crate::config::consts::{DATE_CELL, IDENTIFIER_FIELD_ID, MIN_DAY_CELLS, PUNCH_CELL};
use crate::core::html::{attr, block_text, has_class, opener, openers, tag_blocks};
use crate::model::{Direction, Marker, RawCell, RawDayEntry, RawRow};
use crate::specs::interval::{interval, is_clock_token};

const DAY_ROW_CLASS: &str = "maozinha";
const DATE_LABEL: &str = "Data";

/* ---------------- rows → days ---------------- */

/// Per-day hours for one page, in row order.
///
/// Rows without the day marker or with fewer than three cells are skipped.
/// Punches pair up in order (in, out, in, out…); a trailing clock-in with no
/// clock-out is dropped, and so is a pair whose out precedes its in.
pub fn extract_days(rows: &[RawRow]) -> Vec<RawDayEntry> {
    let mut out = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if !row.day_row {
            continue;
        }
        if row.cells.len() < MIN_DAY_CELLS {
            logd!("Row {i}: {} cells, skipped", row.cells.len());
            continue;
        }

        let date = row.cells[DATE_CELL].text.trim().to_string();
        let tokens = clock_tokens(&row.cells[PUNCH_CELL]);
        let minutes = worked_minutes(&date, &tokens);

        out.push(RawDayEntry::new(date, hours_2dp(minutes)));
    }
    out
}

/// Punch tokens of a cell, in order, non-clock text removed.
pub fn clock_tokens(cell: &RawCell) -> Vec<&str> {
    cell.spans
        .iter()
        .map(|s| s.trim())
        .filter(|t| is_clock_token(t))
        .collect()
}

fn worked_minutes(date: &str, tokens: &[&str]) -> u32 {
    let pairs = tokens.chunks_exact(2);
    if let [open] = pairs.remainder() {
        logd!("{date}: clock-in {open} has no clock-out, ignored");
    }

    let mut total = 0u32;
    for pair in pairs {
        let Some(iv) = interval(pair[0], pair[1]) else { continue };
        match u32::try_from(iv.minutes()) {
            Ok(m) => total += m,
            Err(_) => logd!("{date}: {}–{} runs backwards, ignored", pair[0], pair[1]),
        }
    }
    total
}

/// Minutes → hours, rounded to two decimals.
pub fn hours_2dp(minutes: u32) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/* ---------------- HTML readers ---------------- */

/// Every `<tr>` of the page as raw cells. Day rows are flagged, not filtered.
pub fn parse_rows(doc: &str) -> Vec<RawRow> {
    tag_blocks(doc, "tr")
        .map(|tr| RawRow {
            day_row: has_class(opener(tr), DAY_ROW_CLASS),
            cells: tag_blocks(tr, "td").map(parse_cell).collect(),
        })
        .collect()
}

fn parse_cell(td: &str) -> RawCell {
    RawCell {
        text: block_text(td),
        spans: tag_blocks(td, "span").map(block_text).collect(),
    }
}

/// Text of the topmost date cell. It changes whenever a new period renders,
/// which makes it the completion signal for pagination.
pub fn top_date(doc: &str) -> Option<String> {
    tag_blocks(doc, "td")
        .find(|td| attr(opener(td), "label").as_deref() == Some(DATE_LABEL))
        .map(block_text)
}

/// `href` of the pagination link for `direction`, if the page shows one.
pub fn find_nav_link(doc: &str, direction: Direction) -> Option<String> {
    let wanted = match direction {
        Direction::Previous => "float:left",
        Direction::Next => "float:right",
    };
    openers(doc, "a")
        .into_iter()
        .find(|a| {
            attr(a, "style")
                .map(|st| {
                    let st: String = st.chars().filter(|c| !c.is_whitespace()).collect();
                    st.to_ascii_lowercase().contains(wanted)
                })
                .unwrap_or(false)
        })
        .map(|a| attr(a, "href").unwrap_or_default())
}

/// Marker text on `doc`, `None` when the marker is absent.
pub fn marker_text(doc: &str, marker: Marker) -> Option<String> {
    match marker {
        Marker::DateCell => top_date(doc),
        Marker::LoginForm => openers(doc, "input")
            .into_iter()
            .any(|i| attr(i, "id").as_deref() == Some(IDENTIFIER_FIELD_ID))
            .then(|| s!(IDENTIFIER_FIELD_ID)),
    }
}
