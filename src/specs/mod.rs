// src/specs/mod.rs
//! # Page “specs”
//!
//! Page-specific reading rules for the HR portal. Each module knows *where the
//! ground truth lives in the HTML* of one page and how to pull it out
//! tolerantly.
//!
//! ## What lives here
//! - **Pure parsing**: HTML in, plain data out (`RawRow`, `LoginForm`, marker text).
//! - **Selector choice**: day rows are `tr.maozinha`, the completion marker is
//!   the first `td[label='Data']`, pagination links are anchors floated left/right.
//! - **Day extraction**: punches → worked hours (`ponto::extract_days`), which
//!   also serves portals that hand back rows without any HTML.
//!
//! ## What does **not** live here
//! - Networking, sessions, waiting (`scrape`).
//! - Week bucketing (`weeks`).
//!
//! ## Conventions
//! - Case-insensitive tag and attribute matching via `core::html`.
//! - Bad rows are skipped, never raised: a harvest should not die on a header row.
//! - Testable offline against inline fixtures.
pub mod interval;
pub mod login;
pub mod ponto;
