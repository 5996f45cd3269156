// src/lib.rs
//! Harvests personal time-clock records from the HR portal and rolls them
//! up into Sunday-anchored work weeks.
//!
//! ```text
//! harvest(id, secret)
//!   └─ HarvestSession ── login ── PaginationWalker ── specs::ponto::extract_days
//!                                                  └─ weeks::aggregate_weeks → Vec<WeekRecord>
//! ```

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod model;
pub mod progress;
pub mod report;
pub mod scrape;
pub mod specs;
pub mod weeks;

pub use config::HarvestOptions;
pub use error::HarvestError;
pub use model::{Credential, HarvestOutput, RawDayEntry, WeekRecord};

use progress::Progress;
use scrape::{HarvestSession, HttpPortal};

/// Log in as `identifier`, walk every period the portal offers and return one
/// record per week. Each call opens its own portal session and closes it
/// before returning, on success or failure.
pub async fn harvest(
    identifier: &str,
    secret: &str,
    options: &HarvestOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<WeekRecord>, HarvestError> {
    let portal = HttpPortal::new(options.portal.clone());
    let mut session = HarvestSession::new(portal, options.clone());
    session.harvest(Credential::new(identifier, secret), progress).await
}
