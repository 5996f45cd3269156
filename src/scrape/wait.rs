// src/scrape/wait.rs
//! Bounded condition waits over a portal marker.
//!
//! Everything here polls `Portal::marker_text` every `interval` until a
//! predicate holds, under a hard `timeout`. Expiry is a
//! `NavigationTimeout`; callers that wait on something else (login)
//! translate it.

use std::time::Duration;

use tokio::time;

use crate::error::{HarvestError, Result};
use crate::model::{Affordance, Marker};
use crate::scrape::portal::Portal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// Poll `marker` until `accept` returns true for its current text.
/// Returns the accepted text.
pub async fn wait_until<P, F>(portal: &mut P, marker: Marker, wait: Wait, accept: F) -> Result<Option<String>>
where
    P: Portal + ?Sized,
    F: FnMut(Option<&str>) -> bool + Send,
{
    match time::timeout(wait.timeout, poll(portal, marker, wait.interval, accept)).await {
        Ok(res) => res,
        Err(_) => Err(HarvestError::NavigationTimeout { marker, waited: wait.timeout }),
    }
}

async fn poll<P, F>(portal: &mut P, marker: Marker, interval: Duration, mut accept: F) -> Result<Option<String>>
where
    P: Portal + ?Sized,
    F: FnMut(Option<&str>) -> bool + Send,
{
    loop {
        let value = portal.marker_text(marker).await?;
        if accept(value.as_deref()) {
            return Ok(value);
        }
        time::sleep(interval).await;
    }
}

/// Wait until `marker` is on the page; returns its text.
pub async fn wait_for_marker<P>(portal: &mut P, marker: Marker, wait: Wait) -> Result<String>
where
    P: Portal + ?Sized,
{
    let text = wait_until(portal, marker, wait, |v| v.is_some()).await?;
    Ok(text.unwrap_or_default())
}

/// Wait until `marker` is gone from the page.
pub async fn wait_for_absence<P>(portal: &mut P, marker: Marker, wait: Wait) -> Result<()>
where
    P: Portal + ?Sized,
{
    wait_until(portal, marker, wait, |v| v.is_none()).await.map(|_| ())
}

/// Activate `affordance`, then wait until `marker` shows a value other than
/// the one it had before. A marker that vanishes does not count as changed.
pub async fn trigger_and_await_change<P>(
    portal: &mut P,
    affordance: &Affordance,
    marker: Marker,
    wait: Wait,
) -> Result<String>
where
    P: Portal + ?Sized,
{
    let before = portal.marker_text(marker).await?;
    portal.trigger(affordance).await?;

    let after = wait_until(portal, marker, wait, |now| match now {
        Some(now) => Some(now) != before.as_deref(),
        None => false,
    })
    .await?;

    Ok(after.unwrap_or_default())
}
