// src/scrape/walker.rs
//! Two-pass traversal of the consult view.
//!
//! The portal has no page count and no random access: only "previous" and
//! "next" links, each of which replaces the current page. So:
//!
//! 1. backward: read, step to the previous period, repeat until there is no
//!    previous link;
//! 2. reset to the canonical first page (only if step 1 actually moved);
//! 3. forward: read page one again, step to the next period, repeat until
//!    there is no next link.
//!
//! Output is chronological: backward pages oldest first, then forward pages.
//! Page one is read a second time, so its days appear twice; the week
//! bucketing overwrites rather than sums, and
//! `WalkOptions::dedupe_start_page` drops the second read entirely. A portal
//! with a single page (no previous, no next) is read once.

use crate::config::WalkOptions;
use crate::error::{HarvestError, Result};
use crate::model::{Direction, Marker, RawDayEntry};
use crate::progress::Progress;
use crate::scrape::portal::Portal;
use crate::scrape::wait::{trigger_and_await_change, wait_for_marker, Wait};
use crate::specs::ponto::extract_days;

pub struct PaginationWalker {
    opts: WalkOptions,
}

impl PaginationWalker {
    pub fn new(opts: WalkOptions) -> Self {
        Self { opts }
    }

    fn wait(&self) -> Wait {
        Wait::new(self.opts.navigation_timeout, self.opts.poll_interval)
    }

    /// Every day reachable from the current page, oldest first.
    /// The portal must already show the start page.
    pub async fn walk<P>(&self, portal: &mut P, mut progress: Option<&mut dyn Progress>) -> Result<Vec<RawDayEntry>>
    where
        P: Portal + ?Sized,
    {
        match progress.as_deref_mut() {
            Some(p) => {
                let res = self.passes(portal, Some(&mut *p)).await;
                p.finish();
                res
            }
            None => self.passes(portal, None).await,
        }
    }

    async fn passes<P>(&self, portal: &mut P, mut progress: Option<&mut dyn Progress>) -> Result<Vec<RawDayEntry>>
    where
        P: Portal + ?Sized,
    {
        // ---------- backward ----------
        if let Some(p) = progress.as_deref_mut() {
            p.begin(Direction::Previous);
        }

        // newest page first; reversed below
        let mut backward: Vec<Vec<RawDayEntry>> = Vec::new();
        loop {
            let days = read_page(portal).await?;
            if let Some(p) = progress.as_deref_mut() {
                p.page_done(Direction::Previous, backward.len() + 1, days.len());
            }
            backward.push(days);

            let Some(link) = portal.find_affordance(Direction::Previous).await? else { break };
            self.check_bound(Direction::Previous, backward.len())?;
            trigger_and_await_change(portal, &link, Marker::DateCell, self.wait()).await?;
        }
        let moved_back = backward.len() > 1;

        let mut days: Vec<RawDayEntry> = backward.into_iter().rev().flatten().collect();

        // ---------- reset ----------
        let skip_start_page = if moved_back {
            logd!("Resetting to {}", self.opts.start_url);
            portal.navigate_to(&self.opts.start_url).await?;
            wait_for_marker(portal, Marker::DateCell, self.wait()).await?;
            self.opts.dedupe_start_page
        } else {
            // still on page one; without a next link there is nothing left to read
            self.opts.dedupe_start_page || portal.find_affordance(Direction::Next).await?.is_none()
        };

        // ---------- forward ----------
        if let Some(p) = progress.as_deref_mut() {
            p.begin(Direction::Next);
        }

        let mut forward_pages = 0usize;
        loop {
            forward_pages += 1;
            if forward_pages > 1 || !skip_start_page {
                let page = read_page(portal).await?;
                if let Some(p) = progress.as_deref_mut() {
                    p.page_done(Direction::Next, forward_pages, page.len());
                }
                days.extend(page);
            }

            let Some(link) = portal.find_affordance(Direction::Next).await? else { break };
            self.check_bound(Direction::Next, forward_pages)?;
            trigger_and_await_change(portal, &link, Marker::DateCell, self.wait()).await?;
        }

        logf!("Walked the portal: {} days", days.len());

        Ok(days)
    }

    fn check_bound(&self, direction: Direction, pages_read: usize) -> Result<()> {
        if pages_read >= self.opts.max_pages {
            loge!("Still a {direction} link after {pages_read} pages; giving up");
            return Err(HarvestError::PageLimit { direction, limit: self.opts.max_pages });
        }
        Ok(())
    }
}

async fn read_page<P>(portal: &mut P) -> Result<Vec<RawDayEntry>>
where
    P: Portal + ?Sized,
{
    let rows = portal.current_rows().await?;
    Ok(extract_days(&rows))
}
