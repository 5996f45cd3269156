// src/scrape/session.rs
use std::time::Duration;

use tokio::time::Instant;

use crate::config::HarvestOptions;
use crate::error::{HarvestError, Result};
use crate::model::{Credential, Marker, WeekRecord};
use crate::progress::Progress;
use crate::scrape::portal::Portal;
use crate::scrape::wait::{wait_for_absence, wait_for_marker, Wait};
use crate::scrape::walker::PaginationWalker;
use crate::weeks::aggregate_weeks;

/// One harvest over one portal session: log in, walk every period,
/// bucket into weeks. The portal is closed exactly once after a successful
/// `open`, whatever happens in between.
pub struct HarvestSession<P: Portal> {
    portal: P,
    options: HarvestOptions,
}

impl<P: Portal> HarvestSession<P> {
    pub fn new(portal: P, options: HarvestOptions) -> Self {
        Self { portal, options }
    }

    pub fn portal(&self) -> &P { &self.portal }

    pub fn into_portal(self) -> P { self.portal }

    pub async fn harvest(&mut self, credential: Credential, progress: Option<&mut dyn Progress>) -> Result<Vec<WeekRecord>> {
        self.portal.open().await?;

        let res = self.run(&credential, progress).await;
        drop(credential);

        if let Err(e) = self.portal.close().await {
            // the harvest's own outcome wins
            logw!("Closing portal session failed: {e}");
        }

        match &res {
            Ok(weeks) => logf!("Harvest done: {} weeks", weeks.len()),
            Err(e) => loge!("Harvest failed: {e}"),
        }
        res
    }

    async fn run(&mut self, credential: &Credential, progress: Option<&mut dyn Progress>) -> Result<Vec<WeekRecord>> {
        self.login(credential).await?;

        let walk = &self.options.walk;
        let nav = Wait::new(walk.navigation_timeout, walk.poll_interval);
        self.portal.navigate_to(&walk.start_url).await?;
        wait_for_marker(&mut self.portal, Marker::DateCell, nav).await?;

        let days = PaginationWalker::new(walk.clone()).walk(&mut self.portal, progress).await?;
        aggregate_weeks(&days, self.options.weekly_goal_hours)
    }

    async fn login(&mut self, credential: &Credential) -> Result<()> {
        let login = Wait::new(self.options.login_timeout, self.options.walk.poll_interval);
        let login_url = self.options.portal.login_url();

        logf!("Logging in as {}", credential.identifier);
        self.portal.navigate_to(&login_url).await?;
        wait_for_marker(&mut self.portal, Marker::LoginForm, login)
            .await
            .map_err(|e| as_auth_error(e, login))?;

        let submitted = Instant::now();
        self.portal
            .submit_login(credential)
            .await
            .map_err(|e| as_rejection(e, submitted.elapsed()))?;
        wait_for_absence(&mut self.portal, Marker::LoginForm, login)
            .await
            .map_err(|e| as_auth_error(e, login))?;

        logd!("Authenticated");
        Ok(())
    }
}

/// 401/403 on the login post is a refused credential, not a transport failure.
fn as_rejection(e: HarvestError, waited: Duration) -> HarvestError {
    match e {
        HarvestError::Http { status: 401 | 403, .. } => HarvestError::Authentication { waited },
        other => other,
    }
}

fn as_auth_error(e: HarvestError, wait: Wait) -> HarvestError {
    match e {
        HarvestError::NavigationTimeout { .. } => HarvestError::Authentication { waited: wait.timeout },
        other => other,
    }
}
