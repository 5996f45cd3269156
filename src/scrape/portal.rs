// src/scrape/portal.rs
//! The external session as a capability set.
//!
//! The harvest never talks to a browser or an HTTP client directly; it
//! drives a `Portal`. `HttpPortal` is the production implementation, tests
//! use scripted fakes. Waiting for a marker and "click then wait for the
//! page to change" are built on top of these calls in `scrape::wait`.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Affordance, Credential, Direction, Marker, RawRow};

#[async_trait]
pub trait Portal: Send {
    /// Acquire the session. Paired with exactly one `close` by the session owner.
    async fn open(&mut self) -> Result<()>;

    /// Release the session. Must tolerate being called after a failed step.
    async fn close(&mut self) -> Result<()>;

    async fn navigate_to(&mut self, url: &str) -> Result<()>;

    /// Fill and submit the login form shown on the current page.
    async fn submit_login(&mut self, credential: &Credential) -> Result<()>;

    /// Current text of `marker`, `None` while it is not on the page.
    async fn marker_text(&mut self, marker: Marker) -> Result<Option<String>>;

    /// Rows of the current page (`extractCurrentPageRows`).
    async fn current_rows(&mut self) -> Result<Vec<RawRow>>;

    /// Navigation link for `direction`, `None` at the end of the data.
    async fn find_affordance(&mut self, direction: Direction) -> Result<Option<Affordance>>;

    /// Activate a link returned by `find_affordance`. Completion is observed
    /// separately through `marker_text`.
    async fn trigger(&mut self, affordance: &Affordance) -> Result<()>;
}
