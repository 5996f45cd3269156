// src/config/options.rs
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct HarvestOptions {
    pub portal: PortalOptions,
    pub walk: WalkOptions,
    /// Bound on reaching the login form and on leaving it after submit.
    pub login_timeout: Duration,
    /// Stamped on every week record as its goal.
    pub weekly_goal_hours: f64,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            portal: PortalOptions::default(),
            walk: WalkOptions::default(),
            login_timeout: Duration::from_millis(LOGIN_TIMEOUT_MS),
            weekly_goal_hours: WEEKLY_GOAL_HOURS,
        }
    }
}

impl HarvestOptions {
    /// Same bound for the login wait and every page transition.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.login_timeout = timeout;
        self.walk.navigation_timeout = timeout;
    }

    /// Point the portal at another host; the walk's start page follows.
    pub fn set_base_url(&mut self, url: &str) {
        self.portal.set_base_url(url);
        self.walk.start_url = self.portal.consult_url();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalOptions {
    base_url: String,
    pub login_path: String,
    pub consult_path: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            login_path: s!(LOGIN_PATH),
            consult_path: s!(CONSULT_PATH),
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            user_agent: s!(USER_AGENT),
        }
    }
}

impl PortalOptions {
    pub fn base_url(&self) -> &str { &self.base_url }

    /// Trailing slashes are dropped so paths join cleanly.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = s!(url.trim().trim_end_matches('/'));
    }

    pub fn login_url(&self) -> String {
        join!(&self.base_url, &self.login_path)
    }

    pub fn consult_url(&self) -> String {
        join!(&self.base_url, &self.consult_path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    /// Canonical first page; the walker resets here between passes.
    pub start_url: String,
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
    pub max_pages: usize,
    /// Skip re-reading the start page after the reset. Off by default,
    /// which keeps the portal's observed double read of page one.
    pub dedupe_start_page: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            start_url: PortalOptions::default().consult_url(),
            navigation_timeout: Duration::from_millis(NAVIGATION_TIMEOUT_MS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            max_pages: MAX_PAGES_PER_DIRECTION,
            dedupe_start_page: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_paths() {
        let mut p = PortalOptions::default();
        assert_eq!(p.login_url(), "https://rh.zaffari.com.br/auth/Account/Login");

        p.set_base_url("http://localhost:8080/ ");
        assert_eq!(p.base_url(), "http://localhost:8080");
        assert_eq!(p.consult_url(), "http://localhost:8080/core/Ponto/Consulta");
    }

    #[test]
    fn walk_starts_at_consult_page() {
        let w = WalkOptions::default();
        assert_eq!(w.start_url, PortalOptions::default().consult_url());
        assert!(!w.dedupe_start_page);
    }

    #[test]
    fn set_timeout_covers_login_and_navigation() {
        let mut o = HarvestOptions::default();
        o.set_timeout(Duration::from_secs(5));
        assert_eq!(o.login_timeout, Duration::from_secs(5));
        assert_eq!(o.walk.navigation_timeout, Duration::from_secs(5));
        assert_eq!(o.weekly_goal_hours, 44.0);
    }

    #[test]
    fn base_url_moves_start_page_too() {
        let mut o = HarvestOptions::default();
        o.set_base_url("http://127.0.0.1:9000/");
        assert_eq!(o.walk.start_url, "http://127.0.0.1:9000/core/Ponto/Consulta");
        assert_eq!(o.portal.login_url(), "http://127.0.0.1:9000/auth/Account/Login");
    }
}
