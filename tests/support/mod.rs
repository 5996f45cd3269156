// tests/support/mod.rs
//
// Scripted in-memory portal: a row of consult pages, oldest first, with
// the same previous/next and marker behaviour the real one has.
//
#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use ponto_harvest::config::HarvestOptions;
use ponto_harvest::error::{HarvestError, Result};
use ponto_harvest::model::{Affordance, Credential, Direction, Marker, RawCell, RawRow};
use ponto_harvest::scrape::Portal;

pub const BASE_URL: &str = "http://fake.local";

/// One day row: date label plus the punch spans.
#[derive(Clone, Debug)]
pub struct Day {
    pub label: String,
    pub punches: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum View {
    Blank,
    Login,
    Home,
    Consult(usize),
}

pub struct FakePortal {
    pages: Vec<Vec<Day>>,
    start: usize,
    view: View,
    logged_in: bool,

    /// Submitting the form leaves the login view.
    pub accept_login: bool,
    /// The login post answers with this HTTP status instead.
    pub login_status: Option<u16>,
    /// `open` fails.
    pub fail_open: bool,
    /// Triggers from this count on do nothing.
    pub stuck_after: Option<usize>,
    /// Marker polls that still see the old page after a trigger.
    pub lag_polls: usize,
    pending: Option<(usize, usize)>,

    pub opens: usize,
    pub closes: usize,
    pub triggers: usize,
    pub navigations: Vec<String>,
    pub submitted: Option<String>,
}

impl FakePortal {
    /// Consult pages `pages` (oldest first); the canonical start page is `start`.
    pub fn new(pages: Vec<Vec<Day>>, start: usize) -> Self {
        Self {
            pages,
            start,
            view: View::Blank,
            logged_in: false,
            accept_login: true,
            login_status: None,
            fail_open: false,
            stuck_after: None,
            lag_polls: 0,
            pending: None,
            opens: 0,
            closes: 0,
            triggers: 0,
            navigations: Vec::new(),
            submitted: None,
        }
    }

    /// Already logged in and showing the start page, as the walker expects.
    pub fn at_start(pages: Vec<Vec<Day>>, start: usize) -> Self {
        let mut p = Self::new(pages, start);
        p.logged_in = true;
        p.view = View::Consult(start);
        p
    }

    fn settle(&mut self) {
        if let Some((target, left)) = self.pending {
            if left == 0 {
                self.view = View::Consult(target);
                self.pending = None;
            } else {
                self.pending = Some((target, left - 1));
            }
        }
    }
}

#[async_trait]
impl Portal for FakePortal {
    async fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(HarvestError::Portal("browser did not start".into()));
        }
        self.opens += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closes += 1;
        self.view = View::Blank;
        Ok(())
    }

    async fn navigate_to(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        self.pending = None;
        self.view = if url.contains("/Login") || !self.logged_in {
            View::Login
        } else {
            View::Consult(self.start)
        };
        Ok(())
    }

    async fn submit_login(&mut self, credential: &Credential) -> Result<()> {
        if self.view != View::Login {
            return Err(HarvestError::LoginFormMissing("fake".into()));
        }
        self.submitted = Some(credential.identifier.clone());
        if let Some(status) = self.login_status {
            return Err(HarvestError::Http { url: format!("{BASE_URL}/auth/Account/Login"), status });
        }
        if self.accept_login {
            self.logged_in = true;
            self.view = View::Home;
        }
        Ok(())
    }

    async fn marker_text(&mut self, marker: Marker) -> Result<Option<String>> {
        if marker == Marker::DateCell {
            self.settle();
        }
        Ok(match (marker, &self.view) {
            (Marker::LoginForm, View::Login) => Some("Identificação".into()),
            (Marker::DateCell, View::Consult(i)) => self.pages[*i].first().map(|d| d.label.clone()),
            _ => None,
        })
    }

    async fn current_rows(&mut self) -> Result<Vec<RawRow>> {
        let View::Consult(i) = self.view else { return Ok(Vec::new()) };
        let mut rows = vec![RawRow { day_row: false, cells: vec![RawCell::text("Data"), RawCell::text("Marcações")] }];
        rows.extend(self.pages[i].iter().map(|d| {
            RawRow::day(vec![
                RawCell::text(&d.label),
                RawCell::text(""),
                RawCell::spans(d.punches.iter().map(String::as_str)),
            ])
        }));
        Ok(rows)
    }

    async fn find_affordance(&mut self, direction: Direction) -> Result<Option<Affordance>> {
        let View::Consult(i) = self.view else { return Ok(None) };
        let target = match direction {
            Direction::Previous => i.checked_sub(1),
            Direction::Next => Some(i + 1).filter(|n| *n < self.pages.len()),
        };
        Ok(target.map(|t| Affordance { direction, target: t.to_string() }))
    }

    async fn trigger(&mut self, affordance: &Affordance) -> Result<()> {
        self.triggers += 1;
        if self.stuck_after.is_some_and(|n| self.triggers > n) {
            return Ok(());
        }
        let target: usize = affordance.target.parse().map_err(|_| HarvestError::Portal("bad target".into()))?;
        self.pending = Some((target, self.lag_polls));
        Ok(())
    }
}

/* ---------------- fixtures ---------------- */

pub fn day(date: NaiveDate, punches: &[&str]) -> Day {
    Day {
        label: date.format("%d/%m/%Y - Dia").to_string(),
        punches: punches.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn first_sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
}

/// `n` one-week pages, oldest first. Page `k` holds the Monday and Tuesday
/// of the week starting `first_sunday() + 7k`, eight hours each.
pub fn weekly_pages(n: usize) -> Vec<Vec<Day>> {
    let full = ["08:00", "12:00", "13:00", "17:00"];
    (0..n)
        .map(|k| {
            let sunday = first_sunday() + Days::new(7 * k as u64);
            vec![day(sunday + Days::new(1), &full), day(sunday + Days::new(2), &full)]
        })
        .collect()
}

pub fn fast_options() -> HarvestOptions {
    let mut o = HarvestOptions::default();
    o.set_base_url(BASE_URL);
    o.set_timeout(Duration::from_millis(200));
    o.walk.poll_interval = Duration::from_millis(2);
    o
}
