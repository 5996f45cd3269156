// src/scrape/http_portal.rs
//! `Portal` over plain HTTP: fetch the rendered pages, read them with
//! `specs`, follow the pagination links' `href`s.
//!
//! Each instance owns its own client and cookie jar, so concurrent
//! harvests never share a login.

use async_trait::async_trait;
use url::Url;

use crate::config::PortalOptions;
use crate::core::net::{self, Page};
use crate::error::{HarvestError, Result};
use crate::model::{Affordance, Credential, Direction, Marker, RawRow};
use crate::scrape::portal::Portal;
use crate::specs::{login, ponto};

pub struct HttpPortal {
    opts: PortalOptions,
    client: Option<reqwest::Client>,
    page: Option<Page>,
}

impl HttpPortal {
    pub fn new(opts: PortalOptions) -> Self {
        Self { opts, client: None, page: None }
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&reqwest::Client> {
        self.client.as_ref().ok_or(HarvestError::SessionClosed)
    }

    fn page(&self) -> Result<&Page> {
        self.page.as_ref().ok_or_else(|| HarvestError::Portal(s!("no page loaded")))
    }

    /// `href` relative to the current page.
    fn resolve(&self, href: &str) -> Result<String> {
        let base = Url::parse(&self.page()?.url)?;
        Ok(base.join(href)?.to_string())
    }

    async fn load(&mut self, url: &str) -> Result<()> {
        let page = net::http_get(self.client()?, url).await?;
        self.page = Some(page);
        Ok(())
    }
}

#[async_trait]
impl Portal for HttpPortal {
    async fn open(&mut self) -> Result<()> {
        let client = net::session_client(&self.opts.user_agent, self.opts.request_timeout)?;
        self.client = Some(client);
        logd!("HTTP session opened for {}", self.opts.base_url());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // dropping the client drops its cookie jar
        if self.client.take().is_some() {
            logd!("HTTP session closed");
        }
        self.page = None;
        Ok(())
    }

    async fn navigate_to(&mut self, url: &str) -> Result<()> {
        self.load(url).await
    }

    async fn submit_login(&mut self, credential: &Credential) -> Result<()> {
        let page = self.page()?;
        let form = login::parse_login_form(&page.body)
            .ok_or_else(|| HarvestError::LoginFormMissing(page.url.clone()))?;
        let action = if form.action.is_empty() { page.url.clone() } else { self.resolve(&form.action)? };

        let fields = form.fields(credential);
        let next = net::http_post_form(self.client()?, &action, &fields).await?;
        self.page = Some(next);
        Ok(())
    }

    async fn marker_text(&mut self, marker: Marker) -> Result<Option<String>> {
        Ok(ponto::marker_text(&self.page()?.body, marker))
    }

    async fn current_rows(&mut self) -> Result<Vec<RawRow>> {
        Ok(ponto::parse_rows(&self.page()?.body))
    }

    async fn find_affordance(&mut self, direction: Direction) -> Result<Option<Affordance>> {
        let Some(href) = ponto::find_nav_link(&self.page()?.body, direction) else {
            return Ok(None);
        };
        let href = href.trim();
        if href.is_empty() || href == "#" || href.to_ascii_lowercase().starts_with("javascript:") {
            return Err(HarvestError::Portal(format!("{direction} link has no followable href")));
        }
        Ok(Some(Affordance { direction, target: self.resolve(href)? }))
    }

    async fn trigger(&mut self, affordance: &Affordance) -> Result<()> {
        self.load(&affordance.target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_page(body: &str) -> HttpPortal {
        let mut p = HttpPortal::new(PortalOptions::default());
        p.page = Some(Page { url: s!("https://rh.example/core/Ponto/Consulta?p=3"), body: s!(body) });
        p
    }

    #[tokio::test]
    async fn links_resolve_against_current_page() {
        let mut p = with_page(r#"<a style="float:left" href="Consulta?p=2">&lt;</a>"#);
        let prev = p.find_affordance(Direction::Previous).await.unwrap().unwrap();
        assert_eq!(prev.target, "https://rh.example/core/Ponto/Consulta?p=2");
        assert!(p.find_affordance(Direction::Next).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn script_links_are_refused() {
        let mut p = with_page(r#"<a style="float:right" href="javascript:next()">&gt;</a>"#);
        assert!(matches!(p.find_affordance(Direction::Next).await, Err(HarvestError::Portal(_))));
    }

    #[tokio::test]
    async fn closed_session_cannot_navigate() {
        let mut p = HttpPortal::new(PortalOptions::default());
        assert!(!p.is_open());
        assert!(matches!(p.navigate_to("https://rh.example/").await, Err(HarvestError::SessionClosed)));
        p.close().await.unwrap();
    }

    #[tokio::test]
    async fn reads_marker_and_rows_from_page() {
        let mut p = with_page(
            r#"<table><tr class="maozinha"><td label="Data">03/06/2024 - Seg</td><td></td><td><span>08:00</span><span>09:30</span></td></tr></table>"#,
        );
        assert_eq!(p.marker_text(Marker::DateCell).await.unwrap().as_deref(), Some("03/06/2024 - Seg"));
        assert_eq!(p.marker_text(Marker::LoginForm).await.unwrap(), None);
        let rows = p.current_rows().await.unwrap();
        assert_eq!(ponto::extract_days(&rows)[0].hours_worked, 1.5);
    }
}
