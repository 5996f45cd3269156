// src/core/net.rs
// HTTP plumbing for portal sessions: one cookie-carrying client per session.

use std::time::Duration;

use crate::error::{HarvestError, Result};

/// A fetched page: where redirects ended up, and the body.
#[derive(Clone, Debug, Default)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// New client with its own cookie jar. Never shared across sessions.
pub fn session_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

pub async fn http_get(client: &reqwest::Client, url: &str) -> Result<Page> {
    let resp = client.get(url).send().await?;
    read_page("GET", url, resp).await
}

pub async fn http_post_form(
    client: &reqwest::Client,
    url: &str,
    fields: &[(String, String)],
) -> Result<Page> {
    let resp = client.post(url).form(fields).send().await?;
    read_page("POST", url, resp).await
}

async fn read_page(method: &str, requested: &str, resp: reqwest::Response) -> Result<Page> {
    let status = resp.status();
    let url = resp.url().to_string();
    if !status.is_success() {
        return Err(HarvestError::Http { url: s!(requested), status: status.as_u16() });
    }
    let body = resp.text().await?;
    logd!("{method} {requested} -> {url} ({} bytes)", body.len());
    Ok(Page { url, body })
}
