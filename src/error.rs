// src/error.rs
//! Failures a harvest can end with.
//!
//! Silent data-quality filters (malformed rows, an unmatched clock-in) are
//! not errors and never show up here; see `specs::ponto`.

use std::time::Duration;

use thiserror::Error;

use crate::model::{Direction, Marker};

#[derive(Debug, Error)]
pub enum HarvestError {
    /// The portal refused the credential or never left the login view.
    #[error("login was not accepted (gave up after {waited:?})")]
    Authentication { waited: Duration },

    /// A page transition's completion signal did not resolve in time.
    #[error("waiting for {marker} timed out after {waited:?}")]
    NavigationTimeout { marker: Marker, waited: Duration },

    /// More pages than the configured bound; the affordance is probably misdetected.
    #[error("walked {limit} pages going {direction} without reaching the end")]
    PageLimit { direction: Direction, limit: usize },

    #[error("unparseable day date: {0:?}")]
    InvalidDate(String),

    #[error("login form fields not found on {0}")]
    LoginFormMissing(String),

    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("portal session is not open")]
    SessionClosed,

    #[error("portal error: {0}")]
    Portal(String),
}

impl HarvestError {
    /// Timeouts are the failures an HTTP layer would report as 504 rather than 4xx/5xx.
    pub fn is_timeout(&self) -> bool {
        match self {
            HarvestError::NavigationTimeout { .. } => true,
            HarvestError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
