//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use crate::feed::{DEFAULT_ICON_BASE_URL, DEFAULT_PRICES_URL};
use std::time::Duration;
use url::Url;

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

/// Consolidated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON endpoint serving the price list.
    pub prices_url: Url,
    /// Directory URL holding `<SYMBOL>.svg` icons.
    pub icon_base_url: Url,
    /// Simulated latency of a swap submission.
    pub submit_delay: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `load` with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prices_url = parse_url(
            "PRICES_URL",
            lookup("PRICES_URL").as_deref().unwrap_or(DEFAULT_PRICES_URL),
        )?;
        let icon_base_url = parse_url(
            "TOKEN_ICON_BASE_URL",
            lookup("TOKEN_ICON_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_ICON_BASE_URL),
        )?;
        let submit_delay = match lookup("SUBMIT_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse().map_err(|e| {
                AppError::Config(format!("SUBMIT_DELAY_MS must be milliseconds: {e}"))
            })?),
            None => Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
        };
        Ok(Self {
            prices_url,
            icon_base_url: with_trailing_slash(icon_base_url),
            submit_delay,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prices_url: Url::parse(DEFAULT_PRICES_URL).expect("default prices url is valid"),
            icon_base_url: Url::parse(DEFAULT_ICON_BASE_URL).expect("default icon url is valid"),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
        }
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| AppError::Config(format!("{key} is not a valid URL: {e}")))
}

/// `Url::join` drops the last path segment unless the base ends in '/'.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
