//! Static page source
//!
//! Fetches server-rendered HTML with reqwest; no scripts run.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::browser::{Page, PageSource, WaitUntil};
use crate::core::config::HttpConfig;
use crate::core::{Result, ScrapeError};

/// Page source backed by plain HTTP GET requests
#[derive(Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn open(&self, url: &str, _wait: WaitUntil) -> Result<Page> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::navigation(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::navigation(url, format!("HTTP {}", status)));
        }

        let final_url = response.url().to_string();
        let html = response.text().await?;
        Ok(Page::new(final_url, html))
    }

    fn name(&self) -> &str {
        "http"
    }
}
