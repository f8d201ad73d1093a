//! Page acquisition
//!
//! A [`PageSource`] turns a URL into a rendered HTML snapshot. The default
//! source drives a real browser through the agent-browser CLI; a plain HTTP
//! source exists for server-rendered pages and tests.

mod executor;
mod http;

use async_trait::async_trait;

use crate::core::Result;

pub use executor::BrowserExecutor;
pub use http::HttpPageSource;

/// How long to wait after navigation before snapshotting the DOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The load event fired
    Load,
    /// The network went quiet
    NetworkIdle,
}

impl WaitUntil {
    /// agent-browser's name for this load state
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitUntil::Load => "load",
            WaitUntil::NetworkIdle => "networkidle",
        }
    }
}

/// A snapshot of a loaded page
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects; relative links resolve against it
    pub url: String,
    /// Serialized DOM
    pub html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Anything that can load a page for extraction
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Prepare the source before the first page (viewport, session, ...)
    async fn start(&self) -> Result<()> {
        Ok(())
    }

    /// Navigate to `url` and return the rendered page
    async fn open(&self, url: &str, wait: WaitUntil) -> Result<Page>;

    /// Release the source
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Get the source name
    fn name(&self) -> &str;
}
