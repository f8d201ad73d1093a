//! Error types for nhcatalog
//!
//! A single error enum shared by every stage of the scrape. Nothing is
//! recovered: the first error ends the run.

use thiserror::Error;

/// Main error type for scrape operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Browser automation errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// agent-browser not installed
    #[error("agent-browser not found. Install with: npm install -g agent-browser && agent-browser install")]
    AgentBrowserNotFound,

    /// A CSS selector failed to parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Page navigation errors
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// Image download errors
    #[error("Download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

impl ScrapeError {
    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a navigation error
    pub fn navigation(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Wrap a failed download
    pub fn download<E>(url: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Download {
            url: url.into(),
            source: Box::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_message() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "reset");
        let err = ScrapeError::download("https://assets.example/a.jpg", io);
        assert_eq!(
            err.to_string(),
            "Download of https://assets.example/a.jpg failed: reset"
        );
    }

    #[test]
    fn test_navigation_error_message() {
        let err = ScrapeError::navigation("https://x.test", "timeout");
        assert!(err.to_string().contains("https://x.test"));
        assert!(err.to_string().contains("timeout"));
    }
}
