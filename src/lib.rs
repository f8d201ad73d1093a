//! nhcatalog - New Holland product catalogue scraper
//!
//! Loads a fixed list of product pages, extracts names, feature blurbs,
//! galleries, overview articles, model cards and specification tables, and
//! downloads every referenced image. The result is one JSON document.
//!
//! # Architecture
//!
//! - **Core**: Configuration, error handling and product records
//! - **Browser**: Page sources (agent-browser CLI, plain HTTP)
//! - **Extract**: DOM queries over a rendered page
//! - **Download**: Concurrent image downloads
//! - **Pipeline**: The sequential per-URL driver
//!
//! # Usage
//!
//! ```rust,no_run
//! use nhcatalog::{default_targets, BrowserExecutor, Config, Scraper};
//!
//! #[tokio::main]
//! async fn main() -> nhcatalog::Result<()> {
//!     let config = Config::load();
//!     let browser = BrowserExecutor::from_config(&config.browser);
//!     let scraper = Scraper::from_config(browser, &config)?;
//!     scraper.run(&default_targets()).await?;
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod core;
pub mod download;
pub mod extract;
pub mod pipeline;
pub mod targets;

// Re-export commonly used items
pub use browser::{BrowserExecutor, HttpPageSource, Page, PageSource, WaitUntil};
pub use core::{Config, Product, Result, ScrapeError};
pub use download::ImageDownloader;
pub use pipeline::{ScrapeSummary, Scraper};
pub use targets::default_targets;
