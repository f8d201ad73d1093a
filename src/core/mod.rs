//! Core module - shared infrastructure for nhcatalog
//!
//! Configuration, error handling and the product records written to disk.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Result, ScrapeError};
pub use types::*;
