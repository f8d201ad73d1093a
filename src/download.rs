//! Image downloads
//!
//! Images are streamed straight to disk under the last segment of their URL.
//! A failed download never leaves a partial file behind.

use futures::future::try_join_all;
use futures::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::core::config::HttpConfig;
use crate::core::{Result, ScrapeError};

/// Downloads images into a single directory
#[derive(Clone)]
pub struct ImageDownloader {
    client: Client,
    dir: PathBuf,
}

/// File name an image URL is stored under: its last path segment
pub fn filename_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::Other(format!("No file name in image URL: {}", url)))
}

impl ImageDownloader {
    pub fn new(client: Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
        }
    }

    pub fn from_config(config: &HttpConfig, dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::new(client, dir))
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the target directory
    pub async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Download one image and return its local path
    pub async fn download(&self, url: &str) -> Result<String> {
        let filename = filename_from_url(url)?;
        let path = self.dir.join(&filename);

        let bytes = self.fetch_to(url, &path).await?;
        tracing::debug!(url, path = %path.display(), bytes, "downloaded image");
        Ok(path.display().to_string())
    }

    /// Download a batch concurrently; paths come back in input order
    pub async fn download_all(&self, urls: &[String]) -> Result<Vec<String>> {
        try_join_all(urls.iter().map(|url| self.download(url))).await
    }

    /// Download an optional image
    pub async fn download_opt(&self, url: Option<&str>) -> Result<Option<String>> {
        match url {
            Some(url) => self.download(url).await.map(Some),
            None => Ok(None),
        }
    }

    async fn fetch_to(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::download(url, e))?;

        let mut partial = PartialFile::new(path);
        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ScrapeError::download(url, e))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        partial.keep();
        Ok(written)
    }
}

/// Removes a file on drop unless kept.
///
/// Covers both errors and downloads dropped mid-stream when a sibling in the
/// same batch fails.
struct PartialFile {
    path: PathBuf,
    keep: bool,
}

impl PartialFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            keep: false,
        }
    }

    fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
