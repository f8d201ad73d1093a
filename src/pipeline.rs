//! Scrape driver
//!
//! Visits product pages one after another. For each page it pulls the header
//! and overview, follows the models and technical-specifications links when
//! present, and downloads every referenced image. Any error aborts the run
//! before the JSON document is written.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::browser::{Page, PageSource, WaitUntil};
use crate::core::config::SiteConfig;
use crate::core::{Config, Feature, Model, OverviewArticle, Product, Result, SpecificationGroup};
use crate::download::ImageDownloader;
use crate::extract::{self, Document};

/// Everything read from a product page before any download
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    pub name: Option<String>,
    pub features: Vec<Feature>,
    pub gallery_links: Vec<String>,
    pub overview_top: Option<String>,
    pub overview_articles: Vec<OverviewArticle>,
    pub models_link: Option<String>,
    pub specs_link: Option<String>,
}

impl ProductPage {
    pub fn extract(page: &Page, site: &SiteConfig) -> Result<Self> {
        let doc = Document::parse(&page.url, &page.html)?;
        Ok(Self {
            name: extract::name(&doc)?,
            features: extract::features(&doc)?,
            gallery_links: extract::gallery_links(&doc, &site.asset_prefix)?,
            overview_top: extract::overview_top(&doc)?,
            overview_articles: extract::overview_articles(&doc, &site.asset_prefix)?,
            models_link: extract::models_link(&doc, &site.models_link_suffix)?,
            specs_link: extract::specs_link(&doc, &site.specs_link_suffix)?,
        })
    }
}

/// Everything read from a models page
#[derive(Debug, Clone, Default)]
pub struct ModelsPage {
    pub models: Vec<Model>,
    pub specs_link: Option<String>,
}

impl ModelsPage {
    pub fn extract(page: &Page, site: &SiteConfig) -> Result<Self> {
        let doc = Document::parse(&page.url, &page.html)?;
        Ok(Self {
            models: extract::models(&doc, &site.asset_prefix)?,
            specs_link: extract::specs_link(&doc, &site.specs_link_suffix)?,
        })
    }
}

/// Parse a technical specifications page
pub fn extract_specifications(page: &Page) -> Result<Vec<SpecificationGroup>> {
    let doc = Document::parse(&page.url, &page.html)?;
    extract::specifications(&doc)
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub products: usize,
    pub images: usize,
    pub elapsed: Duration,
    pub output: PathBuf,
}

/// Sequential scraper over a page source
pub struct Scraper<S: PageSource> {
    source: S,
    downloader: ImageDownloader,
    site: SiteConfig,
    json_path: PathBuf,
}

impl<S: PageSource> Scraper<S> {
    pub fn new(
        source: S,
        downloader: ImageDownloader,
        site: SiteConfig,
        json_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            downloader,
            site,
            json_path: json_path.into(),
        }
    }

    /// Build a scraper with the downloader and output paths from `config`
    pub fn from_config(source: S, config: &Config) -> Result<Self> {
        let downloader = ImageDownloader::from_config(&config.http, config.output.images_path())?;
        Ok(Self::new(
            source,
            downloader,
            config.site.clone(),
            config.output.json_path(),
        ))
    }

    /// The underlying page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Scrape every URL and write the aggregate JSON document
    pub async fn run(&self, urls: &[String]) -> Result<ScrapeSummary> {
        let started = Instant::now();
        tracing::info!(
            source = self.source.name(),
            pages = urls.len(),
            images = %self.downloader.dir().display(),
            "starting scrape"
        );

        self.downloader.prepare().await?;
        self.source.start().await?;

        let scraped = self.scrape_all(urls).await;
        if let Err(e) = self.source.close().await {
            tracing::warn!("failed to close {}: {}", self.source.name(), e);
        }
        let products = scraped?;

        write_products(&self.json_path, &products).await?;

        let summary = ScrapeSummary {
            products: products.len(),
            images: products.iter().map(Product::image_count).sum(),
            elapsed: started.elapsed(),
            output: self.json_path.clone(),
        };
        tracing::info!(
            products = summary.products,
            images = summary.images,
            elapsed = ?summary.elapsed,
            output = %summary.output.display(),
            "scrape finished"
        );
        Ok(summary)
    }

    /// Scrape every URL in order
    pub async fn scrape_all(&self, urls: &[String]) -> Result<Vec<Product>> {
        let mut products = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            tracing::info!(url = %url, "[{}/{}] scraping", i + 1, urls.len());
            products.push(self.scrape_product(url).await?);
        }
        Ok(products)
    }

    /// Scrape a single product page and its sub-pages
    pub async fn scrape_product(&self, url: &str) -> Result<Product> {
        let page = self.source.open(url, WaitUntil::NetworkIdle).await?;
        let top = ProductPage::extract(&page, &self.site)?;

        let gallery = self.downloader.download_all(&top.gallery_links).await?;
        let overview_articles = self.download_articles(top.overview_articles).await?;

        // The specs link is looked up on whichever page is open at that point
        let mut specs_link = top.specs_link;
        let models = match top.models_link {
            Some(link) => {
                tracing::debug!(url = %link, "models page");
                let models_page = self.source.open(&link, WaitUntil::Load).await?;
                let extracted = ModelsPage::extract(&models_page, &self.site)?;
                specs_link = extracted.specs_link;
                Some(self.download_models(extracted.models).await?)
            }
            None => None,
        };

        let specifications = match specs_link {
            Some(link) => {
                tracing::debug!(url = %link, "specifications page");
                let specs_page = self.source.open(&link, WaitUntil::Load).await?;
                Some(extract_specifications(&specs_page)?)
            }
            None => None,
        };

        let product = Product {
            name: top.name,
            features: top.features,
            gallery,
            overview_top: top.overview_top,
            overview_articles,
            models,
            specifications,
        };

        tracing::info!(
            name = product.name.as_deref().unwrap_or("<unnamed>"),
            features = product.features.len(),
            images = product.image_count(),
            models = product.models.as_ref().map(Vec::len).unwrap_or(0),
            spec_groups = product.specifications.as_ref().map(Vec::len).unwrap_or(0),
            "scraped product"
        );
        Ok(product)
    }

    async fn download_articles(
        &self,
        articles: Vec<OverviewArticle>,
    ) -> Result<Vec<OverviewArticle>> {
        try_join_all(articles.into_iter().map(|article| async move {
            let image = self.downloader.download_opt(article.image.as_deref()).await?;
            Ok::<_, crate::core::ScrapeError>(OverviewArticle { image, ..article })
        }))
        .await
    }

    async fn download_models(&self, models: Vec<Model>) -> Result<Vec<Model>> {
        try_join_all(models.into_iter().map(|model| async move {
            let image = self.downloader.download_opt(model.image.as_deref()).await?;
            Ok::<_, crate::core::ScrapeError>(Model { image, ..model })
        }))
        .await
    }
}

/// Write the aggregate document, pretty-printed with two-space indentation
pub async fn write_products(path: &Path, products: &[Product]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = serde_json::to_string_pretty(products)?;
    tokio::fs::write(path, json).await?;
    tracing::info!(path = %path.display(), "wrote products");
    Ok(())
}
