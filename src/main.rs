//! nhcatalog - New Holland product catalogue scraper
//!
//! Main entry point for the CLI application.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{prelude::*, EnvFilter};

use nhcatalog::{default_targets, BrowserExecutor, Config, HttpPageSource, ScrapeError, Scraper};

/// How pages are loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Render pages in a real browser via agent-browser
    Browser,
    /// Fetch static HTML without running scripts
    Http,
}

/// nhcatalog - scrape the New Holland product catalogue to JSON
#[derive(Parser, Debug)]
#[command(name = "nhcatalog")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Product page to scrape instead of the built-in list (repeatable)
    #[arg(long = "url", short = 'u')]
    urls: Vec<String>,

    /// Output directory for images and products.json
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Config file (defaults to ~/.config/nhcatalog/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Page source
    #[arg(long, value_enum, default_value_t = Source::Browser)]
    source: Source,

    /// Run the browser without a window
    #[arg(long, conflicts_with = "headed")]
    headless: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("nhcatalog={}", default_level))),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    // Build configuration
    let mut config = match args.config {
        Some(ref path) => {
            let _ = dotenvy::dotenv();
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load(),
    };

    // Apply CLI overrides
    if let Some(ref output) = args.output {
        config.output.dir = output.clone();
    }

    if args.headless {
        config.browser.headless = true;
    }

    if args.headed {
        config.browser.headless = false;
    }

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let urls = if args.urls.is_empty() {
        default_targets()
    } else {
        args.urls
    };

    let summary = match args.source {
        Source::Browser => {
            if !BrowserExecutor::is_available().await {
                return Err(ScrapeError::AgentBrowserNotFound.into());
            }
            let browser = BrowserExecutor::from_config(&config.browser);
            Scraper::from_config(browser, &config)?.run(&urls).await?
        }
        Source::Http => {
            let source = HttpPageSource::from_config(&config.http)?;
            Scraper::from_config(source, &config)?.run(&urls).await?
        }
    };

    println!(
        "Scraped {} products ({} images) in {:.1}s -> {}",
        summary.products,
        summary.images,
        summary.elapsed.as_secs_f64(),
        summary.output.display()
    );

    Ok(())
}
