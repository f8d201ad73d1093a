//! Configuration management for nhcatalog
//!
//! Supports environment variables, a config file, and CLI overrides.
//!
//! Config file location: ~/.config/nhcatalog/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, ScrapeError};

/// Environment toggle for browser visibility
pub const HEADLESS_ENV: &str = "BROWSER_HEADLESS";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Browser configuration
    #[serde(default)]
    pub browser: BrowserConfig,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Output layout
    #[serde(default)]
    pub output: OutputConfig,
    /// Markup conventions of the target site
    #[serde(default)]
    pub site: SiteConfig,
}

/// Browser automation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Session name for agent-browser
    pub session_name: String,
    /// Run without a visible window
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Timeout for a single browser command in ms
    pub timeout_ms: u64,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Where results land on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root output directory
    pub dir: PathBuf,
    /// Image directory, relative to `dir`
    pub images_dir: String,
    /// Aggregate JSON file name, relative to `dir`
    pub json_file: String,
}

/// Selectors that depend on the vendor's site conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Only images whose raw URL starts with this prefix are collected
    pub asset_prefix: String,
    /// Suffix of the secondary-nav link to the models page
    pub models_link_suffix: String,
    /// Suffix of the secondary-nav link to the technical specifications page
    pub specs_link_suffix: String,
}

/// Interpret a `BROWSER_HEADLESS` value.
///
/// Unset, empty and explicit false values mean a visible browser. Anything
/// else, including browser modes such as `new` or `shell`, means headless.
pub fn parse_headless(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) => !matches!(v.as_str(), "" | "false" | "0" | "no" | "off"),
        None => false,
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            session_name: env::var("NHCATALOG_BROWSER_SESSION")
                .unwrap_or_else(|_| "nhcatalog".to_string()),
            headless: parse_headless(env::var(HEADLESS_ENV).ok().as_deref()),
            viewport_width: 1080,
            viewport_height: 1024,
            timeout_ms: 60000,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            user_agent: format!("nhcatalog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
            images_dir: "images".to_string(),
            json_file: "products.json".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            asset_prefix: "//assets.cnhindustrial.com".to_string(),
            models_link_suffix: "modelos".to_string(),
            specs_link_suffix: "cnicas".to_string(),
        }
    }
}

impl OutputConfig {
    /// Directory downloaded images are written to
    pub fn images_path(&self) -> PathBuf {
        self.dir.join(&self.images_dir)
    }

    /// Path of the aggregate JSON document
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nhcatalog")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::load_from(&Self::config_file()).unwrap_or_default();
        config.apply_env();
        config
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScrapeError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ScrapeError::config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScrapeError::config(format!("Failed to parse config: {}", e)))
    }

    /// Let environment variables override values read from a file
    pub fn apply_env(&mut self) {
        if let Ok(value) = env::var(HEADLESS_ENV) {
            self.browser.headless = parse_headless(Some(&value));
        }
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_headless() {
        assert!(!parse_headless(None));
        assert!(parse_headless(Some("true")));
        assert!(parse_headless(Some("1")));
        assert!(parse_headless(Some(" TRUE ")));
        assert!(parse_headless(Some("new")));
        assert!(parse_headless(Some("shell")));
        assert!(!parse_headless(Some("false")));
        assert!(!parse_headless(Some(" OFF ")));
        assert!(!parse_headless(Some("no")));
        assert!(!parse_headless(Some("0")));
        assert!(!parse_headless(Some("")));
    }

    #[test]
    fn test_env_overrides_config_file() {
        let _guard = ENV_LOCK.lock().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[browser]\nheadless = false\n").unwrap();

        let previous = env::var(HEADLESS_ENV).ok();
        env::set_var(HEADLESS_ENV, "true");

        let mut config = Config::load_from(&path).unwrap();
        config.apply_env();
        let with_env = config.browser.headless;

        env::remove_var(HEADLESS_ENV);
        let mut config = Config::load_from(&path).unwrap();
        config.apply_env();
        let without_env = config.browser.headless;

        if let Some(value) = previous {
            env::set_var(HEADLESS_ENV, value);
        }

        assert!(with_env);
        assert!(!without_env);
    }

    #[test]
    fn test_default_output_paths() {
        let output = OutputConfig::default();
        assert_eq!(output.images_path(), PathBuf::from("./output/images"));
        assert_eq!(output.json_path(), PathBuf::from("./output/products.json"));
    }

    #[test]
    fn test_default_site() {
        let config = Config::default();
        assert_eq!(config.site.asset_prefix, "//assets.cnhindustrial.com");
        assert_eq!(config.browser.viewport_width, 1080);
        assert_eq!(config.browser.viewport_height, 1024);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [output]
            dir = "/tmp/catalog"
            images_dir = "img"
            json_file = "all.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.images_path(), PathBuf::from("/tmp/catalog/img"));
        assert_eq!(config.site.specs_link_suffix, "cnicas");
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = Config::default_config_toml();
        assert!(toml_str.contains("asset_prefix"));
        assert!(toml_str.contains("viewport_width"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/nhcatalog.toml")).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }
}
