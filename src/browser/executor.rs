//! Browser executor - wraps agent-browser CLI
//!
//! Each call spawns one agent-browser command against a named session, so
//! the browser and its page survive between calls.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::browser::{Page, PageSource, WaitUntil};
use crate::core::config::BrowserConfig;
use crate::core::{Result, ScrapeError};

/// Script that serializes the whole document
const OUTER_HTML_SCRIPT: &str = "document.documentElement.outerHTML";

/// Executor for browser automation via agent-browser CLI
pub struct BrowserExecutor {
    /// Session name for isolation
    session_name: String,
    /// Whether to run without a visible window
    headless: bool,
    viewport: (u32, u32),
    /// Upper bound for a single command
    timeout: Duration,
}

/// `--json` envelope printed by agent-browser
#[derive(Debug, Deserialize)]
struct JsonOutput {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl BrowserExecutor {
    /// Create a new browser executor
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            headless: false,
            viewport: (1080, 1024),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create an executor from the browser configuration
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            session_name: config.session_name.clone(),
            headless: config.headless,
            viewport: (config.viewport_width, config.viewport_height),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Check if agent-browser is installed
    pub async fn is_available() -> bool {
        Command::new("agent-browser")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Arguments shared by every command
    fn base_args(&self) -> Vec<String> {
        let mut args = vec!["--session".to_string(), self.session_name.clone()];
        if !self.headless {
            args.push("--headed".to_string());
        }
        args
    }

    /// Run an agent-browser command
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("agent-browser");
        cmd.args(self.base_args());
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(session = %self.session_name, ?args, "agent-browser");

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                ScrapeError::browser(format!(
                    "agent-browser {} timed out after {:?}",
                    args.first().copied().unwrap_or_default(),
                    self.timeout
                ))
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScrapeError::AgentBrowserNotFound
                } else {
                    ScrapeError::browser(format!("Failed to run agent-browser: {}", e))
                }
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ScrapeError::browser(format!(
                "agent-browser command failed: {}",
                stderr.trim()
            )))
        }
    }

    /// Run a command and return JSON output
    async fn run_json_command(&self, args: &[&str]) -> Result<String> {
        let mut full_args: Vec<&str> = args.to_vec();
        full_args.push("--json");
        self.run_command(&full_args).await
    }

    /// Resize the viewport
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        let (w, h) = (width.to_string(), height.to_string());
        self.run_command(&["set", "viewport", &w, &h]).await?;
        Ok(())
    }

    /// Navigate to a URL and wait for the requested load state
    pub async fn navigate(&self, url: &str, wait: WaitUntil) -> Result<()> {
        self.run_command(&["open", url])
            .await
            .map_err(|e| ScrapeError::navigation(url, e.to_string()))?;
        self.run_command(&["wait", "--load", wait.as_str()])
            .await
            .map_err(|e| ScrapeError::navigation(url, e.to_string()))?;
        Ok(())
    }

    /// Get current URL
    pub async fn get_url(&self) -> Result<String> {
        self.run_command(&["get", "url"])
            .await
            .map(|s| s.trim().to_string())
    }

    /// Evaluate JavaScript and return its result as a string
    pub async fn eval(&self, script: &str) -> Result<String> {
        let output = self.run_json_command(&["eval", script]).await?;
        parse_eval_output(&output)
    }

    /// Serialize the current document
    pub async fn content(&self) -> Result<String> {
        self.eval(OUTER_HTML_SCRIPT).await
    }
}

/// Pull the evaluated value out of agent-browser's JSON envelope.
///
/// Plain (non-JSON) output is returned as-is.
fn parse_eval_output(output: &str) -> Result<String> {
    let parsed: JsonOutput = match serde_json::from_str(output.trim()) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(output.to_string()),
    };

    if !parsed.success {
        return Err(ScrapeError::browser(
            parsed
                .error
                .unwrap_or_else(|| "eval failed without an error message".to_string()),
        ));
    }

    let value = match parsed.data {
        Some(serde_json::Value::Object(mut map)) => {
            map.remove("result").unwrap_or(serde_json::Value::Null)
        }
        Some(other) => other,
        None => serde_json::Value::Null,
    };

    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Err(ScrapeError::browser("eval returned no result")),
        other => Ok(other.to_string()),
    }
}

#[async_trait]
impl PageSource for BrowserExecutor {
    async fn start(&self) -> Result<()> {
        let (w, h) = self.viewport;
        self.set_viewport(w, h).await
    }

    async fn open(&self, url: &str, wait: WaitUntil) -> Result<Page> {
        self.navigate(url, wait).await?;
        let final_url = self.get_url().await?;
        let html = self.content().await?;
        Ok(Page::new(
            if final_url.is_empty() {
                url.to_string()
            } else {
                final_url
            },
            html,
        ))
    }

    async fn close(&self) -> Result<()> {
        self.run_command(&["close"]).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "agent-browser"
    }
}

impl Default for BrowserExecutor {
    fn default() -> Self {
        Self::new("nhcatalog")
    }
}
