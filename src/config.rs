//! Configuration file loading.
//!
//! Every field has a default, so an absent file and an empty file are the
//! same thing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::browser::BrowserSettings;
use crate::classify::ClassifierConfig;

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/maps/search/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub classifier: ClassifierSection,
    pub browser: BrowserSection,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:5000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Search page prefix; the address is appended as a path segment
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClassifierSection {
    pub heading_timeout_ms: u64,
    pub list_timeout_ms: u64,
    pub settle_delay_ms: u64,
    pub max_candidates: usize,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            heading_timeout_ms: 10_000,
            list_timeout_ms: 5_000,
            settle_delay_ms: 2_000,
            max_candidates: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BrowserSection {
    pub headless: bool,
    pub no_sandbox: bool,
    pub disable_dev_shm_usage: bool,
    pub disable_gpu: bool,
    pub user_agent: String,
    pub chrome_executable: Option<PathBuf>,
    pub request_timeout_ms: u64,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            headless: true,
            no_sandbox: true,
            disable_dev_shm_usage: true,
            disable_gpu: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            heading_timeout: Duration::from_millis(self.classifier.heading_timeout_ms),
            list_timeout: Duration::from_millis(self.classifier.list_timeout_ms),
            settle_delay: Duration::from_millis(self.classifier.settle_delay_ms),
            max_candidates: self.classifier.max_candidates,
        }
    }

    pub fn browser(&self) -> BrowserSettings {
        BrowserSettings {
            headless: self.browser.headless,
            no_sandbox: self.browser.no_sandbox,
            disable_dev_shm_usage: self.browser.disable_dev_shm_usage,
            disable_gpu: self.browser.disable_gpu,
            user_agent: self.browser.user_agent.clone(),
            chrome_executable: self.browser.chrome_executable.clone(),
            request_timeout: Duration::from_millis(self.browser.request_timeout_ms),
        }
    }
}
