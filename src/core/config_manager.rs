// src/core/config_manager.rs
//! Configuration loading: optional YAML file, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILE: &str = "resume-editor.yaml";

const DEFAULT_API_URL: &str = "https://web-resume-editor.onrender.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOG_FILE: &str = "/tmp/resume-editor.log";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub download_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    service: ServiceConfig,
    output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load configuration from `resume-editor.yaml` (if present) and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit file, reading variables through `lookup`
    pub fn load_from<F>(config_path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("RESUME_EDITOR_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());

        let section = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let file: ConfigFile = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;

            match environment.as_str() {
                "production" => file.production,
                _ => file.local,
            }
        } else {
            EnvironmentSection::default()
        };

        let mut config = Self {
            environment,
            service: section.service,
            output: section.output,
        };
        config.apply_env_overrides(&lookup)?;

        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RESUME_API_URL") {
            self.service.api_url = url;
        }
        if let Some(timeout) = lookup("RESUME_API_TIMEOUT_SECS") {
            self.service.timeout_seconds = timeout
                .parse()
                .context("RESUME_API_TIMEOUT_SECS must be a number of seconds")?;
        }
        if let Some(dir) = lookup("RESUME_OUTPUT_DIR") {
            self.output.download_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("RESUME_LOG_FILE") {
            self.output.log_file = PathBuf::from(file);
        }
        Ok(())
    }

    pub fn with_api_url(mut self, url: String) -> Self {
        self.service.api_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.service.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.output.download_dir = dir;
        self
    }

    pub fn log_summary(&self) {
        info!("Environment: {}", self.environment);
        info!("Resume service: {}", self.service.api_url);
        info!("Request timeout: {}s", self.service.timeout_seconds);
        info!("Download directory: {}", self.output.download_dir.display());
    }
}
