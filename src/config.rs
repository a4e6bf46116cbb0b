use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = "config.toml";
pub(crate) const DB_FILE: &str = "fintrack.db";
pub(crate) const LOG_FILE: &str = "fintrack.log";

pub(crate) const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub(crate) const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Platform directories for the database, the log and `config.toml`.
#[derive(Debug, Clone)]
pub(crate) struct AppPaths {
    pub(crate) data_dir: PathBuf,
    pub(crate) config_dir: PathBuf,
}

impl AppPaths {
    pub(crate) fn discover() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "FinTrack")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self {
            data_dir: proj_dirs.data_dir().to_path_buf(),
            config_dir: proj_dirs.config_dir().to_path_buf(),
        })
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) log_filter: String,
    pub(crate) ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            ai: AiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AiConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
    pub(crate) endpoint: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}

impl AiConfig {
    /// The configured key, treating a blank value as absent.
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl AppConfig {
    /// Read `path`. A missing file yields the defaults; an unreadable or
    /// malformed one is an error.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `FINTRACK_API_KEY` (falling back to `API_KEY`) and `FINTRACK_LOG`.
    pub(crate) fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_blank("FINTRACK_API_KEY").or_else(|| non_blank("API_KEY")) {
            self.ai.api_key = Some(key);
        }
        if let Some(filter) = non_blank("FINTRACK_LOG") {
            self.log_filter = filter;
        }
        self
    }

    pub(crate) fn from_process_env(self) -> Self {
        self.with_env(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
