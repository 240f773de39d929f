//! Configuration Management
//!
//! Handles persistent configuration storage for the CLI.

use crate::vercel::http::DEFAULT_API_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const TOKEN_ENV: &str = "VERCEL_TOKEN";
pub const API_URL_ENV: &str = "VERCEL_API_URL";
pub const TEAM_ID_ENV: &str = "VERCEL_TEAM_ID";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// API token
    #[serde(default)]
    pub token: Option<String>,
    /// API endpoint override
    #[serde(default)]
    pub api_url: Option<String>,
    /// Default team scope for new resources
    #[serde(default)]
    pub team_id: Option<String>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vercel-project-domain").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective token (CLI > env > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Result<String> {
        cli.map(str::to_string)
            .or_else(|| env_var(TOKEN_ENV))
            .or_else(|| self.token.clone())
            .with_context(|| format!("No API token configured. Set {} or use --token", TOKEN_ENV))
    }

    /// Get effective API URL (CLI > env > config > production)
    pub fn effective_api_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| env_var(API_URL_ENV))
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Get effective team scope (CLI > env > config); `None` for personal accounts
    pub fn effective_team_id(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| env_var(TEAM_ID_ENV))
            .or_else(|| self.team_id.clone())
            .filter(|team| !team.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            token: Some("secret".to_string()),
            api_url: Some("http://localhost:8080".to_string()),
            team_id: None,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_missing_or_malformed_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path), Config::default());

        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_cli_value_wins() {
        let config = Config {
            token: Some("from-file".to_string()),
            api_url: Some("http://file".to_string()),
            team_id: Some("team_file".to_string()),
        };

        assert_eq!(config.effective_token(Some("from-cli")).unwrap(), "from-cli");
        assert_eq!(config.effective_api_url(Some("http://cli")), "http://cli");
        assert_eq!(config.effective_team_id(Some("team_cli")).as_deref(), Some("team_cli"));
    }

    #[test]
    fn test_empty_team_is_no_team() {
        let config = Config::default();
        assert_eq!(config.effective_team_id(Some("")), None);
    }
}
