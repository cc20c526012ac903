//! Configuration management for apply-form
//!
//! Config file location:
//! - Linux: ~/.config/apply-form/config.toml
//! - macOS: ~/Library/Application Support/com.buildwise.apply-form/config.toml
//! - Windows: %APPDATA%/buildwise/apply-form/config/config.toml
//!
//! You can override the config location by setting `APPLY_FORM_CONFIG_PATH`
//! and the webhook URL by setting `APPLY_FORM_WEBHOOK_URL`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Webhook endpoint configuration
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Form behavior
    #[serde(default)]
    pub form: FormConfig,
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            toml::from_str::<Config>(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("APPLY_FORM_WEBHOOK_URL") {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                config.webhook.url = trimmed.to_string();
            }
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("APPLY_FORM_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("com", "buildwise", "apply-form")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

/// Webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint receiving the application payload
    #[serde(default = "default_webhook_url")]
    pub url: String,

    /// Request timeout in seconds. Unset means the transport decides.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Whether to verify SSL certificates
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: default_webhook_url(),
            timeout_seconds: None,
            verify_ssl: default_true(),
        }
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

fn default_webhook_url() -> String {
    "https://n8n.srv946784.hstgr.cloud/webhook/Buildwise".to_string()
}

fn default_true() -> bool {
    true
}

/// Form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Largest resume accepted, in bytes
    #[serde(default = "default_max_resume_bytes")]
    pub max_resume_bytes: u64,

    /// How long the success message stays visible, in milliseconds
    #[serde(default = "default_success_hide_ms")]
    pub success_hide_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_resume_bytes: default_max_resume_bytes(),
            success_hide_ms: default_success_hide_ms(),
        }
    }
}

impl FormConfig {
    pub fn success_hide_after(&self) -> Duration {
        Duration::from_millis(self.success_hide_ms)
    }
}

fn default_max_resume_bytes() -> u64 {
    5 * 1024 * 1024 // 5 MiB
}

fn default_success_hide_ms() -> u64 {
    5_000
}

/// Get configuration file path for display purposes
pub fn get_config_path() -> Result<String> {
    let path = Config::config_path()?;
    Ok(path.display().to_string())
}
