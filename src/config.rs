//! Configuration handling for the TUI

use crate::state::{ToastPosition, ToastStyle};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend address
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3333";

/// Environment variable overriding the configured backend address
const BACKEND_URL_ENV: &str = "SIGNUP_BACKEND_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOAST_DURATION_MS: u64 = 6000;

/// Profession options offered by the form
const DEFAULT_PROFESSIONS: &[&str] = &[
    "Desenvolvedor",
    "Agilista",
    "QA",
    "Product Ower",
    "Tech Leader",
    "Analista SEO",
    "Outros",
];

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignupConfig {
    /// Backend address; registrations live at `<backend_url>/form`
    pub backend_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// How long toasts stay on screen, in milliseconds
    pub toast_duration_ms: Option<u64>,
    /// Screen corner toasts are anchored to
    pub toast_position: Option<ToastPosition>,
    /// Profession options offered by the form
    pub professions: Option<Vec<String>>,
}

impl SignupConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "signup", "signup-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_or_init(&path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::var(BACKEND_URL_ENV).ok());
        Ok(config)
    }

    /// Read the config at `path`, writing a default one on first run
    fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: SignupConfig = serde_json::from_str(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let config = Self::default();
        match config.save_to(path) {
            Ok(()) => tracing::info!("Wrote default config to {}", path.display()),
            Err(err) => tracing::warn!("Could not write config to {}: {err}", path.display()),
        }
        Ok(config)
    }

    fn apply_env(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = Some(url);
        }
    }

    /// Save configuration to `path` as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS))
    }

    pub fn toast_style(&self) -> ToastStyle {
        ToastStyle {
            duration: self.toast_duration(),
            position: self.toast_position.unwrap_or_default(),
        }
    }

    pub fn professions(&self) -> Vec<String> {
        match &self.professions {
            Some(list) if !list.is_empty() => list.clone(),
            _ => DEFAULT_PROFESSIONS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
