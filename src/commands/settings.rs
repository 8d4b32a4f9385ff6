use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TYPING_DELAY_ENV: &str = "SMART_HEALTH_TYPING_DELAY_MS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub typing_delay_ms: u64, // simulated "assistant is typing" pause
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { typing_delay_ms: 1500 }
    }
}

impl AppSettings {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Env vars take priority over the file.
    fn apply_env(mut self, typing_delay: Option<String>) -> Self {
        if let Some(raw) = typing_delay {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.typing_delay_ms = ms,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number of milliseconds", TYPING_DELAY_ENV, raw),
            }
        }
        self
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("smart-health-ai").join("settings.json"))
}

fn read_settings(path: &Path) -> Result<AppSettings> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings at {:?}", path))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse settings at {:?}", path))
}

/// Load settings from disk, or return defaults. A broken file is reported and skipped.
pub fn load_settings_from(path: Option<&Path>) -> AppSettings {
    let settings = match path {
        Some(path) if path.exists() => read_settings(path).unwrap_or_else(|e| {
            log::warn!("{:#}; using defaults", e);
            AppSettings::default()
        }),
        _ => AppSettings::default(),
    };
    settings.apply_env(std::env::var(TYPING_DELAY_ENV).ok())
}

pub fn get_settings() -> AppSettings {
    load_settings_from(settings_path().as_deref())
}
