//! bookcal configuration.
//!
//! Defaults live in ~/.config/bookcal/config.toml; the BOOKSTER_*
//! environment variables override the API section so CI jobs can inject
//! credentials without a config file. The merged value object is built
//! once at startup and passed into the client, never read ambiently.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use bookcal_core::{FeedOptions, NormalizeOptions, PropertyCodes};

static DEFAULT_API_BASE: &str = "https://api.booksterhq.com/system/api/v1";
static DEFAULT_BOOKINGS_PATH: &str = "booking/bookings.json";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub bookings_path: String,
    pub api_key: String,
    /// Attempts per request before giving up.
    pub retry_attempts: u32,
    /// Seconds to wait between attempts.
    pub retry_delay_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_BASE.to_string(),
            bookings_path: DEFAULT_BOOKINGS_PATH.to_string(),
            api_key: String::new(),
            retry_attempts: 3,
            retry_delay_secs: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FeedConfig {
    pub split_days: bool,
    pub known_extras_only: bool,
    pub missing_balance_is_zero: bool,
    /// Deep-link template for the upstream booking page; `{reference}`
    /// is substituted with the booking reference.
    pub booking_url: Option<String>,
    /// Property name to short-code table for split-day titles.
    pub property_codes: HashMap<String, String>,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bookcal").join("config.toml"))
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Invalid config at {}", path.display()))?
            }
            _ => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(base) = env_var("BOOKSTER_API_BASE") {
            self.api.base_url = base;
        }
        if let Some(path) = env_var("BOOKSTER_BOOKINGS_PATH") {
            self.api.bookings_path = path;
        }
        if let Some(key) = env_var("BOOKSTER_API_KEY") {
            self.api.api_key = key;
        }
    }

    pub fn require_api_key(&self) -> Result<()> {
        if self.api.api_key.is_empty() {
            anyhow::bail!(
                "No Bookster API key configured.\n\n\
                Set the BOOKSTER_API_KEY environment variable, or add\n  \
                [api]\n  \
                api_key = \"...\"\n\
                to {}",
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the bookcal config file".to_string())
            );
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            missing_balance_is_zero: self.feed.missing_balance_is_zero,
            known_extras_only: self.feed.known_extras_only,
        }
    }

    /// Feed options for one property; the CLI flag wins over the config
    /// file, and the title comes from the property name when known.
    pub fn feed_options(&self, title: Option<String>, split_days_flag: bool) -> FeedOptions {
        FeedOptions {
            title,
            split_days: split_days_flag || self.feed.split_days,
            property_codes: PropertyCodes::new(self.feed.property_codes.clone()),
            booking_url: self.feed.booking_url.clone(),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
