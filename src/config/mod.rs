//
//  stripe-kit
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the client configuration: the API key, the API base URL,
//! the pinned API version, an optional connected account and the request
//! timeout.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/stripe-kit/config.toml`
//! - **macOS**: `~/Library/Application Support/stripe-kit/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\stripe-kit\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! api_key = "sk_test_4eC39HqLyjWDarjtT1zdp7dc"
//! api_base = "https://api.stripe.com"
//! api_version = "2024-06-20"
//! timeout_secs = 80
//! ```
//!
//! ## Precedence
//!
//! Environment variables win over the file:
//!
//! | Variable | Key |
//! |----------|-----|
//! | `STRIPE_API_KEY` | `api_key` |
//! | `STRIPE_API_BASE` | `api_base` |
//! | `STRIPE_API_VERSION` | `api_version` |
//! | `STRIPE_ACCOUNT` | `stripe_account` |

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::AuthCredential;

/// Stripe's production API host.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe's own client libraries default to 80 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 80;

/// Every key accepted by [`Config::get`], [`Config::set`] and
/// [`Config::unset`].
pub const CONFIG_KEYS: &[&str] = &[
    "api_key",
    "api_base",
    "api_version",
    "stripe_account",
    "timeout_secs",
];

/// Client configuration.
///
/// All fields use serde defaults so a partial or empty file still loads.
///
/// ```rust
/// use stripe_kit::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.api_base, "https://api.stripe.com");
/// assert_eq!(config.timeout_secs, 80);
/// assert!(config.api_key.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Secret or restricted API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL requests are sent to. Overridden in tests to point at a
    /// local mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Pinned `Stripe-Version`; the account default is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Connected account to act on behalf of (`Stripe-Account` header).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_account: Option<String>,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            api_version: None,
            stripe_account: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads the file at the default location, then applies environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Loads a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = read_config_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Writes the configuration as TOML to `path`.
    ///
    /// Missing parent directories are created. On Unix the file is made
    /// readable by its owner only, since it may hold a secret key.
    ///
    /// # Errors
    ///
    /// Fails when the file or its directory cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// The default config file location.
    ///
    /// # Returns
    ///
    /// `config.toml` inside the platform config directory:
    /// - Linux: `~/.config/stripe-kit/config.toml`
    /// - macOS: `~/Library/Application Support/stripe-kit/config.toml`
    /// - Windows: `%APPDATA%\stripe-kit\config\config.toml`
    ///
    /// # Errors
    ///
    /// Fails when no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "stripe-kit")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies overrides from a variable lookup, normally the process
    /// environment. Empty values are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stripe_kit::config::Config;
    ///
    /// let config = Config::default().with_overrides(|name| match name {
    ///     "STRIPE_API_BASE" => Some("http://localhost:12111".to_string()),
    ///     "STRIPE_ACCOUNT" => Some(String::new()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.api_base, "http://localhost:12111");
    /// assert!(config.stripe_account.is_none());
    /// ```
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("STRIPE_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(base) = var("STRIPE_API_BASE") {
            self.api_base = base;
        }
        if let Some(version) = var("STRIPE_API_VERSION") {
            self.api_version = Some(version);
        }
        if let Some(account) = var("STRIPE_ACCOUNT") {
            self.stripe_account = Some(account);
        }
        self
    }

    /// The configured key as a credential, if one is set.
    pub fn credential(&self) -> Result<Option<AuthCredential>> {
        self.api_key
            .as_deref()
            .map(AuthCredential::from_key)
            .transpose()
    }

    /// Reads a key by name, as it would be written to the file.
    ///
    /// # Returns
    ///
    /// `None` for unset optional keys and for names not in [`CONFIG_KEYS`].
    /// The API key is returned unmasked; callers that display it mask it.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_key" => self.api_key.clone(),
            "api_base" => Some(self.api_base.clone()),
            "api_version" => self.api_version.clone(),
            "stripe_account" => self.stripe_account.clone(),
            "timeout_secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Sets a key by name.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, malformed API keys and non-numeric timeouts.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "api_key" => {
                AuthCredential::from_key(value.as_str())?;
                self.api_key = Some(value.trim().to_string());
            }
            "api_base" => {
                url::Url::parse(&value).with_context(|| format!("Invalid URL: {value}"))?;
                self.api_base = value.trim_end_matches('/').to_string();
            }
            "api_version" => self.api_version = Some(value),
            "stripe_account" => self.stripe_account = Some(value),
            "timeout_secs" => {
                self.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {value}"))?;
            }
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, CONFIG_KEYS.join(", ")),
        }
        Ok(())
    }

    /// Resets a key to its default.
    ///
    /// # Errors
    ///
    /// Fails for names not in [`CONFIG_KEYS`].
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = Self::default();
        match key {
            "api_key" => self.api_key = None,
            "api_base" => self.api_base = defaults.api_base,
            "api_version" => self.api_version = None,
            "stripe_account" => self.stripe_account = None,
            "timeout_secs" => self.timeout_secs = defaults.timeout_secs,
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, CONFIG_KEYS.join(", ")),
        }
        Ok(())
    }
}
