//
//  stripe-kit
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the config file directly. Environment overrides are
//! not applied here, so `config set` never persists a value that came from
//! `STRIPE_API_KEY`.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::auth::AuthCredential;
use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the value of a configuration key
    Get(GetArgs),

    /// Set a configuration key
    Set(SetArgs),

    /// Reset a configuration key to its default
    Unset(UnsetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// New value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn load(global: &GlobalOptions) -> Result<Config> {
        Config::load_from(&global.config_path()?)
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Self::load(global)?;
        if !CONFIG_KEYS.contains(&args.key.as_str()) {
            anyhow::bail!(
                "Unknown config key '{}'. Valid keys: {}",
                args.key,
                CONFIG_KEYS.join(", ")
            );
        }
        let value = display_value(&args.key, config.get(&args.key));

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.set(&args.key, args.value.clone())?;
        config.save_to(&path)?;

        let shown = display_value(&args.key, Some(args.value.clone())).unwrap_or_default();
        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": shown,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                shown
            );
        }

        Ok(())
    }

    fn unset(&self, args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.unset(&args.key)?;
        config.save_to(&path)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Self::load(global)?;

        if global.json {
            let values: serde_json::Map<String, serde_json::Value> = CONFIG_KEYS
                .iter()
                .map(|key| {
                    let value = display_value(key, config.get(key))
                        .map(serde_json::Value::String)
                        .unwrap_or(serde_json::Value::Null);
                    (key.to_string(), value)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        } else {
            for key in CONFIG_KEYS {
                let value = display_value(key, config.get(key));
                println!(
                    "{}={}",
                    style(key).cyan(),
                    value.unwrap_or_else(|| style("(not set)").dim().to_string())
                );
            }
        }

        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        if global.json {
            let result = serde_json::json!({ "path": path });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}

/// API keys are shown masked.
fn display_value(key: &str, value: Option<String>) -> Option<String> {
    match (key, value) {
        ("api_key", Some(raw)) => Some(
            AuthCredential::from_key(raw.as_str())
                .map(|c| c.masked())
                .unwrap_or_else(|_| "****".to_string()),
        ),
        (_, value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_masked() {
        assert_eq!(
            display_value("api_key", Some("sk_test_abcdef123456".to_string())).as_deref(),
            Some("sk_test_...3456")
        );
        assert_eq!(
            display_value("api_base", Some("http://localhost".to_string())).as_deref(),
            Some("http://localhost")
        );
        assert_eq!(display_value("api_version", None), None);
    }
}
