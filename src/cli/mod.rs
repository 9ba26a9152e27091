//
//  stripe-kit
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod completion;
mod config;
mod customer;
mod product;

pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use customer::CustomerCommand;
pub use product::ProductCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::StripeClient;
use crate::config::Config;

/// Stripe Kit - Work with the Stripe API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "stripe-kit",
    version,
    about = "Work with the Stripe API from the command line",
    long_about = "stripe-kit manages Stripe products and customers from your terminal.\n\n\
                  Authenticate with STRIPE_API_KEY or `stripe-kit config set api_key <key>`.",
    propagate_version = true,
    after_help = "Use 'stripe-kit <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Secret or restricted API key (overrides the config file)
    #[arg(long, global = true, env = "STRIPE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "STRIPE_KIT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// The config file in use.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// The config file with environment overrides and `--api-key` applied.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_from(&self.config_path()?)?
            .with_overrides(|name| std::env::var(name).ok());
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        Ok(config)
    }

    /// A client built from [`Self::load_config`].
    pub fn client(&self) -> Result<StripeClient> {
        let config = self.load_config()?;
        StripeClient::from_config(&config).context("Failed to create Stripe client")
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage products
    #[command(visible_alias = "product")]
    Products(ProductCommand),

    /// Manage customers
    #[command(visible_alias = "customer")]
    Customers(CustomerCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}
