//
//  stripe-kit
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stripe Kit Library
//!
//! A strongly-typed client for the Stripe REST API, plus the `stripe-kit`
//! command-line tool built on top of it.
//!
//! ## Overview
//!
//! Every Stripe write and most reads send their parameters as
//! `application/x-www-form-urlencoded` with bracket notation for nested
//! keys (`metadata[order_id]=6735`). This library models those parameters
//! as a closed value type, encodes them in one place, and layers typed
//! route groups on top.
//!
//! ## Features
//!
//! - **Parameter Encoder**: nested maps, indexed lists, booleans and
//!   numbers flattened into Stripe's form encoding
//! - **Route Groups**: create, retrieve, update, list, delete and search
//!   for products and customers
//! - **Pluggable Transport**: route groups only need an [`api::ApiHandler`]
//! - **Scriptable CLI**: tables for people, JSON for automation
//!
//! ## Module Structure
//!
//! - [`api`]: Parameter encoding, request building and route groups
//! - [`auth`]: API key classification and bearer authentication
//! - [`config`]: Configuration file and environment overrides
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stripe_kit::api::StripeClient;
//! use stripe_kit::api::resources::products::CreateProductParams;
//! use stripe_kit::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = StripeClient::from_config(&config)?;
//!
//! let product = client
//!     .products()
//!     .create(&CreateProductParams::new("T-shirt").metadata("sku", "TS-01"))
//!     .await?;
//! println!("Created {}", product.id);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Stripe API access.
///
/// Parameter encoding, the generic request builder, the transport trait
/// and its `reqwest` implementation, and typed route groups.
pub mod api;

/// Secret and restricted key handling.
pub mod auth;

/// Configuration file management.
///
/// Manages the configuration stored in platform-specific locations:
/// - Linux: `~/.config/stripe-kit/config.toml`
/// - macOS: `~/Library/Application Support/stripe-kit/config.toml`
/// - Windows: `%APPDATA%\stripe-kit\config\config.toml`
pub mod config;

/// Output formatting for different modes.
///
/// Provides formatters for:
/// - Table format: Human-readable tables for interactive use
/// - JSON format: Structured output for scripting and automation
pub mod output;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use stripe_kit::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "stripe-kit";

/// Application version constant, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use stripe_kit::VERSION;
///
/// println!("stripe-kit version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including parameters that could not be
    /// encoded.
    pub const USAGE: i32 = 2;

    /// No API key configured, or Stripe rejected it.
    ///
    /// Set `STRIPE_API_KEY` or run `stripe-kit config set api_key <key>`.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested object does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// Stripe's rate limit was exceeded. Wait before retrying.
    pub const RATE_LIMIT: i32 = 32;
}
