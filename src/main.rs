//
//  stripe-kit
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stripe_kit::api::ApiError;
use stripe_kit::cli::{Cli, Commands};
use stripe_kit::exit_codes;
use stripe_kit::output::{OutputFormat, OutputWriter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            OutputWriter::new(OutputFormat::Table).write_error(&format!("{e:#}"));
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("STRIPE_KIT_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Picks the exit code for an error that reached the top level
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Encode(_)) => exit_codes::USAGE,
        Some(ApiError::AuthRequired | ApiError::AuthFailed(_) | ApiError::Forbidden(_)) => {
            exit_codes::AUTH_ERROR
        }
        Some(ApiError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(ApiError::RateLimited(_)) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Products(cmd) => cmd.run(&cli.global).await,
        Commands::Customers(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("stripe-kit version {}", stripe_kit::VERSION);
            Ok(())
        }
    }
}
