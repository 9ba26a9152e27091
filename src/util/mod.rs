//
//  stripe-kit
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Helpers shared by the CLI commands.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`format_time`], [`format_relative_time`]
//! - **Money Utilities**: [`format_amount`]
//! - **String Utilities**: [`truncate`], [`parse_key_value`]
//!
//! ## Example
//!
//! ```rust
//! use stripe_kit::util::{format_amount, truncate};
//!
//! assert_eq!(format_amount(2000, "usd"), "20.00 USD");
//! assert_eq!(truncate("A very long description", 10), "A very ...");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use chrono::{DateTime, Local};

/// Currencies Stripe charges in whole units, with no minor unit.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "bif", "clp", "djf", "gnf", "jpy", "kmf", "krw", "mga", "pyg", "rwf", "ugx", "vnd", "vuv",
    "xaf", "xof", "xpf",
];

/// Formats a Unix timestamp as `YYYY-MM-DD HH:MM:SS` in the local timezone.
///
/// Invalid timestamps return "Unknown".
///
/// # Example
///
/// ```rust
/// use stripe_kit::util::format_time;
///
/// let formatted = format_time(1704067200);
/// assert!(formatted.starts_with("2024-01-0") || formatted.starts_with("2023-12-31"));
/// ```
pub fn format_time(timestamp: i64) -> String {
    if let Some(dt) = DateTime::from_timestamp(timestamp, 0) {
        let local: DateTime<Local> = dt.into();
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        "Unknown".to_string()
    }
}

/// Formats a Unix timestamp relative to now, e.g. "3 days ago".
pub fn format_relative_time(timestamp: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    relative_to(now, timestamp)
}

fn relative_to(now: i64, timestamp: i64) -> String {
    let diff = now - timestamp;

    if diff < 0 {
        return "in the future".to_string();
    }

    let diff = diff as u64;
    let plural = |n: u64, unit: &str| format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" });

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        plural(diff / 60, "minute")
    } else if diff < 86400 {
        plural(diff / 3600, "hour")
    } else if diff < 2592000 {
        plural(diff / 86400, "day")
    } else if diff < 31536000 {
        plural(diff / 2592000, "month")
    } else {
        plural(diff / 31536000, "year")
    }
}

/// Formats an amount in the smallest currency unit, e.g. `2000` `usd` as
/// `20.00 USD` and `500` `jpy` as `500 JPY`.
pub fn format_amount(amount: i64, currency: &str) -> String {
    let code = currency.to_uppercase();
    if ZERO_DECIMAL_CURRENCIES.contains(&currency.to_lowercase().as_str()) {
        return format!("{} {}", amount, code);
    }

    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, code)
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Parses a `key=value` argument. The value may be empty, which Stripe
/// treats as "remove this key".
pub fn parse_key_value(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => bail!("Expected KEY=VALUE, got '{}'", s),
    }
}
