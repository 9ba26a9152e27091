//
//  stripe-kit
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the CLI, in two modes:
//!
//! - **Table format**: Human-readable tabular output for interactive terminal use
//! - **JSON format**: The raw Stripe objects, pretty-printed, for scripting
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//!
//! Commands pick a format once from the global `--json` flag and hand every
//! value to an [`OutputWriter`]. Types opt into the table mode by
//! implementing [`TableOutput`] (detail view) and [`TableRow`] (list row).
//!
//! ## Example
//!
//! ```rust,ignore
//! use stripe_kit::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&product)?;
//! writer.write_success("Deleted prod_123");
//! ```
//!
//! ## Notes
//!
//! Data goes to stdout; errors go to stderr so `--json` output stays
//! parseable when a command fails.

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

/// Output format selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Detail views and `comfy_table` tables.
    #[default]
    Table,
    /// Pretty-printed JSON, exactly as Stripe returned it.
    Json,
}

impl OutputFormat {
    /// Maps the `--json` flag to a format.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stripe_kit::output::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
    /// ```
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes values in the selected format.
///
/// Colour follows `console`'s detection (disabled when stdout is not a
/// terminal or `NO_COLOR` is set).
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer for `format`, detecting colour support.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stripe_kit::output::{OutputFormat, OutputWriter};
    ///
    /// let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));
    /// ```
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes one value: pretty JSON, or the value's detail view.
    ///
    /// # Parameters
    ///
    /// * `value` - Must implement `Serialize` for JSON and [`TableOutput`]
    ///   for the detail view
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or an error if JSON serialization or the write
    /// to stdout fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let product = client.products().retrieve("prod_123", &[]).await?;
    /// writer.write(&product)?;
    /// ```
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a page of values: a JSON array, or one table row per value.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or an error if JSON serialization fails.
    ///
    /// # Notes
    ///
    /// An empty page prints `No results` in table mode and `[]` in JSON
    /// mode, so scripts always receive an array.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values),
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info("No results");
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
                Ok(())
            }
        }
    }

    /// Prints an error message to stderr, prefixed with `error:`.
    ///
    /// Used by the binary for any error that reaches the top level, in
    /// both output formats.
    pub fn write_error(&self, msg: &str) {
        eprintln!("{}", error_line(msg, self.color));
    }

    /// Prints a plain informational line to stdout.
    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Prints a confirmation line to stdout, prefixed with a check mark.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// writer.write_success(&format!("Created product {}", product.id));
    /// // ✓ Created product prod_123
    /// ```
    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

fn error_line(msg: &str, color: bool) -> String {
    if color {
        format!("{} {}", style("error:").red().bold(), msg)
    } else {
        format!("error: {}", msg)
    }
}

/// A detail view for one object.
///
/// Implementations print a header and one [`print_field`] line per set
/// field; absent optional fields are skipped.
pub trait TableOutput {
    /// Prints the detail view to stdout.
    ///
    /// # Parameters
    ///
    /// * `color` - Whether ANSI styling may be used
    fn print_table(&self, color: bool);
}

/// One row of a list table.
pub trait TableRow {
    /// Column headers, shared by every row of the type.
    fn headers() -> &'static [&'static str];

    /// Cell values in the same order as [`TableRow::headers`].
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold title underlined with dashes of the same width.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints an indented `key: value` line of a detail view.
///
/// # Parameters
///
/// * `key` - Field label, printed dimmed when `color` is set
/// * `value` - Already formatted value
/// * `color` - Whether ANSI styling may be used
///
/// # Notes
///
/// Labels are padded to a fixed width so values line up in one column.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("  {:<22} {}", style(format!("{key}:")).dim(), value);
    } else {
        println!("  {:<22} {}", format!("{key}:"), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_error_line_without_color() {
        assert_eq!(
            error_line("Authentication required", false),
            "error: Authentication required"
        );
    }

    #[test]
    fn test_error_line_with_color_keeps_message() {
        let line = error_line("Resource not found", true);
        assert!(line.ends_with(" Resource not found"));
        assert!(console::strip_ansi_codes(&line).starts_with("error:"));
    }
}
