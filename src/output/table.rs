//
//  stripe-kit
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Builds terminal tables with `comfy_table`: UTF-8 box drawing, content
//! arranged to the terminal width, cyan headers when colour is on.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stripe_kit::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "Name", "Active"])
//!     .row(["prod_1", "T-shirt", "Yes"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the standard preset.
///
/// The table uses:
/// - The UTF-8 full border preset
/// - Dynamic content arrangement, wrapping cells to the terminal width
///
/// # Returns
///
/// A new [`Table`] with no header and no rows.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builder for list tables.
///
/// Every method consumes and returns the builder, so a table is built in
/// one expression and finished with [`TableBuilder::print`] or
/// [`TableBuilder::build`].
///
/// # Example
///
/// ```rust,ignore
/// use stripe_kit::output::TableBuilder;
///
/// TableBuilder::new()
///     .color(false)
///     .headers(["ID", "Email"])
///     .rows(customers.iter().map(|c| [c.id.clone(), c.email.clone().unwrap_or_default()]))
///     .print();
/// ```
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    /// Creates a builder over [`create_table`], with colour detected from
    /// the terminal.
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides colour detection.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row, cyan when colour is enabled.
    ///
    /// # Notes
    ///
    /// Call [`TableBuilder::color`] first: the colour decision is taken
    /// when the headers are set.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Appends one row. Cells are taken as given; style them beforehand.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self.table);
    }

    /// Returns the finished table without printing it.
    ///
    /// # Returns
    ///
    /// The underlying [`Table`], for rendering with `to_string()` or
    /// inspecting in tests.
    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Green `active`, dim `inactive`.
pub fn format_active(active: bool, color: bool) -> String {
    let text = if active { "active" } else { "inactive" };
    if !color {
        return text.to_string();
    }

    use console::style;
    if active {
        style(text).green().to_string()
    } else {
        style(text).dim().to_string()
    }
}

/// Formats a boolean as `Yes` / `No`.
///
/// # Parameters
///
/// * `value` - The boolean to format
/// * `color` - When set, `Yes` is green and `No` is dim
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}
