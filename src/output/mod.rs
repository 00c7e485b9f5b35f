//! Output module
//!
//! Renders command results for the terminal and for export.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Laying out records as aligned text tables (`TableRow`)
//! - Rendering a list view with its page footer and empty state
//! - Pretty JSON output
//! - CSV export with RFC 4180 quoting

mod csv;
mod table;

pub use csv::{default_export_file_name, escape_field, to_csv, write_csv, CsvOptions, UTF8_BOM};
pub use table::{render_table, render_view, TableRow, EMPTY_STATE};

use crate::error::Result;
use serde::Serialize;

/// Render any serializable value as pretty JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
