//! CSV export
//!
//! Documents follow RFC 4180: comma separated, CRLF line endings, fields
//! quoted when they contain a comma, quote or line break.

use super::table::TableRow;
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Byte order mark some spreadsheet tools need to detect UTF-8
pub const UTF8_BOM: &str = "\u{feff}";

/// CSV export options
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions {
    /// Prefix the document with a UTF-8 BOM
    pub bom: bool,
}

/// Quote a field if it needs it
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line: Vec<Cow<'_, str>> = fields.map(escape_field).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Build a CSV document with a header row
pub fn to_csv<T: TableRow>(rows: &[T], options: CsvOptions) -> String {
    let mut out = String::new();
    if options.bom {
        out.push_str(UTF8_BOM);
    }
    push_record(&mut out, T::headers().into_iter());
    for row in rows {
        let cells = row.cells();
        push_record(&mut out, cells.iter().map(String::as_str));
    }
    out
}

/// Default export file name, stamped with the local time
pub fn default_export_file_name(now: DateTime<Local>) -> String {
    format!("cfp-results-{}.csv", now.format("%Y%m%d-%H%M%S"))
}

/// Write rows to `path` as CSV, atomically
///
/// Returns the number of data rows written.
pub async fn write_csv<T: TableRow>(
    path: impl AsRef<Path>,
    rows: &[T],
    options: CsvOptions,
) -> Result<usize> {
    let path = path.as_ref();
    let document = to_csv(rows, options);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::output(format!("Failed to create export directory: {e}")))?;
    }

    let temp_path = path.with_extension("csv.tmp");
    tokio::fs::write(&temp_path, document.as_bytes())
        .await
        .map_err(|e| Error::output(format!("Failed to write export file: {e}")))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| Error::output(format!("Failed to rename export file: {e}")))?;

    info!(path = %path.display(), rows = rows.len(), "Exported CSV");
    Ok(rows.len())
}
