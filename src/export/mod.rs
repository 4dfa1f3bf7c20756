//! Spreadsheet export.
//!
//! Persists the normalized page records as a two-column CSV artifact. The
//! artifact is written once per request under a name derived from the upload
//! filename and is never mutated afterwards; a name collision overwrites the
//! previous artifact.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::document::PageRecord;

/// Extension carried by every export artifact.
pub const SPREADSHEET_EXTENSION: &str = "csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to prepare storage directory")]
    Storage {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write spreadsheet")]
    Write {
        #[source]
        source: csv::Error,
    },
}

/// Maps an upload filename to its artifact name.
///
/// The final extension is replaced with [`SPREADSHEET_EXTENSION`]; a name
/// without an extension gains a `.csv` suffix instead.
#[must_use]
pub fn derive_artifact_name(upload_name: &str) -> String {
    match upload_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.{SPREADSHEET_EXTENSION}"),
        _ => format!("{upload_name}.{SPREADSHEET_EXTENSION}"),
    }
}

/// Writes `records` to `destination` as a CSV spreadsheet.
///
/// Emits a `Page,Text` header followed by one row per record, in order. A
/// record's text lines are joined with `\n` inside the cell (the writer
/// quotes embedded newlines); an empty text sequence yields a true empty
/// string. Any existing file at `destination` is replaced.
pub fn write_spreadsheet(records: &[PageRecord], destination: &Path) -> Result<(), ExportError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Storage { source })?;
        }
    }

    let mut writer =
        csv::Writer::from_path(destination).map_err(|source| ExportError::Write { source })?;

    writer
        .write_record(["Page", "Text"])
        .map_err(|source| ExportError::Write { source })?;

    for record in records {
        writer
            .write_record([record.page_number.to_string(), record.text.join("\n")])
            .map_err(|source| ExportError::Write { source })?;
    }

    writer
        .flush()
        .map_err(|source| ExportError::Storage { source })?;

    Ok(())
}
