//! Reading label values out of a CSV file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};

use crate::error::{LabelError, Result};

/// Header name (after trimming and case folding) of the column holding labels.
pub const LABEL_COLUMN: &str = "label";

/// One label value taken from the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    /// Trimmed, upper-cased, never empty
    pub text: String,
    /// Zero-based index among emitted records. Skipped rows leave no gap.
    pub ordinal: usize,
}

/// Read every non-empty label from the CSV file at `path`, in file order.
pub fn extract_labels(path: &Path) -> Result<Vec<LabelRecord>> {
    let file = File::open(path).map_err(|e| LabelError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    extract_labels_from_reader(file, path)
}

/// Same as [`extract_labels`] for any reader. `source` is only used in errors.
pub fn extract_labels_from_reader<R: Read>(reader: R, source: &Path) -> Result<Vec<LabelRecord>> {
    let csv_error = |e: csv::Error| LabelError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?;
    let column = find_label_column(headers).ok_or_else(|| LabelError::MissingColumn {
        path: source.to_path_buf(),
    })?;
    debug!(
        "Using column {column} ('{}') of {} for labels",
        &headers[column],
        source.display()
    );

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_data = result.map_err(csv_error)?;
        let text = row_data.get(column).unwrap_or_default().trim();
        if text.is_empty() {
            trace!("Skipping data row {row}: empty label");
            continue;
        }
        records.push(LabelRecord {
            text: text.to_uppercase(),
            ordinal: records.len(),
        });
    }

    debug!("Extracted {} labels from {}", records.len(), source.display());
    Ok(records)
}

/// Index of the first header equal to `label` ignoring case and surrounding
/// whitespace.
pub fn find_label_column(headers: &csv::StringRecord) -> Option<usize> {
    headers.iter().position(|name| {
        name.trim_start_matches('\u{feff}')
            .trim()
            .eq_ignore_ascii_case(LABEL_COLUMN)
    })
}
