//! The placement run: backup, extract, lay out, mutate, persist.

use std::path::PathBuf;

use log::{debug, info};

use crate::backup::snapshot;
use crate::config::Configuration;
use crate::document::LabelDocument;
use crate::error::{LabelError, Result};
use crate::extract::{extract_labels, LabelRecord};
use crate::layout::position_for;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionResult {
    /// Number of labels inserted
    pub count: usize,
    pub schematic_path: PathBuf,
    pub backup_path: PathBuf,
}

/// Insert one label per CSV record into `document` and write it back to the
/// configured schematic path.
///
/// The schematic file is backed up before anything else happens, and every
/// label is extracted before the document is touched, so a bad CSV never
/// leaves a partially labeled schematic behind.
pub fn place_labels(
    config: &Configuration,
    document: &mut dyn LabelDocument,
) -> Result<InsertionResult> {
    place_labels_with_progress(config, document, |_| {})
}

/// Like [`place_labels`], calling `on_placed` after each label is created.
pub fn place_labels_with_progress(
    config: &Configuration,
    document: &mut dyn LabelDocument,
    mut on_placed: impl FnMut(&LabelRecord),
) -> Result<InsertionResult> {
    let pitch_mm = config.pitch_mm();
    debug!(
        "Pitch {} {} is {pitch_mm} mm",
        config.pitch(),
        config.unit()
    );

    let backup = snapshot(config.schematic_path())?;
    let records = extract_labels(config.csv_path())?;

    let scope = config.visibility().scope();
    let collection = document.labels(scope);
    for record in &records {
        let position = position_for(record.ordinal, pitch_mm);
        debug!("Placing {scope:?} label {} at {position}", record.text);

        let label = collection.new_label();
        label.set_text(&record.text);
        label.set_position(position);
        on_placed(record);
    }

    document
        .persist(config.schematic_path())
        .map_err(|source| LabelError::Persist {
            path: config.schematic_path().to_path_buf(),
            source,
        })?;

    info!(
        "Inserted {} labels into {}",
        records.len(),
        config.schematic_path().display()
    );
    Ok(InsertionResult {
        count: records.len(),
        schematic_path: config.schematic_path().to_path_buf(),
        backup_path: backup.path,
    })
}
