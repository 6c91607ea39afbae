use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a placement run
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("CSV file {} has no 'Label' column", .path.display())]
    MissingColumn { path: PathBuf },

    #[error("Failed to back up {}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV file {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The schematic may be partially written; the backup is the only copy of
    /// the original content.
    #[error("Failed to write schematic {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl LabelError {
    /// Errors caused by bad user input rather than by I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LabelError::InvalidConfiguration(_) | LabelError::MissingColumn { .. }
        )
    }
}

pub type Result<T, E = LabelError> = std::result::Result<T, E>;
