//! Validated run configuration.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::LabelScope;
use crate::error::{LabelError, Result};
use crate::units::{to_canonical, Unit};

/// Which label collection new labels are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Sheet-scoped net labels
    #[default]
    Local,
    /// Design-scoped global labels
    Global,
}

impl Visibility {
    pub fn scope(self) -> LabelScope {
        match self {
            Visibility::Local => LabelScope::Local,
            Visibility::Global => LabelScope::Global,
        }
    }
}

/// Everything a placement run needs. Only constructible through
/// [`Configuration::new`], so a value in hand is always complete and valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    unit: Unit,
    visibility: Visibility,
    pitch: f64,
    schematic_path: PathBuf,
    csv_path: PathBuf,
}

impl Configuration {
    pub fn new(
        unit: Unit,
        visibility: Visibility,
        pitch: f64,
        schematic_path: impl Into<PathBuf>,
        csv_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(LabelError::InvalidConfiguration(format!(
                "pitch must be a positive number, got {pitch}"
            )));
        }

        let schematic_path = schematic_path.into();
        let csv_path = csv_path.into();
        ensure_readable_file(&schematic_path, "schematic")?;
        ensure_readable_file(&csv_path, "CSV")?;

        Ok(Self {
            unit,
            visibility,
            pitch,
            schematic_path,
            csv_path,
        })
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Pitch in the configured unit.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Pitch in millimeters.
    pub fn pitch_mm(&self) -> f64 {
        to_canonical(self.pitch, self.unit)
    }

    pub fn schematic_path(&self) -> &Path {
        &self.schematic_path
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

fn ensure_readable_file(path: &Path, what: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(LabelError::InvalidConfiguration(format!(
            "no {what} file given"
        )));
    }
    if !path.is_file() {
        return Err(LabelError::InvalidConfiguration(format!(
            "{what} file {} does not exist",
            path.display()
        )));
    }
    File::open(path).map_err(|e| {
        LabelError::InvalidConfiguration(format!(
            "{what} file {} is not readable: {e}",
            path.display()
        ))
    })?;
    Ok(())
}
