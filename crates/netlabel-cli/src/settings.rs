//! Optional TOML file holding run settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use netlabel_core::{Unit, Visibility};
use serde::Deserialize;

/// Settings read from `--config`. Every field is optional; command line flags
/// take precedence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub unit: Option<Unit>,
    pub visibility: Option<Visibility>,
    pub pitch: Option<f64>,
    pub schematic: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl ConfigFile {
    /// Load a settings file. Relative paths inside it are taken relative to
    /// the file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new("."));
        config.schematic = config.schematic.map(|p| base.join(p));
        config.csv = config.csv.map(|p| base.join(p));
        Ok(config)
    }
}
