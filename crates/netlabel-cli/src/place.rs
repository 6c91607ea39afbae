use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, warn};
use netlabel_core::{place_labels_with_progress, Configuration, Unit, Visibility};
use netlabel_kicad::{KicadSchematic, SCHEMATIC_EXTENSION};

use crate::settings::ConfigFile;
use crate::ui::{self, icons, LabelProgress};

#[derive(Args, Debug, Default, Clone)]
pub struct PlaceArgs {
    /// KiCad schematic to add labels to (modified in place)
    #[arg(long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub schematic: Option<PathBuf>,

    /// CSV file with a "Label" column
    #[arg(long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Interpret the pitch in millimeters instead of mils
    #[arg(long)]
    pub metric: bool,

    /// Unit of the pitch: imperial (mil) or metric (mm)
    #[arg(long, value_name = "UNIT", conflicts_with = "metric")]
    pub unit: Option<Unit>,

    /// Insert global labels instead of local net labels
    #[arg(long)]
    pub global: bool,

    /// Vertical spacing between labels [default: 100 mil, or 2.54 mm with --metric]
    #[arg(long, value_name = "N")]
    pub pitch: Option<f64>,

    /// TOML file with default settings
    #[arg(long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl PlaceArgs {
    /// Merge flags over the optional config file into a validated configuration.
    pub fn configuration(&self) -> Result<Configuration> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let unit = if self.metric {
            Unit::Metric
        } else {
            self.unit.or(file.unit).unwrap_or_default()
        };
        let visibility = if self.global {
            Visibility::Global
        } else {
            file.visibility.unwrap_or_default()
        };
        let pitch = self
            .pitch
            .or(file.pitch)
            .unwrap_or_else(|| unit.default_pitch());
        let schematic = self.schematic.clone().or(file.schematic).unwrap_or_default();
        let csv = self.csv.clone().or(file.csv).unwrap_or_default();

        Ok(Configuration::new(unit, visibility, pitch, schematic, csv)?)
    }
}

pub fn execute(args: PlaceArgs) -> Result<()> {
    let config = args.configuration()?;
    debug!("Resolved configuration: {config:?}");

    let schematic_path = config.schematic_path();
    if schematic_path.extension().and_then(|ext| ext.to_str()) != Some(SCHEMATIC_EXTENSION) {
        warn!(
            "{} does not have a .{SCHEMATIC_EXTENSION} extension",
            schematic_path.display()
        );
    }

    if !args.yes && !ui::confirm_disclaimer()? {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    let mut document = KicadSchematic::from_file(schematic_path)
        .with_context(|| format!("Failed to load schematic: {}", schematic_path.display()))?;

    let progress = LabelProgress::start(format!(
        "Placing {:?} labels every {} {}",
        config.visibility(),
        config.pitch(),
        config.unit()
    ));
    let outcome = place_labels_with_progress(&config, &mut document, |record| {
        progress.placed(&record.text)
    });
    progress.finish();
    let result = outcome?;

    println!(
        "{} Inserted {} labels into {}.",
        icons::success(),
        result.count,
        file_name(&result.schematic_path)
    );
    println!("  Backup saved to {}", result.backup_path.display());
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
