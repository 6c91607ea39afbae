//! Net label placement from CSV files.
//!
//! [`place_labels`] takes a validated [`Configuration`] and a schematic behind
//! the [`LabelDocument`] trait, backs the schematic file up, reads one label
//! per non-empty CSV row and stacks the labels in a single column starting at
//! (-10 mm, -10 mm), then writes the schematic back in place.
//!
//! If writing the schematic fails halfway the file may be left inconsistent;
//! the `.bak` copy next to it is the recovery path. Nothing is rolled back
//! automatically.

pub mod backup;
pub mod config;
pub mod document;
mod error;
pub mod extract;
pub mod layout;
mod place;
pub mod units;

pub use backup::{backup_path, snapshot, BackupArtifact};
pub use config::{Configuration, Visibility};
pub use document::{LabelCollection, LabelDocument, LabelScope, NetLabel};
pub use error::{LabelError, Result};
pub use extract::{extract_labels, LabelRecord};
pub use layout::{position_for, Position};
pub use place::{place_labels, place_labels_with_progress, InsertionResult};
pub use units::{to_canonical, Unit};
