use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use netlabel_core::{LabelCollection, LabelDocument, LabelScope, NetLabel, Position};
use tempfile::TempDir;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedLabel {
    pub text: String,
    pub position: Option<Position>,
}

impl NetLabel for RecordedLabel {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }
}

#[derive(Debug, Default)]
pub struct RecordedCollection {
    pub labels: Vec<RecordedLabel>,
}

impl LabelCollection for RecordedCollection {
    fn new_label(&mut self) -> &mut dyn NetLabel {
        self.labels.push(RecordedLabel::default());
        self.labels.last_mut().unwrap()
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

/// In-memory document that writes a line per label when persisted.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    pub local: RecordedCollection,
    pub global: RecordedCollection,
    pub persisted_to: RefCell<Vec<PathBuf>>,
    pub fail_persist: bool,
}

impl RecordingDocument {
    pub fn labels_in(&self, scope: LabelScope) -> &[RecordedLabel] {
        match scope {
            LabelScope::Local => &self.local.labels,
            LabelScope::Global => &self.global.labels,
        }
    }
}

impl LabelDocument for RecordingDocument {
    fn local_labels(&mut self) -> &mut dyn LabelCollection {
        &mut self.local
    }

    fn global_labels(&mut self) -> &mut dyn LabelCollection {
        &mut self.global
    }

    fn persist(&self, path: &Path) -> anyhow::Result<()> {
        if self.fail_persist {
            anyhow::bail!("disk full");
        }
        let mut out = String::new();
        for (scope, labels) in [("local", &self.local.labels), ("global", &self.global.labels)] {
            for label in labels {
                let at = label.position.unwrap_or(Position::new(f64::NAN, f64::NAN));
                out.push_str(&format!("{scope} {} {} {}\n", label.text, at.x, at.y));
            }
        }
        fs::write(path, out)?;
        self.persisted_to.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

pub const SCHEMATIC: &str = "(kicad_sch (version 20231120) (generator \"eeschema\"))\n";

/// A temp dir holding `board.kicad_sch` and `nets.csv`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(csv: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(dir.path().join("board.kicad_sch"), SCHEMATIC).unwrap();
        fs::write(dir.path().join("nets.csv"), csv).unwrap();
        Self { dir }
    }

    pub fn schematic(&self) -> PathBuf {
        self.dir.path().join("board.kicad_sch")
    }

    pub fn backup(&self) -> PathBuf {
        self.dir.path().join("board.kicad_sch.bak")
    }

    pub fn csv(&self) -> PathBuf {
        self.dir.path().join("nets.csv")
    }
}

pub fn assert_close(actual: Position, x: f64, y: f64) {
    assert!(
        (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
        "expected ({x}, {y}), got {actual}"
    );
}
