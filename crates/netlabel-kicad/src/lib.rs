//! KiCad schematic (`.kicad_sch`) backend for label placement.
//!
//! [`KicadSchematic`] keeps the parsed file as-is and collects new labels on
//! the side. On [`persist`](LabelDocument::persist) the labels are spliced in
//! ahead of the symbol and sheet sections and the whole tree is written back.

mod label;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use log::debug;
use netlabel_core::{LabelCollection, LabelDocument, LabelScope};
use netlabel_sexpr::{parse, to_kicad_string, ParseError, Sexpr};

pub use label::{FlagStyle, KicadLabel, LabelSet, BOOLEAN_FLAGS_SINCE};

/// File extension of KiCad schematics.
pub const SCHEMATIC_EXTENSION: &str = "kicad_sch";

/// Top-level sections that new labels are inserted in front of, matching
/// where eeschema itself writes labels.
const TRAILING_SECTIONS: &[&str] = &[
    "symbol",
    "sheet",
    "sheet_instances",
    "symbol_instances",
    "embedded_fonts",
];

/// Errors that can occur while loading a schematic
#[derive(Debug, thiserror::Error)]
pub enum SchematicError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Malformed schematic at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Not a KiCad schematic (expected a kicad_sch root, found {found})")]
    NotASchematic { found: String },
}

impl From<ParseError> for SchematicError {
    fn from(err: ParseError) -> Self {
        SchematicError::Parse {
            offset: err.offset(),
            message: err.to_string(),
        }
    }
}

/// An editable KiCad schematic.
#[derive(Debug, Clone)]
pub struct KicadSchematic {
    root: Sexpr,
    local: LabelSet,
    global: LabelSet,
}

impl KicadSchematic {
    pub fn from_file(path: &Path) -> Result<Self, SchematicError> {
        debug!("Loading schematic {}", path.display());
        let contents = fs::read_to_string(path)?;
        contents.parse()
    }

    /// The `(version ...)` of the file format, if present.
    pub fn version(&self) -> Option<&str> {
        self.root.child("version")?.as_list()?.get(1)?.as_atom()
    }

    /// Flag spelling that matches the file's format version.
    pub fn flag_style(&self) -> FlagStyle {
        FlagStyle::for_version(self.version().and_then(|v| v.parse().ok()))
    }

    /// Labels already in the file before this session.
    pub fn existing_label_count(&self, scope: LabelScope) -> usize {
        let keyword = match scope {
            LabelScope::Local => "label",
            LabelScope::Global => "global_label",
        };
        self.root.children(keyword).count()
    }

    /// Labels added during this session.
    pub fn new_labels(&self, scope: LabelScope) -> &[KicadLabel] {
        match scope {
            LabelScope::Local => self.local.labels(),
            LabelScope::Global => self.global.labels(),
        }
    }

    /// The full document, including labels added so far.
    pub fn to_sexpr(&self) -> Sexpr {
        let mut root = self.root.clone();
        let style = self.flag_style();
        let added: Vec<Sexpr> = self
            .local
            .labels()
            .iter()
            .chain(self.global.labels())
            .map(|label| label.to_sexpr(style))
            .collect();

        if let Some(items) = root.as_list_mut() {
            let at = items
                .iter()
                .position(|item| TRAILING_SECTIONS.iter().any(|s| item.is_node(s)))
                .unwrap_or(items.len());
            items.splice(at..at, added);
        }
        root
    }
}

impl FromStr for KicadSchematic {
    type Err = SchematicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let root = parse(s)?;
        if !root.is_node("kicad_sch") {
            let found = root
                .head()
                .or_else(|| root.as_atom())
                .unwrap_or("an empty list")
                .to_string();
            return Err(SchematicError::NotASchematic { found });
        }

        let schematic = Self {
            root,
            local: LabelSet::new(LabelScope::Local),
            global: LabelSet::new(LabelScope::Global),
        };
        debug!(
            "Parsed schematic version {} with {} local and {} global labels",
            schematic.version().unwrap_or("unknown"),
            schematic.existing_label_count(LabelScope::Local),
            schematic.existing_label_count(LabelScope::Global)
        );
        Ok(schematic)
    }
}

impl LabelDocument for KicadSchematic {
    fn local_labels(&mut self) -> &mut dyn LabelCollection {
        &mut self.local
    }

    fn global_labels(&mut self) -> &mut dyn LabelCollection {
        &mut self.global
    }

    fn persist(&self, path: &Path) -> anyhow::Result<()> {
        let contents = to_kicad_string(&self.to_sexpr());
        fs::write(path, contents)
            .with_context(|| format!("Failed to write schematic: {}", path.display()))?;
        debug!(
            "Wrote {} new labels to {}",
            self.local.len() + self.global.len(),
            path.display()
        );
        Ok(())
    }
}
