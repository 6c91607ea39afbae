//! Capability interface to the schematic being labeled.
//!
//! The placement code only ever talks to these traits, so any schematic
//! backend can be plugged in.

use std::path::Path;

use crate::layout::Position;

/// Scope of a net label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelScope {
    Local,
    Global,
}

/// A single label inside a document.
pub trait NetLabel {
    fn set_text(&mut self, text: &str);
    fn set_position(&mut self, position: Position);
}

/// A collection of labels of one scope.
pub trait LabelCollection {
    /// Create a new, empty label owned by the collection.
    fn new_label(&mut self) -> &mut dyn NetLabel;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A mutable schematic exposing its label collections.
pub trait LabelDocument {
    fn local_labels(&mut self) -> &mut dyn LabelCollection;
    fn global_labels(&mut self) -> &mut dyn LabelCollection;

    /// Serialize the document to `path`, overwriting it.
    fn persist(&self, path: &Path) -> anyhow::Result<()>;

    fn labels(&mut self, scope: LabelScope) -> &mut dyn LabelCollection {
        match scope {
            LabelScope::Local => self.local_labels(),
            LabelScope::Global => self.global_labels(),
        }
    }
}
