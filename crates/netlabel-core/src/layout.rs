//! Placement of labels in a single vertical column.

use std::fmt;

/// Horizontal start of the label column, in millimeters.
pub const START_X: f64 = -10.0;
/// Vertical start of the label column, in millimeters. Together with
/// [`START_X`] this keeps labels clear of the sheet's title block.
pub const START_Y: f64 = -10.0;

/// A point in schematic coordinates (millimeters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position of the label with the given ordinal, stacked from the fixed start.
pub fn position_for(ordinal: usize, pitch_mm: f64) -> Position {
    position_from(Position::new(START_X, START_Y), ordinal, pitch_mm)
}

pub fn position_from(start: Position, ordinal: usize, pitch_mm: f64) -> Position {
    Position {
        x: start.x,
        y: start.y - ordinal as f64 * pitch_mm,
    }
}
