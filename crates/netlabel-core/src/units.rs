//! Conversion of user-supplied lengths to millimeters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Millimeters per mil (thousandth of an inch).
pub const MM_PER_MIL: f64 = 0.0254;

/// Unit system the pitch is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters
    #[serde(alias = "mm")]
    Metric,
    /// Mils
    #[default]
    #[serde(alias = "mil")]
    Imperial,
}

impl Unit {
    /// Pitch used when none is configured: one 100 mil grid step.
    pub fn default_pitch(self) -> f64 {
        match self {
            Unit::Metric => 2.54,
            Unit::Imperial => 100.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Metric => "mm",
            Unit::Imperial => "mil",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "mm" => Ok(Unit::Metric),
            "imperial" | "mil" => Ok(Unit::Imperial),
            other => Err(format!("unknown unit '{other}' (expected 'metric' or 'imperial')")),
        }
    }
}

/// Convert `value` expressed in `unit` to millimeters.
pub fn to_canonical(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Metric => value,
        Unit::Imperial => value * MM_PER_MIL,
    }
}
