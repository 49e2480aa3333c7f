use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog standard a profile belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Standard {
    /// Chinese national standard (GB).
    #[default]
    #[serde(rename = "GB")]
    NationalStandard,
    /// European standard (EN).
    #[serde(rename = "EN")]
    EuropeanStandard,
}

impl Standard {
    /// Short catalog code, as used in catalog files and tags.
    pub fn code(&self) -> &'static str {
        match self {
            Standard::NationalStandard => "GB",
            Standard::EuropeanStandard => "EN",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a standard code is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStandard(pub String);

impl fmt::Display for UnknownStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown profile standard '{}' (expected GB or EN)", self.0)
    }
}

impl std::error::Error for UnknownStandard {}

impl FromStr for Standard {
    type Err = UnknownStandard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GB" => Ok(Standard::NationalStandard),
            "EN" => Ok(Standard::EuropeanStandard),
            _ => Err(UnknownStandard(s.to_string())),
        }
    }
}

/// One catalog entry of aluminum framing profile.
///
/// All dimensions are in millimeters. Values are taken as-is from the
/// catalog; degenerate numbers (zero, negative, NaN) are tolerated here and
/// absorbed later by the geometry builder's dimension guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSpec {
    /// Unique catalog identifier, e.g. `GB-4040`.
    pub id: String,
    /// Display name, e.g. `4040`.
    pub name: String,
    pub standard: Standard,
    /// Series tag ("20", "30", "40", "45", ...).
    pub series: String,
    /// Outer width along X.
    pub width: f64,
    /// Outer height along Y.
    pub height: f64,
    /// Width of each of the four longitudinal slots.
    pub slot_width: f64,
    /// Wall thickness used to size and recess the slots.
    pub wall_thickness: f64,
    /// Extrusion length along Z.
    pub default_length: f64,
}

impl ProfileSpec {
    /// Same profile with a different extrusion length.
    pub fn with_length(&self, length_mm: f64) -> Self {
        Self {
            default_length: length_mm,
            ..self.clone()
        }
    }

    /// True when every dimensional field is finite, the outer dimensions and
    /// length are strictly positive, and the slot parameters are non-negative.
    pub fn is_well_formed(&self) -> bool {
        let dims = [
            self.width,
            self.height,
            self.slot_width,
            self.wall_thickness,
            self.default_length,
        ];
        dims.iter().all(|d| d.is_finite())
            && self.width > 0.0
            && self.height > 0.0
            && self.default_length > 0.0
            && self.slot_width >= 0.0
            && self.wall_thickness >= 0.0
    }
}
