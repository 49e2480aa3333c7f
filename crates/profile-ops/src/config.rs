//! Generator configuration.
//!
//! Every field has a default, so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geometry kernel used for the boolean difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelBackend {
    /// Exact axis-aligned cell decomposition.
    #[default]
    Cell,
    /// truck B-rep shape operations.
    Truck,
}

impl KernelBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelBackend::Cell => "cell",
            KernelBackend::Truck => "truck",
        }
    }
}

impl fmt::Display for KernelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cell" => Ok(KernelBackend::Cell),
            "truck" => Ok(KernelBackend::Truck),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Errors from loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid generator config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown kernel backend '{0}' (expected cell or truck)")]
    UnknownBackend(String),
}

/// Tunables for the dimension guard, the kernel and mesh validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Millimeters to working units (meters).
    pub unit_scale: f64,
    /// Smallest linear dimension handed to the kernel, in working units.
    pub min_dimension: f64,
    /// Fraction by which the slot width shrinks, in [0, 1).
    pub slot_shrink: f64,
    /// Chord tolerance for B-rep tessellation, in working units.
    pub tessellation_tolerance: f64,
    /// Distance under which mesh positions are treated as one vertex.
    pub weld_tolerance: f64,
    pub backend: KernelBackend,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            unit_scale: 0.001,
            min_dimension: 1e-4,
            slot_shrink: 0.001,
            tessellation_tolerance: 1e-4,
            weld_tolerance: 1e-9,
            backend: KernelBackend::Cell,
        }
    }
}

impl GeneratorConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn with_backend(self, backend: KernelBackend) -> Self {
        Self { backend, ..self }
    }

    /// Replace every out-of-range value with its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };
        Self {
            unit_scale: positive(self.unit_scale, defaults.unit_scale),
            min_dimension: positive(self.min_dimension, defaults.min_dimension),
            slot_shrink: if self.slot_shrink.is_finite() && (0.0..1.0).contains(&self.slot_shrink) {
                self.slot_shrink
            } else {
                defaults.slot_shrink
            },
            tessellation_tolerance: positive(
                self.tessellation_tolerance,
                defaults.tessellation_tolerance,
            ),
            weld_tolerance: if self.weld_tolerance.is_finite() && self.weld_tolerance >= 0.0 {
                self.weld_tolerance
            } else {
                defaults.weld_tolerance
            },
            backend: self.backend,
        }
    }
}
