//! Dimension guard: raw catalog millimeters to safe kernel dimensions.
//!
//! Never fails. Garbage in (zero, negative, NaN, infinite) comes out as the
//! configured minimum dimension, and every such substitution is recorded.

use alu_types::ProfileSpec;
use tracing::debug;

use crate::config::GeneratorConfig;

/// Why a raw dimension was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampReason {
    NotFinite,
    Negative,
    BelowMinimum,
}

/// One dimension that did not pass through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampRecord {
    pub field: &'static str,
    pub raw_mm: f64,
    /// Value used instead, in working units.
    pub guarded: f64,
    pub reason: ClampReason,
}

impl ClampRecord {
    pub fn describe(&self) -> String {
        let why = match self.reason {
            ClampReason::NotFinite => "is not finite",
            ClampReason::Negative => "is negative",
            ClampReason::BelowMinimum => "is below the minimum dimension",
        };
        format!(
            "{} = {} mm {}; clamped to {} working units",
            self.field, self.raw_mm, why, self.guarded
        )
    }
}

/// Guarded dimensions in working units. All strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardedDimensions {
    pub width: f64,
    pub height: f64,
    pub length: f64,
    /// Guarded slot width, before shrinking.
    pub slot_width: f64,
    /// Guarded wall thickness. Sets the slot floor depth below each face.
    pub wall_thickness: f64,
    /// Cutter extent along the face tangent (shrunk slot width).
    pub cutter_width: f64,
    /// How far each cutter reaches past the outer face it opens, and past
    /// both profile ends. Keeps every cutter face off the base faces.
    pub cutter_overshoot: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardOutcome {
    pub dims: GuardedDimensions,
    pub clamped: Vec<ClampRecord>,
}

fn guard_one(
    field: &'static str,
    raw_mm: f64,
    config: &GeneratorConfig,
    clamped: &mut Vec<ClampRecord>,
) -> f64 {
    let (cleaned, reason) = if !raw_mm.is_finite() {
        (0.0, Some(ClampReason::NotFinite))
    } else if raw_mm < 0.0 {
        (0.0, Some(ClampReason::Negative))
    } else {
        (raw_mm, None)
    };

    let scaled = cleaned * config.unit_scale;
    let guarded = scaled.max(config.min_dimension);
    let reason = reason.or((guarded > scaled).then_some(ClampReason::BelowMinimum));

    if let Some(reason) = reason {
        debug!(field, raw_mm, guarded, ?reason, "dimension clamped");
        clamped.push(ClampRecord {
            field,
            raw_mm,
            guarded,
            reason,
        });
    }
    guarded
}

/// Convert a profile's millimeter dimensions into guarded working-unit values.
///
/// `config` is expected to be sanitized.
pub fn guard_dimensions(spec: &ProfileSpec, config: &GeneratorConfig) -> GuardOutcome {
    let mut clamped = Vec::new();
    let width = guard_one("width", spec.width, config, &mut clamped);
    let height = guard_one("height", spec.height, config, &mut clamped);
    let length = guard_one("length", spec.default_length, config, &mut clamped);
    let slot_width = guard_one("slot_width", spec.slot_width, config, &mut clamped);
    let wall_thickness = guard_one("wall_thickness", spec.wall_thickness, config, &mut clamped);

    let keep = 1.0 - config.slot_shrink;
    GuardOutcome {
        dims: GuardedDimensions {
            width,
            height,
            length,
            slot_width,
            wall_thickness,
            cutter_width: slot_width * keep,
            cutter_overshoot: wall_thickness,
        },
        clamped,
    }
}
