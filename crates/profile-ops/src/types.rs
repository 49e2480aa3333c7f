use alu_types::ProfileTags;
use serde::{Deserialize, Serialize};
use solid_kernel::SolidMesh;

/// Result of one profile generation call.
/// Owns its mesh outright; nothing refers back into the kernel that built it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProfile {
    /// Closed mesh of the profile segment, in working units, at the placement.
    pub solid_mesh: SolidMesh,
    /// True if the four slots were subtracted; false if this is the plain base box.
    pub used_boolean_construction: bool,
    /// Bookkeeping metadata (`profile_id`, `alu_type`, `standard`, `series`, `length`).
    pub tags: ProfileTags,
    /// Non-fatal warnings and timing information.
    pub diagnostics: Diagnostics,
}

/// Non-fatal diagnostics from a generation call.
///
/// Equality ignores `kernel_time_ms`, so identical calls compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Warning messages (clamped dimensions, fallback).
    pub warnings: Vec<String>,
    /// Why the boolean construction was abandoned, if it was.
    pub fallback_reason: Option<String>,
    /// Name of the kernel backend that ran.
    pub backend: String,
    /// Time taken for the kernel operations, in milliseconds.
    pub kernel_time_ms: f64,
}

impl PartialEq for Diagnostics {
    fn eq(&self, other: &Self) -> bool {
        self.warnings == other.warnings
            && self.fallback_reason == other.fallback_reason
            && self.backend == other.backend
    }
}

/// Errors surfaced to the caller of the generation entry point.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("placement {axis} coordinate {value} is not finite")]
    InvalidPlacement { axis: char, value: f64 },
}
