//! Generation entry point: guard → base → cutters → compose → place → tag.

use std::time::Instant;

use alu_types::{keys, ProfileSpec, ProfileTags};
use solid_kernel::{CellKernel, Kernel, TruckKernel};
use tracing::debug;

use crate::compose::compose_profile;
use crate::config::{GeneratorConfig, KernelBackend};
use crate::cutters::{base_box, slot_cutters};
use crate::guard::guard_dimensions;
use crate::types::{Diagnostics, GenerateError, GeneratedProfile};

/// Generate one profile segment at `placement` with the default configuration.
pub fn generate_profile(
    spec: &ProfileSpec,
    placement: [f64; 3],
) -> Result<GeneratedProfile, GenerateError> {
    generate_profile_with_config(spec, placement, &GeneratorConfig::default())
}

/// Generate with an explicit configuration. A fresh kernel of the configured
/// backend is created for this call and dropped at its end.
pub fn generate_profile_with_config(
    spec: &ProfileSpec,
    placement: [f64; 3],
    config: &GeneratorConfig,
) -> Result<GeneratedProfile, GenerateError> {
    let config = config.sanitized();
    match config.backend {
        KernelBackend::Cell => generate_profile_in(&mut CellKernel::new(), spec, placement, &config),
        KernelBackend::Truck => {
            // Boolean tolerance follows the smallest representable feature.
            let mut kernel = TruckKernel::with_tolerance(config.min_dimension * 0.1);
            generate_profile_in(&mut kernel, spec, placement, &config)
        }
    }
}

/// Generate using a caller-supplied kernel.
pub fn generate_profile_in(
    kernel: &mut dyn Kernel,
    spec: &ProfileSpec,
    placement: [f64; 3],
    config: &GeneratorConfig,
) -> Result<GeneratedProfile, GenerateError> {
    check_placement(placement)?;
    let config = config.sanitized();

    let guarded = guard_dimensions(spec, &config);
    let base = base_box(&guarded.dims);
    let cutters = slot_cutters(&guarded.dims);

    let started = Instant::now();
    let composition = compose_profile(kernel, &base, &cutters, &config);
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    // Built in the local frame; placing last keeps every placement congruent.
    let solid_mesh = composition.mesh.translated(placement);

    let mut warnings: Vec<String> = guarded.clamped.iter().map(|r| r.describe()).collect();
    let fallback_reason = composition.fallback_reason.map(|e| e.to_string());
    if let Some(reason) = &fallback_reason {
        warnings.push(format!("slot construction fell back to the plain box: {}", reason));
    }

    debug!(
        profile = %spec.id,
        backend = kernel.name(),
        used_boolean = composition.used_boolean,
        faces = solid_mesh.face_count(),
        kernel_time_ms,
        "profile generated"
    );

    Ok(GeneratedProfile {
        solid_mesh,
        used_boolean_construction: composition.used_boolean,
        tags: profile_tags(spec),
        diagnostics: Diagnostics {
            warnings,
            fallback_reason,
            backend: kernel.name().to_string(),
            kernel_time_ms,
        },
    })
}

fn check_placement(placement: [f64; 3]) -> Result<(), GenerateError> {
    for (axis, value) in ['x', 'y', 'z'].into_iter().zip(placement) {
        if !value.is_finite() {
            return Err(GenerateError::InvalidPlacement { axis, value });
        }
    }
    Ok(())
}

/// Bookkeeping tags; `length` carries the catalog length in millimeters.
pub fn profile_tags(spec: &ProfileSpec) -> ProfileTags {
    let mut tags = ProfileTags::new();
    tags.insert(keys::PROFILE_ID, spec.id.as_str());
    tags.insert(keys::ALU_TYPE, spec.name.as_str());
    tags.insert(keys::STANDARD, spec.standard.code());
    tags.insert(keys::SERIES, spec.series.as_str());
    tags.insert(keys::LENGTH, spec.default_length);
    tags
}
