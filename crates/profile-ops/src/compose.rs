//! Boolean composer: base box minus the merged slot cutters, with a single
//! fallback point to the plain base box.

use solid_kernel::{Aabb, Kernel, KernelError, SolidMesh};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::cutters::{BoxSpec, CutterBox};

/// Reasons a boolean construction is rejected.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompositionError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("no slot cutters supplied")]
    NoCutters,

    #[error("boolean result is empty")]
    EmptyResult,

    #[error(
        "boolean result is not a closed manifold ({boundary} boundary, \
         {non_manifold} non-manifold, {misoriented} misoriented edges)"
    )]
    NotClosed {
        boundary: usize,
        non_manifold: usize,
        misoriented: usize,
    },

    #[error("boolean result splits into {shells} shells")]
    Disconnected { shells: usize },

    #[error("boolean result bounds {actual:?} differ from base bounds {expected:?}")]
    BoundsChanged { expected: Aabb, actual: Aabb },
}

/// Output of the composer. `mesh` is never empty.
#[derive(Debug, Clone)]
pub struct Composition {
    pub mesh: SolidMesh,
    pub used_boolean: bool,
    pub fallback_reason: Option<CompositionError>,
}

/// Subtract the merged cutters from the base and validate the result.
///
/// Accepts the result only if it is non-empty, closed, one connected shell,
/// and has exactly the base box's bounds (within `weld_tolerance`).
pub fn subtract_cutters(
    kernel: &mut dyn Kernel,
    base: &BoxSpec,
    cutters: &[CutterBox],
    config: &GeneratorConfig,
) -> Result<SolidMesh, CompositionError> {
    if cutters.is_empty() {
        return Err(CompositionError::NoCutters);
    }

    let base_handle = kernel.make_box(base.center, base.size)?;
    let mut cutter_handles = Vec::with_capacity(cutters.len());
    for cutter in cutters {
        cutter_handles.push(kernel.make_box(cutter.spec.center, cutter.spec.size)?);
    }
    let tool = kernel.merge_solids(&cutter_handles)?;
    let result = kernel.boolean_subtract(&base_handle, &tool)?;
    let mesh = kernel.tessellate(&result, config.tessellation_tolerance)?;
    debug!(
        backend = kernel.name(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "boolean difference tessellated"
    );

    if mesh.is_empty() {
        return Err(CompositionError::EmptyResult);
    }

    let report = mesh.edge_report(config.weld_tolerance);
    if !report.is_closed() {
        return Err(CompositionError::NotClosed {
            boundary: report.boundary_edges,
            non_manifold: report.non_manifold_edges,
            misoriented: report.misoriented_edges,
        });
    }

    let shells = mesh.shell_count(config.weld_tolerance);
    if shells != 1 {
        return Err(CompositionError::Disconnected { shells });
    }

    let expected = base.bounds();
    let actual = mesh.bounding_box();
    if !actual.approx_eq(&expected, config.weld_tolerance) {
        return Err(CompositionError::BoundsChanged { expected, actual });
    }

    Ok(mesh)
}

/// Run [`subtract_cutters`], falling back to the direct base box mesh on any
/// failure. Never returns an empty mesh.
pub fn compose_profile(
    kernel: &mut dyn Kernel,
    base: &BoxSpec,
    cutters: &[CutterBox],
    config: &GeneratorConfig,
) -> Composition {
    match subtract_cutters(kernel, base, cutters, config) {
        Ok(mesh) => Composition {
            mesh,
            used_boolean: true,
            fallback_reason: None,
        },
        Err(err) => {
            warn!(backend = kernel.name(), error = %err, "slot boolean failed, using plain base box");
            Composition {
                mesh: base.mesh(),
                used_boolean: false,
                fallback_reason: Some(err),
            }
        }
    }
}
