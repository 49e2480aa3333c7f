use crate::mesh::SolidMesh;
use crate::types::*;

/// Core geometry kernel trait: the box construction and boolean operations
/// the profile builder needs.
/// Implemented by CellKernel (exact axis-aligned cells) and TruckKernel (wraps real truck).
pub trait Kernel {
    /// Short backend name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Create an axis-aligned box of `size` centered on `center`.
    fn make_box(
        &mut self,
        center: [f64; 3],
        size: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Combine spatially disjoint solids into one solid without a boolean union.
    fn merge_solids(
        &mut self,
        solids: &[KernelSolidHandle],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Tessellate a solid into a polygon mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<SolidMesh, KernelError>;
}
