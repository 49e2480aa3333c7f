//! B-rep geometry kernel backed by the truck libraries.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;
use truck_modeling::topology::Solid;

use crate::mesh::SolidMesh;
use crate::primitives;
use crate::tessellation;
use crate::traits::Kernel;
use crate::types::*;

/// Default boolean tolerance handed to truck-shapeops.
pub const DEFAULT_BOOLEAN_TOLERANCE: f64 = 0.05;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
    /// Tolerance for shape-ops intersection curves, in model units.
    boolean_tolerance: f64,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_BOOLEAN_TOLERANCE)
    }

    /// Kernel whose booleans run at `boolean_tolerance`. Must be scaled to
    /// the model: profiles in meters need a tolerance well below the
    /// smallest slot dimension.
    pub fn with_tolerance(boolean_tolerance: f64) -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            boolean_tolerance,
        }
    }

    pub fn boolean_tolerance(&self) -> f64 {
        self.boolean_tolerance
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::EntityNotFound {
                handle: handle.clone(),
            })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn name(&self) -> &'static str {
        "truck"
    }

    fn make_box(
        &mut self,
        center: [f64; 3],
        size: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        validate_box(center, size)?;
        let bounds = Aabb::from_center_size(center, size);
        Ok(self.store_solid(primitives::make_box_at(bounds.min, size)))
    }

    fn merge_solids(
        &mut self,
        solids: &[KernelSolidHandle],
    ) -> Result<KernelSolidHandle, KernelError> {
        if solids.is_empty() {
            return Err(KernelError::InvalidGeometry {
                reason: "nothing to merge".to_string(),
            });
        }
        // Disjoint solids combine by collecting their boundary shells.
        let mut shells = Vec::new();
        for handle in solids {
            shells.extend(self.get_solid(handle)?.boundaries().iter().cloned());
        }
        let merged = Solid::try_new(shells).map_err(|e| KernelError::InvalidGeometry {
            reason: format!("merged shells do not form a solid: {}", e),
        })?;
        Ok(self.store_solid(merged))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let mut result = self.get_solid(a)?.clone();
        let tool_shells = self.get_solid(b)?.boundaries().clone();
        let tol = self.boolean_tolerance;

        // One closed tool shell at a time: A ∩ ¬B_1 ∩ ¬B_2 ...
        for (index, shell) in tool_shells.into_iter().enumerate() {
            let mut tool = Solid::try_new(vec![shell]).map_err(|e| KernelError::InvalidGeometry {
                reason: format!("tool shell {} is not a solid: {}", index, e),
            })?;
            tool.not();
            // truck-shapeops can panic on degenerate intersections.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                truck_shapeops::and(&result, &tool, tol)
            }));
            result = match outcome {
                Ok(Some(solid)) => solid,
                Ok(None) => {
                    return Err(KernelError::BooleanFailed {
                        reason: format!("truck and() returned None for tool shell {}", index),
                    })
                }
                Err(_) => {
                    return Err(KernelError::BooleanFailed {
                        reason: format!("truck and() panicked on tool shell {}", index),
                    })
                }
            };
        }
        debug!(
            shells = result.boundaries().len(),
            tolerance = tol,
            "truck subtraction finished"
        );
        Ok(self.store_solid(result))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<SolidMesh, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        panic::catch_unwind(AssertUnwindSafe(|| {
            tessellation::tessellate_solid(truck_solid, tolerance)
        }))
        .unwrap_or_else(|_| {
            Err(KernelError::TessellationFailed {
                reason: "truck triangulation panicked".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truck_kernel_box_bounds() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box([1.0, 0.0, 0.0], [2.0, 4.0, 6.0]).unwrap();
        let mesh = kernel.tessellate(&handle, 0.01).unwrap();

        assert!(!mesh.is_empty());
        let expected = Aabb::from_center_size([1.0, 0.0, 0.0], [2.0, 4.0, 6.0]);
        assert!(mesh.bounding_box().approx_eq(&expected, 1e-9));
    }

    #[test]
    fn test_truck_kernel_merge_keeps_both_shells() {
        let mut kernel = TruckKernel::new();
        let a = kernel.make_box([-2.0, 0.0, 0.0], [1.0; 3]).unwrap();
        let b = kernel.make_box([2.0, 0.0, 0.0], [1.0; 3]).unwrap();
        let merged = kernel.merge_solids(&[a, b]).unwrap();

        assert_eq!(kernel.get_solid(&merged).unwrap().boundaries().len(), 2);
        let mesh = kernel.tessellate(&merged, 0.01).unwrap();
        assert_eq!(mesh.shell_count(1e-9), 2);
    }

    #[test]
    fn test_truck_kernel_subtract_never_panics() {
        let mut kernel = TruckKernel::with_tolerance(0.01);
        let base = kernel.make_box([0.0; 3], [2.0, 2.0, 2.0]).unwrap();
        let tool = kernel.make_box([1.0, 0.0, 0.0], [1.0, 0.5, 4.0]).unwrap();

        match kernel.boolean_subtract(&base, &tool) {
            Ok(handle) => assert!(kernel.get_solid(&handle).is_ok()),
            Err(err) => assert!(matches!(err, KernelError::BooleanFailed { .. })),
        }
    }

    #[test]
    fn test_truck_kernel_subtracts_each_tool_shell() {
        let mut kernel = TruckKernel::with_tolerance(0.01);
        let base = kernel.make_box([0.0; 3], [4.0, 4.0, 2.0]).unwrap();
        // Two notches crossing opposite side faces, overshooting every base face.
        let left = kernel.make_box([-2.0, 0.0, 0.0], [1.0, 1.0, 3.0]).unwrap();
        let right = kernel.make_box([2.0, 0.0, 0.0], [1.0, 1.0, 3.0]).unwrap();
        let tool = kernel.merge_solids(&[left, right]).unwrap();
        let cut = kernel.boolean_subtract(&base, &tool).unwrap();

        let mesh = kernel.tessellate(&cut, 0.01).unwrap();
        assert!(mesh.is_closed(1e-9));
        assert_eq!(mesh.shell_count(1e-9), 1);
        assert!((mesh.volume().abs() - (32.0 - 2.0 * 0.5 * 2.0)).abs() < 1e-6);
        let expected = Aabb::from_center_size([0.0; 3], [4.0, 4.0, 2.0]);
        assert!(mesh.bounding_box().approx_eq(&expected, 1e-9));
    }

    #[test]
    fn test_truck_kernel_missing_handle() {
        let mut kernel = TruckKernel::new();
        let missing = KernelSolidHandle(7);
        assert!(matches!(
            kernel.tessellate(&missing, 0.1),
            Err(KernelError::EntityNotFound { .. })
        ));
        assert!(kernel.merge_solids(&[]).is_err());
        assert!(kernel.make_box([0.0; 3], [-1.0, 1.0, 1.0]).is_err());
    }
}
