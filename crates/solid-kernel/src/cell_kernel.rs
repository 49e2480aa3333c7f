//! Exact geometry kernel for unions of axis-aligned boxes.
//!
//! Every boolean is evaluated on the rectilinear grid spanned by all box
//! coordinates of both operands. Grid cells are classified by their center
//! point, so coincident or nearly coincident faces never produce slivers:
//! coordinates are compared exactly and the result is deterministic.
//! Tessellation emits one outward quad per grid face separating an occupied
//! cell from an empty one, with vertices shared across faces.

use std::collections::HashMap;

use tracing::debug;

use crate::mesh::{MeshFace, SolidMesh};
use crate::traits::Kernel;
use crate::types::*;

/// Upper bound on grid cells evaluated by one boolean or tessellation.
const MAX_GRID_CELLS: usize = 1 << 22;

/// A solid stored as a union of (possibly overlapping) boxes.
#[derive(Debug, Clone)]
struct CellSolid {
    cells: Vec<Aabb>,
}

/// Rectilinear grid: sorted, deduplicated coordinates per axis.
struct Grid {
    axes: [Vec<f64>; 3],
}

impl Grid {
    fn spanning<'a>(boxes: impl IntoIterator<Item = &'a Aabb>) -> Self {
        let mut axes: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for bx in boxes {
            for (axis, coords) in axes.iter_mut().enumerate() {
                coords.push(bx.min[axis]);
                coords.push(bx.max[axis]);
            }
        }
        for coords in &mut axes {
            coords.sort_by(|a, b| a.total_cmp(b));
            coords.dedup();
        }
        Self { axes }
    }

    /// Number of intervals along each axis.
    fn dims(&self) -> [usize; 3] {
        [
            self.axes[0].len().saturating_sub(1),
            self.axes[1].len().saturating_sub(1),
            self.axes[2].len().saturating_sub(1),
        ]
    }

    fn cell_count(&self) -> usize {
        let [nx, ny, nz] = self.dims();
        nx.saturating_mul(ny).saturating_mul(nz)
    }

    fn index(&self, cell: [usize; 3]) -> usize {
        let [nx, ny, _] = self.dims();
        (cell[2] * ny + cell[1]) * nx + cell[0]
    }

    fn cell_center(&self, cell: [usize; 3]) -> [f64; 3] {
        let mut c = [0.0; 3];
        for axis in 0..3 {
            let coords = &self.axes[axis];
            c[axis] = 0.5 * (coords[cell[axis]] + coords[cell[axis] + 1]);
        }
        c
    }

    fn cell_bounds(&self, cell: [usize; 3]) -> Aabb {
        let mut bb = Aabb::new([0.0; 3], [0.0; 3]);
        for axis in 0..3 {
            bb.min[axis] = self.axes[axis][cell[axis]];
            bb.max[axis] = self.axes[axis][cell[axis] + 1];
        }
        bb
    }

    fn point(&self, node: [usize; 3]) -> [f64; 3] {
        [
            self.axes[0][node[0]],
            self.axes[1][node[1]],
            self.axes[2][node[2]],
        ]
    }

    fn ensure_tractable(&self) -> Result<(), KernelError> {
        let count = self.cell_count();
        if count > MAX_GRID_CELLS {
            return Err(KernelError::Other {
                message: format!(
                    "cell grid {:?} has {} cells (limit {})",
                    self.dims(),
                    count,
                    MAX_GRID_CELLS
                ),
            });
        }
        Ok(())
    }

    /// Evaluate `inside` at every cell center, in x-fastest order.
    fn classify(&self, inside: impl Fn([f64; 3]) -> bool) -> Vec<bool> {
        let [nx, ny, nz] = self.dims();
        let mut occ = Vec::with_capacity(self.cell_count());
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    occ.push(inside(self.cell_center([i, j, k])));
                }
            }
        }
        occ
    }
}

fn inside_any(cells: &[Aabb], p: [f64; 3]) -> bool {
    cells.iter().any(|bx| bx.contains_interior(p))
}

/// Deterministic exact kernel for axis-aligned box solids.
pub struct CellKernel {
    next_handle: u64,
    solids: HashMap<u64, CellSolid>,
}

impl CellKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn store_solid(&mut self, solid: CellSolid) -> KernelSolidHandle {
        let handle = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn get_solid(&self, handle: &KernelSolidHandle) -> Result<&CellSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::EntityNotFound {
                handle: handle.clone(),
            })
    }

    /// Number of solids currently held by this kernel instance.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

impl Default for CellKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for CellKernel {
    fn name(&self) -> &'static str {
        "cell"
    }

    fn make_box(
        &mut self,
        center: [f64; 3],
        size: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        validate_box(center, size)?;
        Ok(self.store_solid(CellSolid {
            cells: vec![Aabb::from_center_size(center, size)],
        }))
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
        let mut cells = Vec::new();
        for handle in solids {
            cells.extend_from_slice(&self.get_solid(handle)?.cells);
        }
        Ok(self.store_solid(CellSolid { cells }))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?;
        let solid_b = self.get_solid(b)?;

        let grid = Grid::spanning(solid_a.cells.iter().chain(solid_b.cells.iter()));
        grid.ensure_tractable()?;

        let occ = grid.classify(|p| inside_any(&solid_a.cells, p) && !inside_any(&solid_b.cells, p));
        let [nx, ny, nz] = grid.dims();
        let mut cells = Vec::new();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    if occ[grid.index([i, j, k])] {
                        cells.push(grid.cell_bounds([i, j, k]));
                    }
                }
            }
        }
        debug!(
            grid = ?grid.dims(),
            kept = cells.len(),
            "cell boolean difference evaluated"
        );

        if cells.is_empty() {
            return Err(KernelError::BooleanFailed {
                reason: "difference removes the whole solid".to_string(),
            });
        }
        Ok(self.store_solid(CellSolid { cells }))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        _tolerance: f64,
    ) -> Result<SolidMesh, KernelError> {
        let cells = &self.get_solid(solid)?.cells;
        let grid = Grid::spanning(cells.iter());
        grid.ensure_tractable()?;

        let occ = grid.classify(|p| inside_any(cells, p));
        let dims = grid.dims();
        let occupied = |cell: [usize; 3]| occ[grid.index(cell)];

        let mut mesh = SolidMesh::new();
        let mut node_ids: HashMap<[usize; 3], u32> = HashMap::new();
        let mut node_id = |node: [usize; 3], mesh: &mut SolidMesh| -> u32 {
            *node_ids.entry(node).or_insert_with(|| {
                mesh.positions.push(grid.point(node));
                (mesh.positions.len() - 1) as u32
            })
        };

        for axis in 0..3 {
            let b = (axis + 1) % 3;
            let c = (axis + 2) % 3;
            for l in 0..=dims[axis] {
                for u in 0..dims[b] {
                    for v in 0..dims[c] {
                        let mut cell = [0usize; 3];
                        cell[b] = u;
                        cell[c] = v;

                        let below = l > 0 && {
                            cell[axis] = l - 1;
                            occupied(cell)
                        };
                        let above = l < dims[axis] && {
                            cell[axis] = l;
                            occupied(cell)
                        };
                        if below == above {
                            continue;
                        }

                        // Counter-clockwise in (b, c) gives a +axis normal.
                        let mut ids = Vec::with_capacity(4);
                        for (du, dv) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
                            let mut node = [0usize; 3];
                            node[axis] = l;
                            node[b] = u + du;
                            node[c] = v + dv;
                            ids.push(node_id(node, &mut mesh));
                        }
                        if above {
                            ids.reverse();
                        }
                        mesh.faces.push(MeshFace::new(ids));
                    }
                }
            }
        }

        if mesh.is_empty() {
            return Err(KernelError::TessellationFailed {
                reason: "solid has no boundary faces".to_string(),
            });
        }
        Ok(mesh)
    }
}
