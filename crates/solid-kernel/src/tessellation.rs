//! Tessellation of truck solids into [`SolidMesh`].
//!
//! Each face is triangulated as part of the solid; faces whose orientation
//! flag is false are inverted so every polygon winds outward.

use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::MeshableShape;

use crate::mesh::{MeshFace, SolidMesh};
use crate::types::KernelError;

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a polygon mesh.
///
/// Vertices are not shared between truck faces; analysis on the result
/// welds coincident positions.
pub fn tessellate_solid(solid: &TruckSolid, tolerance: f64) -> Result<SolidMesh, KernelError> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance {} must be finite and positive", tolerance),
        });
    }
    let meshed_solid = solid.triangulation(tolerance);
    let mut out = SolidMesh::new();

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                continue;
            };

            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };

            let base_vertex = out.positions.len() as u32;
            for pos in face_mesh.positions() {
                out.positions.push([pos[0], pos[1], pos[2]]);
            }
            for tri in face_mesh.tri_faces() {
                let ids = tri.iter().map(|v| v.pos as u32 + base_vertex).collect();
                out.faces.push(MeshFace::new(ids));
            }
            for quad in face_mesh.quad_faces() {
                let ids = quad.iter().map(|v| v.pos as u32 + base_vertex).collect();
                out.faces.push(MeshFace::new(ids));
            }
        }
    }

    if out.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "triangulation produced no faces".to_string(),
        });
    }
    Ok(out)
}
