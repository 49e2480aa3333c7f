//! Binary and ASCII STL export of a SolidMesh.
//!
//! Polygons are fan-triangulated. Positions are written as f32 in the
//! mesh's own units; callers scale beforehand if they need millimeters.

use std::fmt::Write as _;

use crate::mesh::SolidMesh;

/// Errors from STL export.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StlError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

fn validate(mesh: &SolidMesh) -> Result<usize, StlError> {
    let tri_count = mesh.triangle_count();
    if tri_count == 0 {
        return Err(StlError::EmptyMesh);
    }
    let vertex_count = mesh.vertex_count();
    for face in &mesh.faces {
        for &index in &face.vertices {
            if index as usize >= vertex_count {
                return Err(StlError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }
    }
    Ok(tri_count)
}

fn triangle_normal([a, b, c]: &[[f64; 3]; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-30 {
        [(n[0] / len) as f32, (n[1] / len) as f32, (n[2] / len) as f32]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Export a SolidMesh as a binary STL file.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn export_binary_stl(mesh: &SolidMesh, name: &str) -> Result<Vec<u8>, StlError> {
    let tri_count = validate(mesh)?;

    let mut buf = Vec::with_capacity(80 + 4 + tri_count * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.triangles() {
        for n in triangle_normal(&tri) {
            buf.extend_from_slice(&n.to_le_bytes());
        }
        for p in tri {
            for c in p {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count (unused)
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Export a SolidMesh as an ASCII STL string.
pub fn export_ascii_stl(mesh: &SolidMesh, name: &str) -> Result<String, StlError> {
    let tri_count = validate(mesh)?;

    let mut out = String::with_capacity(tri_count * 300);
    let _ = writeln!(out, "solid {}", name);
    for tri in mesh.triangles() {
        let [nx, ny, nz] = triangle_normal(&tri);
        let _ = writeln!(out, "  facet normal {} {} {}", nx, ny, nz);
        out.push_str("    outer loop\n");
        for p in tri {
            let _ = writeln!(out, "      vertex {} {} {}", p[0] as f32, p[1] as f32, p[2] as f32);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {}", name);
    Ok(out)
}
