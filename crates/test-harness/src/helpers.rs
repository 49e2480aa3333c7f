//! Profile builders, scenario fixtures and small mesh math.

use alu_types::{ProfileSpec, Standard};
use solid_kernel::{Aabb, SolidMesh};

/// Errors from harness assertions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("generation failed: {0}")]
    Generate(#[from] profile_ops::GenerateError),
}

/// Millimeters to working units at the default scale.
pub const MM: f64 = 0.001;

/// Default weld tolerance used by the oracles.
pub const WELD_TOL: f64 = 1e-9;

/// Build a GB profile spec from raw millimeter values.
pub fn profile(id: &str, width: f64, height: f64, slot: f64, wall: f64, length: f64) -> ProfileSpec {
    ProfileSpec {
        id: id.to_string(),
        name: id.to_string(),
        standard: Standard::NationalStandard,
        series: format!("{}", width.max(0.0).round() as i64),
        width,
        height,
        slot_width: slot,
        wall_thickness: wall,
        default_length: length,
    }
}

/// 40×40 profile with 6 mm slots and 2 mm walls, 1 m long.
pub fn scenario_a() -> ProfileSpec {
    profile("A-4040", 40.0, 40.0, 6.0, 2.0, 1000.0)
}

/// 20×20 profile without slots, 500 mm long.
pub fn scenario_b() -> ProfileSpec {
    profile("B-2020", 20.0, 20.0, 0.0, 0.0, 500.0)
}

/// Malformed catalog entry: negative width.
pub fn scenario_c() -> ProfileSpec {
    profile("C-BAD", -5.0, 40.0, 6.0, 2.0, 1000.0)
}

/// Bounds of a profile built from `width × height × length` millimeters,
/// centered at `placement` (working units).
pub fn expected_bounds_mm(width: f64, height: f64, length: f64, placement: [f64; 3]) -> Aabb {
    Aabb::from_center_size(placement, [width * MM, height * MM, length * MM])
}

/// Offset between the first positions of two meshes, if both have one.
pub fn mesh_offset(from: &SolidMesh, to: &SolidMesh) -> Option<[f64; 3]> {
    let a = from.positions.first()?;
    let b = to.positions.first()?;
    Some([b[0] - a[0], b[1] - a[1], b[2] - a[2]])
}

/// Total area of the triangles lying in the plane `coord[axis] == value`.
pub fn area_on_plane(mesh: &SolidMesh, axis: usize, value: f64, tol: f64) -> f64 {
    mesh.triangles()
        .filter(|tri| tri.iter().all(|p| (p[axis] - value).abs() <= tol))
        .map(|[a, b, c]| {
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            0.5 * (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
        })
        .sum()
}
