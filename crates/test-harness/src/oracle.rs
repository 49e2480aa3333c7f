//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use profile_ops::GeneratedProfile;
use solid_kernel::{Aabb, SolidMesh};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Structural Oracles ──────────────────────────────────────────────────────

/// Check that the mesh has at least one vertex and one face.
pub fn check_non_empty(mesh: &SolidMesh) -> OracleVerdict {
    let (v, f) = (mesh.vertex_count(), mesh.face_count());
    if v > 0 && f > 0 {
        OracleVerdict::pass("non_empty", format!("V={} F={}", v, f))
    } else {
        OracleVerdict::fail("non_empty", format!("V={} F={} (expected both > 0)", v, f))
    }
}

/// Check that all face indices are in range and every face has 3+ vertices.
pub fn check_valid_indices(mesh: &SolidMesh) -> OracleVerdict {
    let vertex_count = mesh.vertex_count();
    for (i, face) in mesh.faces.iter().enumerate() {
        if face.vertices.len() < 3 {
            return OracleVerdict::fail(
                "valid_indices",
                format!("face {} has only {} vertices", i, face.vertices.len()),
            );
        }
        if let Some(&bad) = face.vertices.iter().find(|&&v| v as usize >= vertex_count) {
            return OracleVerdict::fail(
                "valid_indices",
                format!(
                    "face {} references vertex {} (vertex count = {})",
                    i, bad, vertex_count
                ),
            );
        }
    }
    OracleVerdict::pass(
        "valid_indices",
        format!("{} faces reference {} vertices", mesh.face_count(), vertex_count),
    )
}

/// Check that no face has zero area.
pub fn check_no_degenerate_faces(mesh: &SolidMesh) -> OracleVerdict {
    let degenerate = mesh
        .faces
        .iter()
        .filter(|f| mesh.face_normal(f) == [0.0, 0.0, 0.0])
        .count();
    if degenerate == 0 {
        OracleVerdict::pass(
            "no_degenerate_faces",
            format!("all {} faces have non-zero area", mesh.face_count()),
        )
    } else {
        OracleVerdict::fail(
            "no_degenerate_faces",
            format!("{} of {} faces are degenerate", degenerate, mesh.face_count()),
        )
    }
}

// ── Topology Oracles ────────────────────────────────────────────────────────

/// Check that every edge is shared by exactly two faces with opposite direction.
pub fn check_closed_manifold(mesh: &SolidMesh, weld_tol: f64) -> OracleVerdict {
    let report = mesh.edge_report(weld_tol);
    let detail = format!(
        "{} edges: {} boundary, {} non-manifold, {} misoriented",
        report.edges, report.boundary_edges, report.non_manifold_edges, report.misoriented_edges
    );
    if report.is_closed() {
        OracleVerdict::pass("closed_manifold", detail)
    } else {
        OracleVerdict::fail("closed_manifold", detail)
    }
}

/// Check the Euler characteristic V - E + F after welding.
pub fn check_euler_characteristic(mesh: &SolidMesh, expected: i64, weld_tol: f64) -> OracleVerdict {
    let chi = mesh.euler_characteristic(weld_tol);
    if chi == expected {
        OracleVerdict::pass_val(
            "euler_characteristic",
            format!("V - E + F = {}", chi),
            chi as f64,
        )
    } else {
        OracleVerdict::fail_val(
            "euler_characteristic",
            format!("V - E + F = {} (expected {})", chi, expected),
            chi as f64,
        )
    }
}

/// Check the number of connected shells.
pub fn check_shell_count(mesh: &SolidMesh, expected: usize, weld_tol: f64) -> OracleVerdict {
    let shells = mesh.shell_count(weld_tol);
    if shells == expected {
        OracleVerdict::pass_val("shell_count", format!("{} shells", shells), shells as f64)
    } else {
        OracleVerdict::fail_val(
            "shell_count",
            format!("{} shells (expected {})", shells, expected),
            shells as f64,
        )
    }
}

// ── Geometry Oracles ────────────────────────────────────────────────────────

/// Check that faces wind outward: the enclosed volume is positive.
pub fn check_outward_orientation(mesh: &SolidMesh) -> OracleVerdict {
    let volume = mesh.volume();
    if volume > 0.0 {
        OracleVerdict::pass_val("outward_orientation", format!("volume {:.6e} > 0", volume), volume)
    } else {
        OracleVerdict::fail_val(
            "outward_orientation",
            format!("volume {:.6e} is not positive; faces wind inward", volume),
            volume,
        )
    }
}

/// Check the mesh bounding box against `expected` within `tol`.
pub fn check_bounding_box(mesh: &SolidMesh, expected: &Aabb, tol: f64) -> OracleVerdict {
    let actual = mesh.bounding_box();
    if actual.approx_eq(expected, tol) {
        OracleVerdict::pass(
            "bounding_box",
            format!("min {:?} max {:?} (tol={})", actual.min, actual.max, tol),
        )
    } else {
        OracleVerdict::fail(
            "bounding_box",
            format!(
                "expected min {:?} max {:?}, got min {:?} max {:?} (tol={})",
                expected.min, expected.max, actual.min, actual.max, tol
            ),
        )
    }
}

/// Check the enclosed volume within a relative tolerance.
pub fn check_volume(mesh: &SolidMesh, expected: f64, rel_tol: f64) -> OracleVerdict {
    let volume = mesh.volume();
    let err = (volume - expected).abs();
    if err <= rel_tol * expected.abs().max(f64::MIN_POSITIVE) {
        OracleVerdict::pass_val("volume", format!("{:.9e} ≈ {:.9e}", volume, expected), volume)
    } else {
        OracleVerdict::fail_val(
            "volume",
            format!("{:.9e}, expected {:.9e} (rel_tol={})", volume, expected, rel_tol),
            volume,
        )
    }
}

// ── Generation Oracles ──────────────────────────────────────────────────────

/// Check that a generated profile reports a fallback reason iff it fell back.
pub fn check_fallback_reported(profile: &GeneratedProfile) -> OracleVerdict {
    let used = profile.used_boolean_construction;
    let reason = profile.diagnostics.fallback_reason.as_deref();
    match (used, reason) {
        (true, None) => OracleVerdict::pass("fallback_reported", "boolean construction used".to_string()),
        (false, Some(r)) => OracleVerdict::pass("fallback_reported", format!("fell back: {}", r)),
        (true, Some(r)) => OracleVerdict::fail(
            "fallback_reported",
            format!("boolean construction used but a fallback reason is set: {}", r),
        ),
        (false, None) => OracleVerdict::fail(
            "fallback_reported",
            "fell back without a fallback reason".to_string(),
        ),
    }
}

/// Run every mesh check that does not need expected values.
pub fn run_all_mesh_checks(mesh: &SolidMesh, weld_tol: f64) -> Vec<OracleVerdict> {
    vec![
        check_non_empty(mesh),
        check_valid_indices(mesh),
        check_no_degenerate_faces(mesh),
        check_closed_manifold(mesh, weld_tol),
        check_outward_orientation(mesh),
    ]
}
