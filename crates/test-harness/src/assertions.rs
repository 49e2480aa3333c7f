//! Assertion helpers with diagnostic output.
//!
//! Every failure names the calling context and carries expected vs actual.

use profile_ops::GeneratedProfile;
use solid_kernel::SolidMesh;

use crate::helpers::{mesh_offset, HarnessError};
use crate::oracle::{self, OracleVerdict};

/// Fail with the first failing verdict, listing every failure in the detail.
pub fn assert_oracles_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failures: Vec<&OracleVerdict> = verdicts.iter().filter(|v| !v.passed).collect();
    let Some(first) = failures.first() else {
        return Ok(());
    };
    let all: Vec<String> = failures
        .iter()
        .map(|v| format!("  {}: {}", v.oracle_name, v.detail))
        .collect();
    Err(HarnessError::OracleFailure {
        oracle: first.oracle_name.clone(),
        detail: format!("[{}]\n{}", ctx, all.join("\n")),
    })
}

/// Assert that a generated profile is a valid closed solid with a
/// consistent fallback report.
pub fn assert_generated_valid(
    profile: &GeneratedProfile,
    weld_tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let mut verdicts = oracle::run_all_mesh_checks(&profile.solid_mesh, weld_tol);
    verdicts.push(oracle::check_fallback_reported(profile));
    assert_oracles_pass(&verdicts, ctx)
}

/// Assert that `b` is `a` moved by `offset`: same faces, every position
/// shifted by `offset` within `tol`.
pub fn assert_congruent(
    a: &SolidMesh,
    b: &SolidMesh,
    offset: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if a.vertex_count() != b.vertex_count() || a.faces != b.faces {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] topology differs: V={} F={} vs V={} F={}",
                ctx,
                a.vertex_count(),
                a.face_count(),
                b.vertex_count(),
                b.face_count(),
            ),
        });
    }
    for (i, (p, q)) in a.positions.iter().zip(&b.positions).enumerate() {
        for axis in 0..3 {
            let moved = q[axis] - p[axis];
            if (moved - offset[axis]).abs() > tol {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] vertex {} axis {} moved {:.9}, expected {:.9} (tol={})",
                        ctx, i, axis, moved, offset[axis], tol,
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Assert that two meshes are translates of each other, whatever the offset.
pub fn assert_translated_copy(a: &SolidMesh, b: &SolidMesh, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let offset = mesh_offset(a, b).ok_or_else(|| HarnessError::AssertionFailed {
        detail: format!("[{}] cannot compare empty meshes", ctx),
    })?;
    assert_congruent(a, b, offset, tol, ctx)
}
