//! End-to-end generation scenarios against the default (cell) backend.

use profile_catalog::Catalog;
use profile_ops::{generate_profile, generate_profile_with_config, GeneratorConfig, KernelBackend};
use test_harness::assertions::{assert_congruent, assert_generated_valid, assert_oracles_pass};
use test_harness::helpers::{
    area_on_plane, expected_bounds_mm, scenario_a, scenario_b, scenario_c, MM, WELD_TOL,
};
use test_harness::oracle::*;

// ── Scenario A: slotted 40×40 ───────────────────────────────────────────

#[test]
fn scenario_a_cuts_four_slots() {
    let out = generate_profile(&scenario_a(), [0.0; 3]).unwrap();
    assert!(out.used_boolean_construction, "{:?}", out.diagnostics);
    assert_generated_valid(&out, WELD_TOL, "scenario A").unwrap();

    let mesh = &out.solid_mesh;
    let slot_area = (6.0 * MM * 0.999) * (2.0 * MM);
    let expected_volume = (40.0 * MM) * (40.0 * MM) * 1.0 - 4.0 * slot_area * 1.0;

    let verdicts = vec![
        check_bounding_box(mesh, &expected_bounds_mm(40.0, 40.0, 1000.0, [0.0; 3]), 1e-12),
        check_euler_characteristic(mesh, 2, WELD_TOL),
        check_shell_count(mesh, 1, WELD_TOL),
        check_volume(mesh, expected_volume, 1e-9),
    ];
    assert_oracles_pass(&verdicts, "scenario A").unwrap();

    assert_eq!(mesh.face_count(), 70);
    assert_eq!(mesh.vertex_count(), 72);
}

/// Area each outer side face keeps once its slot mouth is cut out.
fn expected_side_area(extent_mm: f64, slot_mm: f64, length_mm: f64) -> f64 {
    (extent_mm - slot_mm * 0.999) * MM * length_mm * MM
}

#[test]
fn scenario_a_slots_open_onto_every_side_face() {
    let out = generate_profile(&scenario_a(), [0.0; 3]).unwrap();
    let mesh = &out.solid_mesh;
    let expected = expected_side_area(40.0, 6.0, 1000.0);

    for (axis, value) in [(0, 20.0 * MM), (0, -20.0 * MM), (1, 20.0 * MM), (1, -20.0 * MM)] {
        let area = area_on_plane(mesh, axis, value, 1e-12);
        assert!(
            (area - expected).abs() < 1e-12,
            "face {axis}={value}: area {area}, expected {expected}"
        );
    }

    // Each slot floor sits one wall thickness below its face.
    let floor = area_on_plane(mesh, 0, 18.0 * MM, 1e-12);
    assert!((floor - 6.0 * MM * 0.999 * 1.0).abs() < 1e-12, "floor area {floor}");
}

// ── Scenario B: no slots ────────────────────────────────────────────────

#[test]
fn scenario_b_keeps_outer_box() {
    let out = generate_profile(&scenario_b(), [0.0; 3]).unwrap();
    assert_generated_valid(&out, WELD_TOL, "scenario B").unwrap();
    let bbox = check_bounding_box(
        &out.solid_mesh,
        &expected_bounds_mm(20.0, 20.0, 500.0, [0.0; 3]),
        1e-12,
    );
    assert!(bbox.passed, "{}", bbox.detail);
}

// ── Scenario C: malformed width ─────────────────────────────────────────

#[test]
fn scenario_c_degenerates_without_failing() {
    let out = generate_profile(&scenario_c(), [0.0; 3]).unwrap();
    assert_generated_valid(&out, WELD_TOL, "scenario C").unwrap();
    assert!(out
        .diagnostics
        .warnings
        .iter()
        .any(|w| w.contains("width")));

    let size = out.solid_mesh.bounding_box().size();
    assert!((size[0] - GeneratorConfig::default().min_dimension).abs() < 1e-12);
    assert!((size[1] - 40.0 * MM).abs() < 1e-12);
    assert!((size[2] - 1.0).abs() < 1e-12);
}

// ── Scenario D: two placements ──────────────────────────────────────────

#[test]
fn scenario_d_placements_are_translates() {
    let spec = scenario_a();
    let first = generate_profile(&spec, [0.0, 0.0, 0.0]).unwrap();
    let second = generate_profile(&spec, [0.5, -0.25, 2.0]).unwrap();

    assert_eq!(first.used_boolean_construction, second.used_boolean_construction);
    assert_congruent(
        &first.solid_mesh,
        &second.solid_mesh,
        [0.5, -0.25, 2.0],
        1e-12,
        "scenario D",
    )
    .unwrap();
    assert_eq!(first.tags, second.tags);
}

// ── Built-in catalog ────────────────────────────────────────────────────

#[test]
fn every_builtin_profile_generates_with_slots() {
    let catalog = Catalog::builtin().unwrap();
    for spec in catalog.profiles() {
        let out = generate_profile(spec, [0.0; 3]).unwrap();
        assert_generated_valid(&out, WELD_TOL, &spec.id).unwrap();
        assert!(out.used_boolean_construction, "{} fell back: {:?}", spec.id, out.diagnostics);
        assert_eq!(out.solid_mesh.euler_characteristic(WELD_TOL), 2, "{}", spec.id);
        let mouth = spec.slot_width * 0.999 * MM;
        let side = area_on_plane(&out.solid_mesh, 0, spec.width * MM * 0.5, 1e-12);
        let closed = spec.height * MM * spec.default_length * MM;
        assert!((side - (closed - mouth * spec.default_length * MM)).abs() < 1e-9, "{}", spec.id);

        let bbox = check_bounding_box(
            &out.solid_mesh,
            &expected_bounds_mm(spec.width, spec.height, spec.default_length, [0.0; 3]),
            1e-12,
        );
        assert!(bbox.passed, "{}: {}", spec.id, bbox.detail);
    }
}

#[test]
fn truck_backend_cuts_scenario_a_slots() {
    let config = GeneratorConfig::default().with_backend(KernelBackend::Truck);
    let out = generate_profile_with_config(&scenario_a(), [0.0; 3], &config).unwrap();

    assert!(out.used_boolean_construction, "{:?}", out.diagnostics);
    assert!(out.diagnostics.fallback_reason.is_none());
    assert!(check_fallback_reported(&out).passed);
    assert!(out.solid_mesh.is_closed(WELD_TOL));
    assert_eq!(out.solid_mesh.shell_count(WELD_TOL), 1);

    let bbox = check_bounding_box(
        &out.solid_mesh,
        &expected_bounds_mm(40.0, 40.0, 1000.0, [0.0; 3]),
        1e-9,
    );
    assert!(bbox.passed, "{}", bbox.detail);

    let side = area_on_plane(&out.solid_mesh, 0, 20.0 * MM, 1e-9);
    assert!((side - expected_side_area(40.0, 6.0, 1000.0)).abs() < 1e-9, "side area {side}");
}
