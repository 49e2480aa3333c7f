use std::thread;

use alu_types::{keys, ProfileSpec, Standard};
use profile_ops::{
    bill_of_materials, generate_profile, generate_profile_in, generate_profile_with_config,
    GeneratedProfile, GeneratorConfig, KernelBackend,
};
use solid_kernel::{Aabb, CellKernel};

const WELD: f64 = 1e-9;

fn spec(id: &str, width: f64, height: f64, slot: f64, wall: f64, length: f64) -> ProfileSpec {
    ProfileSpec {
        id: id.to_string(),
        name: id.trim_start_matches("GB-").to_string(),
        standard: Standard::NationalStandard,
        series: "40".to_string(),
        width,
        height,
        slot_width: slot,
        wall_thickness: wall,
        default_length: length,
    }
}

fn expected_bounds(w: f64, h: f64, l: f64, at: [f64; 3]) -> Aabb {
    Aabb::from_center_size(at, [w, h, l])
}

// ── Boolean path ───────────────────────────────────────────────────────────

#[test]
fn slotted_4040_uses_boolean() {
    let out = generate_profile(&spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0), [0.0; 3]).unwrap();

    assert!(out.used_boolean_construction);
    assert!(out.diagnostics.fallback_reason.is_none());
    assert!(out.diagnostics.warnings.is_empty());

    let mesh = &out.solid_mesh;
    assert!(mesh.is_closed(WELD));
    assert_eq!(mesh.shell_count(WELD), 1);
    assert_eq!(mesh.euler_characteristic(WELD), 2, "open slots add no handles");
    assert!(mesh
        .bounding_box()
        .approx_eq(&expected_bounds(0.04, 0.04, 1.0, [0.0; 3]), 1e-12));

    let slot_volume = 4.0 * (0.006 * 0.999) * 0.002 * 1.0;
    assert!((mesh.volume() - (0.0016 - slot_volume)).abs() < 1e-12);
}

#[test]
fn explicit_kernel_matches_default_backend() {
    let s = spec("GB-3030", 30.0, 30.0, 8.0, 2.0, 600.0);
    let config = GeneratorConfig::default();
    let a = generate_profile_in(&mut CellKernel::new(), &s, [0.0; 3], &config).unwrap();
    let b = generate_profile(&s, [0.0; 3]).unwrap();
    assert_eq!(a.solid_mesh, b.solid_mesh);
    assert_eq!(a.used_boolean_construction, b.used_boolean_construction);
}

// ── Degenerate inputs ──────────────────────────────────────────────────────

#[test]
fn zero_slots_keep_outer_bounds() {
    let out = generate_profile(&spec("GB-2020", 20.0, 20.0, 0.0, 0.0, 500.0), [0.0; 3]).unwrap();
    assert!(!out.solid_mesh.is_empty());
    assert!(out
        .solid_mesh
        .bounding_box()
        .approx_eq(&expected_bounds(0.02, 0.02, 0.5, [0.0; 3]), 1e-12));
}

#[test]
fn malformed_width_still_yields_a_solid() {
    let out = generate_profile(&spec("BAD", -5.0, 40.0, 6.0, 2.0, 1000.0), [0.0; 3]).unwrap();
    let mesh = &out.solid_mesh;

    assert!(mesh.vertex_count() > 0);
    assert!(mesh.face_count() > 0);
    assert!(mesh.is_closed(WELD));
    assert!(!out.diagnostics.warnings.is_empty());

    let size = mesh.bounding_box().size();
    assert!((size[0] - 1e-4).abs() < 1e-12, "width clamped to the minimum");
    assert!((size[1] - 0.04).abs() < 1e-12);
}

#[test]
fn all_garbage_dimensions_yield_a_minimum_cube() {
    let out = generate_profile(&spec("NAN", f64::NAN, 0.0, -1.0, f64::INFINITY, 0.0), [0.0; 3]).unwrap();
    let size = out.solid_mesh.bounding_box().size();
    for s in size {
        assert!((s - 1e-4).abs() < 1e-12);
    }
    assert!(out.diagnostics.warnings.len() >= 5);
}

// ── Placement ──────────────────────────────────────────────────────────────

#[test]
fn placements_are_congruent() {
    let s = spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0);
    let here = generate_profile(&s, [0.0; 3]).unwrap();
    let there = generate_profile(&s, [2.5, -1.0, 10.0]).unwrap();

    assert_eq!(here.solid_mesh.vertex_count(), there.solid_mesh.vertex_count());
    assert_eq!(here.solid_mesh.faces, there.solid_mesh.faces);
    for (p, q) in here.solid_mesh.positions.iter().zip(&there.solid_mesh.positions) {
        assert!((q[0] - p[0] - 2.5).abs() < 1e-12);
        assert!((q[1] - p[1] + 1.0).abs() < 1e-12);
        assert!((q[2] - p[2] - 10.0).abs() < 1e-12);
    }
}

#[test]
fn repeated_calls_are_identical() {
    let s = spec("GB-4545", 45.0, 45.0, 10.0, 2.5, 800.0);
    let a = generate_profile(&s, [0.1, 0.2, 0.3]).unwrap();
    let b = generate_profile(&s, [0.1, 0.2, 0.3]).unwrap();
    assert_eq!(a.solid_mesh, b.solid_mesh);
    assert_eq!(a.tags, b.tags);
}

#[test]
fn repeated_results_compare_equal_despite_timing() {
    let s = spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0);
    let a = generate_profile(&s, [0.0; 3]).unwrap();
    let mut b = generate_profile(&s, [0.0; 3]).unwrap();
    b.diagnostics.kernel_time_ms = a.diagnostics.kernel_time_ms + 12.5;
    assert_eq!(a, b);

    b.diagnostics.backend = "other".to_string();
    assert_ne!(a, b);
}

// ── Configuration ──────────────────────────────────────────────────────────

#[test]
fn unit_scale_changes_working_units() {
    let config = GeneratorConfig {
        unit_scale: 1.0,
        min_dimension: 0.1,
        weld_tolerance: 1e-6,
        ..GeneratorConfig::default()
    };
    let out = generate_profile_with_config(&spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0), [0.0; 3], &config)
        .unwrap();
    assert!(out.used_boolean_construction);
    assert!(out
        .solid_mesh
        .bounding_box()
        .approx_eq(&expected_bounds(40.0, 40.0, 1000.0, [0.0; 3]), 1e-9));
}

#[test]
fn truck_backend_keeps_the_bounding_box() {
    let config = GeneratorConfig::default().with_backend(KernelBackend::Truck);
    let out = generate_profile_with_config(&spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0), [0.0; 3], &config)
        .unwrap();

    assert_eq!(out.diagnostics.backend, "truck");
    assert!(!out.solid_mesh.is_empty());
    assert!(out
        .solid_mesh
        .bounding_box()
        .approx_eq(&expected_bounds(0.04, 0.04, 1.0, [0.0; 3]), 1e-9));
    if !out.used_boolean_construction {
        assert!(out.diagnostics.fallback_reason.is_some());
    }
}

// ── Concurrency and bookkeeping ────────────────────────────────────────────

#[test]
fn generated_profiles_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GeneratedProfile>();
    assert_send_sync::<ProfileSpec>();
    assert_send_sync::<GeneratorConfig>();
}

#[test]
fn concurrent_generation_matches_sequential() {
    let s = spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0);
    let sequential = generate_profile(&s, [0.0; 3]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let s = s.clone();
            thread::spawn(move || generate_profile(&s, [0.0; 3]).unwrap())
        })
        .collect();
    for handle in handles {
        let out = handle.join().unwrap();
        assert_eq!(out.solid_mesh, sequential.solid_mesh);
    }
}

#[test]
fn bom_over_generated_profiles() {
    let a = spec("GB-4040", 40.0, 40.0, 6.0, 2.0, 1000.0);
    let b = a.with_length(400.0);
    let outs: Vec<_> = [&a, &b, &a]
        .into_iter()
        .map(|s| generate_profile(s, [0.0; 3]).unwrap())
        .collect();

    let bom = bill_of_materials(outs.iter().map(|o| &o.tags));
    assert_eq!(bom.total_count, 3);
    assert_eq!(bom.total_length_mm, 2400.0);
    assert_eq!(bom.lines.len(), 1);
    assert_eq!(outs[1].tags.number(keys::LENGTH), Some(400.0));
}
