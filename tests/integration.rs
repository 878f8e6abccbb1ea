use std::f64::consts::TAU;

use mobius_engine::Engine;
use mobius_engine::geom::{
    MobiusError, MobiusParams, MobiusStrip, RenderOptions, mesh_strip,
};

#[test]
fn reference_run_prints_expected_report() {
    let strip = MobiusStrip::new(MobiusParams::new(1.0, 0.2, 300)).expect("reference strip");
    let report = strip.report();
    assert_eq!(
        report.to_string(),
        "Surface Area ≈ 1.26550\nEdge Length ≈ 12.58192"
    );
}

#[test]
fn engine_exposes_the_same_measurements_as_the_strip() {
    let params = MobiusParams::new(1.0, 0.2, 300);
    let engine = Engine::from_params(params).expect("engine");
    let strip = MobiusStrip::new(params).expect("strip");

    assert_eq!(engine.surface_area().to_bits(), strip.surface_area().to_bits());
    assert_eq!(engine.edge_length().to_bits(), strip.edge_length().to_bits());
    assert_eq!(engine.strip().params(), params);
}

#[test]
fn default_engine_uses_reference_defaults() {
    let engine = Engine::from_params(MobiusParams::default()).expect("engine");
    assert_eq!(engine.strip().resolution(), 200);
    assert!(engine.surface_area() > 0.0);
}

#[test]
fn invalid_parameters_fail_before_meshing() {
    for params in [
        MobiusParams::new(0.0, 0.2, 100),
        MobiusParams::new(1.0, -0.2, 100),
        MobiusParams::new(1.0, 0.2, 1),
    ] {
        match MobiusStrip::new(params) {
            Err(MobiusError::InvalidParameter { .. }) => {}
            other => panic!("expected InvalidParameter for {params:?}, got {other:?}"),
        }
        assert!(Engine::from_params(params).is_err());
    }
}

#[test]
fn display_mesh_covers_the_whole_strip() {
    let strip = MobiusStrip::from_parts(2.0, 0.5, 64).expect("strip");
    let (mesh, diagnostics) = mesh_strip(&strip, RenderOptions::default()).expect("mesh");
    mesh.validate().expect("valid mesh");
    assert!(diagnostics.is_manifold());
    assert!(!diagnostics.is_watertight());

    // Every vertex lies within half a width of the centre circle.
    for p in &mesh.positions {
        let radial = p[0].hypot(p[1]) - 2.0;
        let offset = radial.hypot(p[2]);
        assert!(offset <= 0.25 + 1e-12);
    }
}

#[test]
fn wider_larger_strips_measure_larger() {
    let small = MobiusStrip::from_parts(1.0, 0.1, 150).unwrap();
    let large = MobiusStrip::from_parts(2.0, 0.3, 150).unwrap();
    assert!(large.surface_area() > small.surface_area());
    assert!(large.edge_length() > small.edge_length());
    assert!(small.edge_length() < 2.0 * TAU * 1.0 * 1.01);
}
