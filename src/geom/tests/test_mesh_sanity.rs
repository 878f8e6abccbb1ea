use crate::geom::{
    GeomContext, GridError, MobiusStrip, RenderOptions, Tolerance, mesh_strip,
    mesh_strip_with_context, triangulate_grid,
};

#[test]
fn full_resolution_mesh_has_finite_vertices_and_valid_indices() {
    let strip = MobiusStrip::from_parts(1.0, 0.2, 10).unwrap();
    let (mesh, diag) = mesh_strip(&strip, RenderOptions::FULL).unwrap();

    mesh.validate().expect("mesh validate");
    assert_eq!(mesh.positions.len(), 100);
    assert_eq!(mesh.positions_flat().len(), 300);
    assert_eq!(mesh.triangle_count(), 2 * 9 * 9);
    assert_eq!(mesh.faces().len(), mesh.triangle_count());

    assert_eq!(diag.vertex_count, 100);
    assert_eq!(diag.triangle_count, 162);
    assert_eq!(diag.open_edge_count, 4 * 9);
    assert_eq!(diag.non_manifold_edge_count, 0);
    assert_eq!(diag.degenerate_triangle_count, 0);
    assert!(!diag.has_warnings());

    let uvs = mesh.uvs.as_ref().unwrap();
    assert_eq!(uvs[0], [0.0, 0.0]);
    assert_eq!(uvs[99], [1.0, 1.0]);

    let tol = Tolerance::new(1e-9);
    for n in mesh.normals.as_ref().unwrap() {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!(tol.approx_eq_f64(len, 1.0));
    }

    assert_eq!(mesh.positions[0], strip.point(0, 0).to_array());
    assert_eq!(mesh.positions[99], strip.point(9, 9).to_array());
}

#[test]
fn default_stride_keeps_last_row_and_column() {
    let strip = MobiusStrip::from_parts(1.0, 0.2, 200).unwrap();
    let (mesh, diag) = mesh_strip(&strip, RenderOptions::default()).unwrap();

    // 0, 4, ..., 196 plus the closing sample 199.
    let side = 51;
    assert_eq!(mesh.positions.len(), side * side);
    assert_eq!(diag.open_edge_count, 4 * (side - 1));
    assert_eq!(mesh.positions[side - 1], strip.point(0, 199).to_array());
    assert_eq!(
        mesh.positions[side * side - 1],
        strip.point(199, 199).to_array()
    );
}

#[test]
fn stride_that_divides_grid_adds_no_extra_sample() {
    let strip = MobiusStrip::from_parts(1.0, 0.2, 9).unwrap();
    let (mesh, _) = mesh_strip(&strip, RenderOptions::new(4, 2)).unwrap();
    // Rows 0, 4, 8 and columns 0, 2, 4, 6, 8.
    assert_eq!(mesh.positions.len(), 3 * 5);
    assert_eq!(mesh.triangle_count(), 2 * 2 * 4);
}

#[test]
fn zero_stride_is_treated_as_full_resolution() {
    let strip = MobiusStrip::from_parts(1.0, 0.2, 6).unwrap();
    let (mesh, _) = mesh_strip(&strip, RenderOptions::new(0, 0)).unwrap();
    assert_eq!(mesh.positions.len(), 36);
}

#[test]
fn two_sample_strip_reports_degenerate_triangles() {
    // All four corners lie on the x axis when u spans exactly one turn.
    let strip = MobiusStrip::from_parts(1.0, 0.2, 2).unwrap();
    let mut ctx = GeomContext::new();
    let (mesh, diag) =
        mesh_strip_with_context(&strip, RenderOptions::default(), &mut ctx).unwrap();

    mesh.validate().expect("mesh validate");
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(diag.degenerate_triangle_count, 2);
    assert!(diag.has_warnings());
}

#[test]
fn triangulate_grid_emits_two_triangles_per_quad() {
    assert_eq!(
        triangulate_grid(3, 2).unwrap(),
        vec![0, 1, 3, 3, 1, 4, 1, 2, 4, 4, 2, 5]
    );
    assert!(triangulate_grid(1, 5).unwrap().is_empty());
}

#[test]
fn triangulate_grid_rejects_grids_beyond_u32_indices() {
    // 70_000² vertices overflow u32 even though each side fits.
    assert_eq!(
        triangulate_grid(70_000, 70_000),
        Err(GridError::TooLarge {
            rows: 70_000,
            cols: 70_000
        })
    );
    assert!(matches!(
        triangulate_grid(usize::MAX, 2),
        Err(GridError::TooLarge { .. })
    ));
    assert_eq!(triangulate_grid(65_536, 1), Ok(Vec::new()));
}
