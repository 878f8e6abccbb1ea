use std::collections::HashMap;

use super::core::{Point3, Tolerance};
use super::diagnostics::GeomMeshDiagnostics;
use super::grid::GridError;
use super::metrics::{GeomMetrics, TimingBucket};
use super::mobius::{MobiusError, MobiusStrip};
use super::surface::Surface;

/// Indexed triangle mesh handed to the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self
            .positions
            .iter()
            .any(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        let vertex_count = self.positions.len();
        if self.indices.iter().any(|&i| i as usize >= vertex_count) {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        let uvs_ok = self.uvs.as_ref().is_none_or(|uvs| uvs.len() == vertex_count);
        let normals_ok = self
            .normals
            .as_ref()
            .is_none_or(|normals| normals.len() == vertex_count);
        if !uvs_ok || !normals_ok {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat vector: `[x0, y0, z0, x1, ...]`.
    #[must_use]
    pub fn positions_flat(&self) -> Vec<f64> {
        self.positions.iter().flatten().copied().collect()
    }

    /// Triangles as index triples, the face layout the web viewer expects.
    #[must_use]
    pub fn faces(&self) -> Vec<Vec<u32>> {
        self.indices.chunks_exact(3).map(<[u32]>::to_vec).collect()
    }
}

#[derive(Debug)]
pub struct GeomContext {
    pub tolerance: Tolerance,
    pub metrics: GeomMetrics,
}

impl GeomContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::ZERO_LENGTH,
            metrics: GeomMetrics::default(),
        }
    }
}

impl Default for GeomContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Downsampling applied to the strip grid before it is triangulated for display.
///
/// A stride of `k` keeps every `k`-th row/column; the last row and column are
/// always kept so the rendered strip spans the full parameter domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub row_stride: usize,
    pub col_stride: usize,
}

impl RenderOptions {
    /// Every sample of the strip grid.
    pub const FULL: Self = Self {
        row_stride: 1,
        col_stride: 1,
    };

    #[must_use]
    pub const fn new(row_stride: usize, col_stride: usize) -> Self {
        Self {
            row_stride,
            col_stride,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

pub fn mesh_strip(
    strip: &MobiusStrip,
    options: RenderOptions,
) -> Result<(GeomMesh, GeomMeshDiagnostics), MobiusError> {
    let mut ctx = GeomContext::new();
    mesh_strip_with_context(strip, options, &mut ctx)
}

pub fn mesh_strip_with_context(
    strip: &MobiusStrip,
    options: RenderOptions,
    ctx: &mut GeomContext,
) -> Result<(GeomMesh, GeomMeshDiagnostics), MobiusError> {
    ctx.metrics.begin();

    let rows = stride_indices(strip.v().len(), options.row_stride);
    let cols = stride_indices(strip.u().len(), options.col_stride);
    let u_count = cols.len();
    let v_count = rows.len();

    let mut positions = Vec::with_capacity(u_count * v_count);
    let mut uvs = Vec::with_capacity(u_count * v_count);
    let mut normals = Vec::with_capacity(u_count * v_count);
    let (u_last, v_last) = ((u_count - 1) as f64, (v_count - 1) as f64);
    for (vi, &i) in rows.iter().enumerate() {
        for (ui, &j) in cols.iter().enumerate() {
            positions.push(strip.point(i, j).to_array());
            uvs.push([ui as f64 / u_last, vi as f64 / v_last]);

            let (du, dv) = strip
                .surface()
                .partial_derivatives_at(strip.u()[j], strip.v()[i]);
            let normal = du.cross(dv).normalized().map_or([0.0, 0.0, 1.0], |n| n.to_array());
            normals.push(normal);
        }
    }

    let indices = ctx.metrics.time(TimingBucket::Triangulation, || {
        triangulate_grid(u_count, v_count)
    })?;

    let tolerance = ctx.tolerance;
    let mut diagnostics = ctx.metrics.time(TimingBucket::Diagnostics, || {
        let (open_edge_count, non_manifold_edge_count) = count_edge_topology(&indices);
        GeomMeshDiagnostics {
            vertex_count: positions.len(),
            triangle_count: indices.len() / 3,
            degenerate_triangle_count: count_degenerate_triangles(&positions, &indices, tolerance),
            open_edge_count,
            non_manifold_edge_count,
            ..GeomMeshDiagnostics::default()
        }
    });
    if diagnostics.degenerate_triangle_count > 0 {
        diagnostics.add_warning(format!(
            "mesh has {} degenerate triangles",
            diagnostics.degenerate_triangle_count
        ));
    }
    diagnostics.timing = ctx.metrics.end();

    log::debug!("meshed strip for display: {diagnostics}");

    let mesh = GeomMesh {
        positions,
        indices,
        uvs: Some(uvs),
        normals: Some(normals),
    };
    Ok((mesh, diagnostics))
}

/// Sample indices `0, k, 2k, ...` with `count - 1` appended when missed.
fn stride_indices(count: usize, stride: usize) -> Vec<usize> {
    let stride = stride.max(1);
    let mut indices: Vec<usize> = (0..count).step_by(stride).collect();
    if let Some(&last) = indices.last() {
        if last + 1 != count {
            indices.push(count - 1);
        }
    }
    indices
}

/// Two triangles per grid quad; rows are `v`, columns are `u`, no wrapping.
///
/// Fails when the grid has more vertices than a `u32` index can address.
pub fn triangulate_grid(u_count: usize, v_count: usize) -> Result<Vec<u32>, GridError> {
    let too_large = || GridError::TooLarge {
        rows: v_count,
        cols: u_count,
    };
    let cols = u32::try_from(u_count).map_err(|_| too_large())?;
    let rows = u32::try_from(v_count).map_err(|_| too_large())?;
    if cols.checked_mul(rows).is_none() {
        return Err(too_large());
    }
    if cols < 2 || rows < 2 {
        return Ok(Vec::new());
    }

    let mut indices = Vec::with_capacity((u_count - 1) * (v_count - 1) * 6);
    for v in 0..rows - 1 {
        for u in 0..cols - 1 {
            let i0 = v * cols + u;
            let i1 = i0 + 1;
            let i2 = i0 + cols;
            let i3 = i2 + 1;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i2, i1, i3]);
        }
    }
    Ok(indices)
}

fn count_edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }
        for (ea, eb) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    let open = edge_counts.values().filter(|&&c| c == 1).count();
    let non_manifold = edge_counts.values().filter(|&&c| c > 2).count();
    (open, non_manifold)
}

fn count_degenerate_triangles(positions: &[[f64; 3]], indices: &[u32], tol: Tolerance) -> usize {
    let point = |i: u32| {
        let p = positions[i as usize];
        Point3::new(p[0], p[1], p[2])
    };
    indices
        .chunks_exact(3)
        .filter(|tri| {
            let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
            let doubled_area = b.sub_point(a).cross(c.sub_point(a)).length();
            doubled_area <= tol.eps
        })
        .count()
}
