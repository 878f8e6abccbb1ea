//! Mesh diagnostics for the render handoff.
//!
//! A strip meshed from an `n_u × n_v` sample grid without wrapping is a single
//! open sheet: it has `2·(n_u - 1) + 2·(n_v - 1)` open edges and no
//! non-manifold edges. The diagnostics make that checkable by callers and
//! tests.
//!
//! ```ignore
//! let (mesh, diagnostics) = mesh_strip(&strip, RenderOptions::default())?;
//! if !diagnostics.is_manifold() {
//!     for warning in &diagnostics.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//! }
//! ```

use std::fmt;

/// Topology and quality counts for a generated [`GeomMesh`](super::GeomMesh).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeomMeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Triangles whose area is below the zero-length tolerance.
    ///
    /// These are kept in the index buffer; the count only flags them.
    pub degenerate_triangle_count: usize,

    /// Edges with exactly one adjacent triangle.
    pub open_edge_count: usize,

    /// Edges with more than two adjacent triangles.
    pub non_manifold_edge_count: usize,

    /// Optional timing breakdown, populated with `mesh_engine_metrics`.
    pub timing: Option<super::metrics::GeomTimingReport>,

    /// Human-readable notes about the generated mesh.
    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh has no open edges.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0
    }

    /// Returns `true` if no edge is shared by more than two triangles.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vertices={} triangles={} open_edges={} non_manifold_edges={} degenerate={}",
            self.vertex_count,
            self.triangle_count,
            self.open_edge_count,
            self.non_manifold_edge_count,
            self.degenerate_triangle_count,
        )?;
        if let Some(timing) = &self.timing {
            write!(f, " time={:.3}ms", timing.total_ms())?;
        }
        for warning in &self.warnings {
            write!(f, "\n  warning: {warning}")?;
        }
        Ok(())
    }
}
