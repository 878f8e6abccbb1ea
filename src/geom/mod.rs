mod core;
mod diagnostics;
mod grid;
mod mesh;
mod metrics;
mod mobius;
mod surface;

pub use core::{Point3, Tolerance, Vec3};
pub use diagnostics::GeomMeshDiagnostics;
pub use grid::{Axis, Grid2, GridError, gradient, linspace, meshgrid};
pub use mesh::{
    GeomContext, GeomMesh, RenderOptions, mesh_strip, mesh_strip_with_context, triangulate_grid,
};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use mobius::{MobiusError, MobiusParams, MobiusReport, MobiusStrip};
pub use surface::{MobiusSurface, Surface};

#[cfg(test)]
mod tests;
