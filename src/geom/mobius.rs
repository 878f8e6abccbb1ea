//! Discretized Möbius strip and the two measurements derived from it.
//!
//! [`MobiusStrip`] samples [`MobiusSurface`] on an `n × n` grid of parameter
//! values and keeps the resulting coordinate arrays. Everything is computed
//! once in the constructor; the measuring methods only read.
//!
//! ```ignore
//! use mobius_engine::geom::{MobiusParams, MobiusStrip};
//!
//! let strip = MobiusStrip::new(MobiusParams { radius: 1.0, width: 0.2, resolution: 300 })?;
//! println!("{}", strip.report());
//! ```

use std::fmt;

use serde::Serialize;

use super::core::Point3;
use super::grid::{Axis, Grid2, GridError, gradient, linspace, meshgrid};
use super::mesh::GeomContext;
use super::metrics::TimingBucket;
use super::surface::{MobiusSurface, Surface};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MobiusError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Construction parameters: centre radius `R`, strip width `w`, resolution `n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MobiusParams {
    pub radius: f64,
    pub width: f64,
    pub resolution: usize,
}

impl MobiusParams {
    pub const DEFAULT_RADIUS: f64 = 1.0;
    pub const DEFAULT_WIDTH: f64 = 0.2;
    pub const DEFAULT_RESOLUTION: usize = 200;
    pub const MIN_RESOLUTION: usize = 2;

    #[must_use]
    pub const fn new(radius: f64, width: f64, resolution: usize) -> Self {
        Self {
            radius,
            width,
            resolution,
        }
    }

    pub fn validate(&self) -> Result<(), MobiusError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MobiusError::InvalidParameter {
                name: "radius",
                value: self.radius,
                reason: "must be finite and > 0",
            });
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(MobiusError::InvalidParameter {
                name: "width",
                value: self.width,
                reason: "must be finite and > 0",
            });
        }
        if self.resolution < Self::MIN_RESOLUTION {
            return Err(MobiusError::InvalidParameter {
                name: "resolution",
                value: self.resolution as f64,
                reason: "must be at least 2",
            });
        }
        Ok(())
    }
}

impl Default for MobiusParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_RADIUS,
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_RESOLUTION,
        )
    }
}

/// First partial derivatives of X/Y/Z, one grid per component.
#[derive(Debug, Clone, PartialEq)]
struct Partials {
    xu: Grid2,
    yu: Grid2,
    zu: Grid2,
    xv: Grid2,
    yv: Grid2,
    zv: Grid2,
}

/// The two scalar outputs of a strip, formatted to five decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MobiusReport {
    pub surface_area: f64,
    pub edge_length: f64,
}

impl fmt::Display for MobiusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Surface Area ≈ {:.5}", self.surface_area)?;
        write!(f, "Edge Length ≈ {:.5}", self.edge_length)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobiusStrip {
    params: MobiusParams,
    surface: MobiusSurface,
    u: Vec<f64>,
    v: Vec<f64>,
    u_grid: Grid2,
    v_grid: Grid2,
    x: Grid2,
    y: Grid2,
    z: Grid2,
    partials: Partials,
}

impl MobiusStrip {
    pub fn new(params: MobiusParams) -> Result<Self, MobiusError> {
        let mut ctx = GeomContext::new();
        Self::with_context(params, &mut ctx)
    }

    pub fn from_parts(radius: f64, width: f64, resolution: usize) -> Result<Self, MobiusError> {
        Self::new(MobiusParams::new(radius, width, resolution))
    }

    /// Builds the strip, recording construction time in `ctx.metrics`.
    pub fn with_context(params: MobiusParams, ctx: &mut GeomContext) -> Result<Self, MobiusError> {
        params.validate()?;
        log::debug!(
            "building mobius strip: R={} w={} n={}",
            params.radius,
            params.width,
            params.resolution
        );

        ctx.metrics.time(TimingBucket::MeshGeneration, || -> Result<Self, MobiusError> {
            let n = params.resolution;
            let surface = MobiusSurface {
                radius: params.radius,
                width: params.width,
            };
            let (u0, u1) = surface.domain_u();
            let (v0, v1) = surface.domain_v();
            let u = linspace(u0, u1, n);
            let v = linspace(v0, v1, n);
            let (u_grid, v_grid) = meshgrid(&u, &v)?;

            let points = sample_points(&surface, &u, &v);
            let x = Grid2::from_fn(n, n, |i, j| points[i * n + j].x)?;
            let y = Grid2::from_fn(n, n, |i, j| points[i * n + j].y)?;
            let z = Grid2::from_fn(n, n, |i, j| points[i * n + j].z)?;

            let du = u[1] - u[0];
            let dv = v[1] - v[0];
            let partials = Partials {
                xu: gradient(&x, du, Axis::Cols)?,
                yu: gradient(&y, du, Axis::Cols)?,
                zu: gradient(&z, du, Axis::Cols)?,
                xv: gradient(&x, dv, Axis::Rows)?,
                yv: gradient(&y, dv, Axis::Rows)?,
                zv: gradient(&z, dv, Axis::Rows)?,
            };

            Ok(Self {
                params,
                surface,
                u,
                v,
                u_grid,
                v_grid,
                x,
                y,
                z,
                partials,
            })
        })
    }

    /// Riemann-sum estimate of `∬ |∂r/∂u × ∂r/∂v| du dv` over the sampled grid.
    ///
    /// Every grid point carries the weight `du·dv`, including the boundary
    /// rows and columns.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        let du = self.du();
        let dv = self.dv();
        let p = &self.partials;
        let (xu, yu, zu) = (p.xu.as_slice(), p.yu.as_slice(), p.zu.as_slice());
        let (xv, yv, zv) = (p.xv.as_slice(), p.yv.as_slice(), p.zv.as_slice());

        let mut total = 0.0;
        for k in 0..xu.len() {
            let (xu, yu, zu) = (xu[k], yu[k], zu[k]);
            let (xv, yv, zv) = (xv[k], yv[k], zv[k]);

            let cx = yu * zv - zu * yv;
            let cy = zu * xv - xu * zv;
            let cz = xu * yv - yu * xv;
            total += (cx * cx + cy * cy + cz * cz).sqrt();
        }

        let area = total * du * dv;
        log::trace!("surface area for n={}: {area}", self.params.resolution);
        area
    }

    /// Sum of the lengths of the two boundary polylines at `v = ±w/2`.
    ///
    /// Each polyline joins consecutive samples in `u` and is left open: the
    /// segment from the last sample back to the first is not added. The two
    /// polylines are measured independently even though on the continuous
    /// surface they belong to one edge.
    #[must_use]
    pub fn edge_length(&self) -> f64 {
        let length: f64 = self
            .boundary_polylines()
            .iter()
            .map(|polyline| polyline_length(polyline))
            .sum();
        log::trace!("edge length for n={}: {length}", self.params.resolution);
        length
    }

    /// Boundary samples at `v = -w/2` and `v = +w/2`, in that order.
    #[must_use]
    pub fn boundary_polylines(&self) -> [Vec<Point3>; 2] {
        let h = self.surface.half_width();
        [-h, h].map(|v_edge| {
            self.u
                .iter()
                .map(|&u| self.surface.point_at(u, v_edge))
                .collect()
        })
    }

    #[must_use]
    pub fn report(&self) -> MobiusReport {
        MobiusReport {
            surface_area: self.surface_area(),
            edge_length: self.edge_length(),
        }
    }

    #[must_use]
    pub const fn params(&self) -> MobiusParams {
        self.params
    }

    #[must_use]
    pub const fn surface(&self) -> &MobiusSurface {
        &self.surface
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.params.resolution
    }

    /// Samples of `u`, from 0 to 2π inclusive.
    #[must_use]
    pub fn u(&self) -> &[f64] {
        &self.u
    }

    /// Samples of `v`, from `-w/2` to `w/2` inclusive.
    #[must_use]
    pub fn v(&self) -> &[f64] {
        &self.v
    }

    #[must_use]
    pub fn du(&self) -> f64 {
        self.u[1] - self.u[0]
    }

    #[must_use]
    pub fn dv(&self) -> f64 {
        self.v[1] - self.v[0]
    }

    #[must_use]
    pub const fn u_grid(&self) -> &Grid2 {
        &self.u_grid
    }

    #[must_use]
    pub const fn v_grid(&self) -> &Grid2 {
        &self.v_grid
    }

    #[must_use]
    pub const fn x(&self) -> &Grid2 {
        &self.x
    }

    #[must_use]
    pub const fn y(&self) -> &Grid2 {
        &self.y
    }

    #[must_use]
    pub const fn z(&self) -> &Grid2 {
        &self.z
    }

    /// Mesh point at row `i` (along `v`) and column `j` (along `u`).
    #[must_use]
    pub fn point(&self, i: usize, j: usize) -> Point3 {
        Point3::new(self.x.get(i, j), self.y.get(i, j), self.z.get(i, j))
    }
}

fn sample_points(surface: &MobiusSurface, u: &[f64], v: &[f64]) -> Vec<Point3> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        v.par_iter()
            .flat_map_iter(|&vv| u.iter().map(move |&uu| surface.point_at(uu, vv)))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        v.iter()
            .flat_map(|&vv| u.iter().map(move |&uu| surface.point_at(uu, vv)))
            .collect()
    }
}

fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
