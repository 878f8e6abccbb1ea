use std::f64::consts::TAU;

use super::core::{Point3, Vec3};

/// A parametric surface `r(u, v)` over a rectangular domain.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Parameter interval `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Parameter interval `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);

    /// `(∂r/∂u, ∂r/∂v)` at `(u, v)`.
    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3);
}

/// Möbius band of centre radius `radius` and width `width`, with one half-twist.
///
/// `u` runs once around the centre circle over `[0, 2π]` and `v` across the
/// band over `[-width/2, width/2]`:
///
/// ```text
/// x = (R + v·cos(u/2))·cos(u)
/// y = (R + v·cos(u/2))·sin(u)
/// z = v·sin(u/2)
/// ```
///
/// The surface is not closed in `u` as a grid: `r(2π, v) = r(0, -v)`, so the
/// two ends meet only after flipping `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobiusSurface {
    pub radius: f64,
    pub width: f64,
}

impl MobiusSurface {
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }
}

impl Surface for MobiusSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let (sin_half, cos_half) = (u / 2.0).sin_cos();
        let (sin_u, cos_u) = u.sin_cos();
        let ring = self.radius + v * cos_half;
        Point3::new(ring * cos_u, ring * sin_u, v * sin_half)
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    fn domain_v(&self) -> (f64, f64) {
        let h = self.half_width();
        (-h, h)
    }

    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (sin_half, cos_half) = (u / 2.0).sin_cos();
        let (sin_u, cos_u) = u.sin_cos();
        let ring = self.radius + v * cos_half;
        let ring_du = -0.5 * v * sin_half;

        let du = Vec3::new(
            ring_du * cos_u - ring * sin_u,
            ring_du * sin_u + ring * cos_u,
            0.5 * v * cos_half,
        );
        let dv = Vec3::new(cos_half * cos_u, cos_half * sin_u, sin_half);
        (du, dv)
    }
}
