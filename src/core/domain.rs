use crate::core::particle::DIM;
use crate::error::{Error, Result};

/// Axis-aligned cuboid simulation domain, centered at the origin.
///
/// Stored as per-axis half-extents: a particle center r is inside the
/// domain for its radius when `|r[k]| + radius <= half[k]` on every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDomain {
    half: [f64; DIM],
}

impl BoxDomain {
    /// Create a domain from full edge lengths (each finite and > 0).
    pub fn new(extents: [f64; DIM]) -> Result<Self> {
        if !extents.iter().all(|&l| l.is_finite() && l > 0.0) {
            return Err(Error::InvalidParam(
                "box extents must be finite and > 0".into(),
            ));
        }
        let mut half = [0.0_f64; DIM];
        for (h, &l) in half.iter_mut().zip(extents.iter()) {
            *h = l / 2.0;
        }
        Ok(Self { half })
    }

    /// Create a cubic domain with the given edge length.
    pub fn cube(side: f64) -> Result<Self> {
        Self::new([side; DIM])
    }

    /// Per-axis half-extents.
    #[inline]
    pub fn half(&self) -> [f64; DIM] {
        self.half
    }

    /// Full edge length along `axis`.
    #[inline]
    pub fn side(&self, axis: usize) -> f64 {
        2.0 * self.half[axis]
    }

    /// Domain volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.half.iter().map(|&h| 2.0 * h).product()
    }

    /// Whether a sphere of `radius` centered at `r` lies fully inside the domain.
    pub fn contains(&self, r: &[f64; DIM], radius: f64) -> bool {
        r.iter()
            .zip(self.half.iter())
            .all(|(&x, &h)| x.abs() + radius <= h)
    }
}
