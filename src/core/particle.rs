use crate::error::{Error, Result};

/// Fixed spatial dimension (3D).
pub const DIM: usize = 3;

/// Mass shared by every particle in a simulation.
///
/// The elastic pair update in the collision resolver is the equal-mass
/// special case, so the population must be mass-uniform for it to hold.
pub const UNIFORM_MASS: f64 = 1.0;

/// A hard-sphere gas particle.
///
/// `radius` and `mass` are immutable after construction; `r` and `v` are
/// rewritten in place every tick by the stepper.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position (x, y, z).
    pub r: [f64; DIM],
    /// Velocity (vx, vy, vz).
    pub v: [f64; DIM],
    /// Hard-sphere radius (> 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn new(r: [f64; DIM], v: [f64; DIM], radius: f64, mass: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self { r, v, radius, mass })
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * self.mass * vsq
    }

    /// Returns the particle's speed |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v.iter().map(|&c| c * c).sum::<f64>().sqrt()
    }
}
