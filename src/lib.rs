//! Time-stepped hard-sphere gas in a box.
//!
//! `gasbox` evolves a fixed population of identical rigid spheres inside an
//! axis-aligned cuboid: positions advance by `velocity * dt` each tick,
//! particles reflect specularly off the walls, and overlapping pairs
//! exchange velocity along the contact normal (equal-mass elastic
//! collisions). Every reporting interval the engine derives pressure and an
//! ideal-gas temperature estimate from the velocity second moments and
//! hands them to a [`ReportSink`].
//!
//! The engine is headless and synchronous. A renderer or any other driver
//! owns the cadence: call [`Simulation::step`] per frame and read
//! [`Simulation::positions`] plus the per-particle radius, or let
//! [`Simulation::run`] drive a fixed tick budget.
//!
//! ```no_run
//! use gasbox::{LogSink, SimConfig, Simulation};
//!
//! # fn main() -> gasbox::Result<()> {
//! let mut sim = Simulation::new(SimConfig::default())?;
//! sim.run(10_000, &mut LogSink);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;

pub use crate::core::sim::{SimConfig, Simulation};
pub use crate::core::stats::{LogSink, Observables, ReportSink, BOLTZMANN};
pub use crate::core::{BoxDomain, Particle};
pub use crate::error::{Error, Result};
