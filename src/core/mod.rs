//! Core simulation types: the particle population, the box, lattice
//! initialization, the tick stepper and the observables aggregator.

pub mod domain;
pub mod lattice;
pub mod particle;
pub mod sim;
pub mod stats;

pub use domain::BoxDomain;
pub use particle::Particle;
pub use sim::{SimConfig, Simulation};
pub use stats::{Observables, ReportSink};
