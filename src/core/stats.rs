use crate::core::domain::BoxDomain;
use crate::core::particle::{Particle, UNIFORM_MASS};
use log::info;

/// Boltzmann constant, J/K, at the precision the temperature estimate uses.
pub const BOLTZMANN: f64 = 1.38e-23;

/// Macroscopic observables derived from the instantaneous velocity
/// distribution.
///
/// `pressure` follows the kinetic-theory relation
/// `P = (N m / V) <v^2>` and `temperature` the ideal-gas relation
/// `T = P V / (N k_B)`, which algebraically reduces to
/// `<v^2> / k_B` independent of N and V.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observables {
    pub pressure: f64,
    pub temperature: f64,
    /// Mean of vx^2 over the population.
    pub mean_sq_vx: f64,
    /// Mean of vy^2 over the population.
    pub mean_sq_vy: f64,
    /// Mean of vz^2 over the population.
    pub mean_sq_vz: f64,
}

impl Observables {
    /// Sum of the three per-axis mean squared velocity components.
    #[inline]
    pub fn mean_square_speed(&self) -> f64 {
        self.mean_sq_vx + self.mean_sq_vy + self.mean_sq_vz
    }
}

/// Compute observables over the current particle population.
///
/// `particles` must be non-empty (the simulation constructor guarantees a
/// positive particle count).
pub fn measure(particles: &[Particle], domain: &BoxDomain) -> Observables {
    debug_assert!(!particles.is_empty());
    let n = particles.len() as f64;

    let mut sq = [0.0_f64; 3];
    for p in particles {
        for (s, &vk) in sq.iter_mut().zip(p.v.iter()) {
            *s += vk * vk;
        }
    }
    for s in &mut sq {
        *s /= n;
    }

    let mean_square_speed = sq[0] + sq[1] + sq[2];
    let volume = domain.volume();
    let pressure = (n * UNIFORM_MASS / volume) * mean_square_speed;
    let temperature = (pressure * volume) / (n * BOLTZMANN);

    Observables {
        pressure,
        temperature,
        mean_sq_vx: sq[0],
        mean_sq_vy: sq[1],
        mean_sq_vz: sq[2],
    }
}

/// Receiver for periodic observable records.
///
/// The simulation emits one structured record per aggregation interval;
/// rendering it (console line, log entry, metric sample) is the sink's
/// business.
pub trait ReportSink {
    fn record(&mut self, tick: u64, obs: &Observables);
}

/// Sink that forwards records to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn record(&mut self, tick: u64, obs: &Observables) {
        info!(
            "tick {}: pressure={:.6e} temperature={:.6e} <vx2>={:.6} <vy2>={:.6} <vz2>={:.6}",
            tick, obs.pressure, obs.temperature, obs.mean_sq_vx, obs.mean_sq_vy, obs.mean_sq_vz
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn particle(v: [f64; 3]) -> Result<Particle> {
        Particle::new([0.0, 0.0, 0.0], v, 0.1, UNIFORM_MASS)
    }

    #[test]
    fn axis_means_and_pressure() -> Result<()> {
        let particles = vec![particle([1.0, 2.0, 3.0])?, particle([3.0, 2.0, 1.0])?];
        let domain = BoxDomain::cube(2.0)?;
        let obs = measure(&particles, &domain);

        assert!((obs.mean_sq_vx - 5.0).abs() < 1e-12);
        assert!((obs.mean_sq_vy - 4.0).abs() < 1e-12);
        assert!((obs.mean_sq_vz - 5.0).abs() < 1e-12);
        assert!((obs.mean_square_speed() - 14.0).abs() < 1e-12);
        // P = (2 * 1 / 8) * 14
        assert!((obs.pressure - 3.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn temperature_reduces_to_mean_square_speed_over_kb() -> Result<()> {
        let particles = vec![particle([1.0, 2.0, 3.0])?, particle([3.0, 2.0, 1.0])?];
        let domain = BoxDomain::cube(2.0)?;
        let obs = measure(&particles, &domain);
        let expected = obs.mean_square_speed() / BOLTZMANN;
        assert!((obs.temperature - expected).abs() / expected < 1e-12);
        Ok(())
    }
}
