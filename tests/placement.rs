use gasbox::error::Result;
use gasbox::{Error, SimConfig, Simulation};

/// No two spheres produced by the initializer may overlap, and every
/// sphere must start fully inside the box.
#[test]
fn no_initial_overlap() -> Result<()> {
    let sim = Simulation::new(SimConfig {
        num_particles: 120,
        seed: Some(4242),
        ..SimConfig::default()
    })?;

    let positions = sim.positions();
    for (i, pi) in positions.iter().enumerate() {
        assert!(sim.domain().contains(pi, sim.particles[i].radius));
        for (j, pj) in positions.iter().enumerate().skip(i + 1) {
            let d: f64 = pi
                .iter()
                .zip(pj.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            let r_sum = sim.particles[i].radius + sim.particles[j].radius;
            assert!(
                d >= r_sum,
                "particles {} and {} overlap at t=0 (d = {})",
                i,
                j,
                d
            );
        }
    }
    Ok(())
}

/// Requesting more particles than the lattice holds fails fast instead of
/// overflowing the box.
#[test]
fn over_capacity_fails_construction() {
    let err = Simulation::new(SimConfig {
        num_particles: 513, // side 20, radius 1 -> 8^3 = 512 sites
        seed: Some(1),
        ..SimConfig::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        Error::LatticeCapacity {
            requested: 513,
            capacity: 512
        }
    ));
}

/// Initial velocity components are non-negative speed draws, so a fresh
/// population carries a net momentum along +x, +y and +z.
#[test]
fn initial_population_has_positive_momentum_drift() -> Result<()> {
    let sim = Simulation::new(SimConfig {
        num_particles: 64,
        seed: Some(7),
        ..SimConfig::default()
    })?;
    let momentum = sim.momentum();
    for (axis, &component) in momentum.iter().enumerate() {
        assert!(
            component > 0.0,
            "expected positive net momentum on axis {}, got {}",
            axis,
            component
        );
    }
    Ok(())
}
