use crate::core::domain::BoxDomain;
use crate::core::lattice;
use crate::core::particle::{Particle, DIM};
use crate::core::stats::{self, Observables, ReportSink};
use crate::error::{Error, Result};
use log::debug;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Center distance below which a contact normal is considered degenerate.
const EPS_DIST: f64 = 1e-12;

/// Fixed simulation parameters, set once at construction.
///
/// There is no live reconfiguration; build a new `Simulation` to change
/// any of these. `dt` must be small relative to `radius / speed` or fast
/// particles can tunnel through walls and each other between ticks.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of particles; must fit the placement lattice.
    pub num_particles: usize,
    /// Edge length of the cubic box.
    pub box_side: f64,
    /// Uniform hard-sphere radius.
    pub radius: f64,
    /// Integration timestep.
    pub dt: f64,
    /// Maxwell-Boltzmann scale parameter for initial speeds.
    pub speed_scale: f64,
    /// Observables are emitted every this many ticks.
    pub report_interval: u64,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_particles: 20,
            box_side: 20.0,
            radius: 1.0,
            dt: 0.01,
            speed_scale: 1.0,
            report_interval: 100,
            seed: None,
        }
    }
}

/// Time-stepped hard-sphere gas simulation.
///
/// Owns the full particle population and the box, and advances them one
/// fixed `dt` tick at a time. The tick loop is single-threaded and
/// synchronous; callers wanting cooperative cancellation drive [`step`]
/// directly instead of [`run`].
///
/// [`step`]: Simulation::step
/// [`run`]: Simulation::run
#[derive(Debug)]
pub struct Simulation {
    domain: BoxDomain,
    dt: f64,
    report_interval: u64,
    tick: u64,
    pub particles: Vec<Particle>,
}

impl Simulation {
    /// Build a simulation from `config`: validate parameters, place the
    /// particle lattice and sample initial velocities.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for any non-finite or non-positive parameter,
    ///   or a box too small to hold one lattice row.
    /// - `Error::LatticeCapacity` if `num_particles` exceeds the grid.
    pub fn new(config: SimConfig) -> Result<Self> {
        if config.num_particles == 0 {
            return Err(Error::InvalidParam("num_particles must be > 0".into()));
        }
        if !config.dt.is_finite() || config.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        if !config.speed_scale.is_finite() || config.speed_scale <= 0.0 {
            return Err(Error::InvalidParam(
                "speed_scale must be finite and > 0".into(),
            ));
        }
        if config.report_interval == 0 {
            return Err(Error::InvalidParam("report_interval must be > 0".into()));
        }
        let domain = BoxDomain::cube(config.box_side)?;

        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        let particles = lattice::generate_particles(
            config.num_particles,
            &domain,
            config.radius,
            config.speed_scale,
            &mut rng,
        )?;

        Ok(Self {
            domain,
            dt: config.dt,
            report_interval: config.report_interval,
            tick: 0,
            particles,
        })
    }

    /// Current tick counter.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Integration timestep.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The simulation box.
    #[inline]
    pub fn domain(&self) -> &BoxDomain {
        &self.domain
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Positions as a Vec of fixed-size arrays (renderer-facing snapshot).
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// Total kinetic energy (diagnostic; conserved by reflection and by the
    /// elastic pair update, up to floating-point error).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Net momentum per axis (diagnostic; the non-negative initial speed
    /// draws give a positive net momentum at t = 0).
    pub fn momentum(&self) -> [f64; DIM] {
        let mut total = [0.0_f64; DIM];
        for p in &self.particles {
            for (t, &vk) in total.iter_mut().zip(p.v.iter()) {
                *t += p.mass * vk;
            }
        }
        total
    }

    /// Observables over the current velocity distribution.
    pub fn observables(&self) -> Observables {
        stats::measure(&self.particles, &self.domain)
    }

    /// Advance one tick.
    ///
    /// For each particle i in storage order: translate by `v * dt`, reflect
    /// i off the walls, then visit every ordered pair (i, j) and resolve an
    /// overlap, re-reflecting both participants after each pair. Pairs are
    /// visited in both orders within one tick and wall correction is
    /// re-applied after every resolution; collision outcomes depend on this
    /// order, so it must not be reorganized without revalidating golden
    /// runs.
    pub fn step(&mut self) {
        let n = self.particles.len();
        for i in 0..n {
            for k in 0..DIM {
                self.particles[i].r[k] += self.particles[i].v[k] * self.dt;
            }
            reflect_boundary(&mut self.particles[i], &self.domain);
            for j in 0..n {
                if j == i {
                    continue;
                }
                let (pi, pj) = pair_mut(&mut self.particles, i, j);
                resolve_collision(pi, pj);
                reflect_boundary(&mut self.particles[i], &self.domain);
                reflect_boundary(&mut self.particles[j], &self.domain);
            }
        }
        self.tick += 1;
    }

    /// Run `ticks` ticks, emitting observables to `sink` whenever the tick
    /// counter is a multiple of the report interval.
    ///
    /// Sampling happens before the step, so a fresh simulation reports the
    /// initial distribution at tick 0.
    pub fn run(&mut self, ticks: u64, sink: &mut dyn ReportSink) {
        for _ in 0..ticks {
            if self.tick % self.report_interval == 0 {
                let obs = self.observables();
                sink.record(self.tick, &obs);
            }
            self.step();
        }
    }
}

/// Reflect `p` off the first wall it violates, if any.
///
/// Axes are checked in x, y, z order and only the first axis with
/// `|r| + radius >= half` has its velocity component negated, even when
/// several are violated at once. Position is never corrected; the particle
/// re-enters the box through its own motion on later ticks. A particle out
/// of bounds with an already-inward velocity is negated back outward, so a
/// single pass does not guarantee inward motion.
pub fn reflect_boundary(p: &mut Particle, domain: &BoxDomain) {
    let half = domain.half();
    if p.r[0].abs() + p.radius >= half[0] {
        p.v[0] = -p.v[0];
    } else if p.r[1].abs() + p.radius >= half[1] {
        p.v[1] = -p.v[1];
    } else if p.r[2].abs() + p.radius >= half[2] {
        p.v[2] = -p.v[2];
    }
}

/// Resolve an elastic collision between two overlapping particles.
///
/// Overlap is a strict center-distance test against the radius sum. The
/// update exchanges the velocity projections along the contact normal
/// (equal-mass elastic exchange); tangential components are untouched and
/// positions are never separated. Returns whether an exchange was applied.
///
/// Coincident centers have no defined normal; the pair is skipped with a
/// debug record.
pub fn resolve_collision(p1: &mut Particle, p2: &mut Particle) -> bool {
    let mut d = [0.0_f64; DIM];
    for ((dk, &r1), &r2) in d.iter_mut().zip(p1.r.iter()).zip(p2.r.iter()) {
        *dk = r1 - r2;
    }
    let dist = dot(&d, &d).sqrt();
    if dist >= p1.radius + p2.radius {
        return false;
    }
    if dist <= EPS_DIST {
        debug!("coincident centers, skipping collision resolution");
        return false;
    }

    let mut normal = d;
    for nk in &mut normal {
        *nk /= dist;
    }
    let a1 = dot(&p1.v, &normal);
    let a2 = dot(&p2.v, &normal);
    let p = a1 - a2;
    for (k, &nk) in normal.iter().enumerate() {
        p1.v[k] -= p * nk;
        p2.v[k] += p * nk;
    }
    true
}

/// Mutable references to two distinct particles by index.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
