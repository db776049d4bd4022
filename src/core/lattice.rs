use crate::core::domain::BoxDomain;
use crate::core::particle::{Particle, UNIFORM_MASS};
use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Number of lattice sites along one row for the given box side and
/// particle radius.
///
/// The grid leaves a gap of `epsilon = side / 100` around each sphere, so a
/// row holds `floor(side / (2 * radius + 2 * epsilon))` spheres. The full
/// grid capacity is the cube of this value.
pub fn capacity_per_row(side: f64, radius: f64) -> usize {
    let epsilon = side / 100.0;
    (side / (2.0 * radius + 2.0 * epsilon)) as usize
}

/// Place `n` non-overlapping particles on a cubic lattice inside `domain`
/// and assign each a Maxwell-Boltzmann sampled velocity.
///
/// Placement walks a grid from the `-half` corner of the box: x advances by
/// `radius + epsilon` before each placement and again after the wrap
/// checks, the z row wraps every `per_row` particles and the y layer every
/// `per_row^2`. Sites are `2 * (radius + epsilon)` apart on every axis, so
/// no two spheres overlap at t = 0.
///
/// Each velocity component is an independent Maxwell-Boltzmann speed draw
/// (scale parameter `speed_scale`) assigned as-is. Speed draws are
/// non-negative, so a fresh population carries a net momentum along +x,
/// +y and +z.
///
/// Errors:
/// - `Error::InvalidParam` if the domain is not cubic, the grid cannot hold
///   a single row, `n == 0`, or `speed_scale` is non-positive.
/// - `Error::LatticeCapacity` if `n` exceeds the grid's capacity.
pub fn generate_particles<R: Rng>(
    n: usize,
    domain: &BoxDomain,
    radius: f64,
    speed_scale: f64,
    rng: &mut R,
) -> Result<Vec<Particle>> {
    if n == 0 {
        return Err(Error::InvalidParam("particle count must be > 0".into()));
    }
    let half = domain.half();
    if half[1] != half[0] || half[2] != half[0] {
        return Err(Error::InvalidParam(
            "lattice placement requires a cubic domain".into(),
        ));
    }
    let side = domain.side(0);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidParam("radius must be finite and > 0".into()));
    }
    if !speed_scale.is_finite() || speed_scale <= 0.0 {
        return Err(Error::InvalidParam(
            "speed_scale must be finite and > 0".into(),
        ));
    }

    let per_row = capacity_per_row(side, radius);
    if per_row == 0 {
        return Err(Error::InvalidParam(
            "box side too small to hold one particle row".into(),
        ));
    }
    let capacity = per_row * per_row * per_row;
    if n > capacity {
        return Err(Error::LatticeCapacity {
            requested: n,
            capacity,
        });
    }

    let normal = Normal::new(0.0, speed_scale)
        .map_err(|e| Error::InvalidParam(format!("speed scale: {e}")))?;
    // All x speeds are drawn first, then y, then z.
    let vx: Vec<f64> = (0..n).map(|_| maxwell_speed(&normal, rng)).collect();
    let vy: Vec<f64> = (0..n).map(|_| maxwell_speed(&normal, rng)).collect();
    let vz: Vec<f64> = (0..n).map(|_| maxwell_speed(&normal, rng)).collect();

    let epsilon = side / 100.0;
    let inc = radius + epsilon;
    let h = side / 2.0;

    let mut x = -h;
    let mut y = -h + inc;
    let mut z = -h + inc;
    let mut in_row = 0_usize;
    let mut in_layer = 0_usize;

    let mut particles = Vec::with_capacity(n);
    for i in 0..n {
        x += inc;
        particles.push(Particle::new([x, y, z], [vx[i], vy[i], vz[i]], radius, UNIFORM_MASS)?);
        in_row += 1;
        in_layer += 1;
        if in_row % per_row == 0 {
            z += 2.0 * inc;
            x = -h - inc;
        }
        if in_layer % (per_row * per_row) == 0 {
            y += 2.0 * inc;
            z = -h + inc;
        }
        x += inc;
    }
    Ok(particles)
}

/// One Maxwell-Boltzmann speed draw: the magnitude of an isotropic
/// 3D normal vector with per-axis deviation `scale`.
fn maxwell_speed<R: Rng>(normal: &Normal<f64>, rng: &mut R) -> f64 {
    let (a, b, c): (f64, f64, f64) = (
        normal.sample(rng),
        normal.sample(rng),
        normal.sample(rng),
    );
    (a * a + b * b + c * c).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn dist(a: &[f64; 3], b: &[f64; 3]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn capacity_for_default_box() {
        // side 20, radius 1: epsilon = 0.2, pitch = 2.4, 20 / 2.4 -> 8
        assert_eq!(capacity_per_row(20.0, 1.0), 8);
    }

    #[test]
    fn grid_walk_lays_rows_then_layers() -> Result<()> {
        let domain = BoxDomain::cube(20.0)?;
        let mut rng = StdRng::seed_from_u64(1);
        let particles = generate_particles(65, &domain, 1.0, 1.0, &mut rng)?;

        // inc = 1.2; first site at -10 + 1.2 on every axis
        assert!((particles[0].r[0] - -8.8).abs() < 1e-12);
        assert!((particles[0].r[1] - -8.8).abs() < 1e-12);
        assert!((particles[0].r[2] - -8.8).abs() < 1e-12);
        // second site steps 2 * inc along x
        assert!((particles[1].r[0] - -6.4).abs() < 1e-12);
        // row wrap after 8 particles: x restarts, z advances by 2 * inc
        assert!((particles[8].r[0] - -8.8).abs() < 1e-12);
        assert!((particles[8].r[2] - -6.4).abs() < 1e-12);
        // layer wrap after 64 particles: y advances, z restarts
        assert!((particles[64].r[1] - -6.4).abs() < 1e-12);
        assert!((particles[64].r[2] - -8.8).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn no_initial_overlap_at_full_capacity() -> Result<()> {
        let domain = BoxDomain::cube(20.0)?;
        let mut rng = StdRng::seed_from_u64(2);
        let particles = generate_particles(512, &domain, 1.0, 1.0, &mut rng)?;
        for i in 0..particles.len() {
            assert!(
                domain.contains(&particles[i].r, particles[i].radius),
                "particle {} escapes the box at t=0",
                i
            );
            for j in (i + 1)..particles.len() {
                let d = dist(&particles[i].r, &particles[j].r);
                let r_sum = particles[i].radius + particles[j].radius;
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

    #[test]
    fn over_capacity_rejected() -> Result<()> {
        let domain = BoxDomain::cube(20.0)?;
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_particles(513, &domain, 1.0, 1.0, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::LatticeCapacity {
                requested: 513,
                capacity: 512
            }
        ));
        Ok(())
    }

    #[test]
    fn degenerate_grid_rejected() -> Result<()> {
        // side 1, radius 1: not even one site per row
        let domain = BoxDomain::cube(1.0)?;
        let mut rng = StdRng::seed_from_u64(4);
        assert!(generate_particles(1, &domain, 1.0, 1.0, &mut rng).is_err());
        Ok(())
    }

    #[test]
    fn velocity_components_are_nonnegative_speed_draws() -> Result<()> {
        let domain = BoxDomain::cube(20.0)?;
        let mut rng = StdRng::seed_from_u64(5);
        let particles = generate_particles(64, &domain, 1.0, 1.0, &mut rng)?;
        for p in &particles {
            for &c in &p.v {
                assert!(c.is_finite());
                assert!(c >= 0.0, "Maxwell speed draws are non-negative");
            }
        }
        Ok(())
    }

    #[test]
    fn sampling_is_seed_deterministic() -> Result<()> {
        let domain = BoxDomain::cube(20.0)?;
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = generate_particles(20, &domain, 1.0, 1.0, &mut rng_a)?;
        let b = generate_particles(20, &domain, 1.0, 1.0, &mut rng_b)?;
        assert_eq!(a, b);
        Ok(())
    }
}
