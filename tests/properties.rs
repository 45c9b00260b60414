//! Property-based and long-run checks of the kernel invariants:
//! - Wall containment for any population and number of steps
//! - Equal and opposite velocity changes for a resolved pair
//! - Resolution leaves non-overlapping configurations untouched
//! - An isolated overlapping pair ends exactly one diameter apart

use ballbox::core::{resolve_collisions, BoxConfig, Particle, Simulation};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const DIAMETER: f64 = 0.3;
const MAX_SPEED: f64 = 5.0;
const TOL: f64 = 1e-9;

/// Strategy for one `(x, y, vx, vy)` row strictly inside the default box.
fn ball_row() -> impl Strategy<Value = [f64; 4]> {
    (
        0.5..9.5f64,
        0.5..9.5f64,
        -MAX_SPEED..MAX_SPEED,
        -MAX_SPEED..MAX_SPEED,
    )
        .prop_map(|(x, y, vx, vy)| [x, y, vx, vy])
}

/// Strategy for a population whose centers sit in distinct unit grid cells,
/// jittered by at most 0.5, so every pair is at least 0.5 apart.
fn sparse_population() -> impl Strategy<Value = Vec<[f64; 4]>> {
    prop::collection::vec(
        (
            0.0..0.5f64,
            0.0..0.5f64,
            -MAX_SPEED..MAX_SPEED,
            -MAX_SPEED..MAX_SPEED,
        ),
        1..16,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(idx, (jx, jy, vx, vy))| {
                let cx = (idx % 4) as f64;
                let cy = (idx / 4) as f64;
                [1.0 + cx + jx, 1.0 + cy + jy, vx, vy]
            })
            .collect()
    })
}

fn particles_from(rows: &[[f64; 4]]) -> Vec<Particle> {
    rows.iter()
        .map(|&[x, y, vx, vy]| Particle::new([x, y], [vx, vy]).expect("finite row"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every position stays inside the box after any number of steps
    #[test]
    fn wall_containment(rows in prop::collection::vec(ball_row(), 1..12), steps in 1usize..200) {
        let mut sim = Simulation::new(BoxConfig::default(), &rows).expect("valid start");
        let cfg = *sim.config();
        for s in 0..steps {
            sim.step().expect("step succeeds");
            for (i, r) in sim.positions().iter().enumerate() {
                prop_assert!(cfg.contains(r), "step {}: particle {} at {:?} left the box", s, i, r);
            }
        }
    }

    /// Property: the velocity change of i is the negation of the change of j
    #[test]
    fn momentum_exchange_symmetry(
        a in ball_row(),
        dx in -0.29..0.29f64,
        dy in -0.29..0.29f64,
        vx in -MAX_SPEED..MAX_SPEED,
        vy in -MAX_SPEED..MAX_SPEED,
    ) {
        prop_assume!((dx * dx + dy * dy).sqrt() > 1e-6);
        let b = [a[0] + dx, a[1] + dy, vx, vy];
        let mut ps = particles_from(&[a, b]);
        let before = ps.clone();
        resolve_collisions(&mut ps, DIAMETER).expect("resolvable pair");
        for k in 0..2 {
            let dvi = ps[0].velocity[k] - before[0].velocity[k];
            let dvj = ps[1].velocity[k] - before[1].velocity[k];
            prop_assert!((dvi + dvj).abs() < TOL, "axis {}: {} vs {}", k, dvi, dvj);
        }
    }

    /// Property: an isolated overlapping pair ends exactly one diameter apart
    #[test]
    fn separation_postcondition(
        a in ball_row(),
        dx in -0.29..0.29f64,
        dy in -0.29..0.29f64,
    ) {
        let dist = (dx * dx + dy * dy).sqrt();
        prop_assume!(dist > 1e-6 && dist < DIAMETER);
        let b = [a[0] + dx, a[1] + dy, 0.0, 0.0];
        let mut ps = particles_from(&[a, b]);
        resolve_collisions(&mut ps, DIAMETER).expect("resolvable pair");
        let ex = ps[0].position[0] - ps[1].position[0];
        let ey = ps[0].position[1] - ps[1].position[1];
        let after = (ex * ex + ey * ey).sqrt();
        prop_assert!((after - DIAMETER).abs() < TOL, "distance after = {}", after);
    }

    /// Property: resolution is a no-op when no pair overlaps
    #[test]
    fn non_overlap_is_idempotent(rows in sparse_population()) {
        let mut ps = particles_from(&rows);
        let before = ps.clone();
        let hits = resolve_collisions(&mut ps, DIAMETER).expect("resolution succeeds");
        prop_assert_eq!(hits, 0);
        prop_assert_eq!(ps, before);
    }
}

/// Long run with the reference scene: 25 balls, 101 frames of 10 sub-steps.
/// Positions stay in the box and all state stays finite.
#[test]
fn reference_scene_long_run() -> ballbox::error::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(20200401);
    let rows: Vec<[f64; 4]> = (0..25)
        .map(|_| {
            [
                rng.random_range(1.0..9.0),
                rng.random_range(1.0..9.0),
                rng.random_range(-MAX_SPEED..MAX_SPEED),
                rng.random_range(-MAX_SPEED..MAX_SPEED),
            ]
        })
        .collect();

    let mut sim = Simulation::new(BoxConfig::default(), &rows)?;
    let cfg = *sim.config();
    for frame in 0..101 {
        sim.advance(10)?;
        for (i, p) in sim.particles().iter().enumerate() {
            assert!(
                cfg.contains(&p.position),
                "frame {frame}: particle {i} at {:?} left the box",
                p.position
            );
            assert!(p.is_finite(), "frame {frame}: particle {i} is not finite");
        }
    }
    assert_eq!(sim.num_particles(), 25);
    assert!((sim.time() - 10.1).abs() < 1e-9);
    Ok(())
}
