//! Pairwise overlap detection and equal-mass elastic resolution.
//!
//! Overlaps are found after penetration (discrete stepping), so each overlapping
//! pair is first pushed apart to exactly one diameter and then exchanges the
//! normal component of its relative velocity.

use crate::core::particle::{dot, Particle, DIM};
use crate::error::{Error, Result};

/// Resolve every overlapping pair once, in `(i, j)` order with `i < j`.
///
/// Pairs are visited i-ascending, then j-ascending. Updates are applied in
/// place, so a later pair sees the positions and velocities written by an
/// earlier pair in the same pass.
///
/// Returns the number of pairs that received an impulse.
///
/// Errors:
/// - `Error::InvalidParam` if `diameter` is not finite and > 0.
/// - `Error::MathError` if two overlapping particles share the same center.
pub fn resolve_collisions(particles: &mut [Particle], diameter: f64) -> Result<usize> {
    if !diameter.is_finite() || diameter <= 0.0 {
        return Err(Error::InvalidParam(
            "diameter must be finite and > 0".into(),
        ));
    }

    let n = particles.len();
    let mut impulses = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = particles.split_at_mut(j);
            if resolve_pair(&mut head[i], &mut tail[0], diameter)
                .map_err(|e| pair_context(e, i, j))?
            {
                impulses += 1;
            }
        }
    }
    Ok(impulses)
}

/// Resolve a single pair. Returns `true` if an impulse was applied.
fn resolve_pair(pi: &mut Particle, pj: &mut Particle, diameter: f64) -> Result<bool> {
    let dr = separation(pi, pj);
    let dist_sq = dot(&dr, &dr);
    let dist = dist_sq.sqrt();

    if dist < diameter {
        if dist == 0.0 {
            return Err(Error::MathError(
                "coincident centers leave the separation axis undefined".into(),
            ));
        }
        let half_offset = 0.5 * (diameter - dist);
        for k in 0..DIM {
            let push = half_offset * dr[k] / dist;
            pi.position[k] += push;
            pj.position[k] -= push;
        }
        let dr = separation(pi, pj);
        apply_impulse(pi, pj, &dr, diameter * diameter);
        Ok(true)
    } else if dist == diameter {
        apply_impulse(pi, pj, &dr, dist_sq);
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Exchange the relative velocity component along `dr` between two equal masses.
fn apply_impulse(pi: &mut Particle, pj: &mut Particle, dr: &[f64; DIM], dist_sq: f64) {
    let mut dv = [0.0_f64; DIM];
    for (k, dv_k) in dv.iter_mut().enumerate() {
        *dv_k = pi.velocity[k] - pj.velocity[k];
    }
    let fac = dot(&dv, dr) / dist_sq;
    for (k, &dr_k) in dr.iter().enumerate() {
        let delta = fac * dr_k;
        pi.velocity[k] -= delta;
        pj.velocity[k] += delta;
    }
}

#[inline]
fn separation(pi: &Particle, pj: &Particle) -> [f64; DIM] {
    let mut dr = [0.0_f64; DIM];
    for (k, dr_k) in dr.iter_mut().enumerate() {
        *dr_k = pi.position[k] - pj.position[k];
    }
    dr
}

fn pair_context(e: Error, i: usize, j: usize) -> Error {
    match e {
        Error::MathError(msg) => Error::MathError(format!("pair ({i}, {j}): {msg}")),
        other => other,
    }
}
