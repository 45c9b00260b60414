use crate::core::config::BoxConfig;
use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// A ball moving with constant velocity between wall and pair events.
///
/// Fields:
/// - `position`: current center [x, y]
/// - `previous_position`: start of the current straight-line segment
/// - `velocity`: [vx, vy]
/// - `elapsed_time`: simulation clock of this particle
///
/// The collision diameter is shared by all particles and lives in [`BoxConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position (x, y).
    pub position: [f64; DIM],
    /// Position at the start of the step, or the wall contact point on an axis that reflected.
    pub previous_position: [f64; DIM],
    /// Velocity (vx, vy).
    pub velocity: [f64; DIM],
    /// Accumulated simulation time.
    pub elapsed_time: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any position or velocity component is NaN/inf.
    pub fn new(position: [f64; DIM], velocity: [f64; DIM]) -> Result<Self> {
        if !position.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            position,
            previous_position: position,
            velocity,
            elapsed_time: 0.0,
        })
    }

    /// Advance the particle by one explicit Euler step and apply wall reflection.
    ///
    /// On error the particle may be partially updated; [`crate::core::Simulation::step`]
    /// works on a scratch copy so that a failed step is never committed.
    pub fn integrate(&mut self, cfg: &BoxConfig) -> Result<()> {
        self.previous_position = self.position;
        for (r, &v) in self.position.iter_mut().zip(self.velocity.iter()) {
            *r += v * cfg.dt;
        }
        self.reflect(cfg)?;
        self.elapsed_time += cfg.dt;
        Ok(())
    }

    /// Reflect off any wall crossed during the last step, per axis.
    ///
    /// The crossing time is recovered from the pre-step coordinate and the
    /// pre-reversal velocity; the particle then travels the rest of the step
    /// with the reversed velocity. Landing exactly on a wall while moving
    /// outward counts as a crossing.
    ///
    /// Errors:
    /// - `Error::MathError` if a coordinate is out of bounds with a zero velocity
    ///   component, leaving the crossing time undefined.
    pub fn reflect(&mut self, cfg: &BoxConfig) -> Result<()> {
        for k in 0..DIM {
            let (lo, hi) = cfg.bounds(k);
            let x = self.position[k];
            let v = self.velocity[k];

            let wall = if x < lo || (x == lo && v < 0.0) {
                lo
            } else if x > hi || (x == hi && v > 0.0) {
                hi
            } else {
                continue;
            };

            if v == 0.0 {
                return Err(Error::MathError(format!(
                    "axis {k} coordinate {x} is outside [{lo}, {hi}] with zero velocity"
                )));
            }

            let t_remaining = cfg.dt - (wall - self.previous_position[k]) / v;
            self.velocity[k] = -v;
            self.position[k] = wall + self.velocity[k] * t_remaining;
            self.previous_position[k] = wall;
        }
        Ok(())
    }

    /// Kinetic energy for unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * dot(&self.velocity, &self.velocity)
    }

    /// True if every position and velocity component is finite.
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.velocity.iter())
            .all(|x| x.is_finite())
    }
}

#[inline]
pub(crate) fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
