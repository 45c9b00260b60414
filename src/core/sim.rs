use crate::core::collision::resolve_collisions;
use crate::core::config::BoxConfig;
use crate::core::particle::{Particle, DIM};
use crate::error::{Error, Result};

/// A fixed population of balls in a static axis-aligned 2D box.
///
/// `step()` integrates every particle (with wall reflection) and then runs one
/// collision-resolution pass. A step either commits for all particles or, on
/// error, leaves the simulation exactly as it was.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: BoxConfig,
    particles: Vec<Particle>,
    steps_taken: u64,
}

impl Simulation {
    /// Create a simulation from `(x, y, vx, vy)` rows.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for an invalid `config`, an empty population or non-finite values.
    /// - `Error::OutOfBounds` if an initial position lies outside the box.
    pub fn new(config: BoxConfig, initial: &[[f64; 4]]) -> Result<Self> {
        let particles = initial
            .iter()
            .map(|&[x, y, vx, vy]| Particle::new([x, y], [vx, vy]))
            .collect::<Result<Vec<_>>>()?;
        Self::from_particles(config, particles)
    }

    /// Create a simulation from already-built particles.
    pub fn from_particles(config: BoxConfig, particles: Vec<Particle>) -> Result<Self> {
        config.validate()?;
        if particles.is_empty() {
            return Err(Error::InvalidParam("at least one particle is required".into()));
        }
        for (i, p) in particles.iter().enumerate() {
            if !p.is_finite() {
                return Err(Error::InvalidParam(format!(
                    "particle {i} has non-finite state"
                )));
            }
            if !config.contains(&p.position) {
                return Err(Error::OutOfBounds(format!(
                    "particle {} at ({}, {}) is outside [{}, {}] x [{}, {}]",
                    i,
                    p.position[0],
                    p.position[1],
                    config.box_l,
                    config.box_r,
                    config.box_d,
                    config.box_u
                )));
            }
        }

        log::debug!(
            "simulation created: {} particles, dt = {}, diameter = {}",
            particles.len(),
            config.dt,
            config.diameter
        );

        Ok(Self {
            config,
            particles,
            steps_taken: 0,
        })
    }

    /// The immutable configuration.
    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Read-only view of all particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Number of committed steps.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Elapsed simulation time. All particles share one clock.
    pub fn time(&self) -> f64 {
        self.particles[0].elapsed_time
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.velocity).collect()
    }

    /// Advance one time step: integrate all particles, then resolve overlaps once.
    pub fn step(&mut self) -> Result<()> {
        let mut next = self.particles.clone();
        match advance_population(&mut next, &self.config) {
            Ok(impulses) => {
                self.particles = next;
                self.steps_taken += 1;
                log::trace!("step {} committed, {} impulses", self.steps_taken, impulses);
                Ok(())
            }
            Err(e) => {
                log::warn!("step {} aborted: {}", self.steps_taken + 1, e);
                Err(e)
            }
        }
    }

    /// Run `steps` consecutive steps, stopping at the first error.
    pub fn advance(&mut self, steps: usize) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Total kinetic energy for unit masses (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum for unit masses (diagnostic).
    pub fn momentum(&self) -> [f64; DIM] {
        let mut total = [0.0_f64; DIM];
        for p in &self.particles {
            for (t, v) in total.iter_mut().zip(p.velocity.iter()) {
                *t += v;
            }
        }
        total
    }
}

/// One full step on a scratch population. Returns the number of impulses applied.
fn advance_population(particles: &mut [Particle], cfg: &BoxConfig) -> Result<usize> {
    for (i, p) in particles.iter_mut().enumerate() {
        p.integrate(cfg).map_err(|e| match e {
            Error::MathError(msg) => Error::MathError(format!("particle {i}: {msg}")),
            other => other,
        })?;
    }
    let impulses = resolve_collisions(particles, cfg.diameter)?;
    confine(particles, cfg);
    for (i, p) in particles.iter().enumerate() {
        if !p.is_finite() {
            return Err(Error::MathError(format!(
                "particle {i} has non-finite state after step"
            )));
        }
    }
    Ok(impulses)
}

/// Bring positions pushed past a wall (by overlap separation or a reflection
/// overshoot) back onto that wall. Velocities are left untouched, so a ball can
/// end the step sitting on a wall with its velocity still pointing out of the
/// box; the next integration then crosses that wall at once and reflects it.
fn confine(particles: &mut [Particle], cfg: &BoxConfig) {
    for p in particles {
        for (k, r) in p.position.iter_mut().enumerate() {
            let (lo, hi) = cfg.bounds(k);
            if *r < lo {
                *r = lo;
            } else if *r > hi {
                *r = hi;
            }
        }
    }
}
