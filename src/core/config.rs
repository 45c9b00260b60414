use crate::core::particle::DIM;
use crate::error::{Error, Result};

/// Immutable simulation bounds, time step and collision diameter.
///
/// The box is `[box_l, box_r] × [box_d, box_u]` (left, right, bottom, top).
/// Build with [`BoxConfig::new`] or start from [`Default`] and adjust with the
/// `with_*` methods; [`crate::core::Simulation`] validates the final value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConfig {
    /// Left wall (minimum x).
    pub box_l: f64,
    /// Right wall (maximum x).
    pub box_r: f64,
    /// Bottom wall (minimum y).
    pub box_d: f64,
    /// Top wall (maximum y).
    pub box_u: f64,
    /// Fixed integration step (s).
    pub dt: f64,
    /// Shared collision diameter (m).
    pub diameter: f64,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            box_l: 0.0,
            box_r: 10.0,
            box_d: 0.0,
            box_u: 10.0,
            dt: 0.01,
            diameter: 0.3,
        }
    }
}

impl BoxConfig {
    /// Create and validate a configuration.
    pub fn new(
        box_l: f64,
        box_r: f64,
        box_d: f64,
        box_u: f64,
        dt: f64,
        diameter: f64,
    ) -> Result<Self> {
        let cfg = Self {
            box_l,
            box_r,
            box_d,
            box_u,
            dt,
            diameter,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the four wall coordinates (left, right, bottom, top).
    pub fn with_bounds(mut self, box_l: f64, box_r: f64, box_d: f64, box_u: f64) -> Self {
        self.box_l = box_l;
        self.box_r = box_r;
        self.box_d = box_d;
        self.box_u = box_u;
        self
    }

    /// Replace the integration step.
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Replace the shared collision diameter.
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    /// Check the invariants of the box.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for non-finite values, `dt <= 0`, `diameter <= 0`,
    ///   `box_l >= box_r` or `box_d >= box_u`.
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.box_l, self.box_r, self.box_d, self.box_u];
        if !bounds.iter().all(|b| b.is_finite()) {
            return Err(Error::InvalidParam("box bounds must be finite".into()));
        }
        if self.box_l >= self.box_r {
            return Err(Error::InvalidParam(format!(
                "box_l ({}) must be < box_r ({})",
                self.box_l, self.box_r
            )));
        }
        if self.box_d >= self.box_u {
            return Err(Error::InvalidParam(format!(
                "box_d ({}) must be < box_u ({})",
                self.box_d, self.box_u
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(Error::InvalidParam(
                "diameter must be finite and > 0".into(),
            ));
        }
        Ok(())
    }

    /// Lower and upper bound for `axis` (0 = x, 1 = y).
    #[inline]
    pub fn bounds(&self, axis: usize) -> (f64, f64) {
        if axis == 0 {
            (self.box_l, self.box_r)
        } else {
            (self.box_d, self.box_u)
        }
    }

    /// True if `r` lies inside the box, boundary included.
    pub fn contains(&self, r: &[f64; DIM]) -> bool {
        r.iter().enumerate().all(|(k, &x)| {
            let (lo, hi) = self.bounds(k);
            x >= lo && x <= hi
        })
    }
}
