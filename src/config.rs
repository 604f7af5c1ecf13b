use crate::{
    error::*,
    page_rank::{iterated, iterated::DanglingPolicy, sampled},
};

pub const DAMPING: f64 = 0.85;
pub const SAMPLES: usize = 10_000;
pub const TOLERANCE: f64 = 0.001;
pub const MAX_ITERATIONS: usize = 10_000;

/// Settings shared by both estimators.
#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// Length of the random walk.
    pub samples: usize,
    /// Largest per-page change at which iteration stops.
    pub tolerance: f64,
    pub max_iterations: usize,
    pub dangling: DanglingPolicy,
    /// Seeds the random walk; `None` draws from the thread rng.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            samples: SAMPLES,
            tolerance: TOLERANCE,
            max_iterations: MAX_ITERATIONS,
            dangling: DanglingPolicy::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_samples(self.samples)?;
        check_tolerance(self.tolerance)?;
        check_max_iterations(self.max_iterations)
    }

    pub fn sampled(&self) -> sampled::Config {
        sampled::Config {
            damping: self.damping,
            samples: self.samples,
        }
    }

    pub fn iterated(&self) -> iterated::Config {
        iterated::Config {
            damping: self.damping,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            dangling: self.dangling,
        }
    }
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        invalid(format!("damping={damping}, expected 0 < damping < 1"))
    }
}

pub(crate) fn check_samples(samples: usize) -> Result<()> {
    if samples >= 1 {
        Ok(())
    } else {
        invalid(format!("samples={samples}, expected at least 1"))
    }
}

pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance > 0.0 && tolerance.is_finite() {
        Ok(())
    } else {
        invalid(format!("tolerance={tolerance}"))
    }
}

pub(crate) fn check_max_iterations(max_iterations: usize) -> Result<()> {
    if max_iterations >= 1 {
        Ok(())
    } else {
        invalid(format!("max_iterations={max_iterations}"))
    }
}
