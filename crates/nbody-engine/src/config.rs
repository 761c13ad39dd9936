//! Run configuration, validation, and configuration errors.

use std::error::Error;
use std::fmt;

use nbody_core::DEFAULT_SEED;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Body count is zero.
    NoBodies,
    /// Worker count is zero.
    NoWorkers,
    /// Worker count does not fit the `u32` worker id space.
    TooManyWorkers {
        /// The configured count.
        workers: usize,
    },
    /// Time step is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f32,
    },
    /// Supplied initial state has the wrong number of bodies.
    BodyCountMismatch {
        /// `SimConfig::bodies`.
        expected: usize,
        /// Length of the supplied sequence.
        actual: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBodies => write!(f, "body count must be at least 1"),
            Self::NoWorkers => write!(f, "worker count must be at least 1"),
            Self::TooManyWorkers { workers } => {
                write!(f, "worker count {workers} exceeds u32::MAX")
            }
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::BodyCountMismatch { expected, actual } => write!(
                f,
                "initial state has {actual} bodies, configuration expects {expected}"
            ),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Everything a run needs besides the initial state.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of bodies `N`.
    pub bodies: usize,
    /// Number of rounds `n_cycle`. Zero leaves the initial state untouched.
    pub rounds: u64,
    /// Number of workers `W`.
    pub workers: usize,
    /// Fixed time step.
    pub dt: f32,
    /// Seed for the initial-state generator.
    pub seed: u64,
}

impl SimConfig {
    /// Default time step.
    pub const DEFAULT_DT: f32 = 0.01;

    /// Configuration with the default time step and seed.
    pub fn new(bodies: usize, rounds: u64, workers: usize) -> Self {
        Self {
            bodies,
            rounds,
            workers,
            dt: Self::DEFAULT_DT,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the time step.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Resolve the worker count, auto-detecting when `requested` is `None`.
    ///
    /// Auto-detection uses `available_parallelism`, falling back to 1.
    pub fn resolved_workers(requested: Option<usize>) -> usize {
        match requested {
            Some(n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies == 0 {
            return Err(ConfigError::NoBodies);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if u32::try_from(self.workers).is_err() {
            return Err(ConfigError::TooManyWorkers {
                workers: self.workers,
            });
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        Ok(())
    }
}
