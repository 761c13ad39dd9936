//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one worker (rank) in a cohort of `W` workers.
///
/// Workers are numbered `0..W`. `WorkerId(k)` owns the `k`-th partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// The worker id as a `usize` index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WorkerId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// The designated coordinating worker: seeds the initial population,
/// scatters it, and receives the final gather.
pub const ROOT: WorkerId = WorkerId(0);

/// One-based round counter.
///
/// Round `r` consumes the state left by round `r - 1`; `Round(0)` denotes
/// the initial state before any round has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Round(pub u64);

impl Round {
    /// The round after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
