//! Per-worker timing breakdown.
//!
//! [`RunMetrics`] accumulates wall-clock time per round phase. The
//! exchange-wait share shows how much communication the intra-partition
//! pass failed to hide.

use std::time::Duration;

/// Accumulated phase timings for one worker, in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Rounds executed.
    pub rounds: u64,
    /// Time starting the exchange (copying and sending the own partition).
    pub publish_us: u64,
    /// Time in the intra-partition pass.
    pub intra_us: u64,
    /// Time blocked in the exchange join.
    pub exchange_wait_us: u64,
    /// Time in the cross-partition pass.
    pub cross_us: u64,
    /// Time integrating the owned partition.
    pub integrate_us: u64,
}

impl RunMetrics {
    pub(crate) fn micros(d: Duration) -> u64 {
        u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
    }

    /// Sum of all phases.
    pub fn total_us(&self) -> u64 {
        self.publish_us + self.intra_us + self.exchange_wait_us + self.cross_us + self.integrate_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.rounds, 0);
        assert_eq!(m.total_us(), 0);
    }

    #[test]
    fn total_sums_phases() {
        let m = RunMetrics {
            rounds: 3,
            publish_us: 1,
            intra_us: 10,
            exchange_wait_us: 5,
            cross_us: 20,
            integrate_us: 2,
        };
        assert_eq!(m.total_us(), 38);
    }

    #[test]
    fn micros_saturates() {
        assert_eq!(RunMetrics::micros(Duration::from_millis(3)), 3000);
        assert_eq!(RunMetrics::micros(Duration::MAX), u64::MAX);
    }
}
