//! Simulation-time clock
//!
//! Cooldowns and invincibility windows are measured in elapsed simulation
//! time, not wall-clock time. The orchestrator advances the clock by `dt`
//! once per tick; tests set it directly. Reads use the f64 bit pattern in an
//! atomic so every thread sees a consistent timestamp without locking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic simulation-time source, shared across all threads
#[derive(Debug, Default)]
pub struct SimClock {
    bits: AtomicU64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Advance by one timestep. Single writer: the orchestrator, at tick start.
    pub fn advance(&self, dt: f64) {
        let next = self.now() + dt;
        self.bits.store(next.to_bits(), Ordering::Release);
    }

    /// Jump to an absolute time (tests)
    pub fn set(&self, t: f64) {
        self.bits.store(t.to_bits(), Ordering::Release);
    }
}
