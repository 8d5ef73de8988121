//! Toroids - asteroids on a torus
//!
//! Core modules:
//! - `sim`: Physics, entities, collision and fragmentation. Deterministic
//!   given a seed and a tick count.
//! - `engine`: The staged tick pipeline - one orchestrator plus three
//!   long-lived worker threads rendezvousing on phase gates.
//! - `render`: Collaborator traits for rasterization and input polling.
//! - `tuning`: Data-driven simulation constants.

pub mod engine;
pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Simulation-wide constants
pub mod consts {
    /// Pair distances at or below this are a caller bug (coincident bodies)
    pub const MIN_PAIR_DISTANCE: f64 = 1.0e-15;
    /// Exponent of the short-range repulsion term
    pub const REPULSION_FALLOFF: i32 = 20;
    /// Asteroids of this generation vanish on hit instead of fragmenting
    pub const MAX_FRAGMENT_GENERATION: u8 = 2;
    /// Placement retries before giving up on a non-overlapping spawn position
    pub const SPAWN_ATTEMPTS: u32 = 1000;
    /// Workers reporting through the shared completion counter (asteroids, bullets)
    pub const COUNTED_WORKERS: usize = 2;
}
