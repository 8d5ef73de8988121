//! Deterministic simulation module
//!
//! All physics and gameplay rules live here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Simulation-time clock only (no wall-clock sampling)
//! - No rendering or thread dependencies (those live in `engine`)

pub mod asteroid;
pub mod bullet;
pub mod clock;
pub mod collision;
pub mod dynamics;
pub mod forces;
pub mod torus;
pub mod vessel;

pub use asteroid::Asteroid;
pub use bullet::Bullet;
pub use clock::SimClock;
pub use collision::GameOutcome;
pub use torus::Bounds;
pub use vessel::{Triangle, Vessel};
