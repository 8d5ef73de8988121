//! Data-driven simulation constants
//!
//! Every physical and gameplay parameter lives here so scenarios can be tuned
//! from a JSON file without recompiling. Missing fields fall back to the
//! defaults below.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::Bounds;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed simulation timestep in seconds
    pub dt: f64,
    /// Gravitational constant for asteroid pair attraction
    pub gravity: f64,
    /// Strength of the short-range pair repulsion
    pub repulsion: f64,
    /// Periodic world domain
    pub bounds: Bounds,
    /// RNG seed for spawn positions and fragmentation headings
    pub seed: u64,

    pub asteroid_count: usize,
    pub asteroid_radius: f64,
    /// Start speed of spawned asteroids
    pub asteroid_speed: f64,
    pub asteroid_mass: f64,
    pub asteroid_max_speed: f64,

    pub vessel_pos: DVec2,
    pub vessel_half_height: f64,
    pub vessel_mass: f64,
    pub vessel_max_speed: f64,
    pub vessel_max_angular_speed: f64,
    /// Angular acceleration added per turn action
    pub turn_delta: f64,
    /// Linear acceleration added per thrust action
    pub thrust_delta: f64,
    pub vessel_lives: u32,
    /// Seconds of immunity after a (re)spawn
    pub invincibility_duration: f64,
    /// Seconds between shots
    pub fire_cooldown: f64,

    pub bullet_speed: f64,
    /// Travel budget before a bullet expires
    pub bullet_max_distance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 24.0,
            gravity: 0.0,
            repulsion: 3.0e-3,
            bounds: Bounds::unit(),
            seed: 0xA57E,

            asteroid_count: 4,
            asteroid_radius: 0.05,
            asteroid_speed: 0.005,
            asteroid_mass: 1.0,
            asteroid_max_speed: 0.05,

            vessel_pos: DVec2::splat(0.5),
            vessel_half_height: 0.025,
            vessel_mass: 0.01,
            vessel_max_speed: 0.02,
            vessel_max_angular_speed: 0.15,
            turn_delta: 0.5,
            thrust_delta: 0.03,
            vessel_lives: 2,
            invincibility_duration: 2.0,
            fire_cooldown: 0.1,

            bullet_speed: 0.05,
            bullet_max_distance: 1.0,
        }
    }
}

impl Tuning {
    /// Load from a JSON file, falling back to defaults on any failure.
    ///
    /// Domain bounds are re-validated after deserialization; an inverted
    /// domain in the file is a configuration bug and panics.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let tuning = match path {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from {}", path.display());
                        tuning
                    }
                    Err(e) => {
                        log::warn!("Ignoring malformed tuning file {}: {e}", path.display());
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Cannot read tuning file {}: {e}", path.display());
                    Self::default()
                }
            },
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        };

        // Re-assert the domain invariant for file-sourced bounds
        Tuning {
            bounds: Bounds::new(tuning.bounds.min, tuning.bounds.max),
            ..tuning
        }
    }
}
