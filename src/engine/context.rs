//! Shared simulation context and entity stores
//!
//! Tunables, the per-tick control input, the simulation clock and the
//! synchronization state travel together as one explicit object handed to
//! every worker and the orchestrator; nothing here is process-global.

use std::sync::Mutex;

use rand::Rng;

use crate::render::Action;
use crate::sim::clock::SimClock;
use crate::sim::{Asteroid, Bullet, Vessel, asteroid};
use crate::tuning::Tuning;

use super::sync::SyncState;

/// Input-derived request state, rewritten by the orchestrator each tick and
/// read by the vessel worker under lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    /// Requested angular acceleration (accumulates across held turns)
    pub angular_accel: f64,
    /// Requested linear acceleration along the heading
    pub linear_accel: f64,
    pub fire_requested: bool,
}

/// Process-wide simulation state shared by the orchestrator and all workers
#[derive(Debug)]
pub struct SimContext {
    pub tuning: Tuning,
    pub input: Mutex<ControlInput>,
    pub clock: SimClock,
    pub sync: SyncState,
}

impl SimContext {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            input: Mutex::new(ControlInput::default()),
            clock: SimClock::new(),
            sync: SyncState::new(),
        }
    }

    pub fn game_ended(&self) -> bool {
        self.sync.game_ended()
    }

    /// Fold one polled action into the control input. Turn and thrust actions
    /// accumulate; `Idle` zeroes the accelerations and clears the fire
    /// request; `Quit` raises the termination flag.
    pub fn apply_action(&self, action: Action) {
        let mut input = self.input.lock().expect("control input poisoned");
        match action {
            Action::TurnLeft => input.angular_accel += self.tuning.turn_delta,
            Action::TurnRight => input.angular_accel -= self.tuning.turn_delta,
            Action::ThrustForward => input.linear_accel += self.tuning.thrust_delta,
            Action::ThrustReverse => input.linear_accel -= self.tuning.thrust_delta,
            Action::Fire => input.fire_requested = true,
            Action::Quit => self.sync.end_game(),
            Action::Idle => {
                input.angular_accel = 0.0;
                input.linear_accel = 0.0;
                input.fire_requested = false;
            }
        }
    }
}

/// The mutable entity stores. Concurrency safety comes from the tick-phase
/// protocol, not from these locks: each mutex only keeps individual
/// whole-phase accesses atomic, and contention is limited to the orchestrator
/// briefly reading snapshots for the frame.
#[derive(Debug)]
pub struct World {
    pub asteroids: Mutex<Vec<Asteroid>>,
    pub bullets: Mutex<Vec<Bullet>>,
    pub vessel: Mutex<Vessel>,
}

impl World {
    /// Standard scenario: a random non-overlapping asteroid field plus the
    /// vessel at its configured start position.
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R, now: f64) -> Self {
        let asteroids = asteroid::spawn_field(
            rng,
            tuning.asteroid_count,
            tuning.asteroid_radius,
            tuning.asteroid_speed,
            tuning.asteroid_mass,
            tuning.asteroid_max_speed,
            tuning.dt,
            &tuning.bounds,
        );

        Self::with_entities(tuning, asteroids, Vec::new(), now)
    }

    /// Hand-built scenario (tests and demos)
    pub fn with_entities(
        tuning: &Tuning,
        asteroids: Vec<Asteroid>,
        bullets: Vec<Bullet>,
        now: f64,
    ) -> Self {
        let vessel = Vessel::new(
            tuning.vessel_pos,
            tuning.vessel_half_height,
            tuning.vessel_mass,
            tuning.vessel_max_speed,
            tuning.vessel_max_angular_speed,
            tuning.vessel_lives,
            tuning.invincibility_duration,
            tuning.fire_cooldown,
            now,
        );

        Self {
            asteroids: Mutex::new(asteroids),
            bullets: Mutex::new(bullets),
            vessel: Mutex::new(vessel),
        }
    }
}
