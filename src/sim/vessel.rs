//! Player vessel: thrust, rotation, firing, invincibility
//!
//! The vessel is an isosceles triangle. In the body frame (heading angle 0)
//! the centroid-to-vertex vectors are tip (0, 1), left (-1/2, -1/2) and
//! right (1/2, -1/2), scaled by the half-height. Timing state (fire cooldown,
//! invincibility window) is measured against the injected simulation clock.

use glam::DVec2;

use super::bullet::Bullet;
use super::clock::SimClock;
use super::dynamics;
use super::torus::Bounds;

/// Body-frame centroid-to-vertex vectors
pub const TIP: DVec2 = DVec2::new(0.0, 1.0);
pub const LEFT: DVec2 = DVec2::new(-0.5, -0.5);
pub const RIGHT: DVec2 = DVec2::new(0.5, -0.5);

/// World-space vessel pose handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub tip: DVec2,
    pub left: DVec2,
    pub right: DVec2,
}

#[derive(Debug, Clone)]
pub struct Vessel {
    pub pos: DVec2,
    pub pos_prev: DVec2,
    pub heading_angle: f64,
    pub heading_angle_prev: f64,
    pub acceleration: DVec2,
    pub angular_acceleration: f64,
    pub half_height: f64,
    pub mass: f64,
    pub max_speed: f64,
    pub max_angular_speed: f64,
    pub remaining_lives: u32,
    /// Simulation time of the last (re)spawn; anchors the invincibility window
    pub spawn_time: f64,
    pub last_fire_time: f64,
    pub invincibility_duration: f64,
    pub fire_cooldown: f64,
}

impl Vessel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pos: DVec2,
        half_height: f64,
        mass: f64,
        max_speed: f64,
        max_angular_speed: f64,
        remaining_lives: u32,
        invincibility_duration: f64,
        fire_cooldown: f64,
        now: f64,
    ) -> Self {
        Self {
            pos,
            pos_prev: pos,
            heading_angle: 0.0,
            heading_angle_prev: 0.0,
            acceleration: DVec2::ZERO,
            angular_acceleration: 0.0,
            half_height,
            mass,
            max_speed,
            max_angular_speed,
            remaining_lives,
            spawn_time: now,
            last_fire_time: now,
            invincibility_duration,
            fire_cooldown,
        }
    }

    /// Unit vector the tip currently points along
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.heading_angle).rotate(TIP)
    }

    pub fn velocity(&self, dt: f64) -> DVec2 {
        dynamics::velocity(self.pos, self.pos_prev, dt)
    }

    /// Zero both linear and angular acceleration (tick start)
    pub fn reset_acceleration(&mut self) {
        self.acceleration = DVec2::ZERO;
        self.angular_acceleration = 0.0;
    }

    /// Accumulate thrust along the current heading (negative for reverse)
    pub fn apply_thrust(&mut self, accel: f64) {
        self.acceleration += self.forward() * accel;
    }

    pub fn apply_torque(&mut self, angular_accel: f64) {
        self.angular_acceleration += angular_accel;
    }

    /// One clamped Verlet step for position and heading, folded into the domain
    pub fn advance(&mut self, dt: f64, bounds: &Bounds) {
        dynamics::verlet_clamped(
            &mut self.pos,
            &mut self.pos_prev,
            self.acceleration,
            dt,
            self.max_speed,
        );
        dynamics::verlet_scalar_clamped(
            &mut self.heading_angle,
            &mut self.heading_angle_prev,
            self.angular_acceleration,
            dt,
            self.max_angular_speed,
        );
        bounds.fold(&mut self.pos, &mut self.pos_prev);
    }

    /// True within the invincibility window after a (re)spawn
    pub fn is_invincible(&self, clock: &SimClock) -> bool {
        clock.now() - self.spawn_time < self.invincibility_duration
    }

    /// True once the fire cooldown since the last shot has elapsed
    pub fn can_fire(&self, clock: &SimClock) -> bool {
        clock.now() - self.last_fire_time > self.fire_cooldown
    }

    /// Fire a bullet from the forward tip, if off cooldown.
    ///
    /// Bullet speed is vessel-velocity-relative: the forward projection of
    /// the vessel's current velocity plus the fixed bullet speed, along the
    /// heading. Returns `None` while on cooldown (a normal, silent outcome).
    pub fn fire(
        &mut self,
        clock: &SimClock,
        bullet_speed: f64,
        max_distance: f64,
        dt: f64,
    ) -> Option<Bullet> {
        if !self.can_fire(clock) {
            return None;
        }

        let dir = self.forward();
        let muzzle = self.pos + dir * self.half_height;
        let vel_along = self.velocity(dt).dot(dir);

        self.last_fire_time = clock.now();
        Some(Bullet::new(muzzle, dir * (vel_along + bullet_speed), max_distance))
    }

    /// Reset to the spawn configuration in place: one life fewer, velocity
    /// and heading zeroed, position kept, invincibility restarted.
    pub fn respawn(&mut self, now: f64) {
        if self.remaining_lives == 0 {
            log::warn!("respawn requested with no lives remaining");
            return;
        }

        *self = Vessel::new(
            self.pos,
            self.half_height,
            self.mass,
            self.max_speed,
            self.max_angular_speed,
            self.remaining_lives - 1,
            self.invincibility_duration,
            self.fire_cooldown,
            now,
        );
    }

    /// World-space triangle for rendering
    pub fn pose(&self) -> Triangle {
        let rot = DVec2::from_angle(self.heading_angle);
        Triangle {
            tip: self.pos + rot.rotate(TIP) * self.half_height,
            left: self.pos + rot.rotate(LEFT) * self.half_height,
            right: self.pos + rot.rotate(RIGHT) * self.half_height,
        }
    }
}
