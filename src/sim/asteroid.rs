//! Asteroid store: N-body forces, integration, fragmentation
//!
//! Asteroids attract each other gravitationally and repel at short range.
//! Force accumulation is all-pairs O(N^2) per tick: each unordered pair is
//! evaluated once and contributes equal-and-opposite accelerations to both
//! members.

use glam::DVec2;
use rand::Rng;

use super::dynamics;
use super::forces;
use super::torus::Bounds;
use crate::consts::{MAX_FRAGMENT_GENERATION, SPAWN_ATTEMPTS};

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: DVec2,
    pub pos_prev: DVec2,
    pub acceleration: DVec2,
    pub radius: f64,
    pub mass: f64,
    /// 0 at scenario start; 1-2 created by fragmentation
    pub generation: u8,
    pub max_speed: f64,
}

impl Asteroid {
    pub fn new(
        pos: DVec2,
        pos_prev: DVec2,
        radius: f64,
        mass: f64,
        generation: u8,
        max_speed: f64,
    ) -> Self {
        Self {
            pos,
            pos_prev,
            acceleration: DVec2::ZERO,
            radius,
            mass,
            generation,
            max_speed,
        }
    }

    /// Build an asteroid whose previous-position sample encodes `vel`
    pub fn with_velocity(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        mass: f64,
        generation: u8,
        max_speed: f64,
        dt: f64,
    ) -> Self {
        let pos_prev = dynamics::pos_prev_for_velocity(pos, vel, dt);
        Self::new(pos, pos_prev, radius, mass, generation, max_speed)
    }

    pub fn velocity(&self, dt: f64) -> DVec2 {
        dynamics::velocity(self.pos, self.pos_prev, dt)
    }

    /// Point-in-circle test against this asteroid's body
    pub fn contains(&self, p: DVec2) -> bool {
        self.pos.distance(p) <= self.radius
    }

    pub fn reset_acceleration(&mut self) {
        self.acceleration = DVec2::ZERO;
    }

    /// Would a new asteroid of `radius` centered at `p` overlap this one?
    fn overlaps(&self, p: DVec2, radius: f64) -> bool {
        self.pos.distance(p) <= self.radius + radius
    }

    /// Children produced when this asteroid is destroyed.
    ///
    /// Below the final generation: exactly two, placed at `pos +- heading *
    /// radius` on a random heading, launched with equal-and-opposite velocity
    /// of the parent's speed, radius shrunk by sqrt(2), mass halved. At the
    /// final generation: none.
    pub fn fragment<R: Rng>(&self, rng: &mut R, dt: f64) -> Vec<Asteroid> {
        if self.generation >= MAX_FRAGMENT_GENERATION {
            return Vec::new();
        }

        let speed = self.velocity(dt).length();
        let theta = rng.random_range(0.0..std::f64::consts::TAU);
        let heading = DVec2::new(theta.cos(), theta.sin());

        [1.0, -1.0]
            .into_iter()
            .map(|sign| {
                Asteroid::with_velocity(
                    self.pos + heading * (sign * self.radius),
                    heading * (sign * speed),
                    self.radius / std::f64::consts::SQRT_2,
                    self.mass / 2.0,
                    self.generation + 1,
                    self.max_speed,
                    dt,
                )
            })
            .collect()
    }
}

/// Zero every asteroid's accumulated acceleration (tick start)
pub fn reset_accelerations(asteroids: &mut [Asteroid]) {
    for ast in asteroids.iter_mut() {
        ast.reset_acceleration();
    }
}

/// All-pairs gravity + repulsion through the nearest periodic image.
///
/// Each pair is computed once; the force is applied to both members divided
/// by their own mass, so Newton's third law holds by construction.
pub fn accumulate_forces(asteroids: &mut [Asteroid], gravity: f64, repulsion: f64, bounds: &Bounds) {
    for ia in 0..asteroids.len() {
        for ib in ia + 1..asteroids.len() {
            let (left, right) = asteroids.split_at_mut(ib);
            let a = &mut left[ia];
            let b = &mut right[0];

            let disp = bounds.min_image(a.pos, b.pos);
            let rm = forces::contact_distance(a.mass, a.radius, b.mass, b.radius);
            let force = forces::gravity_along(disp, gravity, a.mass, b.mass)
                + forces::repulsion_along(disp, repulsion, rm);

            a.acceleration += force / a.mass;
            b.acceleration -= force / b.mass;
        }
    }
}

/// Advance every asteroid one clamped Verlet step and fold into the domain
pub fn integrate(asteroids: &mut [Asteroid], dt: f64, bounds: &Bounds) {
    for ast in asteroids.iter_mut() {
        dynamics::verlet_clamped(
            &mut ast.pos,
            &mut ast.pos_prev,
            ast.acceleration,
            dt,
            ast.max_speed,
        );
        bounds.fold(&mut ast.pos, &mut ast.pos_prev);
    }
}

/// Spawn `count` generation-0 asteroids at non-overlapping random positions
/// with random headings at the given start speed.
///
/// Positions are rejection-sampled against all already-placed asteroids. If a
/// clear spot is not found within the retry budget (pathologically crowded
/// domains) the last candidate is accepted with a warning.
pub fn spawn_field<R: Rng>(
    rng: &mut R,
    count: usize,
    radius: f64,
    speed: f64,
    mass: f64,
    max_speed: f64,
    dt: f64,
    bounds: &Bounds,
) -> Vec<Asteroid> {
    let mut field: Vec<Asteroid> = Vec::with_capacity(count);

    for _ in 0..count {
        let theta = rng.random_range(0.0..std::f64::consts::TAU);
        let vel = DVec2::new(theta.cos(), theta.sin()) * speed;

        let mut pos = random_position(rng, bounds);
        let mut attempts = 0;
        while field.iter().any(|ast| ast.overlaps(pos, radius)) {
            attempts += 1;
            if attempts >= SPAWN_ATTEMPTS {
                log::warn!("no clear spawn position after {attempts} attempts, accepting overlap");
                break;
            }
            pos = random_position(rng, bounds);
        }

        field.push(Asteroid::with_velocity(
            pos, vel, radius, mass, 0, max_speed, dt,
        ));
    }

    field
}

fn random_position<R: Rng>(rng: &mut R, bounds: &Bounds) -> DVec2 {
    DVec2::new(
        rng.random_range(bounds.min.x..bounds.max.x),
        rng.random_range(bounds.min.y..bounds.max.y),
    )
}
