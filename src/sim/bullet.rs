//! Bullets: constant-velocity projectiles with a travel budget
//!
//! Bullets carry their velocity directly (no force accumulation) and die
//! after covering `max_distance`, measured as accumulated path length so the
//! budget survives wrapping around the domain.

use glam::DVec2;

use super::dynamics;
use super::torus::Bounds;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: DVec2,
    pub velocity: DVec2,
    pub origin_pos: DVec2,
    pub distance_traveled: f64,
    pub max_distance: f64,
}

impl Bullet {
    pub fn new(pos: DVec2, velocity: DVec2, max_distance: f64) -> Self {
        Self {
            pos,
            velocity,
            origin_pos: pos,
            distance_traveled: 0.0,
            max_distance,
        }
    }

    /// One constant-velocity step plus periodic folding
    pub fn advance(&mut self, dt: f64, bounds: &Bounds) {
        dynamics::advance_linear(&mut self.pos, self.velocity, dt);
        self.distance_traveled += self.velocity.length() * dt;
        bounds.fold_point(&mut self.pos);
    }

    pub fn expired(&self) -> bool {
        self.distance_traveled > self.max_distance
    }
}

/// Advance every live bullet one step
pub fn advance_all(bullets: &mut [Bullet], dt: f64, bounds: &Bounds) {
    for b in bullets.iter_mut() {
        b.advance(dt, bounds);
    }
}

/// Drop bullets that have exhausted their travel budget
pub fn remove_expired(bullets: &mut Vec<Bullet>) {
    bullets.retain(|b| !b.expired());
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 24.0;

    #[test]
    fn advance_accumulates_travel() {
        let bounds = Bounds::unit();
        let mut b = Bullet::new(DVec2::splat(0.5), DVec2::new(0.05, 0.0), 1.0);

        b.advance(DT, &bounds);

        assert!((b.pos.x - (0.5 + 0.05 * DT)).abs() < 1e-12);
        assert!((b.distance_traveled - 0.05 * DT).abs() < 1e-12);
        assert!(!b.expired());
    }

    #[test]
    fn wraps_across_the_seam_keeping_budget() {
        let bounds = Bounds::unit();
        let mut b = Bullet::new(DVec2::new(0.999, 0.5), DVec2::new(0.05, 0.0), 1.0);

        b.advance(DT, &bounds);

        assert!(bounds.contains(b.pos));
        assert!(b.pos.x < 0.01);
        assert!(b.distance_traveled > 0.0);
    }

    #[test]
    fn expires_past_max_distance() {
        let bounds = Bounds::unit();
        let mut bullets = vec![Bullet::new(DVec2::splat(0.5), DVec2::new(0.05, 0.0), 0.001)];

        // One step travels 0.05 * dt ~ 0.002 > 0.001
        advance_all(&mut bullets, DT, &bounds);
        assert!(bullets[0].expired());

        remove_expired(&mut bullets);
        assert!(bullets.is_empty());
    }
}
