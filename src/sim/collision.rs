//! Collision resolution and fragmentation
//!
//! Runs single-threaded between ticks, when every worker is parked at its
//! dispatch gate, so it holds exclusive access to the entity stores.
//!
//! Resolution is two-list: the live collections are scanned as a snapshot,
//! destroy/create operations are collected, and everything is applied after
//! the scan. Children spawned by fragmentation are therefore NOT eligible
//! targets within the same resolution pass; they become hittable next tick.

use rand::Rng;

use super::asteroid::Asteroid;
use super::bullet::Bullet;
use super::clock::SimClock;
use super::vessel::Vessel;

/// Terminal simulation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every asteroid destroyed
    Won,
    /// Vessel lives exhausted
    Lost,
    /// External quit request
    Quit,
}

/// Resolve bullet/asteroid impacts, fragmenting what was hit.
///
/// Each bullet destroys at most one asteroid per pass: its scan breaks on
/// first contact. An asteroid already claimed by an earlier bullet is skipped
/// by later ones.
pub fn resolve_bullet_impacts<R: Rng>(
    asteroids: &mut Vec<Asteroid>,
    bullets: &mut Vec<Bullet>,
    dt: f64,
    rng: &mut R,
) {
    let mut asteroid_hit = vec![false; asteroids.len()];
    let mut bullet_spent = vec![false; bullets.len()];
    let mut children: Vec<Asteroid> = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        for (ai, asteroid) in asteroids.iter().enumerate() {
            if asteroid_hit[ai] || !asteroid.contains(bullet.pos) {
                continue;
            }

            asteroid_hit[ai] = true;
            bullet_spent[bi] = true;
            let spawned = asteroid.fragment(rng, dt);
            log::debug!(
                "asteroid hit (generation {}), {} fragment(s)",
                asteroid.generation,
                spawned.len()
            );
            children.extend(spawned);
            break; // at most one asteroid per bullet
        }
    }

    let mut ai = 0;
    asteroids.retain(|_| {
        let keep = !asteroid_hit[ai];
        ai += 1;
        keep
    });
    let mut bi = 0;
    bullets.retain(|_| {
        let keep = !bullet_spent[bi];
        bi += 1;
        keep
    });

    asteroids.extend(children);
}

/// Check the vessel against every asteroid; on lethal contact respawn it in
/// place with one life fewer. Returns whether the vessel was destroyed.
///
/// A vessel inside its invincibility window ignores contact entirely.
pub fn resolve_vessel_contact(
    vessel: &mut Vessel,
    asteroids: &[Asteroid],
    clock: &SimClock,
) -> bool {
    if vessel.is_invincible(clock) {
        return false;
    }

    for asteroid in asteroids {
        if asteroid.contains(vessel.pos) {
            vessel.respawn(clock.now());
            log::info!("vessel destroyed, {} live(s) remaining", vessel.remaining_lives);
            return true;
        }
    }

    false
}

/// Terminal-state check, once per full tick. Win takes precedence: the two
/// outcomes are mutually exclusive within one tick's resolution.
pub fn check_termination(asteroids: &[Asteroid], vessel: &Vessel) -> Option<GameOutcome> {
    if asteroids.is_empty() {
        Some(GameOutcome::Won)
    } else if vessel.remaining_lives == 0 {
        Some(GameOutcome::Lost)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f64 = 1.0 / 24.0;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn asteroid_at(pos: DVec2, radius: f64, generation: u8) -> Asteroid {
        Asteroid::with_velocity(pos, DVec2::ZERO, radius, 1.0, generation, 0.05, DT)
    }

    fn test_vessel(lives: u32, invincibility: f64, now: f64) -> Vessel {
        Vessel::new(DVec2::splat(0.5), 0.025, 0.01, 0.02, 0.15, lives, invincibility, 0.1, now)
    }

    #[test]
    fn hit_replaces_asteroid_with_two_children() {
        let mut asteroids = vec![asteroid_at(DVec2::new(0.5, 0.8), 0.05, 0)];
        let mut bullets = vec![Bullet::new(DVec2::new(0.5, 0.8), DVec2::new(0.0, 0.05), 1.0)];

        resolve_bullet_impacts(&mut asteroids, &mut bullets, DT, &mut test_rng());

        assert!(bullets.is_empty());
        assert_eq!(asteroids.len(), 2);
        assert!(asteroids.iter().all(|a| a.generation == 1));
    }

    #[test]
    fn final_generation_vanishes_without_children() {
        let mut asteroids = vec![asteroid_at(DVec2::new(0.5, 0.8), 0.025, 2)];
        let mut bullets = vec![Bullet::new(DVec2::new(0.5, 0.8), DVec2::new(0.0, 0.05), 1.0)];

        resolve_bullet_impacts(&mut asteroids, &mut bullets, DT, &mut test_rng());

        assert!(asteroids.is_empty());
        assert!(bullets.is_empty());
    }

    #[test]
    fn one_bullet_destroys_at_most_one_asteroid() {
        // Two overlapping asteroids both containing the bullet position
        let mut asteroids = vec![
            asteroid_at(DVec2::new(0.50, 0.50), 0.05, 2),
            asteroid_at(DVec2::new(0.52, 0.50), 0.05, 2),
        ];
        let mut bullets = vec![Bullet::new(DVec2::new(0.51, 0.50), DVec2::new(0.05, 0.0), 1.0)];

        resolve_bullet_impacts(&mut asteroids, &mut bullets, DT, &mut test_rng());

        assert_eq!(asteroids.len(), 1);
        assert!(bullets.is_empty());
    }

    #[test]
    fn children_are_not_hit_in_the_same_pass() {
        // Two bullets inside the same asteroid: the first destroys it, the
        // second must neither claim it again nor hit its freshly spawned
        // children (which straddle the impact point).
        let mut asteroids = vec![asteroid_at(DVec2::new(0.5, 0.5), 0.05, 0)];
        let mut bullets = vec![
            Bullet::new(DVec2::new(0.5, 0.5), DVec2::new(0.0, 0.05), 1.0),
            Bullet::new(DVec2::new(0.51, 0.5), DVec2::new(0.0, 0.05), 1.0),
        ];

        resolve_bullet_impacts(&mut asteroids, &mut bullets, DT, &mut test_rng());

        assert_eq!(asteroids.len(), 2);
        assert!(asteroids.iter().all(|a| a.generation == 1));
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn invincible_vessel_ignores_contact() {
        let clock = SimClock::new();
        clock.set(1.0);
        let mut vessel = test_vessel(2, 2.0, 0.0);
        let asteroids = vec![asteroid_at(vessel.pos, 0.05, 0)];

        assert!(!resolve_vessel_contact(&mut vessel, &asteroids, &clock));
        assert_eq!(vessel.remaining_lives, 2);

        // Immediately after the window closes, contact is lethal
        clock.set(2.0);
        assert!(resolve_vessel_contact(&mut vessel, &asteroids, &clock));
        assert_eq!(vessel.remaining_lives, 1);
        // Respawn restarted the window
        assert!(vessel.is_invincible(&clock));
    }

    #[test]
    fn termination_prefers_win_and_is_exclusive() {
        let clock = SimClock::new();
        let vessel_dead = {
            let mut v = test_vessel(1, 0.0, 0.0);
            let pos = v.pos;
            resolve_vessel_contact(&mut v, &[asteroid_at(pos, 0.05, 0)], &clock);
            v
        };

        assert_eq!(check_termination(&[], &vessel_dead), Some(GameOutcome::Won));
        assert_eq!(
            check_termination(&[asteroid_at(DVec2::splat(0.2), 0.05, 0)], &vessel_dead),
            Some(GameOutcome::Lost)
        );
        assert_eq!(
            check_termination(&[asteroid_at(DVec2::splat(0.2), 0.05, 0)], &test_vessel(2, 0.0, 0.0)),
            None
        );
    }
}
