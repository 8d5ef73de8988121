//! Position Verlet integration with speed clamping
//!
//! Entities store the current and previous position samples; velocity is
//! always derived as `(pos - pos_prev) / dt`. The clamped variants cap the
//! implied speed by moving the new position back onto the max-speed sphere
//! around the previous sample - excess acceleration is silently discarded,
//! direction is preserved.

use glam::DVec2;

/// Velocity implied by two consecutive position samples
#[inline]
pub fn velocity(pos: DVec2, pos_prev: DVec2, dt: f64) -> DVec2 {
    (pos - pos_prev) / dt
}

#[inline]
pub fn velocity_scalar(p: f64, p_prev: f64, dt: f64) -> f64 {
    (p - p_prev) / dt
}

/// Previous-position sample that encodes the given velocity
#[inline]
pub fn pos_prev_for_velocity(pos: DVec2, vel: DVec2, dt: f64) -> DVec2 {
    pos - vel * dt
}

/// One Verlet step: `p' = 2p - p_prev + a dt^2`
pub fn verlet(pos: &mut DVec2, pos_prev: &mut DVec2, acc: DVec2, dt: f64) {
    let current = *pos;
    *pos = 2.0 * current - *pos_prev + acc * dt * dt;
    *pos_prev = current;
}

/// Verlet step with the implied speed capped at `max_speed`
pub fn verlet_clamped(pos: &mut DVec2, pos_prev: &mut DVec2, acc: DVec2, dt: f64, max_speed: f64) {
    verlet(pos, pos_prev, acc, dt);
    let vel = velocity(*pos, *pos_prev, dt);
    if vel.length() > max_speed {
        *pos = *pos_prev + vel.normalize() * max_speed * dt;
    }
}

/// Scalar Verlet step, used for the vessel heading angle
pub fn verlet_scalar(p: &mut f64, p_prev: &mut f64, acc: f64, dt: f64) {
    let current = *p;
    *p = 2.0 * current - *p_prev + acc * dt * dt;
    *p_prev = current;
}

/// Scalar Verlet step with the implied angular speed capped at `max_speed`
pub fn verlet_scalar_clamped(p: &mut f64, p_prev: &mut f64, acc: f64, dt: f64, max_speed: f64) {
    verlet_scalar(p, p_prev, acc, dt);
    let vel = velocity_scalar(*p, *p_prev, dt);
    if vel.abs() > max_speed {
        *p = *p_prev + max_speed * dt * vel.signum();
    }
}

/// Constant-velocity step for bodies that carry no acceleration (bullets)
#[inline]
pub fn advance_linear(pos: &mut DVec2, vel: DVec2, dt: f64) {
    *pos += vel * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f64 = 1.0 / 24.0;

    #[test]
    fn verlet_continues_straight_without_acceleration() {
        let mut pos = DVec2::new(0.5, 0.5);
        let mut pos_prev = DVec2::new(0.49, 0.5);

        verlet(&mut pos, &mut pos_prev, DVec2::ZERO, DT);

        assert!((pos - DVec2::new(0.51, 0.5)).length() < 1e-12);
        assert!((pos_prev - DVec2::new(0.5, 0.5)).length() < 1e-12);
    }

    #[test]
    fn clamp_caps_speed_preserving_direction() {
        let max_speed = 0.05;
        let mut pos = DVec2::ZERO;
        let mut pos_prev = DVec2::ZERO;
        // Acceleration implies speed a*dt = 10 * DT >> max_speed
        let acc = DVec2::new(10.0, 0.0);

        verlet_clamped(&mut pos, &mut pos_prev, acc, DT, max_speed);

        let expected = pos_prev + DVec2::new(1.0, 0.0) * max_speed * DT;
        assert!((pos - expected).length() < 1e-12);
        assert!((velocity(pos, pos_prev, DT).length() - max_speed).abs() < 1e-12);
    }

    #[test]
    fn scalar_clamp_keeps_sign() {
        let max_speed = 0.15;
        let mut p = 0.0;
        let mut p_prev = 0.0;

        verlet_scalar_clamped(&mut p, &mut p_prev, -100.0, DT, max_speed);

        assert!((p - (-max_speed * DT)).abs() < 1e-12);
    }

    #[test]
    fn linear_advance_is_velocity_times_dt() {
        let mut pos = DVec2::new(0.5, 0.5);
        advance_linear(&mut pos, DVec2::new(0.0, 0.05), DT);
        assert!((pos - DVec2::new(0.5, 0.5 + 0.05 * DT)).length() < 1e-12);
    }

    proptest! {
        #[test]
        fn clamped_speed_never_exceeds_limit(
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
            vx in -0.1f64..0.1, vy in -0.1f64..0.1,
        ) {
            let max_speed = 0.05;
            let mut pos = DVec2::new(0.5, 0.5);
            let mut pos_prev = pos_prev_for_velocity(pos, DVec2::new(vx, vy), DT);

            verlet_clamped(&mut pos, &mut pos_prev, DVec2::new(ax, ay), DT, max_speed);

            prop_assert!(velocity(pos, pos_prev, DT).length() <= max_speed + 1e-9);
        }
    }
}
