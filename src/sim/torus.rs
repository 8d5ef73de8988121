//! Periodic (toroidal) domain
//!
//! Space wraps on both axes: an entity leaving through one edge reappears at
//! the opposite one, and two bodies near opposite edges may be closer through
//! the wrap than directly. Both facts are captured here - coordinate folding
//! for the integrator and the minimum-image displacement for the force model.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The 8 compass-direction image shifts (in domain extents) around the direct one
const NEIGHBOR_SHIFTS: [(f64, f64); 8] = [
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
];

/// Rectangular periodic domain spanning `[min, max)` on both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Panics when either extent is empty or inverted (caller bug, not a
    /// runtime condition).
    pub fn new(min: DVec2, max: DVec2) -> Self {
        assert!(max.x > min.x, "periodic domain requires max.x > min.x");
        assert!(max.y > min.y, "periodic domain requires max.y > min.y");
        Self { min, max }
    }

    /// The unit square `[0, 1) x [0, 1)`
    pub fn unit() -> Self {
        Self::new(DVec2::ZERO, DVec2::ONE)
    }

    pub fn extent(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Fold a coordinate that crossed a bound back into the domain, shifting
    /// the previous position sample by the same delta. Shifting both samples
    /// keeps the velocity derived next tick continuous across the seam.
    pub fn fold(&self, pos: &mut DVec2, pos_prev: &mut DVec2) {
        let extent = self.extent();

        if pos.x > self.max.x {
            pos.x -= extent.x;
            pos_prev.x -= extent.x;
        }
        if pos.y > self.max.y {
            pos.y -= extent.y;
            pos_prev.y -= extent.y;
        }
        if pos.x < self.min.x {
            pos.x += extent.x;
            pos_prev.x += extent.x;
        }
        if pos.y < self.min.y {
            pos.y += extent.y;
            pos_prev.y += extent.y;
        }
    }

    /// Fold a single sample with no history (bullets carry velocity, not a
    /// previous position).
    pub fn fold_point(&self, pos: &mut DVec2) {
        let mut unused = *pos;
        self.fold(pos, &mut unused);
    }

    /// Displacement from `from` to the nearest periodic image of `to`.
    ///
    /// Evaluates the direct vector plus the 8 toroidal neighbor translations
    /// and keeps whichever is shortest.
    pub fn min_image(&self, from: DVec2, to: DVec2) -> DVec2 {
        let extent = self.extent();
        let mut best = to - from;
        let mut best_len_sq = best.length_squared();

        for (sx, sy) in NEIGHBOR_SHIFTS {
            let shifted = to + DVec2::new(sx * extent.x, sy * extent.y) - from;
            let len_sq = shifted.length_squared();
            if len_sq < best_len_sq {
                best = shifted;
                best_len_sq = len_sq;
            }
        }

        best
    }

    /// Wrap-aware distance between two points
    pub fn distance(&self, a: DVec2, b: DVec2) -> f64 {
        self.min_image(a, b).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fold_shifts_both_samples() {
        let bounds = Bounds::unit();
        let mut pos = DVec2::new(1.05, 0.5);
        let mut pos_prev = DVec2::new(0.99, 0.5);
        let vel_before = pos - pos_prev;

        bounds.fold(&mut pos, &mut pos_prev);

        assert!((pos.x - 0.05).abs() < 1e-12);
        assert!((pos_prev.x - (-0.01)).abs() < 1e-12);
        // No velocity spike across the seam
        assert!((pos - pos_prev - vel_before).length() < 1e-12);
    }

    #[test]
    fn fold_handles_underflow() {
        let bounds = Bounds::unit();
        let mut pos = DVec2::new(0.5, -0.02);
        let mut pos_prev = DVec2::new(0.5, 0.01);

        bounds.fold(&mut pos, &mut pos_prev);

        assert!((pos.y - 0.98).abs() < 1e-12);
        assert!((pos_prev.y - 1.01).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "max.x > min.x")]
    fn inverted_bounds_panic() {
        Bounds::new(DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0));
    }

    #[test]
    fn min_image_crosses_the_seam() {
        let bounds = Bounds::unit();
        let a = DVec2::new(0.05, 0.5);
        let b = DVec2::new(0.95, 0.5);

        let disp = bounds.min_image(a, b);
        assert!((disp.x - (-0.1)).abs() < 1e-12);
        assert!(disp.y.abs() < 1e-12);
        assert!((bounds.distance(a, b) - 0.1).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn fold_lands_inside_the_domain(
            x in -0.999f64..1.999,
            y in -0.999f64..1.999,
        ) {
            let bounds = Bounds::unit();
            let mut pos = DVec2::new(x, y);
            let mut pos_prev = pos;
            bounds.fold(&mut pos, &mut pos_prev);
            prop_assert!(bounds.contains(pos));
        }

        #[test]
        fn min_image_never_longer_than_direct(
            ax in 0.0f64..1.0, ay in 0.0f64..1.0,
            bx in 0.0f64..1.0, by in 0.0f64..1.0,
        ) {
            let bounds = Bounds::unit();
            let a = DVec2::new(ax, ay);
            let b = DVec2::new(bx, by);
            prop_assert!(bounds.distance(a, b) <= (b - a).length() + 1e-12);
        }
    }
}
