//! Pairwise force model
//!
//! Two terms act between asteroids: Newtonian gravity `g m1 m2 / r^2` and a
//! steep short-range repulsion `k (rm / r)^20` that keeps bodies from
//! overlapping without a rigid-body solve. The periodic variants measure the
//! pair through the nearest toroidal image.
//!
//! A vanishing pair distance is a programming-contract violation and panics;
//! it is never a condition to recover from at runtime.

use glam::DVec2;

use super::torus::Bounds;
use crate::consts::{MIN_PAIR_DISTANCE, REPULSION_FALLOFF};

/// Gravity on the body at `p1` exerted by the body at `p2`
pub fn gravity(g: f64, m1: f64, m2: f64, p1: DVec2, p2: DVec2) -> DVec2 {
    gravity_along(p2 - p1, g, m1, m2)
}

/// Gravity measured through the nearest periodic image of `p2`
pub fn gravity_periodic(g: f64, m1: f64, m2: f64, p1: DVec2, p2: DVec2, bounds: &Bounds) -> DVec2 {
    gravity_along(bounds.min_image(p1, p2), g, m1, m2)
}

/// Repulsion on the body at `p1` exerted by the body at `p2` (points away from `p2`)
pub fn repulsion(k: f64, rm: f64, p1: DVec2, p2: DVec2) -> DVec2 {
    repulsion_along(p2 - p1, k, rm)
}

/// Repulsion measured through the nearest periodic image of `p2`
pub fn repulsion_periodic(k: f64, rm: f64, p1: DVec2, p2: DVec2, bounds: &Bounds) -> DVec2 {
    repulsion_along(bounds.min_image(p1, p2), k, rm)
}

/// Mass-weighted contact distance for the repulsion term:
/// `sqrt(2) (m1 + m2) / (2 max(m1, m2)) (r1 + r2)`
pub fn contact_distance(m1: f64, r1: f64, m2: f64, r2: f64) -> f64 {
    std::f64::consts::SQRT_2 * (m1 + m2) / (2.0 * m1.max(m2)) * (r1 + r2)
}

/// Gravity along a precomputed displacement (positive: toward the other body)
pub(crate) fn gravity_along(disp: DVec2, g: f64, m1: f64, m2: f64) -> DVec2 {
    let r = disp.length();
    assert!(r > MIN_PAIR_DISTANCE, "degenerate pair distance in gravity");
    disp / r * (g * m1 * m2 / (r * r))
}

/// Repulsion along a precomputed displacement (negative: away from the other body)
pub(crate) fn repulsion_along(disp: DVec2, k: f64, rm: f64) -> DVec2 {
    let r = disp.length();
    assert!(r > MIN_PAIR_DISTANCE, "degenerate pair distance in repulsion");
    disp / r * (-k * (rm / r).powi(REPULSION_FALLOFF))
}
