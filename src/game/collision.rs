//! Proximity Checks
//!
//! Every interaction in the games is a point-vs-radius test: pickups,
//! tap resolution, breach detection, soldier targeting.

use crate::core::vec2::Vec2;
use crate::game::state::Hostile;

/// Check if two circles overlap.
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f64, pos_b: Vec2, radius_b: f64) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) <= combined * combined
}

/// Check if a point lies within `radius` of `center`.
#[inline]
pub fn within_radius(center: Vec2, radius: f64, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}

/// Index of the living hostile nearest to `from` within `range`, if any.
///
/// Scans in list order, so ties resolve to the earliest-spawned hostile.
pub fn nearest_hostile_in_range(hostiles: &[Hostile], from: Vec2, range: f64) -> Option<usize> {
    let range_sq = range * range;
    let mut best: Option<(usize, f64)> = None;

    for (idx, hostile) in hostiles.iter().enumerate() {
        if hostile.health <= 0.0 {
            continue;
        }
        let dist_sq = from.distance_squared(hostile.position);
        if dist_sq > range_sq {
            continue;
        }
        match best {
            Some((_, best_sq)) if dist_sq >= best_sq => {}
            _ => best = Some((idx, dist_sq)),
        }
    }

    best.map(|(idx, _)| idx)
}
