//! Auto-Attackers
//!
//! Soldiers hold fixed posts on a ring around the screen center. Each
//! tick every soldier retargets the nearest hostile in range, turns its
//! facing the short way around the circle, and fires once its cooldown
//! clears. Population follows the Garrison-derived target, grown or
//! shrunk on every stat recompute.

use std::f64::consts::TAU;

use crate::core::vec2::{rotate_towards, Vec2};
use crate::game::collision::nearest_hostile_in_range;
use crate::game::combat::damage_hostile;
use crate::game::config::GameConfig;
use crate::game::state::{GameState, Particle, ParticleKind, Soldier};

/// Grow or shrink the garrison to the derived target count.
///
/// Posts are redistributed evenly around the ring so the formation stays
/// symmetric after every change.
pub fn sync_population(state: &mut GameState, config: &GameConfig) {
    let Some(soldier_config) = &config.soldiers else {
        state.soldiers.clear();
        return;
    };

    let target = state.stats.soldier_count as usize;
    state.soldiers.truncate(target);
    while state.soldiers.len() < target {
        state.soldiers.push(Soldier {
            position: Vec2::ZERO,
            facing: 0.0,
            cooldown: 0.0,
        });
    }

    let center = config.center();
    let count = state.soldiers.len();
    for (idx, soldier) in state.soldiers.iter_mut().enumerate() {
        let angle = TAU * idx as f64 / count.max(1) as f64;
        soldier.position = center + Vec2::from_angle(angle) * soldier_config.ring_radius;
    }
}

/// Advance every soldier by one tick: cooldowns, retargeting, facing
/// interpolation, and firing.
pub fn update_soldiers(state: &mut GameState, config: &GameConfig, dt: f64) {
    let Some(soldier_config) = config.soldiers else {
        return;
    };
    let shot_damage = state.stats.soldier_damage;

    for idx in 0..state.soldiers.len() {
        let soldier = &state.soldiers[idx];
        let post = soldier.position;
        let mut facing = soldier.facing;
        let mut cooldown = (soldier.cooldown - dt).max(0.0);

        let target = nearest_hostile_in_range(&state.hostiles, post, soldier_config.range);

        let mut fire_at: Option<usize> = None;
        if let Some(target_idx) = target {
            let target_angle = post.angle_to(state.hostiles[target_idx].position);
            facing = rotate_towards(facing, target_angle, soldier_config.turn_rate * dt);

            if cooldown <= 0.0 {
                fire_at = Some(target_idx);
                cooldown = soldier_config.max_cooldown;
            }
        }

        let soldier = &mut state.soldiers[idx];
        soldier.facing = facing;
        soldier.cooldown = cooldown;

        if let Some(target_idx) = fire_at {
            state.particles.push(Particle {
                position: post,
                velocity: Vec2::from_angle(facing) * 120.0,
                lifetime: 0.15,
                kind: ParticleKind::Shot,
            });
            damage_hostile(state, config, target_idx, shot_damage, false);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::stats::DerivedStats;
    use crate::economy::upgrade::UpgradeKind;
    use crate::game::config::GameConfig;
    use crate::game::state::GameState;

    fn siege_state(garrison_level: u32) -> (GameConfig, GameState) {
        let config = GameConfig::keep_siege();
        let mut state = GameState::new(&config, 3);
        state.upgrades.set_level(UpgradeKind::Garrison, garrison_level);
        state.stats = DerivedStats::recompute(&config, &state.upgrades, state.level);
        sync_population(&mut state, &config);
        (config, state)
    }

    #[test]
    fn test_population_follows_garrison_level() {
        let (_, state) = siege_state(0);
        assert_eq!(state.soldiers.len(), 1); // base_count

        let (config, mut state) = siege_state(3);
        assert_eq!(state.soldiers.len(), 4);

        // Shrinking the target shrinks the garrison.
        state.upgrades.set_level(UpgradeKind::Garrison, 0);
        state.stats = DerivedStats::recompute(&config, &state.upgrades, state.level);
        sync_population(&mut state, &config);
        assert_eq!(state.soldiers.len(), 1);
    }

    #[test]
    fn test_posts_sit_on_the_ring() {
        let (config, state) = siege_state(3);
        let center = config.center();
        let ring = config.soldiers.unwrap().ring_radius;

        for soldier in &state.soldiers {
            assert!((soldier.position.distance(center) - ring).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cooldown_gates_firing() {
        let (config, mut state) = siege_state(0);
        let post = state.soldiers[0].position;

        // A hostile parked right at the post.
        state.spawn_hostile(post + Vec2::new(10.0, 0.0), 100.0, 0.0, &config);

        update_soldiers(&mut state, &config, 1.0 / 60.0);
        let health_after_first = state.hostiles[0].health;
        assert!(health_after_first < 100.0, "soldier should have fired");

        // Next tick the cooldown is still running.
        update_soldiers(&mut state, &config, 1.0 / 60.0);
        assert_eq!(state.hostiles[0].health, health_after_first);
    }

    #[test]
    fn test_facing_turns_toward_target() {
        let (config, mut state) = siege_state(0);
        let post = state.soldiers[0].position;
        state.soldiers[0].facing = 0.0;
        // Big cooldown so the shot itself is out of the picture.
        state.soldiers[0].cooldown = 100.0;

        // Target straight below the post: angle PI/2 in screen space.
        state.spawn_hostile(post + Vec2::new(0.0, 50.0), 100.0, 0.0, &config);

        update_soldiers(&mut state, &config, 0.05);
        let expected = config.soldiers.unwrap().turn_rate * 0.05;
        assert!((state.soldiers[0].facing - expected).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_hostiles_are_ignored() {
        let (config, mut state) = siege_state(0);
        let range = config.soldiers.unwrap().range;
        let post = state.soldiers[0].position;

        state.spawn_hostile(post + Vec2::new(range + 100.0, 0.0), 100.0, 0.0, &config);

        update_soldiers(&mut state, &config, 1.0 / 60.0);
        assert_eq!(state.hostiles[0].health, 100.0);
        assert_eq!(state.soldiers[0].facing, 0.0);
    }

    #[test]
    fn test_no_soldiers_without_config() {
        let config = GameConfig::gryphon_gold();
        let mut state = GameState::new(&config, 3);
        sync_population(&mut state, &config);
        assert!(state.soldiers.is_empty());

        // And updating is a no-op.
        update_soldiers(&mut state, &config, 1.0 / 60.0);
    }
}
