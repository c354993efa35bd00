//! Ambient Spawning
//!
//! Collectibles drop inside the play area, hostiles enter at a random
//! screen edge. Both are gated on elapsed-time intervals and field caps
//! taken from the derived stats, so difficulty tightens with the player
//! level.

use crate::core::vec2::Vec2;
use crate::game::config::GameConfig;
use crate::game::state::GameState;

/// Vertical margin keeping ambient drops off the very top of the screen
/// and above the ground strip.
const DROP_MARGIN_TOP: f64 = 50.0;
const DROP_MARGIN_BOTTOM: f64 = 50.0;

/// Drop an ambient collectible when the interval elapsed and the field
/// has room.
pub fn maybe_spawn_collectible(state: &mut GameState, config: &GameConfig) {
    let interval = state.stats.collectible_interval;
    if state.elapsed - state.last_collectible_spawn <= interval {
        return;
    }
    // Keep the cadence even when the field is full.
    state.last_collectible_spawn = state.elapsed;

    if state.live_collectibles() >= state.stats.collectible_cap as usize {
        return;
    }

    let position = random_drop_position(state, config);
    state.spawn_collectible(position, config.collectibles.base_value);
}

/// Field a hostile at a random screen edge when the interval elapsed and
/// the cap allows. No-op for variants without hostiles.
pub fn maybe_spawn_hostile(state: &mut GameState, config: &GameConfig) {
    let Some(hostile_config) = &config.hostiles else {
        return;
    };

    let interval = state.stats.hostile_interval;
    if state.elapsed - state.last_hostile_spawn <= interval {
        return;
    }
    state.last_hostile_spawn = state.elapsed;

    if state.hostiles.len() >= state.stats.hostile_cap as usize {
        return;
    }

    let level_steps = state.level.saturating_sub(1) as f64;
    let health = hostile_config.base_health + hostile_config.health_per_level * level_steps;
    let speed = hostile_config.base_speed + hostile_config.speed_per_level * level_steps;

    let position = random_edge_position(state, config);
    state.spawn_hostile(position, health, speed, config);
}

/// Random position inside the drop band of the play area.
fn random_drop_position(state: &mut GameState, config: &GameConfig) -> Vec2 {
    let x = state.rng.next_range(0.0, config.width);
    let y = state
        .rng
        .next_range(DROP_MARGIN_TOP, config.height - DROP_MARGIN_BOTTOM);
    Vec2::new(x, y)
}

/// Random position on one of the four screen edges.
fn random_edge_position(state: &mut GameState, config: &GameConfig) -> Vec2 {
    match state.rng.next_int(4) {
        0 => Vec2::new(state.rng.next_range(0.0, config.width), 0.0),
        1 => Vec2::new(state.rng.next_range(0.0, config.width), config.height),
        2 => Vec2::new(0.0, state.rng.next_range(0.0, config.height)),
        _ => Vec2::new(config.width, state.rng.next_range(0.0, config.height)),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;
    use crate::game::state::GameState;

    #[test]
    fn test_collectible_spawns_after_interval() {
        let config = GameConfig::gryphon_gold();
        let mut state = GameState::new(&config, 11);

        // Just under the 2 s interval: nothing yet.
        state.elapsed = 1.9;
        maybe_spawn_collectible(&mut state, &config);
        assert!(state.collectibles.is_empty());

        // Past it: one drop, cadence reset.
        state.elapsed = 2.1;
        maybe_spawn_collectible(&mut state, &config);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.last_collectible_spawn, 2.1);

        // Immediately after: gated again.
        maybe_spawn_collectible(&mut state, &config);
        assert_eq!(state.collectibles.len(), 1);
    }

    #[test]
    fn test_collectible_cap_blocks_spawn() {
        let mut config = GameConfig::gryphon_gold();
        config.collectibles.max_on_field = 2;
        let mut state = GameState::new(&config, 11);
        // Recompute picked up the tightened cap.
        state.stats =
            crate::economy::stats::DerivedStats::recompute(&config, &state.upgrades, state.level);

        for step in 1..10 {
            state.elapsed = step as f64 * 3.0;
            maybe_spawn_collectible(&mut state, &config);
        }
        assert_eq!(state.collectibles.len(), 2);
    }

    #[test]
    fn test_spawned_positions_stay_in_bounds() {
        let config = GameConfig::gryphon_gold();
        let mut state = GameState::new(&config, 23);

        for step in 1..50 {
            state.elapsed = step as f64 * 3.0;
            maybe_spawn_collectible(&mut state, &config);
        }
        for piece in &state.collectibles {
            assert!(piece.position.x >= 0.0 && piece.position.x <= config.width);
            assert!(piece.position.y >= DROP_MARGIN_TOP);
            assert!(piece.position.y <= config.height - DROP_MARGIN_BOTTOM);
        }
    }

    #[test]
    fn test_hostiles_enter_at_an_edge() {
        let config = GameConfig::goblin_rush();
        let mut state = GameState::new(&config, 42);

        for step in 1..20 {
            state.elapsed = step as f64 * 5.0;
            maybe_spawn_hostile(&mut state, &config);
        }
        assert!(!state.hostiles.is_empty());
        for hostile in &state.hostiles {
            let p = hostile.position;
            let on_edge = p.x == 0.0 || p.x == config.width || p.y == 0.0 || p.y == config.height;
            assert!(on_edge, "hostile spawned mid-field at {p:?}");
        }
    }

    #[test]
    fn test_no_hostiles_in_peaceful_variants() {
        let config = GameConfig::gryphon_gold();
        let mut state = GameState::new(&config, 42);

        state.elapsed = 100.0;
        maybe_spawn_hostile(&mut state, &config);
        assert!(state.hostiles.is_empty());
    }

    #[test]
    fn test_spawn_determinism() {
        let config = GameConfig::goblin_rush();
        let mut a = GameState::new(&config, 1234);
        let mut b = GameState::new(&config, 1234);

        for step in 1..30 {
            a.elapsed = step as f64;
            b.elapsed = step as f64;
            maybe_spawn_collectible(&mut a, &config);
            maybe_spawn_collectible(&mut b, &config);
            maybe_spawn_hostile(&mut a, &config);
            maybe_spawn_hostile(&mut b, &config);
        }

        assert_eq!(a.collectibles.len(), b.collectibles.len());
        assert_eq!(a.hostiles.len(), b.hostiles.len());
        for (ca, cb) in a.collectibles.iter().zip(&b.collectibles) {
            assert_eq!(ca.position, cb.position);
        }
        for (ha, hb) in a.hostiles.iter().zip(&b.hostiles) {
            assert_eq!(ha.position, hb.position);
            assert_eq!(ha.health, hb.health);
        }
    }
}
