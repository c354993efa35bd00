//! Combat and Collection
//!
//! Everything that turns proximity into rewards or damage: auto-pickup
//! around the player, tap resolution with independent crit rolls, kill
//! rewards, and breach damage against the player. A successful hit counts
//! itself toward the combo multiplier applied to its own reward.

use crate::core::vec2::Vec2;
use crate::game::collision::within_radius;
use crate::game::config::{ContactDamage, GameConfig};
use crate::game::events::GameEvent;
use crate::game::state::{BonusKind, GameState, Particle, ParticleKind};

/// Collect the piece at `index`: mark it, chain the combo, credit gold
/// (and xp where the variant grants it), and leave a sparkle behind.
pub fn collect_piece(state: &mut GameState, config: &GameConfig, index: usize) {
    if state
        .collectibles
        .get(index)
        .is_none_or(|piece| piece.collected)
    {
        return;
    }

    state.combo.register(config.combo.window);

    let piece = &mut state.collectibles[index];
    piece.collected = true;
    let id = piece.id;
    let value = piece.value;
    let position = piece.position;

    let gold = value
        * state.stats.coin_value
        * state.combo_multiplier(config)
        * state.bonus_multiplier(BonusKind::Gold);
    state.add_gold(gold);

    let xp = config.collectibles.xp_per_collect * state.bonus_multiplier(BonusKind::Experience);
    state.add_experience(xp);

    spawn_burst(state, position, ParticleKind::Sparkle, 3);
    state.push_event(GameEvent::collected(state.frame, id, gold));
}

/// Auto-pickup: collect every live piece within the pickup radius of the
/// player.
pub fn auto_collect(state: &mut GameState, config: &GameConfig) {
    let center = state.player.position;
    let radius = config.collectibles.pickup_radius;

    let indices: Vec<usize> = state
        .collectibles
        .iter()
        .enumerate()
        .filter(|(_, piece)| !piece.collected && within_radius(center, radius, piece.position))
        .map(|(idx, _)| idx)
        .collect();

    for idx in indices {
        collect_piece(state, config, idx);
    }
}

/// Resolve a tap at `point` against everything in range.
///
/// Where the variant drops a piece on tap it lands at the tap point and
/// is scooped by the same resolution pass, so a tap always pays at least
/// its own drop.
pub fn apply_tap(state: &mut GameState, config: &GameConfig, point: Vec2) {
    if config.collectibles.spawn_on_tap {
        state.spawn_collectible(point, config.collectibles.base_value);
    }

    let radius = config.tap.radius;

    let piece_indices: Vec<usize> = state
        .collectibles
        .iter()
        .enumerate()
        .filter(|(_, piece)| !piece.collected && within_radius(point, radius, piece.position))
        .map(|(idx, _)| idx)
        .collect();
    for idx in piece_indices {
        collect_piece(state, config, idx);
    }

    let hostile_indices: Vec<usize> = state
        .hostiles
        .iter()
        .enumerate()
        .filter(|(_, hostile)| hostile.health > 0.0 && within_radius(point, radius, hostile.position))
        .map(|(idx, _)| idx)
        .collect();
    for idx in hostile_indices {
        // Independent crit roll per hostile under the tap.
        let crit = state.rng.chance(state.stats.crit_chance);
        let mut damage = state.stats.tap_damage;
        if crit {
            damage *= config.tap.crit_multiplier;
        }
        damage_hostile(state, config, idx, damage, crit);
    }
}

/// Apply damage to the hostile at `index`; on death, chain the combo and
/// credit the kill rewards. Returns whether the hostile died.
///
/// Dead hostiles stay in the list (health 0) until the cull pass.
pub fn damage_hostile(
    state: &mut GameState,
    config: &GameConfig,
    index: usize,
    amount: f64,
    crit: bool,
) -> bool {
    let Some(hostile) = state.hostiles.get_mut(index) else {
        return false;
    };
    if hostile.health <= 0.0 {
        return false;
    }

    hostile.health = (hostile.health - amount).max(0.0);
    if hostile.health > 0.0 {
        return false;
    }

    let id = hostile.id;
    let position = hostile.position;
    let gold_reward = hostile.gold_reward;
    let xp_reward = hostile.xp_reward;

    state.combo.register(config.combo.window);
    let gold =
        gold_reward * state.combo_multiplier(config) * state.bonus_multiplier(BonusKind::Gold);
    let xp = xp_reward * state.bonus_multiplier(BonusKind::Experience);
    state.add_gold(gold);
    state.add_experience(xp);

    spawn_burst(state, position, ParticleKind::Burst, 5);
    state.push_event(GameEvent::hostile_slain(state.frame, id, gold, xp, crit));
    true
}

/// A hostile reached its objective: damage the player per the variant's
/// contact model and drop the hostile. Shield absorbs before health.
pub fn breach(state: &mut GameState, config: &GameConfig, index: usize) {
    let Some(hostile_config) = &config.hostiles else {
        return;
    };
    let Some(hostile) = state.hostiles.get_mut(index) else {
        return;
    };
    if hostile.health <= 0.0 {
        return;
    }

    let id = hostile.id;
    hostile.health = 0.0;

    let damage = match hostile_config.contact_damage {
        ContactDamage::Flat(amount) => amount,
        ContactDamage::MaxHealthFraction(fraction) => state.stats.max_health * fraction,
    };
    state.player.take_damage(damage);

    state.push_event(GameEvent::breached(state.frame, id, damage));
}

/// Scatter a handful of particles around a point.
fn spawn_burst(state: &mut GameState, position: Vec2, kind: ParticleKind, count: u32) {
    for _ in 0..count {
        let angle = state.rng.next_range(0.0, std::f64::consts::TAU);
        let speed = state.rng.next_range(20.0, 80.0);
        state.particles.push(Particle {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            lifetime: state.rng.next_range(0.3, 0.8),
            kind,
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================
