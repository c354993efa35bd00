//! Simulation Step
//!
//! `advance` moves the whole game forward by `dt` seconds in a fixed
//! order: downed gate, passive income, timers, movement, spawning,
//! hostiles, soldiers, collection, taps, level-ups, cull. Render never
//! runs inside this pass; everything it needs is left in the state.

use crate::core::vec2::Vec2;
use crate::economy::stats::DerivedStats;
use crate::game::combat;
use crate::game::config::{GameConfig, HostileObjective, MovementMode};
use crate::game::events::GameEvent;
use crate::game::input::FrameInput;
use crate::game::soldier;
use crate::game::spawn;
use crate::game::state::{BonusKind, GameState, TimedBonus};

/// Wing-flap advance per second (0.3/frame at 60 fps).
const WING_FLAP_RATE: f64 = 18.0;

/// Collectible bob phase advance per second (0.05/frame at 60 fps).
const BOB_PHASE_RATE: f64 = 3.0;

/// Collectible spin advance per second (0.02/frame at 60 fps).
const SPIN_RATE: f64 = 1.2;

/// Vertical bob drift per second at full phase (0.3 px/frame at 60 fps).
const BOB_DRIFT_RATE: f64 = 18.0;

/// Run one simulation step.
///
/// Mutates `state` in place and returns the events the step produced.
/// Non-positive `dt` is a no-op. All randomness comes from `state.rng`,
/// so identical seed + inputs + dts replay identically.
pub fn advance(
    state: &mut GameState,
    input: &FrameInput,
    dt: f64,
    config: &GameConfig,
) -> Vec<GameEvent> {
    if dt <= 0.0 {
        return Vec::new();
    }

    state.frame += 1;
    state.elapsed += dt;

    // 1. Downed gate: while the player is down only the respawn
    //    countdown moves.
    if update_downed(state, dt) {
        return state.take_events();
    }

    // 2. Passive income
    accrue_passive_income(state, dt);

    // 3. Timers: combo window, timed bonus, regen
    update_timers(state, dt);

    // 4. Player movement
    move_player(state, input, config, dt);

    // 5. Spawning
    spawn::maybe_spawn_collectible(state, config);
    spawn::maybe_spawn_hostile(state, config);

    // 6. Hostiles steer and breach
    update_hostiles(state, config, dt);

    // 7. Soldiers retarget and fire
    soldier::update_soldiers(state, config, dt);

    // 8. Collectible animation and auto-pickup
    update_collectibles(state, config, dt);
    combat::auto_collect(state, config);

    // 9. Tap input
    apply_input_taps(state, input, config);

    // 10. Level-ups and bonus rolls
    process_level_ups(state, config);

    // 11. Particles and cull
    update_particles(state, dt);
    cull(state);

    state.take_events()
}

/// Handle the downed countdown. Returns true when the rest of the step
/// must be skipped.
fn update_downed(state: &mut GameState, dt: f64) -> bool {
    let Some(remaining) = state.downed_for else {
        return false;
    };

    let left = remaining - dt;
    if left > 0.0 {
        state.downed_for = Some(left);
        return true;
    }

    // Back up: vitals refill, the field clears, the chain starts over.
    state.downed_for = None;
    state.player.health = state.stats.max_health;
    state.player.shield = state.stats.max_shield;
    state.hostiles.clear();
    state.particles.clear();
    state.combo.reset();
    state.push_event(GameEvent::player_revived(state.frame));
    true
}

/// Idle income: linear in time, boosted by a running gold bonus.
fn accrue_passive_income(state: &mut GameState, dt: f64) {
    let rate = state.stats.gold_per_second * state.bonus_multiplier(BonusKind::Gold);
    state.add_gold(rate * dt);
}

/// Decay the combo window, the timed bonus, and apply regen.
fn update_timers(state: &mut GameState, dt: f64) {
    if state.combo.count > 0 {
        state.combo.remaining -= dt;
        if state.combo.remaining <= 0.0 {
            let length = state.combo.count;
            state.combo.reset();
            state.push_event(GameEvent::combo_broken(state.frame, length));
        }
    }

    if let Some(bonus) = &mut state.bonus {
        bonus.remaining -= dt;
        if bonus.remaining <= 0.0 {
            let kind = bonus.kind;
            state.bonus = None;
            state.push_event(GameEvent::bonus_expired(state.frame, kind));
        }
    }

    let regen = state.stats.regen_per_second;
    if regen > 0.0 && state.player.health > 0.0 {
        let max = state.stats.max_health;
        state.player.heal(regen * dt, max);
    }
}

/// Move the player per the variant's movement mode, clamped to screen.
fn move_player(state: &mut GameState, input: &FrameInput, config: &GameConfig, dt: f64) {
    let speed_mult = state.stats.move_speed * state.bonus_multiplier(BonusKind::Speed);
    state.player.wing_phase += WING_FLAP_RATE * dt;

    match config.movement {
        MovementMode::Orbit {
            radius,
            squash,
            angular_speed,
        } => {
            state.player.orbit_angle += angular_speed * speed_mult * dt;
            let center = config.center();
            state.player.position = center
                + Vec2::new(
                    state.player.orbit_angle.cos() * radius,
                    state.player.orbit_angle.sin() * radius * squash,
                );
        }
        MovementMode::PointerFollow { approach_rate } => {
            if let Some(target) = input.pointer {
                let t = (approach_rate * speed_mult * dt).min(1.0);
                state.player.position = state.player.position.lerp(target, t);
            }
        }
    }

    state.player.position = state.player.position.clamp_to(config.width, config.height);
}

/// Steer hostiles toward their objective; breach on arrival.
fn update_hostiles(state: &mut GameState, config: &GameConfig, dt: f64) {
    let Some(hostile_config) = &config.hostiles else {
        return;
    };

    let objective = match hostile_config.objective {
        HostileObjective::Player => state.player.position,
        HostileObjective::Keep => config.center(),
    };

    let mut breaches: Vec<usize> = Vec::new();
    for (idx, hostile) in state.hostiles.iter_mut().enumerate() {
        if hostile.health <= 0.0 {
            continue;
        }

        let direction = (objective - hostile.position).normalize();
        hostile.position = hostile.position + direction * (hostile.speed * dt);

        if hostile.position.distance_squared(objective)
            <= hostile_config.contact_radius * hostile_config.contact_radius
        {
            breaches.push(idx);
        }
    }

    for idx in breaches {
        combat::breach(state, config, idx);
    }

    // Life-based variants halt here once health is gone.
    if config.vitals.respawn_delay.is_some()
        && state.player.health <= 0.0
        && state.downed_for.is_none()
    {
        state.downed_for = config.vitals.respawn_delay;
        state.push_event(GameEvent::player_downed(state.frame));
    }
}

/// Bob, spin, and fade collectibles.
fn update_collectibles(state: &mut GameState, config: &GameConfig, dt: f64) {
    let fade_rate = config.collectibles.fade_rate;
    for piece in &mut state.collectibles {
        if piece.collected {
            piece.opacity -= fade_rate * dt;
        } else {
            piece.bob_phase += BOB_PHASE_RATE * dt;
            piece.spin += SPIN_RATE * dt;
            piece.position.y += piece.bob_phase.sin() * BOB_DRIFT_RATE * dt;
        }
    }
}

/// Resolve the frame's tap, and the primary key as a tap on the player.
fn apply_input_taps(state: &mut GameState, input: &FrameInput, config: &GameConfig) {
    if let Some(point) = input.tap {
        combat::apply_tap(state, config, point);
    }
    if input.primary {
        let at = state.player.position;
        combat::apply_tap(state, config, at);
    }
}

/// Resolve level-ups: threshold is `level * 100` experience. Each one may
/// roll a timed bonus; any level change triggers a full stat recompute.
fn process_level_ups(state: &mut GameState, config: &GameConfig) {
    let mut leveled = false;

    while state.experience >= state.level as f64 * 100.0 {
        state.experience -= state.level as f64 * 100.0;
        state.level += 1;
        leveled = true;
        state.push_event(GameEvent::level_up(state.frame, state.level));

        if state.rng.chance(config.bonus.chance_on_level_up) {
            let kind = match state.rng.next_int(3) {
                0 => BonusKind::Gold,
                1 => BonusKind::Experience,
                _ => BonusKind::Speed,
            };
            state.bonus = Some(TimedBonus {
                kind,
                multiplier: config.bonus.multiplier,
                remaining: config.bonus.duration,
            });
            state.push_event(GameEvent::bonus_activated(
                state.frame,
                kind,
                config.bonus.duration,
            ));
        }
    }

    if leveled {
        state.stats = DerivedStats::recompute(config, &state.upgrades, state.level);
        soldier::sync_population(state, config);
    }
}

/// Integrate particles and burn their lifetimes.
fn update_particles(state: &mut GameState, dt: f64) {
    for particle in &mut state.particles {
        particle.position = particle.position + particle.velocity * dt;
        particle.lifetime -= dt;
    }
}

/// Drop everything whose lifecycle ended. `retain` compacts in place, so
/// no index is skipped or visited twice.
fn cull(state: &mut GameState) {
    state.collectibles.retain(|piece| piece.opacity > 0.0);
    state.hostiles.retain(|hostile| hostile.health > 0.0);
    state.particles.retain(|particle| particle.lifetime > 0.0);
}

// =============================================================================
// TESTS
// =============================================================================
