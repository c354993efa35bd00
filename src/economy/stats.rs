//! Derived Stats
//!
//! Every gameplay quantity that depends on upgrade levels or the player
//! level is recomputed here from scratch. Nothing is adjusted
//! incrementally, so the numbers can never drift from the levels that
//! produced them.

use serde::{Deserialize, Serialize};

use crate::economy::upgrade::{UpgradeKind, UpgradeSet};
use crate::game::config::GameConfig;

/// Crit chance ceiling; taps always keep some non-crit outcomes.
const CRIT_CHANCE_CAP: f64 = 0.8;

/// Snapshot of every derived quantity for the current levels.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Passive income, gold/second
    pub gold_per_second: f64,
    /// Multiplier applied to collectible values
    pub coin_value: f64,
    /// Multiplier applied to player movement/orbit speed
    pub move_speed: f64,
    /// Damage per tap before crits
    pub tap_damage: f64,
    /// Probability a tap crits, in [0, CRIT_CHANCE_CAP]
    pub crit_chance: f64,
    /// Maximum player health
    pub max_health: f64,
    /// Maximum player shield
    pub max_shield: f64,
    /// Health restored per second
    pub regen_per_second: f64,
    /// Target auto-attacker population
    pub soldier_count: u32,
    /// Damage per soldier shot
    pub soldier_damage: f64,
    /// Seconds between ambient collectible spawns
    pub collectible_interval: f64,
    /// Collectible field cap
    pub collectible_cap: u32,
    /// Seconds between hostile spawns (0 disables)
    pub hostile_interval: f64,
    /// Hostile field cap
    pub hostile_cap: u32,
}

impl DerivedStats {
    /// Recompute the full snapshot from the variant config, the upgrade
    /// levels, and the player level.
    pub fn recompute(config: &GameConfig, upgrades: &UpgradeSet, level: u32) -> Self {
        let gold_rate = upgrades.level_of(UpgradeKind::GoldRate) as f64;
        let coin_value = upgrades.level_of(UpgradeKind::CoinValue) as f64;
        let move_speed = upgrades.level_of(UpgradeKind::MoveSpeed) as f64;
        let attack_power = upgrades.level_of(UpgradeKind::AttackPower) as f64;
        let crit = upgrades.level_of(UpgradeKind::CritChance) as f64;
        let max_health = upgrades.level_of(UpgradeKind::MaxHealth) as f64;
        let regen = upgrades.level_of(UpgradeKind::Regen) as f64;
        let garrison = upgrades.level_of(UpgradeKind::Garrison);

        // Difficulty scaling: the spawn interval shrinks and the field cap
        // grows monotonically with the player level.
        let level_steps = level.saturating_sub(1);
        let c = &config.collectibles;
        let collectible_interval =
            c.spawn_interval / (1.0 + c.interval_level_factor * level_steps as f64);
        let collectible_cap = c.max_on_field + c.cap_per_level * level_steps;

        let (hostile_interval, hostile_cap) = match &config.hostiles {
            Some(h) => (
                h.spawn_interval / (1.0 + h.interval_level_factor * level_steps as f64),
                h.max_on_field + h.cap_per_level * level_steps,
            ),
            None => (0.0, 0),
        };

        let soldier_count = match &config.soldiers {
            Some(s) => s.base_count + garrison,
            None => 0,
        };
        let soldier_damage = match &config.soldiers {
            Some(s) => s.damage * (1.0 + 0.25 * attack_power),
            None => 0.0,
        };

        Self {
            gold_per_second: config.base_gold_per_second + 0.5 * gold_rate,
            coin_value: 1.0 + coin_value,
            move_speed: 1.0 + 0.2 * move_speed,
            tap_damage: config.tap.base_damage * (1.0 + 0.5 * attack_power),
            crit_chance: (0.05 + 0.05 * crit).min(CRIT_CHANCE_CAP),
            max_health: config.vitals.base_max_health
                + 10.0 * max_health
                + config.vitals.max_health_per_level * level_steps as f64,
            max_shield: config.vitals.base_max_shield,
            regen_per_second: 0.5 * regen,
            soldier_count,
            soldier_damage,
            collectible_interval,
            collectible_cap,
            hostile_interval,
            hostile_cap,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_baseline_collector_stats() {
        let config = GameConfig::gryphon_gold();
        let upgrades = UpgradeSet::from_defs(&config.upgrades);
        let stats = DerivedStats::recompute(&config, &upgrades, 1);

        assert_eq!(stats.gold_per_second, 1.0);
        assert_eq!(stats.coin_value, 1.0);
        assert_eq!(stats.move_speed, 1.0);
        assert_eq!(stats.collectible_interval, 2.0);
        assert_eq!(stats.soldier_count, 0);
        assert_eq!(stats.hostile_cap, 0);
    }

    #[test]
    fn test_upgrade_levels_feed_the_formulas() {
        let config = GameConfig::gryphon_gold();
        let mut upgrades = UpgradeSet::from_defs(&config.upgrades);
        upgrades.set_level(UpgradeKind::GoldRate, 4);
        upgrades.set_level(UpgradeKind::CoinValue, 2);
        upgrades.set_level(UpgradeKind::MoveSpeed, 3);

        let stats = DerivedStats::recompute(&config, &upgrades, 1);
        // gps = 1 + 0.5 * 4
        assert_eq!(stats.gold_per_second, 3.0);
        // coin value = 1 + level
        assert_eq!(stats.coin_value, 3.0);
        // speed = 1 + 0.2 * 3
        assert!(close(stats.move_speed, 1.6));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let config = GameConfig::keep_siege();
        let mut upgrades = UpgradeSet::from_defs(&config.upgrades);
        upgrades.set_level(UpgradeKind::AttackPower, 3);
        upgrades.set_level(UpgradeKind::Garrison, 2);

        let a = DerivedStats::recompute(&config, &upgrades, 5);
        let b = DerivedStats::recompute(&config, &upgrades, 5);
        assert_eq!(a.tap_damage, b.tap_damage);
        assert_eq!(a.soldier_count, b.soldier_count);
        assert_eq!(a.hostile_interval, b.hostile_interval);
    }

    #[test]
    fn test_level_tightens_spawning_monotonically() {
        let config = GameConfig::goblin_rush();
        let upgrades = UpgradeSet::from_defs(&config.upgrades);

        let mut last_interval = f64::INFINITY;
        let mut last_cap = 0;
        for level in 1..20 {
            let stats = DerivedStats::recompute(&config, &upgrades, level);
            assert!(stats.hostile_interval <= last_interval);
            assert!(stats.hostile_cap >= last_cap);
            last_interval = stats.hostile_interval;
            last_cap = stats.hostile_cap;
        }
    }

    #[test]
    fn test_crit_chance_is_capped() {
        let config = GameConfig::goblin_rush();
        let mut upgrades = UpgradeSet::from_defs(&config.upgrades);
        upgrades.set_level(UpgradeKind::CritChance, 100);

        let stats = DerivedStats::recompute(&config, &upgrades, 1);
        assert_eq!(stats.crit_chance, CRIT_CHANCE_CAP);
    }

    #[test]
    fn test_garrison_grows_soldier_target() {
        let config = GameConfig::keep_siege();
        let mut upgrades = UpgradeSet::from_defs(&config.upgrades);

        let base = DerivedStats::recompute(&config, &upgrades, 1).soldier_count;
        upgrades.set_level(UpgradeKind::Garrison, 3);
        let grown = DerivedStats::recompute(&config, &upgrades, 1).soldier_count;
        assert_eq!(grown, base + 3);
    }
}
