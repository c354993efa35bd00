//! Variant Configuration
//!
//! One generalized simulation serves six mini-game variants; everything
//! that differs between them lives here as data, with each preset's
//! constants documented inline. Formula differences between variants
//! (flat vs percent-of-max contact damage) are intentional and are kept
//! per-variant rather than unified.

use crate::core::vec2::Vec2;
use crate::economy::upgrade::{UpgradeDef, UpgradeKind};

/// How the player avatar moves each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementMode {
    /// Fixed orbital flight around the screen center.
    Orbit {
        /// Orbit radius in pixels
        radius: f64,
        /// Vertical squash applied to the orbit (0.6 flies a flattened
        /// ellipse)
        squash: f64,
        /// Base angular speed in radians/second
        angular_speed: f64,
    },
    /// Exponential approach toward the pointer position.
    PointerFollow {
        /// Approach rate per second; higher snaps harder to the pointer
        approach_rate: f64,
    },
}

/// How a hostile hurts the player on contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactDamage {
    /// Fixed damage per breach
    Flat(f64),
    /// Fraction of the player's current max health per breach
    MaxHealthFraction(f64),
}

/// The point a hostile steers toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostileObjective {
    /// The (moving) player avatar
    Player,
    /// The fixed keep at the screen center
    Keep,
}

/// Collectible spawning and pickup tuning.
#[derive(Clone, Copy, Debug)]
pub struct CollectibleConfig {
    /// Seconds between ambient spawns at level 1
    pub spawn_interval: f64,
    /// Interval shrink per level: interval / (1 + factor * (level - 1))
    pub interval_level_factor: f64,
    /// Field cap at level 1
    pub max_on_field: u32,
    /// Cap growth per level
    pub cap_per_level: u32,
    /// Value of a freshly spawned piece before multipliers
    pub base_value: f64,
    /// Auto-pickup radius around the player, pixels
    pub pickup_radius: f64,
    /// Whether a tap also drops a new piece at the tap point
    pub spawn_on_tap: bool,
    /// Opacity lost per second once collected
    pub fade_rate: f64,
    /// Experience granted per collection (0 disables xp from pickups)
    pub xp_per_collect: f64,
}

/// Hostile spawning, steering, and contact tuning.
#[derive(Clone, Copy, Debug)]
pub struct HostileConfig {
    /// Seconds between spawns at level 1
    pub spawn_interval: f64,
    /// Interval shrink per level: interval / (1 + factor * (level - 1))
    pub interval_level_factor: f64,
    /// Field cap at level 1
    pub max_on_field: u32,
    /// Cap growth per level
    pub cap_per_level: u32,
    /// Hit points at level 1
    pub base_health: f64,
    /// Hit point growth per level
    pub health_per_level: f64,
    /// Steering speed in pixels/second at level 1
    pub base_speed: f64,
    /// Speed growth per level
    pub speed_per_level: f64,
    /// Gold granted on a kill before multipliers
    pub gold_reward: f64,
    /// Experience granted on a kill before multipliers
    pub xp_reward: f64,
    /// What the hostile walks toward
    pub objective: HostileObjective,
    /// Distance at which the objective counts as reached, pixels
    pub contact_radius: f64,
    /// Damage dealt to the player on a breach
    pub contact_damage: ContactDamage,
}

/// Auto-attacker tuning. Population is derived from the Garrison upgrade.
#[derive(Clone, Copy, Debug)]
pub struct SoldierConfig {
    /// Soldiers fielded before any Garrison levels
    pub base_count: u32,
    /// Damage per shot
    pub damage: f64,
    /// Targeting range, pixels
    pub range: f64,
    /// Seconds between shots
    pub max_cooldown: f64,
    /// Facing interpolation rate, radians/second
    pub turn_rate: f64,
    /// Radius of the deployment ring around the screen center
    pub ring_radius: f64,
}

/// Combo window tuning. `k = 0` disables the combo entirely.
#[derive(Clone, Copy, Debug)]
pub struct ComboConfig {
    /// Multiplier growth per consecutive hit: 1 + combo * k
    pub k: f64,
    /// Seconds a hit keeps the combo alive
    pub window: f64,
}

/// Timed level-up bonus tuning.
#[derive(Clone, Copy, Debug)]
pub struct BonusConfig {
    /// Probability a level-up activates a bonus
    pub chance_on_level_up: f64,
    /// Bonus duration, seconds
    pub duration: f64,
    /// Multiplier while active
    pub multiplier: f64,
}

/// Tap/click resolution tuning.
#[derive(Clone, Copy, Debug)]
pub struct TapConfig {
    /// Radius around the tap point that hits entities, pixels
    pub radius: f64,
    /// Tap damage before AttackPower scaling
    pub base_damage: f64,
    /// Damage multiplier on a critical hit
    pub crit_multiplier: f64,
}

/// Player vitals tuning.
#[derive(Clone, Copy, Debug)]
pub struct VitalConfig {
    /// Max health before upgrades and level growth
    pub base_max_health: f64,
    /// Max health gained per player level (0 in most variants)
    pub max_health_per_level: f64,
    /// Shield pool absorbing damage before health (0 disables)
    pub base_max_shield: f64,
    /// Whether health/shield are written to the persistence collaborator
    pub persist: bool,
    /// Life-based variant: seconds the simulation halts after health
    /// reaches 0 before vitals refill and hostiles/particles clear
    pub respawn_delay: Option<f64>,
}

/// Full configuration for one game variant.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Variant name (used for logging and the demo binary)
    pub name: &'static str,
    /// Drawing surface width, pixels
    pub width: f64,
    /// Drawing surface height, pixels
    pub height: f64,
    /// Player movement behavior
    pub movement: MovementMode,
    /// Passive income before upgrades, gold/second
    pub base_gold_per_second: f64,
    /// Collectible tuning
    pub collectibles: CollectibleConfig,
    /// Hostile tuning; None for the peaceful collectors
    pub hostiles: Option<HostileConfig>,
    /// Auto-attacker tuning; None where the variant has no garrison
    pub soldiers: Option<SoldierConfig>,
    /// Combo tuning
    pub combo: ComboConfig,
    /// Timed bonus tuning
    pub bonus: BonusConfig,
    /// Tap resolution tuning
    pub tap: TapConfig,
    /// Player vitals tuning
    pub vitals: VitalConfig,
    /// Upgrade catalog the variant sells
    pub upgrades: Vec<UpgradeDef>,
}

impl GameConfig {
    /// Screen center; also the keep position and the orbit center.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// All six shipped variants.
    pub fn all_variants() -> Vec<GameConfig> {
        vec![
            GameConfig::gryphon_gold(),
            GameConfig::sky_courier(),
            GameConfig::keep_siege(),
            GameConfig::goblin_rush(),
            GameConfig::last_bastion(),
            GameConfig::war_tapper(),
        ]
    }

    /// Look up a variant preset by name.
    pub fn by_name(name: &str) -> Option<GameConfig> {
        Self::all_variants().into_iter().find(|v| v.name == name)
    }

    /// The idle gold collector: a gryphon orbits the screen, coins rain,
    /// taps drop and scoop coins.
    pub fn gryphon_gold() -> Self {
        Self {
            name: "gryphon-gold",
            width: 400.0,
            height: 600.0,
            movement: MovementMode::Orbit {
                radius: 90.0,
                squash: 0.6,
                angular_speed: 1.2,
            },
            base_gold_per_second: 1.0,
            collectibles: CollectibleConfig {
                spawn_interval: 2.0,
                interval_level_factor: 0.0,
                max_on_field: 50,
                cap_per_level: 0,
                base_value: 1.0,
                pickup_radius: 45.0,
                spawn_on_tap: true,
                fade_rate: 3.0,
                xp_per_collect: 0.0,
            },
            hostiles: None,
            soldiers: None,
            combo: ComboConfig { k: 0.0, window: 3.0 },
            bonus: BonusConfig {
                chance_on_level_up: 0.0,
                duration: 10.0,
                multiplier: 2.0,
            },
            tap: TapConfig {
                radius: 50.0,
                base_damage: 5.0,
                crit_multiplier: 2.0,
            },
            vitals: VitalConfig {
                base_max_health: 100.0,
                max_health_per_level: 0.0,
                base_max_shield: 0.0,
                persist: false,
                respawn_delay: None,
            },
            upgrades: vec![
                UpgradeDef::new(UpgradeKind::GoldRate, 10.0, 1.5),
                UpgradeDef::new(UpgradeKind::CoinValue, 25.0, 1.8),
                UpgradeDef::new(UpgradeKind::MoveSpeed, 50.0, 2.0),
            ],
        }
    }

    /// Pointer-follow collector: the avatar chases the pointer, pickups
    /// grant xp, collections chain a gentle combo.
    pub fn sky_courier() -> Self {
        Self {
            name: "sky-courier",
            width: 400.0,
            height: 600.0,
            movement: MovementMode::PointerFollow { approach_rate: 4.0 },
            base_gold_per_second: 0.5,
            collectibles: CollectibleConfig {
                spawn_interval: 1.5,
                interval_level_factor: 0.1,
                max_on_field: 30,
                cap_per_level: 1,
                base_value: 1.0,
                pickup_radius: 40.0,
                spawn_on_tap: false,
                fade_rate: 3.0,
                xp_per_collect: 5.0,
            },
            hostiles: None,
            soldiers: None,
            combo: ComboConfig { k: 0.1, window: 4.0 },
            bonus: BonusConfig {
                chance_on_level_up: 0.25,
                duration: 10.0,
                multiplier: 2.0,
            },
            tap: TapConfig {
                radius: 50.0,
                base_damage: 5.0,
                crit_multiplier: 2.0,
            },
            vitals: VitalConfig {
                base_max_health: 100.0,
                max_health_per_level: 0.0,
                base_max_shield: 0.0,
                persist: false,
                respawn_delay: None,
            },
            upgrades: vec![
                UpgradeDef::new(UpgradeKind::GoldRate, 10.0, 1.5),
                UpgradeDef::new(UpgradeKind::CoinValue, 25.0, 1.8),
                UpgradeDef::new(UpgradeKind::MoveSpeed, 40.0, 1.7),
            ],
        }
    }

    /// Tower defense: monsters march on the keep, the garrison holds the
    /// ring, breaches chip the keep's health flat.
    pub fn keep_siege() -> Self {
        Self {
            name: "keep-siege",
            width: 480.0,
            height: 600.0,
            movement: MovementMode::Orbit {
                radius: 70.0,
                squash: 1.0,
                angular_speed: 0.9,
            },
            base_gold_per_second: 0.5,
            collectibles: CollectibleConfig {
                spawn_interval: 4.0,
                interval_level_factor: 0.0,
                max_on_field: 10,
                cap_per_level: 0,
                base_value: 2.0,
                pickup_radius: 40.0,
                spawn_on_tap: false,
                fade_rate: 3.0,
                xp_per_collect: 0.0,
            },
            hostiles: Some(HostileConfig {
                spawn_interval: 3.0,
                interval_level_factor: 0.1,
                max_on_field: 8,
                cap_per_level: 1,
                base_health: 20.0,
                health_per_level: 5.0,
                base_speed: 35.0,
                speed_per_level: 2.0,
                gold_reward: 5.0,
                xp_reward: 10.0,
                objective: HostileObjective::Keep,
                contact_radius: 30.0,
                contact_damage: ContactDamage::Flat(10.0),
            }),
            soldiers: Some(SoldierConfig {
                base_count: 1,
                damage: 8.0,
                range: 120.0,
                max_cooldown: 1.0,
                turn_rate: 6.0,
                ring_radius: 60.0,
            }),
            combo: ComboConfig { k: 0.15, window: 5.0 },
            bonus: BonusConfig {
                chance_on_level_up: 0.3,
                duration: 12.0,
                multiplier: 2.0,
            },
            tap: TapConfig {
                radius: 45.0,
                base_damage: 6.0,
                crit_multiplier: 2.0,
            },
            vitals: VitalConfig {
                base_max_health: 100.0,
                max_health_per_level: 10.0,
                base_max_shield: 0.0,
                persist: false,
                respawn_delay: None,
            },
            upgrades: vec![
                UpgradeDef::new(UpgradeKind::AttackPower, 15.0, 1.6),
                UpgradeDef::new(UpgradeKind::Garrison, 40.0, 1.9),
                UpgradeDef::new(UpgradeKind::GoldRate, 10.0, 1.5),
                UpgradeDef::new(UpgradeKind::MaxHealth, 30.0, 1.7),
            ],
        }
    }

    /// Clicker hybrid: goblins swarm the player, breaches cost a tenth of
    /// max health, taps crit.
    pub fn goblin_rush() -> Self {
        Self {
            name: "goblin-rush",
            width: 400.0,
            height: 600.0,
            movement: MovementMode::PointerFollow { approach_rate: 5.0 },
            base_gold_per_second: 0.2,
            collectibles: CollectibleConfig {
                spawn_interval: 5.0,
                interval_level_factor: 0.0,
                max_on_field: 8,
                cap_per_level: 0,
                base_value: 3.0,
                pickup_radius: 35.0,
                spawn_on_tap: false,
                fade_rate: 3.0,
                xp_per_collect: 2.0,
            },
            hostiles: Some(HostileConfig {
                spawn_interval: 2.5,
                interval_level_factor: 0.12,
                max_on_field: 10,
                cap_per_level: 1,
                base_health: 15.0,
                health_per_level: 4.0,
                base_speed: 45.0,
                speed_per_level: 3.0,
                gold_reward: 4.0,
                xp_reward: 8.0,
                objective: HostileObjective::Player,
                contact_radius: 25.0,
                contact_damage: ContactDamage::MaxHealthFraction(0.1),
            }),
            soldiers: None,
            combo: ComboConfig { k: 0.25, window: 3.0 },
            bonus: BonusConfig {
                chance_on_level_up: 0.35,
                duration: 8.0,
                multiplier: 2.5,
            },
            tap: TapConfig {
                radius: 50.0,
                base_damage: 8.0,
                crit_multiplier: 2.5,
            },
            vitals: VitalConfig {
                base_max_health: 100.0,
                max_health_per_level: 0.0,
                base_max_shield: 0.0,
                persist: false,
                respawn_delay: None,
            },
            upgrades: vec![
                UpgradeDef::new(UpgradeKind::AttackPower, 12.0, 1.6),
                UpgradeDef::new(UpgradeKind::CritChance, 35.0, 1.8),
                UpgradeDef::new(UpgradeKind::CoinValue, 25.0, 1.8),
                UpgradeDef::new(UpgradeKind::GoldRate, 10.0, 1.5),
            ],
        }
    }

    /// Life-based defense: shield over health, both persisted; at zero
    /// health the simulation halts for a fixed delay, then vitals refill
    /// and the field clears.
    pub fn last_bastion() -> Self {
        Self {
            name: "last-bastion",
            width: 480.0,
            height: 600.0,
            movement: MovementMode::Orbit {
                radius: 80.0,
                squash: 0.8,
                angular_speed: 1.0,
            },
            base_gold_per_second: 0.4,
            collectibles: CollectibleConfig {
                spawn_interval: 3.0,
                interval_level_factor: 0.0,
                max_on_field: 12,
                cap_per_level: 0,
                base_value: 2.0,
                pickup_radius: 40.0,
                spawn_on_tap: false,
                fade_rate: 3.0,
                xp_per_collect: 3.0,
            },
            hostiles: Some(HostileConfig {
                spawn_interval: 2.8,
                interval_level_factor: 0.1,
                max_on_field: 9,
                cap_per_level: 1,
                base_health: 25.0,
                health_per_level: 6.0,
                base_speed: 40.0,
                speed_per_level: 2.5,
                gold_reward: 6.0,
                xp_reward: 12.0,
                objective: HostileObjective::Player,
                contact_radius: 28.0,
                contact_damage: ContactDamage::Flat(15.0),
            }),
            soldiers: Some(SoldierConfig {
                base_count: 0,
                damage: 7.0,
                range: 110.0,
                max_cooldown: 1.2,
                turn_rate: 5.0,
                ring_radius: 55.0,
            }),
            combo: ComboConfig { k: 0.2, window: 4.0 },
            bonus: BonusConfig {
                chance_on_level_up: 0.3,
                duration: 10.0,
                multiplier: 2.0,
            },
            tap: TapConfig {
                radius: 45.0,
                base_damage: 7.0,
                crit_multiplier: 2.0,
            },
            vitals: VitalConfig {
                base_max_health: 100.0,
                max_health_per_level: 10.0,
                base_max_shield: 50.0,
                persist: true,
                respawn_delay: Some(3.0),
            },
            upgrades: vec![
                UpgradeDef::new(UpgradeKind::AttackPower, 15.0, 1.6),
                UpgradeDef::new(UpgradeKind::MaxHealth, 25.0, 1.7),
                UpgradeDef::new(UpgradeKind::Regen, 30.0, 1.8),
                UpgradeDef::new(UpgradeKind::Garrison, 45.0, 1.9),
            ],
        }
    }

    /// Tap-heavy hybrid: fast weak waves, light percent-of-max chip
    /// damage, the steepest combo curve of the family.
    pub fn war_tapper() -> Self {
        Self {
            name: "war-tapper",
            width: 400.0,
            height: 600.0,
            movement: MovementMode::Orbit {
                radius: 60.0,
                squash: 0.6,
                angular_speed: 1.5,
            },
            base_gold_per_second: 0.3,
            collectibles: CollectibleConfig {
                spawn_interval: 6.0,
                interval_level_factor: 0.0,
                max_on_field: 6,
                cap_per_level: 0,
                base_value: 4.0,
                pickup_radius: 40.0,
                spawn_on_tap: false,
                fade_rate: 3.0,
                xp_per_collect: 0.0,
            },
            hostiles: Some(HostileConfig {
                spawn_interval: 2.0,
                interval_level_factor: 0.15,
                max_on_field: 12,
                cap_per_level: 2,
                base_health: 10.0,
                health_per_level: 3.0,
                base_speed: 50.0,
                speed_per_level: 3.0,
                gold_reward: 3.0,
                xp_reward: 6.0,
                objective: HostileObjective::Player,
                contact_radius: 25.0,
                contact_damage: ContactDamage::MaxHealthFraction(0.05),
            }),
            soldiers: None,
            combo: ComboConfig { k: 0.2, window: 3.0 },
            bonus: BonusConfig {
                chance_on_level_up: 0.4,
                duration: 8.0,
                multiplier: 3.0,
            },
            tap: TapConfig {
                radius: 55.0,
                base_damage: 10.0,
                crit_multiplier: 3.0,
            },
            vitals: VitalConfig {
                base_max_health: 80.0,
                max_health_per_level: 5.0,
                base_max_shield: 0.0,
                persist: false,
                respawn_delay: None,
            },
            upgrades: vec![
                UpgradeDef::new(UpgradeKind::AttackPower, 12.0, 1.6),
                UpgradeDef::new(UpgradeKind::CritChance, 30.0, 1.8),
                UpgradeDef::new(UpgradeKind::GoldRate, 10.0, 1.5),
                UpgradeDef::new(UpgradeKind::CoinValue, 20.0, 1.8),
            ],
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_variants_with_unique_names() {
        let variants = GameConfig::all_variants();
        assert_eq!(variants.len(), 6);

        let mut names: Vec<_> = variants.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_by_name_round_trips() {
        for variant in GameConfig::all_variants() {
            let found = GameConfig::by_name(variant.name).unwrap();
            assert_eq!(found.name, variant.name);
        }
        assert!(GameConfig::by_name("no-such-variant").is_none());
    }

    #[test]
    fn test_cost_multipliers_exceed_one() {
        for variant in GameConfig::all_variants() {
            for def in &variant.upgrades {
                assert!(
                    def.cost_multiplier > 1.0,
                    "{} sells {:?} with multiplier {}",
                    variant.name,
                    def.kind,
                    def.cost_multiplier
                );
                assert!(def.base_cost > 0.0);
            }
        }
    }

    #[test]
    fn test_combat_variants_define_hostiles() {
        for name in ["keep-siege", "goblin-rush", "last-bastion", "war-tapper"] {
            let variant = GameConfig::by_name(name).unwrap();
            assert!(variant.hostiles.is_some(), "{name} should field hostiles");
        }
        assert!(GameConfig::gryphon_gold().hostiles.is_none());
        assert!(GameConfig::sky_courier().hostiles.is_none());
    }

    #[test]
    fn test_life_based_variant_persists_vitals() {
        let bastion = GameConfig::last_bastion();
        assert!(bastion.vitals.persist);
        assert_eq!(bastion.vitals.respawn_delay, Some(3.0));
        assert!(bastion.vitals.base_max_shield > 0.0);
    }

    #[test]
    fn test_center_is_screen_midpoint() {
        let config = GameConfig::gryphon_gold();
        assert_eq!(config.center(), Vec2::new(200.0, 300.0));
    }
}
