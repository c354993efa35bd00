//! Upgrade Catalog and Cost Curves
//!
//! Every variant sells a handful of upgrades on an exponential cost curve:
//! `cost(level) = floor(base_cost * cost_multiplier^level)`. Purchases
//! debit gold, bump the level, and trigger a full derived-stat recompute;
//! an underfunded purchase is a silent no-op, not an error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The effect an upgrade has on derived stats.
///
/// Each kind maps to one term in
/// [`DerivedStats::recompute`](crate::economy::stats::DerivedStats::recompute);
/// an upgrade has no other effect channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Passive income: +0.5 gold/second per level
    GoldRate,
    /// Collectible value: +1x per level
    CoinValue,
    /// Player movement/orbit speed: +20% per level
    MoveSpeed,
    /// Tap and soldier damage: +50% / +25% per level
    AttackPower,
    /// Critical hit chance: +5% per level (capped)
    CritChance,
    /// Maximum health: +10 per level
    MaxHealth,
    /// Health regeneration: +0.5/second per level
    Regen,
    /// Auto-attacker population: +1 soldier per level
    Garrison,
}

impl UpgradeKind {
    /// Stable key used for the persistence collaborator.
    pub fn storage_key(self) -> &'static str {
        match self {
            UpgradeKind::GoldRate => "upgrade_gold_rate",
            UpgradeKind::CoinValue => "upgrade_coin_value",
            UpgradeKind::MoveSpeed => "upgrade_move_speed",
            UpgradeKind::AttackPower => "upgrade_attack_power",
            UpgradeKind::CritChance => "upgrade_crit_chance",
            UpgradeKind::MaxHealth => "upgrade_max_health",
            UpgradeKind::Regen => "upgrade_regen",
            UpgradeKind::Garrison => "upgrade_garrison",
        }
    }

    /// Display name shown by UI collaborators.
    pub fn name(self) -> &'static str {
        match self {
            UpgradeKind::GoldRate => "Gold Mine",
            UpgradeKind::CoinValue => "Treasure Finder",
            UpgradeKind::MoveSpeed => "Swift Flight",
            UpgradeKind::AttackPower => "Sharpened Blades",
            UpgradeKind::CritChance => "Keen Eye",
            UpgradeKind::MaxHealth => "Stone Walls",
            UpgradeKind::Regen => "Field Medics",
            UpgradeKind::Garrison => "Garrison",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Catalog entry: which upgrade a variant sells, and on what curve.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UpgradeDef {
    /// What the upgrade does
    pub kind: UpgradeKind,
    /// Cost of the first purchase
    pub base_cost: f64,
    /// Per-level cost growth, strictly > 1
    pub cost_multiplier: f64,
}

impl UpgradeDef {
    /// Define a catalog entry.
    pub const fn new(kind: UpgradeKind, base_cost: f64, cost_multiplier: f64) -> Self {
        Self {
            kind,
            base_cost,
            cost_multiplier,
        }
    }
}

/// A purchasable upgrade with its current level.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Upgrade {
    /// Times purchased
    pub level: u32,
    /// Cost of the first purchase
    pub base_cost: f64,
    /// Per-level cost growth
    pub cost_multiplier: f64,
}

impl Upgrade {
    /// Current price: `floor(base_cost * cost_multiplier^level)`.
    pub fn cost(&self) -> f64 {
        (self.base_cost * self.cost_multiplier.powi(self.level as i32)).floor()
    }
}

/// Receipt for a successful purchase.
#[derive(Clone, Copy, Debug)]
pub struct PurchaseReceipt {
    /// What was bought
    pub kind: UpgradeKind,
    /// Gold debited
    pub cost: f64,
    /// Level after the purchase
    pub new_level: u32,
}

/// The set of upgrades a variant offers.
///
/// BTreeMap keyed by kind for deterministic iteration when persisting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpgradeSet {
    map: BTreeMap<UpgradeKind, Upgrade>,
}

impl UpgradeSet {
    /// Build the set from a variant's catalog, all levels at zero.
    pub fn from_defs(defs: &[UpgradeDef]) -> Self {
        let mut map = BTreeMap::new();
        for def in defs {
            map.insert(
                def.kind,
                Upgrade {
                    level: 0,
                    base_cost: def.base_cost,
                    cost_multiplier: def.cost_multiplier,
                },
            );
        }
        Self { map }
    }

    /// Get an upgrade by kind.
    pub fn get(&self, kind: UpgradeKind) -> Option<&Upgrade> {
        self.map.get(&kind)
    }

    /// Current level of a kind; 0 when the variant does not sell it.
    pub fn level_of(&self, kind: UpgradeKind) -> u32 {
        self.map.get(&kind).map(|u| u.level).unwrap_or(0)
    }

    /// Current price of a kind, if sold.
    pub fn cost_of(&self, kind: UpgradeKind) -> Option<f64> {
        self.map.get(&kind).map(|u| u.cost())
    }

    /// Force a level (used when restoring persisted progress).
    pub fn set_level(&mut self, kind: UpgradeKind, level: u32) {
        if let Some(upgrade) = self.map.get_mut(&kind) {
            upgrade.level = level;
        }
    }

    /// Attempt a purchase against the given gold balance.
    ///
    /// On success debits `gold` and increments the level. When the kind is
    /// not sold or gold is short of the price, nothing changes and `None`
    /// is returned; the caller is expected to recompute derived stats only
    /// on `Some`.
    pub fn try_purchase(&mut self, kind: UpgradeKind, gold: &mut f64) -> Option<PurchaseReceipt> {
        let upgrade = self.map.get_mut(&kind)?;
        let cost = upgrade.cost();
        if *gold < cost {
            return None;
        }
        *gold -= cost;
        upgrade.level += 1;
        Some(PurchaseReceipt {
            kind,
            cost,
            new_level: upgrade.level,
        })
    }

    /// Iterate over all upgrades in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (UpgradeKind, &Upgrade)> {
        self.map.iter().map(|(k, u)| (*k, u))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> UpgradeSet {
        // Curves from the idle collector variant.
        UpgradeSet::from_defs(&[
            UpgradeDef::new(UpgradeKind::GoldRate, 10.0, 1.5),
            UpgradeDef::new(UpgradeKind::CoinValue, 25.0, 1.8),
            UpgradeDef::new(UpgradeKind::MoveSpeed, 50.0, 2.0),
        ])
    }

    #[test]
    fn test_cost_at_level_zero_is_base() {
        let set = catalog();
        assert_eq!(set.cost_of(UpgradeKind::GoldRate), Some(10.0));
        assert_eq!(set.cost_of(UpgradeKind::CoinValue), Some(25.0));
        assert_eq!(set.cost_of(UpgradeKind::MoveSpeed), Some(50.0));
    }

    #[test]
    fn test_cost_curve_known_values() {
        let upgrade = Upgrade {
            level: 2,
            base_cost: 10.0,
            cost_multiplier: 1.5,
        };
        // floor(10 * 1.5^2) = floor(22.5)
        assert_eq!(upgrade.cost(), 22.0);
    }

    #[test]
    fn test_purchase_at_exact_cost_succeeds() {
        let mut set = catalog();
        let mut gold = 10.0;

        let receipt = set.try_purchase(UpgradeKind::GoldRate, &mut gold).unwrap();
        assert_eq!(receipt.cost, 10.0);
        assert_eq!(receipt.new_level, 1);
        assert_eq!(gold, 0.0);
        assert_eq!(set.level_of(UpgradeKind::GoldRate), 1);
    }

    #[test]
    fn test_purchase_one_gold_short_is_noop() {
        let mut set = catalog();
        let mut gold = 9.0;

        assert!(set.try_purchase(UpgradeKind::GoldRate, &mut gold).is_none());
        assert_eq!(gold, 9.0);
        assert_eq!(set.level_of(UpgradeKind::GoldRate), 0);
    }

    #[test]
    fn test_purchase_unsold_kind_is_noop() {
        let mut set = catalog();
        let mut gold = 1_000_000.0;

        assert!(set.try_purchase(UpgradeKind::Garrison, &mut gold).is_none());
        assert_eq!(gold, 1_000_000.0);
    }

    #[test]
    fn test_level_of_unsold_kind_is_zero() {
        let set = catalog();
        assert_eq!(set.level_of(UpgradeKind::Regen), 0);
    }

    #[test]
    fn test_repeat_purchases_climb_the_curve() {
        let mut set = catalog();
        let mut gold = 100.0;

        // 10 + 15 + 22 = 47 total for three levels of GoldRate.
        for expected_cost in [10.0, 15.0, 22.0] {
            let receipt = set.try_purchase(UpgradeKind::GoldRate, &mut gold).unwrap();
            assert_eq!(receipt.cost, expected_cost);
        }
        assert_eq!(gold, 53.0);
        assert_eq!(set.level_of(UpgradeKind::GoldRate), 3);
    }

    proptest! {
        /// Cost strictly increases with level for realistic curves.
        #[test]
        fn cost_curve_is_strictly_increasing(
            base_cost in 5.0f64..1000.0,
            cost_multiplier in 1.3f64..3.0,
            level in 0u32..30,
        ) {
            let lower = Upgrade { level, base_cost, cost_multiplier };
            let upper = Upgrade { level: level + 1, base_cost, cost_multiplier };
            prop_assert!(upper.cost() > lower.cost());
        }

        /// A purchase never drives gold negative, and a failed purchase
        /// never changes anything.
        #[test]
        fn purchase_preserves_invariants(gold in 0.0f64..100.0) {
            let mut set = catalog();
            let mut balance = gold;
            let before = set.level_of(UpgradeKind::GoldRate);

            let receipt = set.try_purchase(UpgradeKind::GoldRate, &mut balance);
            prop_assert!(balance >= 0.0);
            match receipt {
                Some(r) => {
                    prop_assert_eq!(set.level_of(UpgradeKind::GoldRate), before + 1);
                    prop_assert!((balance + r.cost - gold).abs() < 1e-9);
                }
                None => {
                    prop_assert_eq!(set.level_of(UpgradeKind::GoldRate), before);
                    prop_assert_eq!(balance, gold);
                }
            }
        }
    }
}
