//! Simulation Events
//!
//! Frame-stamped record of everything notable a simulate pass did.
//! Consumed by hosts for UI feedback and by the demo binary's log.

use serde::{Deserialize, Serialize};

use crate::economy::upgrade::UpgradeKind;
use crate::game::state::BonusKind;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventData {
    /// A collectible was picked up (by the player or a tap)
    Collected {
        /// Collectible id
        id: u32,
        /// Gold granted after all multipliers
        gold: f64,
    },

    /// A hostile died to a tap or a soldier shot
    HostileSlain {
        /// Hostile id
        id: u32,
        /// Gold granted after all multipliers
        gold: f64,
        /// Experience granted after all multipliers
        xp: f64,
        /// Whether the killing blow was a critical hit
        crit: bool,
    },

    /// A hostile reached its objective and hurt the player
    Breached {
        /// Hostile id
        id: u32,
        /// Damage applied (before shield absorption)
        damage: f64,
    },

    /// The combo window elapsed with no hit
    ComboBroken {
        /// Length of the chain that just ended
        length: u32,
    },

    /// Experience crossed the threshold
    LevelUp {
        /// New player level
        level: u32,
    },

    /// A level-up rolled a timed bonus
    BonusActivated {
        /// Which multiplier the bonus boosts
        kind: BonusKind,
        /// Seconds the bonus lasts
        duration: f64,
    },

    /// A timed bonus ran out
    BonusExpired {
        /// Which multiplier returns to 1
        kind: BonusKind,
    },

    /// An upgrade was bought
    UpgradePurchased {
        /// What was bought
        kind: UpgradeKind,
        /// Gold debited
        cost: f64,
        /// Level after the purchase
        level: u32,
    },

    /// Health reached zero in a life-based variant
    PlayerDowned,

    /// The respawn delay elapsed; vitals refilled, field cleared
    PlayerRevived,
}

/// A simulation event with the frame it happened on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame counter value when the event occurred
    pub frame: u64,
    /// Event payload
    pub data: EventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: EventData) -> Self {
        Self { frame, data }
    }

    /// Collectible pickup event.
    pub fn collected(frame: u64, id: u32, gold: f64) -> Self {
        Self::new(frame, EventData::Collected { id, gold })
    }

    /// Hostile kill event.
    pub fn hostile_slain(frame: u64, id: u32, gold: f64, xp: f64, crit: bool) -> Self {
        Self::new(frame, EventData::HostileSlain { id, gold, xp, crit })
    }

    /// Breach event.
    pub fn breached(frame: u64, id: u32, damage: f64) -> Self {
        Self::new(frame, EventData::Breached { id, damage })
    }

    /// Combo break event.
    pub fn combo_broken(frame: u64, length: u32) -> Self {
        Self::new(frame, EventData::ComboBroken { length })
    }

    /// Level-up event.
    pub fn level_up(frame: u64, level: u32) -> Self {
        Self::new(frame, EventData::LevelUp { level })
    }

    /// Bonus activation event.
    pub fn bonus_activated(frame: u64, kind: BonusKind, duration: f64) -> Self {
        Self::new(frame, EventData::BonusActivated { kind, duration })
    }

    /// Bonus expiry event.
    pub fn bonus_expired(frame: u64, kind: BonusKind) -> Self {
        Self::new(frame, EventData::BonusExpired { kind })
    }

    /// Purchase event.
    pub fn upgrade_purchased(frame: u64, kind: UpgradeKind, cost: f64, level: u32) -> Self {
        Self::new(frame, EventData::UpgradePurchased { kind, cost, level })
    }

    /// Downed event.
    pub fn player_downed(frame: u64) -> Self {
        Self::new(frame, EventData::PlayerDowned)
    }

    /// Revive event.
    pub fn player_revived(frame: u64) -> Self {
        Self::new(frame, EventData::PlayerRevived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_carry_their_frame() {
        let event = GameEvent::collected(42, 7, 3.0);
        assert_eq!(event.frame, 42);
        assert_eq!(event.data, EventData::Collected { id: 7, gold: 3.0 });
    }

    #[test]
    fn test_events_serialize() {
        let event = GameEvent::level_up(100, 4);
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
