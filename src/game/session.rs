//! Game Session
//!
//! `Game` owns one variant's state, its config, and the injected store.
//! It restores persisted counters on startup (malformed values fall back
//! to the documented defaults), flushes them after every simulate call
//! and purchase, and keeps render strictly after persistence within a
//! frame.

use tracing::{debug, info};

use crate::economy::stats::DerivedStats;
use crate::economy::upgrade::UpgradeKind;
use crate::game::config::GameConfig;
use crate::game::events::{EventData, GameEvent};
use crate::game::input::FrameInput;
use crate::game::soldier;
use crate::game::state::GameState;
use crate::game::tick;
use crate::persist::{keys, Store};
use crate::render::{render, Surface};

/// One running game: state + config + persistence backend.
pub struct Game<S: Store> {
    /// Simulation state, readable by hosts between frames
    pub state: GameState,
    config: GameConfig,
    store: S,
}

impl<S: Store> Game<S> {
    /// Start a session, restoring whatever the store remembers.
    ///
    /// Missing or malformed counters default to a fresh game: 0 gold,
    /// 0 experience, level 1, upgrade levels 0, full vitals.
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let mut state = GameState::new(&config, seed);

        state.gold = store.get_f64_or(keys::GOLD, 0.0);
        state.experience = store.get_f64_or(keys::EXPERIENCE, 0.0);
        state.level = store.get_u32_or(keys::LEVEL, 1).max(1);

        for def in &config.upgrades {
            let level = store.get_u32_or(def.kind.storage_key(), 0);
            state.upgrades.set_level(def.kind, level);
        }

        state.stats = DerivedStats::recompute(&config, &state.upgrades, state.level);

        if config.vitals.persist {
            state.player.health = store
                .get_f64_or(keys::HEALTH, state.stats.max_health)
                .min(state.stats.max_health);
            state.player.shield = store
                .get_f64_or(keys::SHIELD, state.stats.max_shield)
                .min(state.stats.max_shield);
        } else {
            state.player.health = state.stats.max_health;
            state.player.shield = state.stats.max_shield;
        }

        soldier::sync_population(&mut state, &config);

        info!(
            variant = config.name,
            gold = state.gold,
            level = state.level,
            "session restored"
        );

        Self {
            state,
            config,
            store,
        }
    }

    /// The variant this session runs.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The injected store (e.g. to flush a file-backed one).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down, handing the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Advance the simulation and persist the mutated counters.
    ///
    /// All store writes complete before this returns, so a render issued
    /// afterwards observes fully committed state.
    pub fn simulate(&mut self, input: &FrameInput, dt: f64) -> Vec<GameEvent> {
        let events = tick::advance(&mut self.state, input, dt, &self.config);
        self.persist_counters();

        for event in &events {
            match &event.data {
                EventData::LevelUp { level } => {
                    debug!(level, "level up");
                }
                EventData::BonusActivated { kind, duration } => {
                    debug!(?kind, duration, "bonus activated");
                }
                EventData::PlayerDowned => {
                    info!(frame = event.frame, "player downed");
                }
                EventData::PlayerRevived => {
                    info!(frame = event.frame, "player revived");
                }
                _ => {}
            }
        }

        events
    }

    /// One full frame: simulate, then render. Render is a pure read.
    pub fn tick(
        &mut self,
        input: &FrameInput,
        dt: f64,
        surface: &mut impl Surface,
    ) -> Vec<GameEvent> {
        let events = self.simulate(input, dt);
        render(&self.state, &self.config, surface);
        events
    }

    /// Buy an upgrade. Silent no-op (returns false) when gold is short
    /// or the variant does not sell the kind; on success every derived
    /// stat is recomputed from scratch and the garrison resyncs.
    pub fn purchase(&mut self, kind: UpgradeKind) -> bool {
        let Some(receipt) = self
            .state
            .upgrades
            .try_purchase(kind, &mut self.state.gold)
        else {
            return false;
        };

        self.state.stats =
            DerivedStats::recompute(&self.config, &self.state.upgrades, self.state.level);
        soldier::sync_population(&mut self.state, &self.config);

        let event =
            GameEvent::upgrade_purchased(self.state.frame, kind, receipt.cost, receipt.new_level);
        self.state.push_event(event);

        self.store
            .set_u32(kind.storage_key(), receipt.new_level);
        self.persist_counters();

        debug!(
            upgrade = %kind,
            cost = receipt.cost,
            level = receipt.new_level,
            "upgrade purchased"
        );
        true
    }

    /// Write every persisted scalar counter.
    fn persist_counters(&mut self) {
        self.store.set_f64(keys::GOLD, self.state.gold);
        self.store.set_f64(keys::EXPERIENCE, self.state.experience);
        self.store.set_u32(keys::LEVEL, self.state.level);

        if self.config.vitals.persist {
            self.store.set_f64(keys::HEALTH, self.state.player.health);
            self.store.set_f64(keys::SHIELD, self.state.player.shield);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
