//! Game State Definitions
//!
//! The single owned state struct the whole simulation mutates, plus the
//! entity records it contains. There are no ambient globals: everything
//! a frame touches lives here and is passed explicitly to `advance` and
//! `render`.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::economy::stats::DerivedStats;
use crate::economy::upgrade::UpgradeSet;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;

// =============================================================================
// PLAYER
// =============================================================================

/// State of the player avatar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current position
    pub position: Vec2,

    /// Orbit angle (orbital variants), radians
    pub orbit_angle: f64,

    /// Wing-flap phase, cosmetic
    pub wing_phase: f64,

    /// Current health, in [0, max_health]
    pub health: f64,

    /// Current shield, in [0, max_shield]; absorbs damage before health
    pub shield: f64,
}

/// Result of applying damage to the player.
#[derive(Clone, Copy, Debug)]
pub struct DamageOutcome {
    /// Portion soaked by the shield
    pub absorbed: f64,
    /// Health remaining afterwards
    pub health_after: f64,
}

impl PlayerState {
    /// Place the player at the screen center with full vitals.
    pub fn new(center: Vec2, stats: &DerivedStats) -> Self {
        Self {
            position: center,
            orbit_angle: 0.0,
            wing_phase: 0.0,
            health: stats.max_health,
            shield: stats.max_shield,
        }
    }

    /// Apply damage, shield first, then health; both floor at zero.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        let absorbed = self.shield.min(amount);
        self.shield -= absorbed;
        self.health = (self.health - (amount - absorbed)).max(0.0);
        DamageOutcome {
            absorbed,
            health_after: self.health,
        }
    }

    /// Heal up to the given maximum.
    pub fn heal(&mut self, amount: f64, max_health: f64) {
        self.health = (self.health + amount).min(max_health);
    }
}

// =============================================================================
// FIELD ENTITIES
// =============================================================================

/// A gold piece floating on the field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collectible {
    /// Unique id (monotonic counter)
    pub id: u32,
    /// Position
    pub position: Vec2,
    /// Value before coin-value/combo/bonus multipliers
    pub value: f64,
    /// Set once picked up; the piece then fades out
    pub collected: bool,
    /// Opacity in [0, 1]; the piece is culled at 0
    pub opacity: f64,
    /// Bob animation phase, cosmetic
    pub bob_phase: f64,
    /// Spin angle, cosmetic
    pub spin: f64,
}

/// A hostile marching on its objective.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hostile {
    /// Unique id (monotonic counter)
    pub id: u32,
    /// Position
    pub position: Vec2,
    /// Remaining hit points
    pub health: f64,
    /// Hit points at spawn
    pub max_health: f64,
    /// Steering speed, pixels/second
    pub speed: f64,
    /// Gold granted on a kill before multipliers
    pub gold_reward: f64,
    /// Experience granted on a kill before multipliers
    pub xp_reward: f64,
}

/// An auto-attacker on the deployment ring.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Soldier {
    /// Fixed post on the ring
    pub position: Vec2,
    /// Facing angle, radians in [-PI, PI]
    pub facing: f64,
    /// Seconds until the next shot is allowed
    pub cooldown: f64,
}

/// What a particle looks like. Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Pickup glitter
    Sparkle,
    /// Kill burst
    Burst,
    /// Soldier muzzle flash
    Shot,
}

/// A transient visual effect. No gameplay impact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Particle {
    /// Position
    pub position: Vec2,
    /// Velocity, pixels/second
    pub velocity: Vec2,
    /// Seconds until culled
    pub lifetime: f64,
    /// Visual kind
    pub kind: ParticleKind,
}

// =============================================================================
// COMBO & BONUS
// =============================================================================

/// Consecutive-hit counter with its countdown window.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ComboState {
    /// Consecutive hits inside the window
    pub count: u32,
    /// Seconds left before the chain breaks
    pub remaining: f64,
}

impl ComboState {
    /// Register a successful hit: grow the chain, restart the window.
    pub fn register(&mut self, window: f64) {
        self.count += 1;
        self.remaining = window;
    }

    /// Drop the chain back to nothing.
    pub fn reset(&mut self) {
        self.count = 0;
        self.remaining = 0.0;
    }
}

/// Which multiplier a timed bonus boosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Gold income and rewards
    Gold,
    /// Experience rewards
    Experience,
    /// Player movement speed
    Speed,
}

/// A temporary multiplier rolled on level-up.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimedBonus {
    /// Boosted quantity
    pub kind: BonusKind,
    /// Multiplier while active
    pub multiplier: f64,
    /// Seconds left
    pub remaining: f64,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of one running game variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Frames simulated so far
    pub frame: u64,

    /// Simulated seconds so far (monotonic, dt-driven)
    pub elapsed: f64,

    /// Gold balance, never negative
    pub gold: f64,

    /// Experience toward the next level
    pub experience: f64,

    /// Player level, starts at 1
    pub level: u32,

    /// The player avatar
    pub player: PlayerState,

    /// Gold pieces on the field
    pub collectibles: Vec<Collectible>,

    /// Hostiles on the field
    pub hostiles: Vec<Hostile>,

    /// Auto-attackers on the ring
    pub soldiers: Vec<Soldier>,

    /// Transient visual effects
    pub particles: Vec<Particle>,

    /// Consecutive-hit chain
    pub combo: ComboState,

    /// Active timed bonus, at most one
    pub bonus: Option<TimedBonus>,

    /// Derived quantities for the current levels
    pub stats: DerivedStats,

    /// Upgrade levels the variant sells
    pub upgrades: UpgradeSet,

    /// Elapsed time of the last ambient collectible spawn
    pub last_collectible_spawn: f64,

    /// Elapsed time of the last hostile spawn
    pub last_hostile_spawn: f64,

    /// Life-based variants: seconds left until respawn while downed
    pub downed_for: Option<f64>,

    /// Next collectible id
    next_collectible_id: u32,

    /// Next hostile id
    next_hostile_id: u32,

    /// Deterministic RNG (crit rolls, bonus rolls, spawn positions)
    #[serde(skip)]
    pub rng: GameRng,

    /// Events generated since the last take (cleared each simulate call)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state for a variant: level 1, empty field, full vitals.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let upgrades = UpgradeSet::from_defs(&config.upgrades);
        let stats = DerivedStats::recompute(config, &upgrades, 1);
        let player = PlayerState::new(config.center(), &stats);

        Self {
            frame: 0,
            elapsed: 0.0,
            gold: 0.0,
            experience: 0.0,
            level: 1,
            player,
            collectibles: Vec::new(),
            hostiles: Vec::new(),
            soldiers: Vec::new(),
            particles: Vec::new(),
            combo: ComboState::default(),
            bonus: None,
            stats,
            upgrades,
            last_collectible_spawn: 0.0,
            last_hostile_spawn: 0.0,
            downed_for: None,
            next_collectible_id: 0,
            next_hostile_id: 0,
            rng: GameRng::new(seed),
            pending_events: Vec::new(),
        }
    }

    /// Current reward multiplier from the combo chain.
    pub fn combo_multiplier(&self, config: &GameConfig) -> f64 {
        1.0 + self.combo.count as f64 * config.combo.k
    }

    /// Current multiplier for a bonus kind; 1 when no such bonus runs.
    pub fn bonus_multiplier(&self, kind: BonusKind) -> f64 {
        match self.bonus {
            Some(bonus) if bonus.kind == kind && bonus.remaining > 0.0 => bonus.multiplier,
            _ => 1.0,
        }
    }

    /// Add gold; non-positive amounts are ignored.
    pub fn add_gold(&mut self, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.gold += amount;
    }

    /// Add experience; non-positive amounts are ignored. Level-ups are
    /// resolved by the simulate pass, not here.
    pub fn add_experience(&mut self, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.experience += amount;
    }

    /// Drop a new collectible on the field.
    pub fn spawn_collectible(&mut self, position: Vec2, value: f64) -> u32 {
        let id = self.next_collectible_id;
        self.next_collectible_id += 1;
        let bob_phase = self.rng.next_range(0.0, std::f64::consts::TAU);
        let spin = self.rng.next_range(0.0, std::f64::consts::TAU);
        self.collectibles.push(Collectible {
            id,
            position,
            value,
            collected: false,
            opacity: 1.0,
            bob_phase,
            spin,
        });
        id
    }

    /// Field a new hostile.
    pub fn spawn_hostile(&mut self, position: Vec2, health: f64, speed: f64, config: &GameConfig) -> u32 {
        let id = self.next_hostile_id;
        self.next_hostile_id += 1;
        let (gold_reward, xp_reward) = match &config.hostiles {
            Some(h) => (h.gold_reward, h.xp_reward),
            None => (0.0, 0.0),
        };
        self.hostiles.push(Hostile {
            id,
            position,
            health,
            max_health: health,
            speed,
            gold_reward,
            xp_reward,
        });
        id
    }

    /// Number of uncollected pieces on the field.
    pub fn live_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.collected).count()
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
