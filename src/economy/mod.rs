//! Progression and Economy
//!
//! Upgrade catalog, exponential cost curves, and the full derived-stat
//! recompute that runs after every purchase and level-up.

pub mod stats;
pub mod upgrade;

pub use stats::DerivedStats;
pub use upgrade::{PurchaseReceipt, Upgrade, UpgradeDef, UpgradeKind, UpgradeSet};
