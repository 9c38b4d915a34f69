//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Combatant archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitClass {
    /// Anti-cavalry infantry.
    Spearman,
    /// Heavy infantry, resistant to archers.
    ShieldBearer,
    /// Fast mounted troops, strong against shield-bearers.
    Cavalry,
    /// Ranged, fragile, countered by everyone.
    Archer,
}

impl UnitClass {
    pub const ALL: [UnitClass; 4] = [
        UnitClass::Spearman,
        UnitClass::ShieldBearer,
        UnitClass::Cavalry,
        UnitClass::Archer,
    ];

    pub fn is_ranged(self) -> bool {
        self == UnitClass::Archer
    }

    pub fn label(self) -> &'static str {
        match self {
            UnitClass::Spearman => "spearmen",
            UnitClass::ShieldBearer => "shield-bearers",
            UnitClass::Cavalry => "cavalry",
            UnitClass::Archer => "archers",
        }
    }
}

/// Per-unit behaviour state, re-evaluated every combat tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    /// Freshly admitted, not yet oriented.
    #[default]
    Idle,
    /// Walking toward the role anchor, scanning for enemies.
    Advancing,
    /// Pursuing a designated target.
    Moving,
    /// Striking a unit or the wall.
    Attacking,
    /// Withdrawing to the faction retreat point. Never attacks.
    Retreating,
    /// Terminal. Killed or withdrawn; see `UnitFate`.
    Dead,
}

/// Why a unit is (or is not yet) out of the fight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitFate {
    #[default]
    Fighting,
    /// Reduced to 0 hp.
    Killed,
    /// Reached the retreat point while Retreating.
    Withdrew,
}

/// Side a faction fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionRole {
    Attacker,
    Defender,
    ThirdParty,
}

/// Battlefield lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    /// Constructed, accepting deployments, not ticking.
    #[default]
    Preparing,
    Fighting,
    /// Result decided, report being built.
    Settling,
    Ended,
}

/// Outcome of a battle. Immutable once it leaves `Ongoing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    #[default]
    Ongoing,
    AttackerWin,
    DefenderWin,
    ThirdPartyWin,
    /// Ended externally before any side prevailed.
    Draw,
}

impl BattleResult {
    pub fn is_terminal(self) -> bool {
        self != BattleResult::Ongoing
    }
}
