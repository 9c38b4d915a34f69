//! Commands sent from the presentation layer to the battle manager.
//!
//! Commands are queued and processed at the next tick boundary, never mid-tick.

use serde::{Deserialize, Serialize};

use crate::enums::UnitClass;
use crate::types::{BattlefieldId, LocationId, NationId, PlayerId};

/// A number of soldiers of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    pub class: UnitClass,
    pub count: u32,
}

impl Squad {
    pub fn new(class: UnitClass, count: u32) -> Self {
        Self { class, count }
    }
}

/// All possible battle operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleCommand {
    // --- Lifecycle ---
    /// Open a battle at a location (returns the existing one if present).
    CreateBattle {
        location: LocationId,
        attacker: NationId,
        defender: NationId,
        wall_hp: f64,
    },
    StartBattle { battlefield: BattlefieldId },
    /// Terminate a battle from outside; an undecided battle ends in a draw.
    EndBattle { battlefield: BattlefieldId },

    // --- Participation ---
    DeploySoldiers {
        battlefield: BattlefieldId,
        player: PlayerId,
        nation: NationId,
        squads: Vec<Squad>,
    },
    /// Withdraw every live unit the player owns.
    PlayerRetreat {
        battlefield: BattlefieldId,
        player: PlayerId,
    },
    ThirdPartyJoin {
        battlefield: BattlefieldId,
        nation: NationId,
    },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
