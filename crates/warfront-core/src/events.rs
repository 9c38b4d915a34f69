//! Domain notifications published by the battle manager.

use serde::{Deserialize, Serialize};

use crate::enums::BattleResult;
use crate::types::{BattlefieldId, LocationId, NationId, PlayerId, ReportId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    BattleCreated {
        battlefield: BattlefieldId,
        location: LocationId,
    },
    BattleStarted {
        battlefield: BattlefieldId,
    },
    BattleEnded {
        battlefield: BattlefieldId,
        result: BattleResult,
        winner: Option<NationId>,
        report: ReportId,
    },
    /// `spawned` went straight onto the field, `queued` wait in the pool.
    SoldiersDeployed {
        battlefield: BattlefieldId,
        player: PlayerId,
        nation: NationId,
        spawned: u32,
        queued: u32,
    },
    PlayerRetreated {
        battlefield: BattlefieldId,
        player: PlayerId,
        units: u32,
    },
    ThirdPartyJoined {
        battlefield: BattlefieldId,
        nation: NationId,
    },
}

impl BattleEvent {
    pub fn battlefield(&self) -> BattlefieldId {
        match self {
            BattleEvent::BattleCreated { battlefield, .. }
            | BattleEvent::BattleStarted { battlefield }
            | BattleEvent::BattleEnded { battlefield, .. }
            | BattleEvent::SoldiersDeployed { battlefield, .. }
            | BattleEvent::PlayerRetreated { battlefield, .. }
            | BattleEvent::ThirdPartyJoined { battlefield, .. } => *battlefield,
        }
    }
}
