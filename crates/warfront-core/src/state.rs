//! Battlefield snapshot: the read-only view polled by presentation layers.
//!
//! Snapshots are built on demand and are independent of the tick rate.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{BattlefieldId, LocationId, NationId, PlayerId, Position, UnitId};
use crate::unit::Target;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattlefieldSnapshot {
    pub battlefield: BattlefieldId,
    pub location: LocationId,
    pub state: BattleState,
    pub result: BattleResult,
    pub elapsed_secs: f64,
    pub width: f64,
    pub height: f64,
    pub wall_hp: f64,
    pub wall_max_hp: f64,
    /// Current / max wall hp, 0.0 when there is no wall.
    pub wall_ratio: f64,
    pub factions: Vec<FactionView>,
    /// Live units only, in spawn order.
    pub units: Vec<UnitView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionView {
    pub nation: NationId,
    pub role: FactionRole,
    pub alive: u32,
    pub total_deployed: u32,
    pub total_dead: u32,
    pub total_withdrawn: u32,
    pub queued: u32,
    pub players: Vec<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub player: PlayerId,
    pub nation: NationId,
    pub class: UnitClass,
    pub state: UnitState,
    pub position: Position,
    pub hp_ratio: f64,
    pub target: Option<Target>,
}
