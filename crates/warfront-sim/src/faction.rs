//! One belligerent side of a battlefield.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use warfront_core::enums::FactionRole;
use warfront_core::types::{NationId, PlayerId, Position};

use crate::pool::AdmissionPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub nation: NationId,
    pub role: FactionRole,
    pub spawn_point: Position,
    pub retreat_point: Position,
    /// Units ever placed on the field.
    pub total_deployed: u32,
    /// Units that left the field for good, killed or withdrawn.
    pub total_dead: u32,
    /// Subset of `total_dead` that withdrew alive.
    pub total_withdrawn: u32,
    pub players: BTreeSet<PlayerId>,
    pub pool: AdmissionPool,
}

impl Faction {
    pub fn new(
        nation: NationId,
        role: FactionRole,
        spawn_point: Position,
        retreat_point: Position,
        pool: AdmissionPool,
    ) -> Self {
        Self {
            nation,
            role,
            spawn_point,
            retreat_point,
            total_deployed: 0,
            total_dead: 0,
            total_withdrawn: 0,
            players: BTreeSet::new(),
            pool,
        }
    }

    /// Units currently on the field.
    pub fn alive(&self) -> u32 {
        self.total_deployed.saturating_sub(self.total_dead)
    }

    /// No one on the field and no one waiting to enter it.
    pub fn is_exhausted(&self) -> bool {
        self.alive() == 0 && self.pool.is_empty()
    }

    pub fn record_spawn(&mut self) {
        self.total_deployed += 1;
    }

    /// Count a unit leaving the field and free its pool slot.
    pub fn record_loss(&mut self, withdrew: bool) {
        if self.alive() == 0 {
            return;
        }
        self.total_dead += 1;
        if withdrew {
            self.total_withdrawn += 1;
        }
        self.pool.release();
    }
}
