//! Refill system: backfills each faction's field from its admission pool.
//!
//! Runs on the slow tick. Each faction admits at most one batch, limited by
//! the free slots its casualties have opened.

use tracing::debug;

use warfront_core::types::NationId;

use crate::battlefield::{Battlefield, UnitIds};
use crate::pool::QueuedSoldier;

/// Returns the number of soldiers placed on the field.
pub fn run(battlefield: &mut Battlefield, ids: &mut UnitIds) -> u32 {
    let batches: Vec<(NationId, Vec<QueuedSoldier>)> = battlefield
        .factions
        .values_mut()
        .map(|f| (f.nation, f.pool.take_batch()))
        .filter(|(_, batch)| !batch.is_empty())
        .collect();

    let mut spawned = 0;
    for (nation, batch) in batches {
        let count = batch.len();
        for soldier in batch {
            if battlefield
                .spawn_admitted(soldier.player, nation, soldier.class, ids)
                .is_some()
            {
                spawned += 1;
            }
        }
        debug!(battlefield = %battlefield.id, %nation, count, "pool refill");
    }
    spawned
}
