//! Snapshot system: builds a read-only `BattlefieldSnapshot`.
//!
//! This system never modifies the battlefield.

use warfront_core::state::{BattlefieldSnapshot, FactionView, UnitView};

use crate::battlefield::Battlefield;

pub fn build_snapshot(battlefield: &Battlefield) -> BattlefieldSnapshot {
    BattlefieldSnapshot {
        battlefield: battlefield.id,
        location: battlefield.location,
        state: battlefield.state(),
        result: battlefield.result(),
        elapsed_secs: battlefield.elapsed_secs(),
        width: battlefield.width,
        height: battlefield.height,
        wall_hp: battlefield.wall_hp(),
        wall_max_hp: battlefield.wall_max_hp(),
        wall_ratio: battlefield.wall_ratio(),
        factions: build_factions(battlefield),
        units: build_units(battlefield),
    }
}

fn build_factions(battlefield: &Battlefield) -> Vec<FactionView> {
    battlefield
        .factions()
        .map(|f| FactionView {
            nation: f.nation,
            role: f.role,
            alive: f.alive(),
            total_deployed: f.total_deployed,
            total_dead: f.total_dead,
            total_withdrawn: f.total_withdrawn,
            queued: f.pool.queued() as u32,
            players: f.players.iter().copied().collect(),
        })
        .collect()
}

fn build_units(battlefield: &Battlefield) -> Vec<UnitView> {
    battlefield
        .live_units()
        .map(|u| UnitView {
            id: u.id,
            player: u.player,
            nation: u.nation,
            class: u.class,
            state: u.state,
            position: u.position,
            hp_ratio: u.hp_fraction(),
            target: u.target,
        })
        .collect()
}
