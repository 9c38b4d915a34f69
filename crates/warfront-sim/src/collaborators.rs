//! Seams to systems outside the battle core.
//!
//! The manager receives these at construction instead of reaching for
//! global singletons, so tests can drive it with fakes.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use warfront_core::commands::Squad;
use warfront_core::events::BattleEvent;
use warfront_core::types::{NationId, PlayerId};

/// Economy check run before soldiers are deployed.
pub trait ResourceGate: Send {
    /// Deduct the cost of `squads` from `player`. Returns false, deducting
    /// nothing, if the player cannot afford it.
    fn try_commit(&mut self, player: PlayerId, nation: NationId, squads: &[Squad]) -> bool;
}

/// Cosmetic nation names for report text.
pub trait NationDirectory {
    fn display_name(&self, nation: NationId) -> String;
}

/// Receives domain notifications as they happen.
pub trait EventSink: Send {
    fn publish(&mut self, event: &BattleEvent);
}

/// Every deployment is free.
#[derive(Debug, Default)]
pub struct Unmetered;

impl ResourceGate for Unmetered {
    fn try_commit(&mut self, _player: PlayerId, _nation: NationId, _squads: &[Squad]) -> bool {
        true
    }
}

/// Names nations by id.
#[derive(Debug, Default)]
pub struct NumericNames;

impl NationDirectory for NumericNames {
    fn display_name(&self, nation: NationId) -> String {
        nation.to_string()
    }
}

impl<S: std::hash::BuildHasher> NationDirectory for std::collections::HashMap<NationId, String, S> {
    fn display_name(&self, nation: NationId) -> String {
        self.get(&nation)
            .cloned()
            .unwrap_or_else(|| nation.to_string())
    }
}

/// Drops every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: &BattleEvent) {}
}

/// Forwards events over a channel; a closed receiver is ignored.
impl EventSink for Sender<BattleEvent> {
    fn publish(&mut self, event: &BattleEvent) {
        let _ = self.send(event.clone());
    }
}

/// Shared in-memory log, cloneable so a test can keep a handle.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<BattleEvent>>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: &BattleEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Per-player budget of soldiers; used by tests and the demo host.
#[derive(Debug, Clone, Default)]
pub struct SoldierBudget {
    remaining: std::collections::HashMap<PlayerId, u32>,
}

impl SoldierBudget {
    pub fn with_allowance(mut self, player: PlayerId, soldiers: u32) -> Self {
        self.remaining.insert(player, soldiers);
        self
    }

    pub fn remaining(&self, player: PlayerId) -> u32 {
        self.remaining.get(&player).copied().unwrap_or(0)
    }
}

impl ResourceGate for SoldierBudget {
    fn try_commit(&mut self, player: PlayerId, _nation: NationId, squads: &[Squad]) -> bool {
        // Summed wide; a total past u32::MAX can never be afforded.
        let cost: u64 = squads.iter().map(|s| u64::from(s.count)).sum();
        match (self.remaining.get_mut(&player), u32::try_from(cost)) {
            (Some(left), Ok(cost)) if *left >= cost => {
                *left -= cost;
                true
            }
            _ => false,
        }
    }
}
