//! The combatant entity.
//!
//! `Unit` is plain data owned by a battlefield. Decision logic lives in
//! `warfront-ai`; these helpers only keep the hp/state invariant intact.

use serde::{Deserialize, Serialize};

use crate::enums::{UnitClass, UnitFate, UnitState};
use crate::types::{NationId, PlayerId, Position, UnitId};

/// Combat statistics, fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_hp: f64,
    pub attack: f64,
    pub defense: f64,
    /// Distance units per second.
    pub speed: f64,
    pub attack_range: f64,
    /// Seconds between strikes.
    pub attack_cooldown: f64,
    /// Multiplier on attack when striking the wall.
    pub siege_factor: f64,
}

/// What a unit is currently aiming at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Unit(UnitId),
    /// The defender's fortification; no unit id.
    Wall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub player: PlayerId,
    pub nation: NationId,
    pub class: UnitClass,
    pub state: UnitState,
    pub fate: UnitFate,
    pub stats: UnitStats,
    pub hp: f64,
    pub position: Position,
    pub target: Option<Target>,
    /// Seconds until the next strike is allowed.
    pub cooldown: f64,
    pub kills: u32,
}

impl Unit {
    pub fn new(
        id: UnitId,
        player: PlayerId,
        nation: NationId,
        class: UnitClass,
        stats: UnitStats,
        position: Position,
    ) -> Self {
        Self {
            id,
            player,
            nation,
            class,
            state: UnitState::Idle,
            fate: UnitFate::Fighting,
            stats,
            hp: stats.max_hp,
            position,
            target: None,
            cooldown: 0.0,
            kills: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != UnitState::Dead && self.hp > 0.0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.stats.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp / self.stats.max_hp).clamp(0.0, 1.0)
    }

    /// Whether `other` fights for a different nation.
    pub fn is_hostile_to(&self, other: &Unit) -> bool {
        self.nation != other.nation
    }

    /// Apply damage. Returns true if this strike killed the unit.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.state = UnitState::Dead;
            self.fate = UnitFate::Killed;
            self.target = None;
            return true;
        }
        false
    }

    /// Mark a successful withdrawal. Hp is kept for reporting.
    pub fn withdraw(&mut self) {
        self.state = UnitState::Dead;
        self.fate = UnitFate::Withdrew;
        self.target = None;
    }

    /// Order the unit off the field. No-op for dead units.
    pub fn order_retreat(&mut self) -> bool {
        if !self.is_alive() || self.state == UnitState::Retreating {
            return false;
        }
        self.state = UnitState::Retreating;
        self.target = None;
        true
    }
}
