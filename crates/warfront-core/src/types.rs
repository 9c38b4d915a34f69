//! Identifiers, battlefield geometry and simulation time.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Unique combatant id. Allocated monotonically by the battle manager,
    /// so units within one battlefield are always stored in ascending id order.
    UnitId(u64),
    "unit#"
);
id_type!(
    /// Owning player (the account issuing deploy/retreat commands).
    PlayerId(u64),
    "player#"
);
id_type!(
    /// Nation; one faction per nation per battlefield.
    NationId(u32),
    "nation#"
);
id_type!(
    /// Siege target / map location hosting at most one battle.
    LocationId(u32),
    "location#"
);
id_type!(BattlefieldId(u64), "battle#");
id_type!(ReportId(u64), "report#");

/// 2D position on a battlefield. x grows from the attacker's edge toward
/// the wall, y grows from the north edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Move up to `max_step` toward `target`, stopping on it rather than overshooting.
    pub fn step_toward(&self, target: &Position, max_step: f64) -> Position {
        let from = self.to_vec();
        let delta = target.to_vec() - from;
        let dist = delta.length();
        if dist <= max_step || dist <= f64::EPSILON {
            return *target;
        }
        Position::from_vec(from + delta / dist * max_step)
    }

    /// Move `step` directly away from `threat`.
    pub fn step_away(&self, threat: &Position, step: f64) -> Position {
        let from = self.to_vec();
        let away = (from - threat.to_vec()).normalize_or_zero();
        Position::from_vec(from + away * step)
    }

    /// Clamp into the `[0, width] x [0, height]` rectangle.
    pub fn clamped(&self, width: f64, height: f64) -> Position {
        Position::new(self.x.clamp(0.0, width), self.y.clamp(0.0, height))
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Combat ticks elapsed.
    pub tick: u64,
    /// Elapsed simulation time in seconds (already time-scaled).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
