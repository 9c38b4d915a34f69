//! Simulation constants and tuning parameters.
//!
//! These are the compile-time defaults behind `BattleConfig`.

// --- Scheduling ---

/// Combat tick period in simulation seconds (10 Hz).
pub const COMBAT_TICK_SECS: f64 = 0.1;

/// Admission pool refill period in simulation seconds.
pub const REFILL_TICK_SECS: f64 = 1.0;

/// Upper bound on the external time-scale multiplier.
pub const MAX_TIME_SCALE: f64 = 16.0;

// --- Battlefield ---

pub const BATTLEFIELD_WIDTH: f64 = 800.0;
pub const BATTLEFIELD_HEIGHT: f64 = 400.0;

/// Battles still running after this many seconds are won by the defender.
pub const MAX_BATTLE_DURATION_SECS: f64 = 1800.0;

/// Fraction of width the attacker advances toward.
pub const ATTACKER_ANCHOR_FRACTION: f64 = 0.7;

/// Fraction of width the defender advances toward.
pub const DEFENDER_ANCHOR_FRACTION: f64 = 0.3;

/// Attackers beyond this fraction of width may strike the wall.
pub const SIEGE_LINE_FRACTION: f64 = 0.85;

/// Where attackers gather while a wall is standing.
pub const WALL_LINE_FRACTION: f64 = 0.9;

/// Attacker spawn x as a fraction of width; defender spawns mirrored.
pub const SPAWN_EDGE_FRACTION: f64 = 0.05;

/// Half-height of the band units spawn in around their spawn point.
pub const SPAWN_SPREAD: f64 = 20.0;

/// Distance at which a unit counts as having reached an anchor.
pub const ANCHOR_ARRIVAL_RADIUS: f64 = 2.0;

// --- Admission ---

/// Maximum units a faction may field at once.
pub const POOL_CAP: usize = 1000;

/// Queued soldiers admitted per refill tick per faction.
pub const POOL_REFILL_BATCH: usize = 50;

// --- Targeting ---

/// Radius within which `select_target` considers enemies.
pub const ENGAGEMENT_RADIUS: f64 = 50.0;

/// Short scan radius used while advancing and to preempt siege.
pub const DETECTION_RADIUS: f64 = 30.0;

/// Attackers leave Attacking when the target drifts beyond range times this.
pub const DISENGAGE_RANGE_FACTOR: f64 = 1.2;

/// Archers back away when the target is closer than range times this.
pub const KITE_TRIGGER_FRACTION: f64 = 0.5;

/// Speed fraction archers use while backing away.
pub const KITE_SPEED_FACTOR: f64 = 0.5;

/// Distance from the retreat point at which a unit leaves the field.
pub const RETREAT_ARRIVAL_RADIUS: f64 = 5.0;

// --- Damage ---

/// Multiplier for a favourable matchup.
pub const COUNTER_MULTIPLIER: f64 = 1.5;

/// Multiplier for archers shooting at shield-bearers.
pub const SUPPRESSED_MULTIPLIER: f64 = 0.5;

/// Extra damage taken by units with their backs turned.
pub const RETREATING_DAMAGE_BONUS: f64 = 1.5;

pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;

/// Floor applied to every strike.
pub const MIN_DAMAGE: f64 = 1.0;

// --- Reports ---

/// Reports kept before the oldest is evicted.
pub const REPORT_CACHE_CAPACITY: usize = 32;
