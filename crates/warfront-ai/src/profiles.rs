//! Class-specific data tables.
//!
//! Consolidates per-class stats, retreat speed and targeting preference so
//! behaviour differences are looked up, not dispatched.

use warfront_core::enums::UnitClass;
use warfront_core::unit::UnitStats;

/// Base stats a freshly admitted soldier of `class` spawns with.
pub fn base_stats(class: UnitClass) -> UnitStats {
    match class {
        UnitClass::Spearman => UnitStats {
            max_hp: 100.0,
            attack: 12.0,
            defense: 10.0,
            speed: 20.0,
            attack_range: 5.0,
            attack_cooldown: 1.0,
            siege_factor: 0.5,
        },
        UnitClass::ShieldBearer => UnitStats {
            max_hp: 150.0,
            attack: 8.0,
            defense: 25.0,
            speed: 16.0,
            attack_range: 5.0,
            attack_cooldown: 1.2,
            siege_factor: 0.3,
        },
        UnitClass::Cavalry => UnitStats {
            max_hp: 120.0,
            attack: 15.0,
            defense: 12.0,
            speed: 35.0,
            attack_range: 6.0,
            attack_cooldown: 1.5,
            siege_factor: 0.2,
        },
        UnitClass::Archer => UnitStats {
            max_hp: 70.0,
            attack: 10.0,
            defense: 5.0,
            speed: 20.0,
            attack_range: 40.0,
            attack_cooldown: 1.5,
            siege_factor: 0.4,
        },
    }
}

/// Speed multiplier applied while Retreating. Cavalry fastest, heavy infantry slowest.
pub fn retreat_speed_factor(class: UnitClass) -> f64 {
    match class {
        UnitClass::Cavalry => 1.5,
        UnitClass::Archer => 1.2,
        UnitClass::Spearman => 1.0,
        UnitClass::ShieldBearer => 0.8,
    }
}

/// How a class picks among enemies inside the engagement radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPolicy {
    /// Nearest enemy of the first listed class present, else nearest of any class.
    Prefer(&'static [UnitClass]),
    /// Lowest hp fraction, ties broken by distance.
    Weakest,
}

pub fn target_policy(class: UnitClass) -> TargetPolicy {
    match class {
        UnitClass::Spearman => TargetPolicy::Prefer(&[UnitClass::Cavalry]),
        UnitClass::ShieldBearer => TargetPolicy::Prefer(&[]),
        UnitClass::Cavalry => TargetPolicy::Prefer(&[UnitClass::ShieldBearer, UnitClass::Archer]),
        UnitClass::Archer => TargetPolicy::Weakest,
    }
}
