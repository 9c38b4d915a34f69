//! Damage and targeting calculator.
//!
//! Pure functions: no state beyond the RNG handed in for variance rolls.

use std::cmp::Ordering;

use rand::Rng;

use warfront_core::constants::*;
use warfront_core::enums::{UnitClass, UnitState};
use warfront_core::types::UnitId;
use warfront_core::unit::Unit;

use crate::profiles::{target_policy, TargetPolicy};

/// Matchup multiplier. The table is intentionally asymmetric: archers take
/// extra damage from everyone (including archers), while shield-bearers only
/// resist archers and gain no bonus of their own.
pub fn type_multiplier(attacker: UnitClass, defender: UnitClass) -> f64 {
    use UnitClass::*;
    match (attacker, defender) {
        (Archer, ShieldBearer) => SUPPRESSED_MULTIPLIER,
        (_, Archer) => COUNTER_MULTIPLIER,
        (Spearman, Cavalry) => COUNTER_MULTIPLIER,
        (Cavalry, ShieldBearer) => COUNTER_MULTIPLIER,
        _ => 1.0,
    }
}

/// Breakdown of a single strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    /// Uniform factor in `[DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_MAX]`.
    pub variance: f64,
    pub multiplier: f64,
    /// Final damage, never below `MIN_DAMAGE`.
    pub amount: f64,
}

pub fn roll_damage<R: Rng>(attacker: &Unit, defender: &Unit, rng: &mut R) -> DamageRoll {
    let base = attacker.stats.attack * 100.0 / (100.0 + defender.stats.defense);
    let multiplier = type_multiplier(attacker.class, defender.class);
    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..=DAMAGE_VARIANCE_MAX);

    let mut amount = base * multiplier * variance;
    if defender.state == UnitState::Retreating {
        amount *= RETREATING_DAMAGE_BONUS;
    }

    DamageRoll {
        variance,
        multiplier,
        amount: amount.max(MIN_DAMAGE),
    }
}

/// Damage `attacker` deals to `defender` with one strike.
pub fn compute_damage<R: Rng>(attacker: &Unit, defender: &Unit, rng: &mut R) -> f64 {
    roll_damage(attacker, defender, rng).amount
}

/// Damage one strike deals to a wall.
pub fn siege_damage(unit: &Unit) -> f64 {
    unit.stats.attack * unit.stats.siege_factor
}

/// Live units of other nations, with their distance from `unit`.
pub fn live_enemies<'a>(unit: &'a Unit, roster: &'a [Unit]) -> impl Iterator<Item = (&'a Unit, f64)> + 'a {
    roster
        .iter()
        .filter(move |other| other.is_alive() && unit.is_hostile_to(other))
        .map(move |other| (other, unit.position.distance_to(&other.position)))
}

/// Nearest live enemy within `radius`, if any.
pub fn nearest_enemy_within<'a>(unit: &Unit, roster: &'a [Unit], radius: f64) -> Option<&'a Unit> {
    roster
        .iter()
        .filter(|other| other.is_alive() && unit.is_hostile_to(other))
        .map(|other| (other, unit.position.distance_to(&other.position)))
        .filter(|(_, dist)| *dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(other, _)| other)
}

/// Pick a target among enemies inside `ENGAGEMENT_RADIUS` using the class policy.
///
/// One pass over the roster. `Prefer` ranks each enemy by its class's place
/// in the preference list (unlisted classes rank last), then by distance.
pub fn select_target(unit: &Unit, roster: &[Unit]) -> Option<UnitId> {
    let in_reach = live_enemies(unit, roster).filter(|(_, dist)| *dist <= ENGAGEMENT_RADIUS);

    let chosen = match target_policy(unit.class) {
        TargetPolicy::Prefer(classes) => {
            let rank = |enemy: &Unit| {
                classes
                    .iter()
                    .position(|c| *c == enemy.class)
                    .unwrap_or(classes.len())
            };
            in_reach.min_by(|a, b| rank(a.0).cmp(&rank(b.0)).then(a.1.total_cmp(&b.1)))
        }
        TargetPolicy::Weakest => in_reach.min_by(|a, b| {
            match a.0.hp_fraction().total_cmp(&b.0.hp_fraction()) {
                Ordering::Equal => a.1.total_cmp(&b.1),
                other => other,
            }
        }),
    };
    chosen.map(|(enemy, _)| enemy.id)
}
