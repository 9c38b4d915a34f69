//! Per-unit behaviour state machine.
//!
//! `evaluate` is a pure function of the unit, the battlefield roster and the
//! field geometry. It never mutates anything; the simulation applies the
//! returned `UnitDecision` (movement, state, target, strike) itself. Every
//! state is re-derived from scratch each tick, there is no event queue.

use rand::Rng;

use warfront_core::constants::*;
use warfront_core::enums::{FactionRole, UnitState};
use warfront_core::types::{Position, UnitId};
use warfront_core::unit::{Target, Unit};

use crate::damage::{compute_damage, nearest_enemy_within, select_target, siege_damage};
use crate::profiles::retreat_speed_factor;

/// Battlefield facts a unit needs to decide.
#[derive(Debug, Clone, Copy)]
pub struct FieldGeometry {
    pub width: f64,
    pub height: f64,
    /// A wall exists and still has hp.
    pub wall_standing: bool,
}

/// Input to the FSM for a single unit.
pub struct UnitContext<'a> {
    pub unit: &'a Unit,
    /// Units on the battlefield sorted by id. May include fallen units; a
    /// leading run of fallen units is usually trimmed off.
    pub roster: &'a [Unit],
    pub role: FactionRole,
    pub retreat_point: Position,
    pub field: FieldGeometry,
    pub dt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strike {
    Unit { target: UnitId, amount: f64 },
    Wall { amount: f64 },
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDecision {
    pub state: UnitState,
    pub position: Position,
    pub target: Option<Target>,
    pub cooldown: f64,
    pub strike: Option<Strike>,
    /// The unit reached its retreat point this tick.
    pub withdrew: bool,
    pub state_changed: bool,
}

impl UnitDecision {
    fn hold(unit: &Unit, cooldown: f64) -> Self {
        Self {
            state: unit.state,
            position: unit.position,
            target: unit.target,
            cooldown,
            strike: None,
            withdrew: false,
            state_changed: false,
        }
    }

    fn set(mut self, state: UnitState, target: Option<Target>) -> Self {
        self.state = state;
        self.target = target;
        self
    }

    /// Lock onto `enemy`, attacking straight away if it is already in range.
    fn engage(self, unit: &Unit, enemy: &Unit) -> Self {
        let in_range = unit.position.distance_to(&enemy.position) <= unit.stats.attack_range;
        let state = if in_range {
            UnitState::Attacking
        } else {
            UnitState::Moving
        };
        self.set(state, Some(Target::Unit(enemy.id)))
    }
}

/// Evaluate the FSM for one unit.
pub fn evaluate<R: Rng>(ctx: &UnitContext<'_>, rng: &mut R) -> UnitDecision {
    let unit = ctx.unit;
    let cooldown = (unit.cooldown - ctx.dt).max(0.0);
    let hold = UnitDecision::hold(unit, cooldown);

    if !unit.is_alive() {
        return hold;
    }

    let mut decision = match unit.state {
        UnitState::Idle => evaluate_idle(ctx, hold),
        UnitState::Advancing => evaluate_advancing(ctx, hold),
        UnitState::Moving => evaluate_moving(ctx, hold),
        UnitState::Attacking => evaluate_attacking(ctx, hold, rng),
        UnitState::Retreating => evaluate_retreating(ctx, hold),
        UnitState::Dead => hold,
    };
    decision.state_changed = decision.state != unit.state;
    decision
}

fn evaluate_idle(ctx: &UnitContext<'_>, hold: UnitDecision) -> UnitDecision {
    match select_target(ctx.unit, ctx.roster) {
        Some(id) => hold.set(UnitState::Moving, Some(Target::Unit(id))),
        None => hold.set(UnitState::Advancing, None),
    }
}

fn evaluate_advancing(ctx: &UnitContext<'_>, hold: UnitDecision) -> UnitDecision {
    let unit = ctx.unit;

    // Archers hold fire until something is actually in range so melee
    // cannot bait them into closing the distance.
    let scan = if unit.class.is_ranged() {
        unit.stats.attack_range
    } else {
        DETECTION_RADIUS.max(unit.stats.attack_range)
    };
    if let Some(enemy) = nearest_enemy_within(unit, ctx.roster, scan) {
        return hold.engage(unit, enemy);
    }

    if ctx.role == FactionRole::Attacker
        && ctx.field.wall_standing
        && unit.position.x > ctx.field.width * SIEGE_LINE_FRACTION
    {
        return hold.set(UnitState::Attacking, Some(Target::Wall));
    }

    let anchor = advance_anchor(ctx.role, &ctx.field);
    if unit.position.distance_to(&anchor) <= ANCHOR_ARRIVAL_RADIUS {
        // Nothing left to walk toward: hunt the nearest enemy anywhere.
        return match nearest_enemy_within(unit, ctx.roster, f64::INFINITY) {
            Some(enemy) => hold.set(UnitState::Moving, Some(Target::Unit(enemy.id))),
            None => hold.set(UnitState::Advancing, None),
        };
    }

    let mut decision = hold.set(UnitState::Advancing, None);
    decision.position = unit
        .position
        .step_toward(&anchor, unit.stats.speed * ctx.dt)
        .clamped(ctx.field.width, ctx.field.height);
    decision
}

fn evaluate_moving(ctx: &UnitContext<'_>, hold: UnitDecision) -> UnitDecision {
    let unit = ctx.unit;

    let Some(target) = tracked_enemy(ctx) else {
        return match select_target(unit, ctx.roster) {
            Some(id) => hold.set(UnitState::Moving, Some(Target::Unit(id))),
            None => hold.set(UnitState::Advancing, None),
        };
    };

    // Archers stop as soon as they are in range rather than closing further.
    if unit.position.distance_to(&target.position) <= unit.stats.attack_range {
        return hold.set(UnitState::Attacking, Some(Target::Unit(target.id)));
    }

    let mut decision = hold.set(UnitState::Moving, Some(Target::Unit(target.id)));
    decision.position = unit
        .position
        .step_toward(&target.position, unit.stats.speed * ctx.dt)
        .clamped(ctx.field.width, ctx.field.height);
    decision
}

fn evaluate_attacking<R: Rng>(
    ctx: &UnitContext<'_>,
    hold: UnitDecision,
    rng: &mut R,
) -> UnitDecision {
    let unit = ctx.unit;

    match unit.target {
        Some(Target::Wall) => {
            if !ctx.field.wall_standing {
                return hold.set(UnitState::Advancing, None);
            }
            let mut decision = hold;
            if decision.cooldown <= 0.0 {
                decision.strike = Some(Strike::Wall {
                    amount: siege_damage(unit),
                });
                decision.cooldown = unit.stats.attack_cooldown;
            }
            // Any enemy that comes close preempts the siege.
            let scan = DETECTION_RADIUS.max(unit.stats.attack_range);
            match nearest_enemy_within(unit, ctx.roster, scan) {
                Some(enemy) => decision.engage(unit, enemy),
                None => decision,
            }
        }
        Some(Target::Unit(_)) => {
            let Some(target) = tracked_enemy(ctx) else {
                return hold.set(UnitState::Advancing, None);
            };

            let dist = unit.position.distance_to(&target.position);
            if dist > unit.stats.attack_range * DISENGAGE_RANGE_FACTOR {
                return hold.set(UnitState::Moving, Some(Target::Unit(target.id)));
            }

            let mut decision = hold;
            if decision.cooldown <= 0.0 {
                decision.strike = Some(Strike::Unit {
                    target: target.id,
                    amount: compute_damage(unit, target, rng),
                });
                decision.cooldown = unit.stats.attack_cooldown;
            }

            if unit.class.is_ranged() && dist < unit.stats.attack_range * KITE_TRIGGER_FRACTION {
                decision.position = unit
                    .position
                    .step_away(&target.position, unit.stats.speed * KITE_SPEED_FACTOR * ctx.dt)
                    .clamped(ctx.field.width, ctx.field.height);
            }
            decision
        }
        None => hold.set(UnitState::Advancing, None),
    }
}

fn evaluate_retreating(ctx: &UnitContext<'_>, hold: UnitDecision) -> UnitDecision {
    let unit = ctx.unit;
    let step = unit.stats.speed * retreat_speed_factor(unit.class) * ctx.dt;

    let mut decision = hold.set(UnitState::Retreating, None);
    decision.position = unit
        .position
        .step_toward(&ctx.retreat_point, step)
        .clamped(ctx.field.width, ctx.field.height);

    if decision.position.distance_to(&ctx.retreat_point) <= RETREAT_ARRIVAL_RADIUS {
        decision.state = UnitState::Dead;
        decision.withdrew = true;
    }
    decision
}

/// The unit's current unit target, if it still exists, lives, and is hostile.
/// A dangling id resolves to `None` so the caller can re-target.
fn tracked_enemy<'a>(ctx: &UnitContext<'a>) -> Option<&'a Unit> {
    let Some(Target::Unit(id)) = ctx.unit.target else {
        return None;
    };
    let idx = ctx.roster.binary_search_by_key(&id, |u| u.id).ok()?;
    let target = &ctx.roster[idx];
    (target.is_alive() && ctx.unit.is_hostile_to(target)).then_some(target)
}

/// Point a unit walks toward while Advancing.
pub fn advance_anchor(role: FactionRole, field: &FieldGeometry) -> Position {
    let mid_y = field.height / 2.0;
    match role {
        FactionRole::Attacker if field.wall_standing => {
            Position::new(field.width * WALL_LINE_FRACTION, mid_y)
        }
        FactionRole::Attacker => Position::new(field.width * ATTACKER_ANCHOR_FRACTION, mid_y),
        FactionRole::Defender => Position::new(field.width * DEFENDER_ANCHOR_FRACTION, mid_y),
        FactionRole::ThirdParty => Position::new(field.width / 2.0, mid_y),
    }
}
