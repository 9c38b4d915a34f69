//! Combat system: advances every live unit by one tick.
//!
//! Calls the unit FSM from warfront-ai for each live unit, in spawn order,
//! then applies the decision immediately so later units see the results
//! (a unit killed earlier in the tick does not act). Rolls come from the
//! battlefield's own RNG, and units before the fallen prefix are skipped.

use tracing::trace;

use warfront_ai::fsm::{evaluate, Strike, UnitContext, UnitDecision};
use warfront_core::unit::Target;

use crate::battlefield::Battlefield;

/// What happened during one combat tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatTally {
    pub acted: u32,
    pub killed: u32,
    pub withdrawn: u32,
    pub wall_strikes: u32,
}

/// Run the combat system on a Fighting battlefield.
pub fn run(battlefield: &mut Battlefield, dt: f64) -> CombatTally {
    let mut tally = CombatTally::default();
    battlefield.skip_fallen();
    let live_from = battlefield.live_from;

    for idx in live_from..battlefield.units.len() {
        if !battlefield.units[idx].is_alive() {
            continue;
        }
        let nation = battlefield.units[idx].nation;
        // A unit whose faction vanished cannot be evaluated; leave it be.
        let Some((role, retreat_point)) = battlefield
            .factions
            .get(&nation)
            .map(|f| (f.role, f.retreat_point))
        else {
            continue;
        };

        let field = battlefield.geometry();
        let decision = {
            let ctx = UnitContext {
                unit: &battlefield.units[idx],
                roster: &battlefield.units[live_from..],
                role,
                retreat_point,
                field,
                dt,
            };
            evaluate(&ctx, &mut battlefield.rng)
        };

        tally.acted += 1;
        apply(battlefield, idx, decision, &mut tally);
    }

    trace!(
        battlefield = %battlefield.id,
        acted = tally.acted,
        killed = tally.killed,
        withdrawn = tally.withdrawn,
        wall_hp = battlefield.wall_hp,
        "combat tick"
    );
    tally
}

fn apply(battlefield: &mut Battlefield, idx: usize, decision: UnitDecision, tally: &mut CombatTally) {
    let unit = &mut battlefield.units[idx];
    unit.position = decision.position;
    unit.cooldown = decision.cooldown;
    unit.target = decision.target;

    if decision.withdrew {
        unit.withdraw();
        let nation = unit.nation;
        if let Some(faction) = battlefield.factions.get_mut(&nation) {
            faction.record_loss(true);
        }
        tally.withdrawn += 1;
        return;
    }
    unit.state = decision.state;

    match decision.strike {
        Some(Strike::Wall { amount }) => {
            battlefield.wall_hp = (battlefield.wall_hp - amount).max(0.0);
            tally.wall_strikes += 1;
        }
        Some(Strike::Unit { target, amount }) => {
            let Some(victim_idx) = battlefield.unit_index(target) else {
                return;
            };
            let victim = &mut battlefield.units[victim_idx];
            if !victim.take_damage(amount) {
                return;
            }
            let victim_nation = victim.nation;
            if let Some(faction) = battlefield.factions.get_mut(&victim_nation) {
                faction.record_loss(false);
            }

            let striker = &mut battlefield.units[idx];
            striker.kills += 1;
            if striker.target == Some(Target::Unit(target)) {
                striker.target = None;
            }
            tally.killed += 1;
        }
        None => {}
    }
}
