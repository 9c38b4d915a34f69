//! End-condition evaluation and winner determination.
//!
//! Read-only: decides the result, the manager applies it.

use warfront_core::enums::{BattleResult, BattleState, FactionRole};
use warfront_core::types::NationId;

use crate::battlefield::Battlefield;

/// Check end conditions in priority order. Only Fighting battlefields can end.
///
/// A defender wipe does not end a siege: the attackers still have a wall to
/// bring down. It only decides open-field battles (no wall).
pub fn evaluate(battlefield: &Battlefield, max_duration_secs: f64) -> BattleResult {
    if battlefield.state != BattleState::Fighting {
        return BattleResult::Ongoing;
    }

    let siege = battlefield.wall_max_hp > 0.0;
    if siege && battlefield.wall_hp <= 0.0 {
        return BattleResult::AttackerWin;
    }

    let attacker_out = battlefield.attacker().map_or(true, |f| f.is_exhausted());
    let defender_out = battlefield.defender().map_or(true, |f| f.is_exhausted());
    let third_party_standing = battlefield
        .factions()
        .any(|f| f.role == FactionRole::ThirdParty && !f.is_exhausted());

    if attacker_out {
        if defender_out && third_party_standing {
            return BattleResult::ThirdPartyWin;
        }
        return BattleResult::DefenderWin;
    }

    if !siege && defender_out && !third_party_standing {
        return BattleResult::AttackerWin;
    }

    if battlefield.elapsed_secs >= max_duration_secs {
        return BattleResult::DefenderWin;
    }

    BattleResult::Ongoing
}

/// Nation credited with `result`. A third-party win goes to the intervener
/// with the most units still standing (lowest nation id on ties).
pub fn winner(battlefield: &Battlefield, result: BattleResult) -> Option<NationId> {
    match result {
        BattleResult::AttackerWin => battlefield.attacker().map(|f| f.nation),
        BattleResult::DefenderWin => battlefield.defender().map(|f| f.nation),
        BattleResult::ThirdPartyWin => battlefield
            .factions()
            .filter(|f| f.role == FactionRole::ThirdParty)
            .fold(None, |best: Option<(NationId, u32)>, f| match best {
                Some((_, alive)) if alive >= f.alive() => best,
                _ => Some((f.nation, f.alive())),
            })
            .map(|(nation, _)| nation),
        BattleResult::Ongoing | BattleResult::Draw => None,
    }
}
