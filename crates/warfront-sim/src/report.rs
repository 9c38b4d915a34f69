//! Post-battle reports and the bounded cache that keeps them.
//!
//! A report is built exactly once, from a battlefield that has a terminal
//! result, by walking every unit ever spawned there. Combat deaths and
//! successful withdrawals are tallied separately.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use warfront_core::enums::{BattleResult, FactionRole, UnitClass, UnitFate};
use warfront_core::types::{BattlefieldId, LocationId, NationId, PlayerId, ReportId};

use crate::battlefield::Battlefield;
use crate::collaborators::NationDirectory;
use crate::systems::judgement;

/// Counts for one group of soldiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub deployed: u32,
    /// Killed in combat.
    pub dead: u32,
    /// Left the field alive through a retreat.
    pub withdrawn: u32,
    /// Enemy units slain.
    pub kills: u32,
}

impl Tally {
    /// Still on the field when the battle ended.
    pub fn survived(&self) -> u32 {
        self.deployed.saturating_sub(self.dead + self.withdrawn)
    }

    fn absorb(&mut self, other: &Tally) {
        self.deployed += other.deployed;
        self.dead += other.dead;
        self.withdrawn += other.withdrawn;
        self.kills += other.kills;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionSummary {
    pub nation: NationId,
    pub role: FactionRole,
    pub totals: Tally,
    /// Soldiers still waiting in the pool at the end; never deployed.
    pub never_deployed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: PlayerId,
    pub nation: NationId,
    pub by_class: BTreeMap<UnitClass, Tally>,
}

impl PlayerSummary {
    pub fn totals(&self) -> Tally {
        let mut total = Tally::default();
        for tally in self.by_class.values() {
            total.absorb(tally);
        }
        total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub id: ReportId,
    pub battlefield: BattlefieldId,
    pub location: LocationId,
    pub result: BattleResult,
    pub winner: Option<NationId>,
    pub duration_secs: f64,
    pub wall_hp_before: f64,
    pub wall_hp_after: f64,
    pub factions: Vec<FactionSummary>,
    pub players: Vec<PlayerSummary>,
}

impl BattleReport {
    /// Aggregate a finished battlefield.
    pub fn build(id: ReportId, battlefield: &Battlefield) -> Self {
        let mut per_player: BTreeMap<(PlayerId, NationId), BTreeMap<UnitClass, Tally>> =
            BTreeMap::new();
        for unit in battlefield.units() {
            let tally = per_player
                .entry((unit.player, unit.nation))
                .or_default()
                .entry(unit.class)
                .or_default();
            tally.deployed += 1;
            tally.kills += unit.kills;
            match unit.fate {
                UnitFate::Killed => tally.dead += 1,
                UnitFate::Withdrew => tally.withdrawn += 1,
                UnitFate::Fighting => {}
            }
        }

        let players: Vec<PlayerSummary> = per_player
            .into_iter()
            .map(|((player, nation), by_class)| PlayerSummary {
                player,
                nation,
                by_class,
            })
            .collect();

        let factions = battlefield
            .factions()
            .map(|f| {
                let mut totals = Tally::default();
                for p in players.iter().filter(|p| p.nation == f.nation) {
                    totals.absorb(&p.totals());
                }
                FactionSummary {
                    nation: f.nation,
                    role: f.role,
                    totals,
                    never_deployed: f.pool.queued() as u32,
                }
            })
            .collect();

        let result = battlefield.result();
        Self {
            id,
            battlefield: battlefield.id,
            location: battlefield.location,
            result,
            winner: judgement::winner(battlefield, result),
            duration_secs: battlefield.elapsed_secs(),
            wall_hp_before: battlefield.wall_max_hp(),
            wall_hp_after: battlefield.wall_hp(),
            factions,
            players,
        }
    }

    pub fn faction(&self, nation: NationId) -> Option<&FactionSummary> {
        self.factions.iter().find(|f| f.nation == nation)
    }

    pub fn player(&self, player: PlayerId) -> Option<&PlayerSummary> {
        self.players.iter().find(|p| p.player == player)
    }

    /// Human-readable account of the battle.
    pub fn summary(&self, names: &dyn NationDirectory) -> String {
        let mut out = String::new();
        let verdict = match (self.result, self.winner) {
            (BattleResult::Draw, _) => "ended in a draw".to_string(),
            (_, Some(nation)) => format!("won by {}", names.display_name(nation)),
            (_, None) => "ended without a victor".to_string(),
        };
        let _ = writeln!(
            out,
            "Battle at {} {} after {:.0}s",
            self.location, verdict, self.duration_secs
        );
        if self.wall_hp_before > 0.0 {
            let _ = writeln!(
                out,
                "  Wall: {:.0} -> {:.0} hp",
                self.wall_hp_before, self.wall_hp_after
            );
        }
        for f in &self.factions {
            let _ = writeln!(
                out,
                "  {} ({:?}): {} deployed, {} killed, {} withdrew, {} survived",
                names.display_name(f.nation),
                f.role,
                f.totals.deployed,
                f.totals.dead,
                f.totals.withdrawn,
                f.totals.survived(),
            );
        }
        for p in &self.players {
            let t = p.totals();
            let _ = writeln!(
                out,
                "    {} for {}: {} deployed, {} lost, {} kills",
                p.player,
                names.display_name(p.nation),
                t.deployed,
                t.dead,
                t.kills
            );
            for (class, tally) in &p.by_class {
                let _ = writeln!(
                    out,
                    "      {}: {}/{} lost",
                    class.label(),
                    tally.dead,
                    tally.deployed
                );
            }
        }
        out
    }
}

/// Capacity-bounded report store; the oldest report is evicted first.
#[derive(Debug, Clone)]
pub struct ReportCache {
    capacity: usize,
    order: VecDeque<ReportId>,
    reports: HashMap<ReportId, BattleReport>,
}

impl ReportCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::new(),
            reports: HashMap::new(),
        }
    }

    /// Store a report, returning the one evicted to make room, if any.
    pub fn insert(&mut self, report: BattleReport) -> Option<BattleReport> {
        let mut evicted = None;
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                evicted = self.reports.remove(&oldest);
            }
        }
        self.order.push_back(report.id);
        self.reports.insert(report.id, report);
        evicted
    }

    pub fn get(&self, id: ReportId) -> Option<&BattleReport> {
        self.reports.get(&id)
    }

    /// Newest first.
    pub fn recent(&self) -> impl Iterator<Item = &BattleReport> {
        self.order.iter().rev().filter_map(|id| self.reports.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
