//! Battlefield aggregate: one siege instance.
//!
//! Owns every unit ever spawned there (dead ones stay for reporting), the
//! factions with their admission pools, the wall, and the battle state
//! machine. Stored in `BattleManager`'s active map, never shared between
//! battlefields.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use warfront_ai::fsm::FieldGeometry;
use warfront_ai::profiles::base_stats;
use warfront_core::commands::Squad;
use warfront_core::config::BattleConfig;
use warfront_core::constants::{SPAWN_EDGE_FRACTION, SPAWN_SPREAD};
use warfront_core::enums::{BattleResult, BattleState, FactionRole, UnitClass};
use warfront_core::error::{BattleError, Result};
use warfront_core::types::{BattlefieldId, LocationId, NationId, PlayerId, Position, UnitId};
use warfront_core::unit::Unit;

use crate::faction::Faction;
use crate::pool::{AdmissionPool, QueuedSoldier};

/// Derive a battlefield's RNG seed from the run seed, so each battle's
/// rolls depend only on its own id.
pub fn battle_seed(seed: u64, id: BattlefieldId) -> u64 {
    seed ^ id.0.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Manager-wide unit id allocator. Monotonic, so each battlefield's unit
/// list stays sorted by id.
#[derive(Debug, Clone, Default)]
pub struct UnitIds {
    next: u64,
}

impl UnitIds {
    pub fn allocate(&mut self) -> UnitId {
        self.next += 1;
        UnitId(self.next)
    }
}

/// Where a deployment ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployOutcome {
    pub spawned: u32,
    pub queued: u32,
}

#[derive(Debug, Clone)]
pub struct Battlefield {
    pub id: BattlefieldId,
    pub location: LocationId,
    pub width: f64,
    pub height: f64,
    pub(crate) state: BattleState,
    pub(crate) result: BattleResult,
    pub(crate) started_at: Option<f64>,
    pub(crate) ended_at: Option<f64>,
    /// Simulation seconds spent Fighting.
    pub(crate) elapsed_secs: f64,
    pub(crate) wall_max_hp: f64,
    pub(crate) wall_hp: f64,
    pub(crate) factions: BTreeMap<NationId, Faction>,
    /// Sorted by id; never shrinks.
    pub(crate) units: Vec<Unit>,
    /// Every unit before this index is out of the fight.
    pub(crate) live_from: usize,
    /// Spawn jitter and hit rolls for this battlefield only.
    pub(crate) rng: ChaCha8Rng,
    pool_cap: usize,
    pool_batch: usize,
}

impl Battlefield {
    pub fn new(
        id: BattlefieldId,
        location: LocationId,
        attacker: NationId,
        defender: NationId,
        wall_hp: f64,
        config: &BattleConfig,
    ) -> Self {
        let wall = wall_hp.max(0.0);
        let mut battlefield = Self {
            id,
            location,
            width: config.width,
            height: config.height,
            state: BattleState::Preparing,
            result: BattleResult::Ongoing,
            started_at: None,
            ended_at: None,
            elapsed_secs: 0.0,
            wall_max_hp: wall,
            wall_hp: wall,
            factions: BTreeMap::new(),
            units: Vec::new(),
            live_from: 0,
            rng: ChaCha8Rng::seed_from_u64(battle_seed(config.seed, id)),
            pool_cap: config.pool_cap,
            pool_batch: config.pool_batch,
        };
        battlefield.insert_faction(attacker, FactionRole::Attacker);
        battlefield.insert_faction(defender, FactionRole::Defender);
        battlefield
    }

    fn insert_faction(&mut self, nation: NationId, role: FactionRole) {
        let mid_y = self.height / 2.0;
        let (spawn, retreat) = match role {
            FactionRole::Attacker => (
                Position::new(self.width * SPAWN_EDGE_FRACTION, mid_y),
                Position::new(0.0, mid_y),
            ),
            FactionRole::Defender => (
                Position::new(self.width * (1.0 - SPAWN_EDGE_FRACTION), mid_y),
                Position::new(self.width, mid_y),
            ),
            // Interveners arrive from the north edge.
            FactionRole::ThirdParty => (
                Position::new(self.width / 2.0, self.height * SPAWN_EDGE_FRACTION),
                Position::new(self.width / 2.0, 0.0),
            ),
        };
        let pool = AdmissionPool::new(self.pool_cap, self.pool_batch);
        self.factions
            .insert(nation, Faction::new(nation, role, spawn, retreat, pool));
    }

    // ---- Queries ----

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_fighting(&self) -> bool {
        self.state == BattleState::Fighting
    }

    pub fn result(&self) -> BattleResult {
        self.result
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<f64> {
        self.ended_at
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn wall_hp(&self) -> f64 {
        self.wall_hp
    }

    pub fn wall_max_hp(&self) -> f64 {
        self.wall_max_hp
    }

    pub fn wall_ratio(&self) -> f64 {
        if self.wall_max_hp <= 0.0 {
            return 0.0;
        }
        self.wall_hp / self.wall_max_hp
    }

    pub fn wall_standing(&self) -> bool {
        self.wall_max_hp > 0.0 && self.wall_hp > 0.0
    }

    pub fn geometry(&self) -> FieldGeometry {
        FieldGeometry {
            width: self.width,
            height: self.height,
            wall_standing: self.wall_standing(),
        }
    }

    pub fn factions(&self) -> impl Iterator<Item = &Faction> {
        self.factions.values()
    }

    pub fn faction(&self, nation: NationId) -> Option<&Faction> {
        self.factions.get(&nation)
    }

    pub fn faction_by_role(&self, role: FactionRole) -> Option<&Faction> {
        self.factions.values().find(|f| f.role == role)
    }

    pub fn attacker(&self) -> Option<&Faction> {
        self.faction_by_role(FactionRole::Attacker)
    }

    pub fn defender(&self) -> Option<&Faction> {
        self.faction_by_role(FactionRole::Defender)
    }

    /// Every unit ever spawned here, in spawn order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn live_units(&self) -> impl Iterator<Item = &Unit> {
        self.units[self.live_from..].iter().filter(|u| u.is_alive())
    }

    /// Move `live_from` past units that have died or withdrawn.
    pub(crate) fn skip_fallen(&mut self) {
        while self
            .units
            .get(self.live_from)
            .is_some_and(|u| !u.is_alive())
        {
            self.live_from += 1;
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.unit_index(id).map(|idx| &self.units[idx])
    }

    pub(crate) fn unit_index(&self, id: UnitId) -> Option<usize> {
        self.units.binary_search_by_key(&id, |u| u.id).ok()
    }

    // ---- Lifecycle ----

    /// Preparing → Fighting.
    pub fn start(&mut self, now: f64) -> Result<()> {
        if self.state != BattleState::Preparing {
            return Err(self.invalid(BattleState::Fighting));
        }
        self.state = BattleState::Fighting;
        self.started_at = Some(now);
        Ok(())
    }

    /// Fix the result and enter Settling. Fails if a result is already set.
    pub fn settle(&mut self, result: BattleResult, now: f64) -> Result<()> {
        if self.result.is_terminal() || !result.is_terminal() || self.state == BattleState::Ended {
            return Err(self.invalid(BattleState::Settling));
        }
        self.result = result;
        self.state = BattleState::Settling;
        self.ended_at = Some(now);
        Ok(())
    }

    /// Settling → Ended.
    pub fn close(&mut self) -> Result<()> {
        if self.state != BattleState::Settling {
            return Err(self.invalid(BattleState::Ended));
        }
        self.state = BattleState::Ended;
        Ok(())
    }

    fn invalid(&self, to: BattleState) -> BattleError {
        BattleError::InvalidTransition {
            battlefield: self.id,
            from: self.state,
            to,
        }
    }

    /// Add an intervening nation. Returns false if it already has a faction here.
    pub fn add_third_party(&mut self, nation: NationId) -> bool {
        if self.factions.contains_key(&nation) {
            return false;
        }
        self.insert_faction(nation, FactionRole::ThirdParty);
        true
    }

    // ---- Population ----

    /// Field each requested soldier if the pool has room, queue the rest.
    pub fn deploy(
        &mut self,
        player: PlayerId,
        nation: NationId,
        squads: &[Squad],
        ids: &mut UnitIds,
    ) -> Result<DeployOutcome> {
        let battlefield = self.id;
        let faction = self
            .factions
            .get_mut(&nation)
            .ok_or(BattleError::FactionNotFound {
                battlefield,
                nation,
            })?;
        faction.players.insert(player);

        let mut outcome = DeployOutcome::default();
        let mut admitted: Vec<UnitClass> = Vec::new();
        for squad in squads {
            for _ in 0..squad.count {
                if faction.pool.try_admit() {
                    admitted.push(squad.class);
                    outcome.spawned += 1;
                } else {
                    faction.pool.enqueue(QueuedSoldier {
                        player,
                        class: squad.class,
                    });
                    outcome.queued += 1;
                }
            }
        }

        for class in admitted {
            self.spawn_admitted(player, nation, class, ids);
        }
        debug!(
            %battlefield, %player, %nation,
            spawned = outcome.spawned, queued = outcome.queued,
            "deployment processed"
        );
        Ok(outcome)
    }

    /// Place a soldier whose pool slot has already been claimed.
    pub(crate) fn spawn_admitted(
        &mut self,
        player: PlayerId,
        nation: NationId,
        class: UnitClass,
        ids: &mut UnitIds,
    ) -> Option<UnitId> {
        let faction = self.factions.get_mut(&nation)?;
        faction.record_spawn();

        let jitter_x = self.rng.gen_range(-SPAWN_SPREAD..=SPAWN_SPREAD);
        let jitter_y = self.rng.gen_range(-SPAWN_SPREAD..=SPAWN_SPREAD);
        let position = Position::new(
            faction.spawn_point.x + jitter_x,
            faction.spawn_point.y + jitter_y,
        )
        .clamped(self.width, self.height);

        let id = ids.allocate();
        self.units
            .push(Unit::new(id, player, nation, class, base_stats(class), position));
        Some(id)
    }

    /// Order every live unit of `player` off the field and drop their queued
    /// soldiers. Returns the number of units now retreating.
    pub fn retreat_player(&mut self, player: PlayerId) -> u32 {
        for faction in self.factions.values_mut() {
            faction.pool.withdraw_player(player);
        }
        self.units[self.live_from..]
            .iter_mut()
            .filter(|u| u.player == player)
            .map(|u| u.order_retreat())
            .filter(|ordered| *ordered)
            .count() as u32
    }

    /// Advance the clock of a Fighting battlefield.
    pub(crate) fn advance_clock(&mut self, dt: f64) {
        self.elapsed_secs += dt;
    }
}
