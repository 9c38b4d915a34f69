//! Battle manager, the entry point of the simulation.
//!
//! `BattleManager` owns every active battlefield, processes queued
//! `BattleCommand`s, drives the combat and refill ticks from real elapsed
//! time, and finalizes battles into cached reports. Completely headless,
//! enabling deterministic testing.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::{debug, info, warn};

use warfront_core::commands::{BattleCommand, Squad};
use warfront_core::config::BattleConfig;
use warfront_core::constants::MAX_TIME_SCALE;
use warfront_core::enums::BattleResult;
use warfront_core::error::{BattleError, Result};
use warfront_core::events::BattleEvent;
use warfront_core::state::BattlefieldSnapshot;
use warfront_core::types::{
    BattlefieldId, LocationId, NationId, PlayerId, ReportId, SimTime, UnitId,
};
use warfront_core::unit::Unit;

use crate::battlefield::{Battlefield, DeployOutcome, UnitIds};
use crate::collaborators::{
    EventSink, NationDirectory, NumericNames, ResourceGate, Unmetered,
};
use crate::report::{BattleReport, ReportCache};
use crate::systems;

/// Smallest tick period accepted from configuration.
const MIN_TICK_SECS: f64 = 1e-3;

pub struct BattleManager {
    config: BattleConfig,
    battlefields: BTreeMap<BattlefieldId, Battlefield>,
    by_location: HashMap<LocationId, BattlefieldId>,
    next_battlefield: u64,
    next_report: u64,
    unit_ids: UnitIds,
    clock: SimTime,
    combat_tick_secs: f64,
    refill_tick_secs: f64,
    combat_accumulator: f64,
    refill_accumulator: f64,
    time_scale: f64,
    paused: bool,
    reports: ReportCache,
    command_queue: VecDeque<BattleCommand>,
    /// Filled only while no sink is installed.
    events: Vec<BattleEvent>,
    gate: Box<dyn ResourceGate>,
    sink: Option<Box<dyn EventSink>>,
    names: Box<dyn NationDirectory + Send>,
}

impl BattleManager {
    /// Manager with free deployments and no external event listener.
    /// Events are buffered until `drain_events`.
    pub fn new(config: BattleConfig) -> Self {
        Self::build(config, Box::new(Unmetered), None)
    }

    /// Manager that publishes every event to `sink` and buffers nothing.
    pub fn with_collaborators(
        config: BattleConfig,
        gate: Box<dyn ResourceGate>,
        sink: Box<dyn EventSink>,
    ) -> Self {
        Self::build(config, gate, Some(sink))
    }

    fn build(
        config: BattleConfig,
        gate: Box<dyn ResourceGate>,
        sink: Option<Box<dyn EventSink>>,
    ) -> Self {
        Self {
            battlefields: BTreeMap::new(),
            by_location: HashMap::new(),
            next_battlefield: 0,
            next_report: 0,
            unit_ids: UnitIds::default(),
            clock: SimTime::default(),
            combat_tick_secs: config.combat_tick_secs.max(MIN_TICK_SECS),
            refill_tick_secs: config.refill_tick_secs.max(MIN_TICK_SECS),
            combat_accumulator: 0.0,
            refill_accumulator: 0.0,
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            paused: false,
            reports: ReportCache::new(config.report_capacity),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            gate,
            sink,
            names: Box::new(NumericNames),
            config,
        }
    }

    /// Replace the directory used to name nations in report summaries.
    pub fn set_nation_directory(&mut self, names: Box<dyn NationDirectory + Send>) {
        self.names = names;
    }

    // ---- Lifecycle ----

    /// Open a battle at `location`, or return the one already there.
    pub fn create_battle(
        &mut self,
        location: LocationId,
        attacker: NationId,
        defender: NationId,
        wall_hp: f64,
    ) -> BattlefieldId {
        if let Some(&existing) = self.by_location.get(&location) {
            debug!(%location, battlefield = %existing, "battle already open at location");
            return existing;
        }

        self.next_battlefield += 1;
        let id = BattlefieldId(self.next_battlefield);
        let battlefield = Battlefield::new(id, location, attacker, defender, wall_hp, &self.config);
        self.battlefields.insert(id, battlefield);
        self.by_location.insert(location, id);

        info!(battlefield = %id, %location, %attacker, %defender, wall_hp, "battle created");
        self.emit(BattleEvent::BattleCreated {
            battlefield: id,
            location,
        });
        id
    }

    pub fn start_battle(&mut self, id: BattlefieldId) -> Result<()> {
        let now = self.clock.elapsed_secs;
        let started = self
            .battlefields
            .get_mut(&id)
            .ok_or(BattleError::BattlefieldNotFound(id))
            .and_then(|bf| bf.start(now));
        logged("start_battle", started)?;

        info!(battlefield = %id, "battle started");
        self.emit(BattleEvent::BattleStarted { battlefield: id });
        Ok(())
    }

    /// Terminate a battle from outside. A battle whose end conditions already
    /// hold gets that result; anything still undecided ends in a draw.
    pub fn end_battle(&mut self, id: BattlefieldId) -> Result<ReportId> {
        let Some(battlefield) = self.battlefields.get(&id) else {
            return logged("end_battle", Err(BattleError::BattlefieldNotFound(id)));
        };
        let result = match systems::judgement::evaluate(battlefield, self.config.max_duration_secs)
        {
            BattleResult::Ongoing => BattleResult::Draw,
            decided => decided,
        };
        logged("end_battle", self.finalize(id, result))
    }

    // ---- Participation ----

    /// Deploy soldiers for `player`. Soldiers that do not fit under the
    /// faction's cap are queued; capacity never fails a deployment.
    pub fn deploy_soldiers(
        &mut self,
        id: BattlefieldId,
        player: PlayerId,
        nation: NationId,
        squads: &[Squad],
    ) -> Result<DeployOutcome> {
        let outcome = self.try_deploy(id, player, nation, squads);
        let outcome = logged("deploy_soldiers", outcome)?;
        self.emit(BattleEvent::SoldiersDeployed {
            battlefield: id,
            player,
            nation,
            spawned: outcome.spawned,
            queued: outcome.queued,
        });
        Ok(outcome)
    }

    fn try_deploy(
        &mut self,
        id: BattlefieldId,
        player: PlayerId,
        nation: NationId,
        squads: &[Squad],
    ) -> Result<DeployOutcome> {
        let battlefield = self
            .battlefields
            .get_mut(&id)
            .ok_or(BattleError::BattlefieldNotFound(id))?;
        if battlefield.faction(nation).is_none() {
            return Err(BattleError::FactionNotFound {
                battlefield: id,
                nation,
            });
        }
        if !self.gate.try_commit(player, nation, squads) {
            return Err(BattleError::InsufficientResources { player });
        }
        battlefield.deploy(player, nation, squads, &mut self.unit_ids)
    }

    /// Order every live unit of `player` to retreat. Returns how many turned.
    pub fn player_retreat(&mut self, id: BattlefieldId, player: PlayerId) -> Result<u32> {
        let retreated = self
            .battlefields
            .get_mut(&id)
            .ok_or(BattleError::BattlefieldNotFound(id))
            .map(|bf| bf.retreat_player(player));
        let units = logged("player_retreat", retreated)?;

        info!(battlefield = %id, %player, units, "player retreating");
        self.emit(BattleEvent::PlayerRetreated {
            battlefield: id,
            player,
            units,
        });
        Ok(units)
    }

    /// Bring `nation` in as a third party. Returns false if it was already
    /// fighting here in any role.
    pub fn third_party_join(&mut self, id: BattlefieldId, nation: NationId) -> Result<bool> {
        let joined = self
            .battlefields
            .get_mut(&id)
            .ok_or(BattleError::BattlefieldNotFound(id))
            .map(|bf| bf.add_third_party(nation));
        let joined = logged("third_party_join", joined)?;

        if joined {
            info!(battlefield = %id, %nation, "third party joined");
            self.emit(BattleEvent::ThirdPartyJoined {
                battlefield: id,
                nation,
            });
        }
        Ok(joined)
    }

    // ---- Simulation control ----

    pub fn set_time_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            warn!(scale, "ignoring non-finite time scale");
            return;
        }
        self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Queue a command for processing at the next `advance`.
    pub fn queue_command(&mut self, command: BattleCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = BattleCommand>) {
        self.command_queue.extend(commands);
    }

    /// Drain the command queue. Rejected commands are logged and dropped.
    pub fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: BattleCommand) {
        // Direct operations already log their own rejections.
        match command {
            BattleCommand::CreateBattle {
                location,
                attacker,
                defender,
                wall_hp,
            } => {
                self.create_battle(location, attacker, defender, wall_hp);
            }
            BattleCommand::StartBattle { battlefield } => {
                let _ = self.start_battle(battlefield);
            }
            BattleCommand::EndBattle { battlefield } => {
                let _ = self.end_battle(battlefield);
            }
            BattleCommand::DeploySoldiers {
                battlefield,
                player,
                nation,
                squads,
            } => {
                let _ = self.deploy_soldiers(battlefield, player, nation, &squads);
            }
            BattleCommand::PlayerRetreat {
                battlefield,
                player,
            } => {
                let _ = self.player_retreat(battlefield, player);
            }
            BattleCommand::ThirdPartyJoin {
                battlefield,
                nation,
            } => {
                let _ = self.third_party_join(battlefield, nation);
            }
            BattleCommand::SetTimeScale { scale } => self.set_time_scale(scale),
            BattleCommand::Pause => self.pause(),
            BattleCommand::Resume => self.resume(),
        }
    }

    // ---- Ticking ----

    /// Feed `real_dt` seconds of wall-clock time into the simulation.
    ///
    /// Queued commands are processed first. The elapsed time is scaled by the
    /// time scale, then the combat and refill accumulators each fire as many
    /// fixed ticks as they have banked.
    pub fn advance(&mut self, real_dt: f64) {
        self.process_commands();
        if self.paused || !real_dt.is_finite() || real_dt <= 0.0 {
            return;
        }

        let scaled = real_dt * self.time_scale;
        self.combat_accumulator += scaled;
        self.refill_accumulator += scaled;

        while self.combat_accumulator >= self.combat_tick_secs {
            self.combat_accumulator -= self.combat_tick_secs;
            self.tick_combat();
        }
        while self.refill_accumulator >= self.refill_tick_secs {
            self.refill_accumulator -= self.refill_tick_secs;
            self.tick_refill();
        }
    }

    /// One fixed combat step on every Fighting battlefield, followed by the
    /// end-condition check. Returns the battlefields that ended.
    pub fn tick_combat(&mut self) -> Vec<BattlefieldId> {
        let dt = self.combat_tick_secs;
        let max_duration = self.config.max_duration_secs;
        let mut decided = Vec::new();

        for (id, battlefield) in self.battlefields.iter_mut() {
            if !battlefield.is_fighting() {
                continue;
            }
            systems::combat::run(battlefield, dt);
            battlefield.advance_clock(dt);

            let result = systems::judgement::evaluate(battlefield, max_duration);
            if result.is_terminal() {
                decided.push((*id, result));
            }
        }
        self.clock.advance(dt);

        let mut ended = Vec::with_capacity(decided.len());
        for (id, result) in decided {
            if logged("finalize", self.finalize(id, result)).is_ok() {
                ended.push(id);
            }
        }
        ended
    }

    /// One refill step: each Fighting battlefield backfills up to a batch per
    /// faction. Returns the number of soldiers placed.
    pub fn tick_refill(&mut self) -> u32 {
        let mut placed = 0;
        for battlefield in self.battlefields.values_mut() {
            if battlefield.is_fighting() {
                placed += systems::refill::run(battlefield, &mut self.unit_ids);
            }
        }
        placed
    }

    /// Settle, report, close and retire a battlefield.
    fn finalize(&mut self, id: BattlefieldId, result: BattleResult) -> Result<ReportId> {
        let now = self.clock.elapsed_secs;
        let battlefield = self
            .battlefields
            .get_mut(&id)
            .ok_or(BattleError::BattlefieldNotFound(id))?;
        battlefield.settle(result, now)?;

        self.next_report += 1;
        let report_id = ReportId(self.next_report);
        let report = BattleReport::build(report_id, battlefield);
        battlefield.close()?;

        let location = battlefield.location;
        self.battlefields.remove(&id);
        self.by_location.remove(&location);

        let winner = report.winner;
        info!(
            battlefield = %id,
            result = ?result,
            winner = ?winner,
            duration_secs = report.duration_secs,
            "battle ended"
        );
        if let Some(evicted) = self.reports.insert(report) {
            debug!(report = %evicted.id, "evicted oldest battle report");
        }
        self.emit(BattleEvent::BattleEnded {
            battlefield: id,
            result,
            winner,
            report: report_id,
        });
        Ok(report_id)
    }

    fn emit(&mut self, event: BattleEvent) {
        match self.sink.as_mut() {
            Some(sink) => sink.publish(&event),
            None => self.events.push(event),
        }
    }

    // ---- Queries ----

    pub fn snapshot(&self, id: BattlefieldId) -> Result<BattlefieldSnapshot> {
        self.battlefield(id).map(systems::snapshot::build_snapshot)
    }

    /// Snapshots of every active battlefield, in id order.
    pub fn snapshots(&self) -> Vec<BattlefieldSnapshot> {
        self.battlefields
            .values()
            .map(systems::snapshot::build_snapshot)
            .collect()
    }

    pub fn battlefield(&self, id: BattlefieldId) -> Result<&Battlefield> {
        self.battlefields
            .get(&id)
            .ok_or(BattleError::BattlefieldNotFound(id))
    }

    #[cfg(test)]
    pub(crate) fn battlefield_mut(&mut self, id: BattlefieldId) -> Option<&mut Battlefield> {
        self.battlefields.get_mut(&id)
    }

    pub fn battlefield_at(&self, location: LocationId) -> Option<BattlefieldId> {
        self.by_location.get(&location).copied()
    }

    pub fn active_battles(&self) -> impl Iterator<Item = BattlefieldId> + '_ {
        self.battlefields.keys().copied()
    }

    pub fn unit(&self, id: BattlefieldId, unit: UnitId) -> Result<&Unit> {
        self.battlefield(id)?
            .unit(unit)
            .ok_or(BattleError::UnitNotFound(unit))
    }

    pub fn report(&self, id: ReportId) -> Option<&BattleReport> {
        self.reports.get(id)
    }

    /// Cached reports, newest first.
    pub fn recent_reports(&self) -> Vec<&BattleReport> {
        self.reports.recent().collect()
    }

    /// Human-readable summary of a cached report.
    pub fn report_summary(&self, id: ReportId) -> Option<String> {
        self.reports.get(id).map(|r| r.summary(self.names.as_ref()))
    }

    /// Take every event emitted since the last drain. Always empty when a
    /// sink was installed through `with_collaborators`.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        warn!(operation, error = %err, "battle operation rejected");
    }
    result
}
