//! WARFRONT battle runner.
//!
//! Runs a scenario to completion and prints a report for every battle.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{info, warn};

use warfront_app::error::{AppError, Result};
use warfront_app::game_loop::{self, FRAME_DURATION};
use warfront_app::scenario;
use warfront_app::state::AppState;
use warfront_core::events::BattleEvent;
use warfront_sim::collaborators::Unmetered;
use warfront_sim::{BattleManager, BattleReport};

/// WARFRONT battle runner - simulate sieges and print battle reports
#[derive(Parser, Debug)]
#[command(name = "warfront")]
#[command(about = "Run siege battles headless and print their reports")]
struct Args {
    /// Scenario TOML file; overrides --preset
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario: skirmish or siege
    #[arg(long, default_value = "siege")]
    preset: String,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation speed multiplier (0 - 16)
    #[arg(long)]
    time_scale: Option<f64>,

    /// Maximum seconds of input time to feed before giving up
    #[arg(long, default_value_t = 3600.0)]
    max_secs: f64,

    /// Run on the 30Hz game loop thread instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print reports as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("warfront: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut scenario = match &args.scenario {
        Some(path) => scenario::load(path)?,
        None => scenario::preset(&args.preset)?,
    };
    if let Some(seed) = args.seed {
        scenario.config.seed = seed;
    }
    if let Some(scale) = args.time_scale {
        scenario.config.time_scale = scale;
    }
    info!(
        name = %scenario.name,
        battles = scenario.battles.len(),
        seed = scenario.config.seed,
        "loaded scenario"
    );

    let manager = if args.realtime {
        run_realtime(scenario, args.max_secs)?
    } else {
        let mut manager = BattleManager::new(scenario.config.clone());
        scenario.apply(&mut manager)?;
        let step = manager.config().combat_tick_secs;
        let fed = game_loop::run_headless(&mut manager, step, args.max_secs);
        info!(fed_secs = fed, "headless run finished");
        manager
    };

    let remaining = manager.active_battles().count();
    if remaining > 0 {
        warn!(remaining, "battles still running when the time budget ran out");
    }
    print_reports(&manager, args.json)
}

/// Run on the game loop thread, listening for battle events until every
/// opened battle has ended or the budget is spent.
fn run_realtime(scenario: warfront_sim::Scenario, max_secs: f64) -> Result<BattleManager> {
    let (event_tx, event_rx) = mpsc::channel::<BattleEvent>();
    let mut manager = BattleManager::with_collaborators(
        scenario.config.clone(),
        Box::new(Unmetered),
        Box::new(event_tx),
    );
    let opened = scenario.apply(&mut manager)?.len();

    let state = AppState::new();
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(manager, state.latest_snapshots.clone())?;
    state.attach(cmd_tx);

    let deadline = Instant::now() + Duration::from_secs_f64(max_secs.max(0.0));
    let mut ended = 0;
    while ended < opened && Instant::now() < deadline {
        match event_rx.recv_timeout(FRAME_DURATION) {
            Ok(BattleEvent::BattleEnded {
                battlefield,
                result,
                ..
            }) => {
                info!(%battlefield, ?result, "battle finished");
                ended += 1;
            }
            Ok(_) | Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    if let Err(err) = state.shutdown() {
        warn!(%err, "game loop already stopped");
    }
    handle.join().map_err(|_| AppError::LoopStopped)
}

fn print_reports(manager: &BattleManager, json: bool) -> Result<()> {
    let mut reports: Vec<&BattleReport> = manager.recent_reports();
    reports.reverse();
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    for report in reports {
        if let Some(summary) = manager.report_summary(report.id) {
            println!("{summary}");
        }
    }
    Ok(())
}
