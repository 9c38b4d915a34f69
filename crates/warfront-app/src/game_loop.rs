//! Game loop thread: feeds real elapsed time to the battle manager at 30Hz
//! and publishes snapshots.
//!
//! The manager moves into the thread and is handed back through the join
//! handle when the loop stops. Commands arrive via `mpsc` channel. Snapshots
//! are stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use warfront_core::state::BattlefieldSnapshot;
use warfront_sim::BattleManager;

use crate::state::LoopCommand;

pub const FRAME_RATE: u32 = 30;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

pub type SharedSnapshots = Arc<Mutex<Option<Vec<BattlefieldSnapshot>>>>;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the manager back
/// once the loop has shut down.
pub fn spawn_game_loop(
    manager: BattleManager,
    latest_snapshots: SharedSnapshots,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<BattleManager>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("warfront-game-loop".into())
        .spawn(move || run_game_loop(manager, cmd_rx, &latest_snapshots))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut manager: BattleManager,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshots: &Mutex<Option<Vec<BattlefieldSnapshot>>>,
) -> BattleManager {
    info!("game loop started");
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Battle(cmd)) => manager.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped");
                    return manager;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Feed the real time since the last frame (manager applies scale and pause)
        let now = Instant::now();
        manager.advance((now - last_frame).as_secs_f64());
        last_frame = now;
        log_events(&mut manager);

        // 3. Store latest snapshots for synchronous polling
        if let Ok(mut lock) = latest_snapshots.lock() {
            *lock = Some(manager.snapshots());
        }

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Drive `manager` without a clock: feed fixed `step_secs` increments until
/// no battle remains active or `budget_secs` of input time has been fed.
/// Buffered events are logged and dropped as they arrive. Returns the input
/// time consumed.
pub fn run_headless(manager: &mut BattleManager, step_secs: f64, budget_secs: f64) -> f64 {
    let step = step_secs.max(1e-3);
    let mut fed = 0.0;
    manager.process_commands();
    log_events(manager);
    while fed < budget_secs && manager.active_battles().next().is_some() {
        manager.advance(step);
        log_events(manager);
        fed += step;
    }
    fed
}

fn log_events(manager: &mut BattleManager) {
    for event in manager.drain_events() {
        debug!(?event, "battle event");
    }
}
