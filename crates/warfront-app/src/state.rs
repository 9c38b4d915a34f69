//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use warfront_core::commands::BattleCommand;
use warfront_core::state::BattlefieldSnapshot;

use crate::error::{AppError, Result};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A battle command to forward to the manager.
    Battle(BattleCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` because it is Send but not Sync
/// - `latest_snapshots` is `None` until the loop has completed a frame
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Every active battlefield as of the last frame.
    pub latest_snapshots: Arc<Mutex<Option<Vec<BattlefieldSnapshot>>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshots: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, tx: mpsc::Sender<LoopCommand>) {
        if let Ok(mut lock) = self.command_tx.lock() {
            *lock = Some(tx);
        }
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.lock().map(|tx| tx.is_some()).unwrap_or(false)
    }

    pub fn send(&self, command: BattleCommand) -> Result<()> {
        self.send_raw(LoopCommand::Battle(command))
    }

    /// Ask the loop to stop and forget the sender.
    pub fn shutdown(&self) -> Result<()> {
        let result = self.send_raw(LoopCommand::Shutdown);
        if let Ok(mut lock) = self.command_tx.lock() {
            *lock = None;
        }
        result
    }

    fn send_raw(&self, command: LoopCommand) -> Result<()> {
        let lock = self.command_tx.lock().map_err(|_| AppError::LoopStopped)?;
        match lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::LoopStopped),
            None => Err(AppError::LoopStopped),
        }
    }

    /// Number of active battles in the last frame, if one has been produced.
    pub fn active_battles(&self) -> Option<usize> {
        self.latest_snapshots
            .lock()
            .ok()
            .and_then(|lock| lock.as_ref().map(Vec::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshots.lock().unwrap().is_none());
        assert!(!state.is_running());
        assert_eq!(state.active_battles(), None);
    }

    #[test]
    fn test_send_without_loop_fails() {
        let state = AppState::new();
        assert!(matches!(
            state.send(BattleCommand::Pause),
            Err(AppError::LoopStopped)
        ));
    }

    #[test]
    fn test_send_and_shutdown() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        state.attach(tx);
        assert!(state.is_running());

        state.send(BattleCommand::Resume).unwrap();
        state.shutdown().unwrap();
        assert!(!state.is_running());

        assert!(matches!(
            rx.recv().unwrap(),
            LoopCommand::Battle(BattleCommand::Resume)
        ));
        assert!(matches!(rx.recv().unwrap(), LoopCommand::Shutdown));
        assert!(rx.recv().is_err(), "sender dropped after shutdown");
    }
}
