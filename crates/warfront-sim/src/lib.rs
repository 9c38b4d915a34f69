//! Battle simulation for WARFRONT.
//!
//! Owns the active battlefields, runs the combat and refill systems at fixed
//! tick rates, and produces snapshots and post-battle reports.

pub mod battlefield;
pub mod collaborators;
pub mod faction;
pub mod manager;
pub mod pool;
pub mod report;
pub mod scenario;
pub mod systems;

pub use warfront_ai as ai;
pub use warfront_core as core;

pub use battlefield::{Battlefield, DeployOutcome};
pub use manager::BattleManager;
pub use report::{BattleReport, ReportCache};
pub use scenario::Scenario;
