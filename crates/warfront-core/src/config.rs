//! Runtime configuration for a battle manager.
//!
//! Every field falls back to the matching constant, so a partial TOML
//! table only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed. Same seed and same command sequence = same battles.
    pub seed: u64,
    /// Initial time scale (1.0 = real time, 0.0 = paused).
    pub time_scale: f64,
    pub combat_tick_secs: f64,
    pub refill_tick_secs: f64,
    pub width: f64,
    pub height: f64,
    pub max_duration_secs: f64,
    pub pool_cap: usize,
    pub pool_batch: usize,
    pub report_capacity: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            combat_tick_secs: COMBAT_TICK_SECS,
            refill_tick_secs: REFILL_TICK_SECS,
            width: BATTLEFIELD_WIDTH,
            height: BATTLEFIELD_HEIGHT,
            max_duration_secs: MAX_BATTLE_DURATION_SECS,
            pool_cap: POOL_CAP,
            pool_batch: POOL_REFILL_BATCH,
            report_capacity: REPORT_CACHE_CAPACITY,
        }
    }
}
