//! WARFRONT headless host.
//!
//! Loads scenarios, runs the battle manager on a game loop thread (or
//! headless, as fast as possible), and prints the resulting reports.

pub mod error;
pub mod game_loop;
pub mod scenario;
pub mod state;

pub use warfront_core as core;
