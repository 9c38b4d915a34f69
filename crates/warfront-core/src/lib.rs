//! Core types and definitions for the WARFRONT battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, units, commands, events, snapshot views, configuration
//! and constants. It contains no simulation logic.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod unit;

#[cfg(test)]
mod tests;
