//! Unit AI for WARFRONT.
//!
//! Implements the damage and targeting calculator, per-class data tables
//! and the per-unit behaviour state machine.

pub mod damage;
pub mod fsm;
pub mod profiles;

pub use warfront_core as core;
