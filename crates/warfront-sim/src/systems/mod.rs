//! Systems that operate on a battlefield each tick.
//!
//! Systems are free functions over `&mut Battlefield` (or `&Battlefield` for
//! read-only ones). They hold no state of their own.

pub mod combat;
pub mod judgement;
pub mod refill;
pub mod snapshot;
