//! Reputation Engine
//!
//! Derives per-device reputation scores from the ledger:
//! - Pure, sequence-ordered fold over a device's records
//! - Clamped score arithmetic with configurable bounds and default
//! - Bounded optimistic-concurrency retry for score adjustments
//!
//! Reputation is never stored directly; recomputing the fold over the full
//! record sequence always reproduces the same value.

pub mod engine;
pub mod state;

pub use engine::ReputationEngine;
pub use state::{fold, ReputationState};
