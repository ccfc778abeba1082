//! Integration tests for the devledger workspace
//!
//! This test suite validates:
//! - Complete device lifecycle over the durable ledger
//! - Concurrent reputation updates under optimistic concurrency
//! - Consensus monitor degradation and staleness behavior

pub mod test_utils;

#[cfg(test)]
mod device_lifecycle_tests;

#[cfg(test)]
mod concurrency_tests;

#[cfg(test)]
mod consensus_monitor_tests;
