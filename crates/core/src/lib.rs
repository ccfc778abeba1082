//! Core functionality for the devledger device-registry system.
//!
//! This crate provides the shared types, error taxonomy, configuration,
//! logging setup and the append-only ledger store used across the
//! devledger workspace.

pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;

pub use config::{Config, MonitorConfig, NodeConfig, ReputationConfig};
pub use error::{RegistryError, Result};
pub use ledger::{
    LedgerError, LedgerEvent, LedgerHealth, LedgerHealthInfo, LedgerMetrics, LedgerRecord,
    LedgerStore, MemoryLedger,
};

#[cfg(feature = "sqlite")]
pub use ledger::SqliteLedger;
