//! Replica probing
//!
//! The monitor observes the cluster through `ReplicaProbe` implementations
//! rather than a concrete replication protocol; anything that can report a
//! replica's head sequence can participate.

use devledger_core::ledger::LedgerStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Replica unreachable: {0}")]
    Unreachable(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Observation reported by a single replica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaReport {
    /// Replica identifier
    pub replica_id: String,
    /// Highest committed sequence on the replica
    pub head_sequence: u64,
    /// Whether the replica considers itself the leader
    pub is_leader: bool,
}

/// A member of the ledger's replica set, as seen by the monitor.
pub trait ReplicaProbe: Send + Sync {
    /// Replica identifier, stable across probes.
    fn replica_id(&self) -> &str;

    /// Take one observation of the replica.
    fn probe(&self) -> Result<ReplicaReport>;
}

/// Probe adapter over a ledger store held in this process.
pub struct LedgerReplica {
    replica_id: String,
    ledger: Arc<dyn LedgerStore>,
    leader: bool,
}

impl LedgerReplica {
    pub fn new(replica_id: impl Into<String>, ledger: Arc<dyn LedgerStore>, leader: bool) -> Self {
        Self {
            replica_id: replica_id.into(),
            ledger,
            leader,
        }
    }
}

impl ReplicaProbe for LedgerReplica {
    fn replica_id(&self) -> &str {
        &self.replica_id
    }

    fn probe(&self) -> Result<ReplicaReport> {
        let head_sequence = self
            .ledger
            .latest_sequence()
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        Ok(ReplicaReport {
            replica_id: self.replica_id.clone(),
            head_sequence,
            is_leader: self.leader,
        })
    }
}
