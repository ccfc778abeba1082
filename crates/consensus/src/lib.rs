//! Consensus Monitor
//!
//! Tracks cluster-wide agreement state over the ledger store's replica set:
//! - Pluggable replica probing (local store adapter included)
//! - Quorum and replication-lag classification
//! - Fixed-interval polling loop, decoupled from request handling
//! - Stale-snapshot degradation instead of hard failure
//!
//! The monitor never persists its view; every snapshot is a read-time
//! projection over the replicas.

pub mod monitor;
pub mod probe;

pub use monitor::{ConsensusMonitor, ConsensusSnapshot, ConsensusStatus, MonitorHandle};
pub use probe::{LedgerReplica, ProbeError, ReplicaProbe, ReplicaReport};
