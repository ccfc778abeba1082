//! Shared helpers for the integration suite.

use devledger_consensus::{ProbeError, ReplicaProbe, ReplicaReport};
use devledger_core::config::ReputationConfig;
use devledger_core::ledger::{LedgerStore, SqliteLedger};
use devledger_registry::DeviceRegistry;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fresh path for a throwaway ledger database.
pub fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("devledger_it_{}.db", uuid::Uuid::new_v4()))
}

/// Open a SQLite-backed ledger for tests.
pub fn open_ledger(path: &std::path::Path) -> Arc<dyn LedgerStore> {
    Arc::new(SqliteLedger::open(path, "it-node-1", Duration::from_millis(500)).unwrap())
}

/// Registry with fast retry settings suitable for contention tests.
pub fn test_registry(ledger: Arc<dyn LedgerStore>) -> DeviceRegistry {
    let mut config = ReputationConfig::default();
    config.max_append_retries = 32;
    config.retry_backoff_ms = 1;
    DeviceRegistry::new(ledger, config)
}

/// Probe behavior for scripted replicas.
#[derive(Debug, Clone, Copy)]
pub enum ProbeBehavior {
    Respond { head: u64, leader: bool },
    Fail,
    Hang(Duration),
}

/// Replica probe whose behavior can be changed between poll rounds.
pub struct ScriptedProbe {
    replica_id: String,
    behavior: Mutex<ProbeBehavior>,
}

impl ScriptedProbe {
    pub fn new(replica_id: &str, behavior: ProbeBehavior) -> Arc<Self> {
        Arc::new(Self {
            replica_id: replica_id.to_string(),
            behavior: Mutex::new(behavior),
        })
    }

    pub fn set(&self, behavior: ProbeBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }
}

impl ReplicaProbe for ScriptedProbe {
    fn replica_id(&self) -> &str {
        &self.replica_id
    }

    fn probe(&self) -> Result<ReplicaReport, ProbeError> {
        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            ProbeBehavior::Respond { head, leader } => Ok(ReplicaReport {
                replica_id: self.replica_id.clone(),
                head_sequence: head,
                is_leader: leader,
            }),
            ProbeBehavior::Fail => Err(ProbeError::Unreachable("scripted failure".to_string())),
            ProbeBehavior::Hang(duration) => {
                std::thread::sleep(duration);
                Err(ProbeError::Unreachable("woke after hang".to_string()))
            }
        }
    }
}
