//! Cluster status classification and the polling loop.

use crate::probe::{ReplicaProbe, ReplicaReport};
use devledger_core::config::MonitorConfig;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Cluster-level agreement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusStatus {
    /// Quorum reachable, replication lag below threshold
    Active,
    /// Quorum reachable, replication lag above threshold
    Degraded,
    /// No quorum
    Unreachable,
}

/// Read-time projection over the replica set.
///
/// Never persisted independently; `stale` is set when the last poll round
/// produced no observation and the snapshot carries over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusSnapshot {
    pub status: ConsensusStatus,
    pub leader_id: Option<String>,
    pub shard_count: usize,
    pub replication_lag: u64,
    pub stale: bool,
    /// Timestamp of the poll round that produced this snapshot
    /// (Unix milliseconds, 0 before the first observation)
    pub observed_at: u64,
}

/// Tracks cluster-wide agreement state over the replica set.
///
/// `status()` never fails: polling failures degrade to stale-snapshot
/// reporting instead of surfacing errors to the caller.
pub struct ConsensusMonitor {
    replicas: Vec<Arc<dyn ReplicaProbe>>,
    config: MonitorConfig,
    snapshot: RwLock<ConsensusSnapshot>,
}

impl ConsensusMonitor {
    pub fn new(replicas: Vec<Arc<dyn ReplicaProbe>>, config: MonitorConfig) -> Self {
        let snapshot = ConsensusSnapshot {
            status: ConsensusStatus::Unreachable,
            leader_id: None,
            shard_count: replicas.len(),
            replication_lag: 0,
            stale: true,
            observed_at: 0,
        };

        Self {
            replicas,
            config,
            snapshot: RwLock::new(snapshot),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn status(&self) -> ConsensusSnapshot {
        self.snapshot.read().unwrap().clone()
    }

    /// Run one poll round and fold the outcome into the snapshot.
    ///
    /// Each probe runs on the blocking pool with a bounded wait; a replica
    /// that hangs counts as unresponsive for the round. A round with zero
    /// responses leaves the previous snapshot in place, flagged stale.
    pub async fn poll_once(&self) {
        let mut reports = Vec::new();

        for replica in &self.replicas {
            let probe = replica.clone();
            let outcome = timeout(
                self.config.probe_timeout(),
                tokio::task::spawn_blocking(move || probe.probe()),
            )
            .await;

            match outcome {
                Ok(Ok(Ok(report))) => reports.push(report),
                Ok(Ok(Err(e))) => {
                    warn!(
                        replica_id = %replica.replica_id(),
                        error = %e,
                        "Replica probe failed"
                    );
                }
                Ok(Err(e)) => {
                    warn!(
                        replica_id = %replica.replica_id(),
                        error = %e,
                        "Replica probe task failed"
                    );
                }
                Err(_) => {
                    warn!(
                        replica_id = %replica.replica_id(),
                        timeout_ms = self.config.probe_timeout_ms,
                        "Replica probe timed out"
                    );
                }
            }
        }

        if reports.is_empty() {
            let mut snapshot = self.snapshot.write().unwrap();
            snapshot.stale = true;
            warn!("Poll round produced no replica reports, snapshot carried over as stale");
            return;
        }

        let fresh = self.classify(&reports);
        debug!(
            status = ?fresh.status,
            leader_id = ?fresh.leader_id,
            replication_lag = fresh.replication_lag,
            responders = reports.len(),
            "Consensus snapshot refreshed"
        );
        *self.snapshot.write().unwrap() = fresh;
    }

    fn classify(&self, reports: &[ReplicaReport]) -> ConsensusSnapshot {
        let min_head = reports.iter().map(|r| r.head_sequence).min().unwrap_or(0);
        let max_head = reports.iter().map(|r| r.head_sequence).max().unwrap_or(0);
        let replication_lag = max_head - min_head;

        let status = if reports.len() < self.config.quorum_size {
            ConsensusStatus::Unreachable
        } else if replication_lag <= self.config.lag_threshold {
            ConsensusStatus::Active
        } else {
            ConsensusStatus::Degraded
        };

        // Self-reported leader wins; otherwise the most advanced responder
        let leader_id = if status == ConsensusStatus::Unreachable {
            None
        } else {
            reports
                .iter()
                .find(|r| r.is_leader)
                .or_else(|| reports.iter().max_by_key(|r| r.head_sequence))
                .map(|r| r.replica_id.clone())
        };

        ConsensusSnapshot {
            status,
            leader_id,
            shard_count: self.replicas.len(),
            replication_lag,
            stale: false,
            observed_at: current_timestamp_ms(),
        }
    }

    /// Start the fixed-interval polling loop.
    ///
    /// The loop runs as an independent task and can be cancelled through the
    /// returned handle without affecting in-flight requests.
    pub fn spawn(monitor: Arc<ConsensusMonitor>) -> MonitorHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let poll_interval = monitor.config.poll_interval();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => monitor.poll_once().await,
                    _ = shutdown_rx.changed() => {
                        info!("Consensus monitor shutting down");
                        break;
                    }
                }
            }
        });

        MonitorHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to the monitor's polling task.
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Signal the polling loop to stop and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeError;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy)]
    enum Behavior {
        Respond { head: u64, leader: bool },
        Fail,
        Hang(Duration),
    }

    struct ScriptedProbe {
        replica_id: String,
        behavior: Mutex<Behavior>,
    }

    impl ScriptedProbe {
        fn new(replica_id: &str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                replica_id: replica_id.to_string(),
                behavior: Mutex::new(behavior),
            })
        }

        fn set(&self, behavior: Behavior) {
            *self.behavior.lock().unwrap() = behavior;
        }
    }

    impl ReplicaProbe for ScriptedProbe {
        fn replica_id(&self) -> &str {
            &self.replica_id
        }

        fn probe(&self) -> crate::probe::Result<ReplicaReport> {
            let behavior = *self.behavior.lock().unwrap();
            match behavior {
                Behavior::Respond { head, leader } => Ok(ReplicaReport {
                    replica_id: self.replica_id.clone(),
                    head_sequence: head,
                    is_leader: leader,
                }),
                Behavior::Fail => Err(ProbeError::Unreachable("scripted failure".to_string())),
                Behavior::Hang(duration) => {
                    std::thread::sleep(duration);
                    Err(ProbeError::Unreachable("woke after hang".to_string()))
                }
            }
        }
    }

    fn test_config() -> MonitorConfig {
        MonitorConfig {
            poll_interval_ms: 10,
            probe_timeout_ms: 50,
            lag_threshold: 4,
            quorum_size: 1,
        }
    }

    #[tokio::test]
    async fn test_initial_snapshot_is_stale_unreachable() {
        let monitor = ConsensusMonitor::new(vec![], test_config());
        let snapshot = monitor.status();

        assert_eq!(snapshot.status, ConsensusStatus::Unreachable);
        assert!(snapshot.stale);
        assert_eq!(snapshot.observed_at, 0);
    }

    #[tokio::test]
    async fn test_active_when_quorum_and_low_lag() {
        let probe = ScriptedProbe::new("replica-1", Behavior::Respond { head: 7, leader: true });
        let monitor = ConsensusMonitor::new(vec![probe as Arc<dyn ReplicaProbe>], test_config());

        monitor.poll_once().await;
        let snapshot = monitor.status();

        assert_eq!(snapshot.status, ConsensusStatus::Active);
        assert_eq!(snapshot.leader_id.as_deref(), Some("replica-1"));
        assert_eq!(snapshot.replication_lag, 0);
        assert!(!snapshot.stale);
        assert!(snapshot.observed_at > 0);
    }

    #[tokio::test]
    async fn test_degraded_when_lag_above_threshold() {
        let mut config = test_config();
        config.quorum_size = 2;

        let fast = ScriptedProbe::new("replica-1", Behavior::Respond { head: 100, leader: true });
        let slow = ScriptedProbe::new("replica-2", Behavior::Respond { head: 10, leader: false });
        let monitor = ConsensusMonitor::new(vec![fast as Arc<dyn ReplicaProbe>, slow], config);

        monitor.poll_once().await;
        let snapshot = monitor.status();

        assert_eq!(snapshot.status, ConsensusStatus::Degraded);
        assert_eq!(snapshot.replication_lag, 90);
        assert!(!snapshot.stale);
    }

    #[tokio::test]
    async fn test_unreachable_below_quorum_is_a_fresh_observation() {
        let mut config = test_config();
        config.quorum_size = 2;

        let alive = ScriptedProbe::new("replica-1", Behavior::Respond { head: 5, leader: false });
        let dead = ScriptedProbe::new("replica-2", Behavior::Fail);
        let monitor = ConsensusMonitor::new(vec![alive as Arc<dyn ReplicaProbe>, dead], config);

        monitor.poll_once().await;
        let snapshot = monitor.status();

        assert_eq!(snapshot.status, ConsensusStatus::Unreachable);
        assert_eq!(snapshot.leader_id, None);
        assert!(!snapshot.stale);
    }

    #[tokio::test]
    async fn test_leader_falls_back_to_most_advanced_responder() {
        let mut config = test_config();
        config.quorum_size = 2;
        config.lag_threshold = 100;

        let a = ScriptedProbe::new("replica-1", Behavior::Respond { head: 3, leader: false });
        let b = ScriptedProbe::new("replica-2", Behavior::Respond { head: 9, leader: false });
        let monitor = ConsensusMonitor::new(vec![a as Arc<dyn ReplicaProbe>, b], config);

        monitor.poll_once().await;
        assert_eq!(monitor.status().leader_id.as_deref(), Some("replica-2"));
    }

    #[tokio::test]
    async fn test_total_poll_failure_keeps_last_snapshot_stale() {
        let probe = ScriptedProbe::new("replica-1", Behavior::Respond { head: 7, leader: true });
        let monitor =
            ConsensusMonitor::new(vec![probe.clone() as Arc<dyn ReplicaProbe>], test_config());

        monitor.poll_once().await;
        let healthy = monitor.status();
        assert_eq!(healthy.status, ConsensusStatus::Active);
        assert!(!healthy.stale);

        // Simulated replica timeout: the probe hangs past the bounded wait
        probe.set(Behavior::Hang(Duration::from_millis(500)));
        monitor.poll_once().await;

        let degraded = monitor.status();
        assert_eq!(degraded.status, ConsensusStatus::Active);
        assert_eq!(degraded.leader_id, healthy.leader_id);
        assert_eq!(degraded.observed_at, healthy.observed_at);
        assert!(degraded.stale);
    }

    #[tokio::test]
    async fn test_polling_loop_spawns_and_shuts_down_cleanly() {
        let probe = ScriptedProbe::new("replica-1", Behavior::Respond { head: 1, leader: true });
        let monitor = Arc::new(ConsensusMonitor::new(
            vec![probe as Arc<dyn ReplicaProbe>],
            test_config(),
        ));

        let handle = ConsensusMonitor::spawn(monitor.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = monitor.status();
        assert_eq!(snapshot.status, ConsensusStatus::Active);
        assert!(!snapshot.stale);

        handle.shutdown().await;
    }
}
