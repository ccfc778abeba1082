//! Consensus monitor degradation and staleness behavior

use crate::test_utils::*;
use devledger_consensus::{
    ConsensusMonitor, ConsensusStatus, LedgerReplica, ReplicaProbe,
};
use devledger_core::config::MonitorConfig;
use std::sync::Arc;
use std::time::Duration;

fn fast_monitor_config() -> MonitorConfig {
    MonitorConfig {
        poll_interval_ms: 10,
        probe_timeout_ms: 50,
        lag_threshold: 4,
        quorum_size: 1,
    }
}

#[tokio::test]
async fn test_monitor_tracks_local_ledger_replica() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger.clone());

    let replica = Arc::new(LedgerReplica::new("it-node-1", ledger, true)) as Arc<dyn ReplicaProbe>;
    let monitor = ConsensusMonitor::new(vec![replica], fast_monitor_config());

    let device = registry.register("sensor-1").unwrap();
    registry.update_reputation(&device.id, 1.0).unwrap();

    monitor.poll_once().await;
    let snapshot = monitor.status();

    assert_eq!(snapshot.status, ConsensusStatus::Active);
    assert_eq!(snapshot.leader_id.as_deref(), Some("it-node-1"));
    assert_eq!(snapshot.shard_count, 1);
    assert!(!snapshot.stale);

    std::fs::remove_file(db_path).ok();
}

#[tokio::test]
async fn test_replica_timeout_yields_stale_last_snapshot() {
    let probe = ScriptedProbe::new(
        "replica-1",
        ProbeBehavior::Respond {
            head: 12,
            leader: true,
        },
    );
    let monitor = ConsensusMonitor::new(
        vec![probe.clone() as Arc<dyn ReplicaProbe>],
        fast_monitor_config(),
    );

    monitor.poll_once().await;
    let healthy = monitor.status();
    assert_eq!(healthy.status, ConsensusStatus::Active);

    // Simulated replica timeout
    probe.set(ProbeBehavior::Hang(Duration::from_millis(400)));
    monitor.poll_once().await;

    let snapshot = monitor.status();
    assert!(snapshot.stale);
    assert_eq!(snapshot.status, healthy.status);
    assert_eq!(snapshot.leader_id, healthy.leader_id);
    assert_eq!(snapshot.observed_at, healthy.observed_at);
}

#[tokio::test]
async fn test_quorum_loss_is_reported_as_unreachable() {
    let alive = ScriptedProbe::new(
        "replica-1",
        ProbeBehavior::Respond {
            head: 3,
            leader: false,
        },
    );
    let dead = ScriptedProbe::new("replica-2", ProbeBehavior::Fail);

    let mut config = fast_monitor_config();
    config.quorum_size = 2;

    let monitor = ConsensusMonitor::new(
        vec![alive as Arc<dyn ReplicaProbe>, dead as Arc<dyn ReplicaProbe>],
        config,
    );

    monitor.poll_once().await;
    let snapshot = monitor.status();

    assert_eq!(snapshot.status, ConsensusStatus::Unreachable);
    assert_eq!(snapshot.leader_id, None);
    assert!(!snapshot.stale);
}

#[tokio::test]
async fn test_polling_loop_runs_and_stops_without_touching_requests() {
    let db_path = temp_db_path();
    let ledger = open_ledger(&db_path);
    let registry = test_registry(ledger.clone());

    let replica = Arc::new(LedgerReplica::new("it-node-1", ledger, true)) as Arc<dyn ReplicaProbe>;
    let monitor = Arc::new(ConsensusMonitor::new(vec![replica], fast_monitor_config()));

    let handle = ConsensusMonitor::spawn(monitor.clone());
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(monitor.status().status, ConsensusStatus::Active);

    // Registry operations keep working while and after the loop shuts down
    let device = registry.register("sensor-1").unwrap();
    handle.shutdown().await;
    assert_eq!(registry.get(&device.id).unwrap().reputation, 3.0);

    std::fs::remove_file(db_path).ok();
}
