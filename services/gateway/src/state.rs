use devledger_consensus::{ConsensusMonitor, LedgerReplica, ReplicaProbe};
use devledger_core::config::Config;
use devledger_core::ledger::{LedgerStore, MemoryLedger, SqliteLedger};
use devledger_registry::DeviceRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::GatewayConfig;

pub struct AppState {
    pub registry: DeviceRegistry,
    pub monitor: Arc<ConsensusMonitor>,
    pub ledger: Arc<dyn LedgerStore>,
}

impl AppState {
    pub fn new(gateway: &GatewayConfig) -> anyhow::Result<Self> {
        let config = match &gateway.config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::default_config(),
        };
        config.reputation.validate()?;

        let ledger: Arc<dyn LedgerStore> = match &gateway.data_dir {
            Some(dir) => Arc::new(SqliteLedger::open(
                dir.join("ledger.db"),
                gateway.node_id.clone(),
                Duration::from_millis(config.node.busy_timeout_ms),
            )?),
            None => {
                info!("No data dir configured, running on the in-memory ledger");
                Arc::new(MemoryLedger::new(gateway.node_id.clone()))
            }
        };

        let registry = DeviceRegistry::new(ledger.clone(), config.reputation.clone());

        let replicas = vec![Arc::new(LedgerReplica::new(
            gateway.node_id.clone(),
            ledger.clone(),
            true,
        )) as Arc<dyn ReplicaProbe>];
        let monitor = Arc::new(ConsensusMonitor::new(replicas, config.monitor.clone()));

        Ok(AppState {
            registry,
            monitor,
            ledger,
        })
    }
}
