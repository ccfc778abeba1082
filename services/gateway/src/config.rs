use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub node_id: String,
    /// Ledger database location; the gateway runs on the in-memory store
    /// when unset.
    pub data_dir: Option<PathBuf>,
    /// Optional TOML file with node/reputation/monitor settings.
    pub config_file: Option<PathBuf>,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        GatewayConfig {
            port: env::var("DEVLEDGER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            node_id: env::var("DEVLEDGER_NODE_ID").unwrap_or_else(|_| "node-001".to_string()),
            data_dir: env::var("DEVLEDGER_DATA_DIR").ok().map(PathBuf::from),
            config_file: env::var("DEVLEDGER_CONFIG").ok().map(PathBuf::from),
        }
    }
}
