//! Configuration management for devledger.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub reputation: ReputationConfig,
    pub monitor: MonitorConfig,
}

/// Identity and storage settings for this node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub node_id: String,
    pub data_dir: String,
    /// Upper bound on how long an append may wait on a busy database
    /// before failing with a retryable error.
    pub busy_timeout_ms: u64,
}

/// Reputation scoring settings.
///
/// Scores are clamped to `[min_score, max_score]`; `Register` events
/// initialize a device at `default_score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationConfig {
    pub default_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    /// Bounded retry budget for appends that lose the optimistic-concurrency
    /// race or hit a transient storage failure.
    pub max_append_retries: u32,
    pub retry_backoff_ms: u64,
}

/// Consensus monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    pub probe_timeout_ms: u64,
    /// Maximum head-sequence spread between replicas before the cluster is
    /// classified as Degraded.
    pub lag_threshold: u64,
    /// Minimum number of responding replicas required for quorum.
    pub quorum_size: usize,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            node: NodeConfig::default(),
            reputation: ReputationConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: "node-001".to_string(),
            data_dir: "data".to_string(),
            busy_timeout_ms: 5_000,
        }
    }
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            default_score: 3.0,
            min_score: 0.0,
            max_score: 5.0,
            max_append_retries: 5,
            retry_backoff_ms: 25,
        }
    }
}

impl ReputationConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Reject configurations the fold cannot honor.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.min_score > self.max_score {
            return Err(crate::error::RegistryError::Validation(format!(
                "min_score {} exceeds max_score {}",
                self.min_score, self.max_score
            )));
        }
        if self.default_score < self.min_score || self.default_score > self.max_score {
            return Err(crate::error::RegistryError::Validation(format!(
                "default_score {} outside [{}, {}]",
                self.default_score, self.min_score, self.max_score
            )));
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5_000,
            probe_timeout_ms: 1_000,
            lag_threshold: 32,
            quorum_size: 1,
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
