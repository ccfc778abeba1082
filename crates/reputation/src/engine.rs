//! Score derivation and adjustment against the ledger.

use crate::state::{fold, ReputationState};
use devledger_core::config::ReputationConfig;
use devledger_core::error::{RegistryError, Result};
use devledger_core::ledger::{LedgerError, LedgerEvent, LedgerStore};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Computes and updates device reputation over a shared ledger store.
///
/// Concurrent updates to the same device are serialized through the ledger's
/// per-device compare-and-swap: an append that loses the race is retried
/// against the new head, up to the configured bound.
pub struct ReputationEngine {
    ledger: Arc<dyn LedgerStore>,
    config: ReputationConfig,
}

impl ReputationEngine {
    pub fn new(ledger: Arc<dyn LedgerStore>, config: ReputationConfig) -> Self {
        Self { ledger, config }
    }

    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    /// Current reputation state for a device.
    ///
    /// Idempotent: repeated calls without intervening appends return
    /// identical state.
    pub fn current(&self, device_id: &str) -> Result<ReputationState> {
        let records = self.ledger.read_device(device_id)?;
        fold(device_id, &self.config, &records)
    }

    /// Apply a reputation delta to a device.
    pub fn apply(&self, device_id: &str, delta: f64) -> Result<ReputationState> {
        self.apply_event(device_id, LedgerEvent::ReputationDelta { delta })
    }

    /// Append an event for a registered, non-retired device with bounded
    /// optimistic-concurrency retry.
    ///
    /// A lost head race re-reads the device and retries with backoff; after
    /// `max_append_retries` lost races the call fails with
    /// `ConcurrentUpdate`. Transient storage failures share the same retry
    /// budget and surface unchanged once it is exhausted.
    pub fn apply_event(&self, device_id: &str, event: LedgerEvent) -> Result<ReputationState> {
        let max_attempts = self.config.max_append_retries.max(1);

        for attempt in 1..=max_attempts {
            let state = self.current(device_id)?;
            if state.retired {
                return Err(RegistryError::NotFound {
                    device_id: device_id.to_string(),
                });
            }

            match self
                .ledger
                .append(device_id, event.clone(), Some(state.head_sequence))
            {
                Ok(record) => {
                    let next = state.advanced(&record, &self.config);
                    debug!(
                        device_id = %device_id,
                        sequence = record.sequence,
                        score = next.score,
                        attempt = attempt,
                        "Reputation event committed"
                    );
                    return Ok(next);
                }
                Err(err) => {
                    let lost_race = matches!(err, LedgerError::HeadConflict { .. });
                    let converted: RegistryError = err.into();

                    if attempt == max_attempts {
                        if lost_race {
                            warn!(
                                device_id = %device_id,
                                attempts = max_attempts,
                                "Concurrent update retries exhausted"
                            );
                            return Err(RegistryError::ConcurrentUpdate {
                                device_id: device_id.to_string(),
                                attempts: max_attempts,
                            });
                        }
                        return Err(converted);
                    }

                    match converted {
                        RegistryError::Conflict { .. }
                        | RegistryError::Timeout { .. }
                        | RegistryError::Io(_)
                        | RegistryError::Storage(_) => {
                            debug!(
                                device_id = %device_id,
                                attempt = attempt,
                                "Append failed transiently, backing off"
                            );
                            self.backoff(attempt);
                        }
                        other => return Err(other),
                    }
                }
            }
        }

        Err(RegistryError::ConcurrentUpdate {
            device_id: device_id.to_string(),
            attempts: max_attempts,
        })
    }

    /// Linear backoff with jitter so concurrent losers do not retry in
    /// lockstep.
    fn backoff(&self, attempt: u32) {
        let base_ms = self.config.retry_backoff_ms;
        let jitter_ms = rand::thread_rng().gen_range(0..=base_ms.max(1));
        std::thread::sleep(Duration::from_millis(base_ms * attempt as u64 + jitter_ms));
    }
}
